/// Fatal failures of the styleName pass. Either one aborts the current file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleNameError {
  /// The plugin options are missing `extensions` or carry a malformed value
  #[error("{0}")]
  Configuration(String),
  /// More than one extension-matching import without specifiers in one file
  #[error("Cannot use anonymous style name with more than one stylesheet import.")]
  AmbiguousAnonymousImport { count: usize },
}

impl StyleNameError {
  pub fn missing_extensions() -> Self {
    StyleNameError::Configuration(String::from(
      "You have not specified any extensions in the plugin options.",
    ))
  }

  pub fn is_configuration(&self) -> bool {
    matches!(self, StyleNameError::Configuration(_))
  }
}
