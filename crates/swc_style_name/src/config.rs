use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::StyleNameError;

pub const DEFAULT_ATTRIBUTE_NAME: &str = "styleName";
pub const DEFAULT_PROCESSOR_MODULE: &str = "react-native-dynamic-style-processor";

fn default_attribute_name() -> String {
  DEFAULT_ATTRIBUTE_NAME.to_string()
}

fn default_processor_module() -> String {
  DEFAULT_PROCESSOR_MODULE.to_string()
}

/// Options of the styleName transform, as supplied by the host once per run.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleNameConfig {
  ///
  /// Source suffixes identifying style sheet imports, eg. `[".css", ".scss"]`.
  ///
  /// Required and non-empty.
  ///
  pub extensions: Vec<String>,
  ///
  /// Attribute that triggers the rewrite.
  ///
  /// Defaults to `styleName`
  ///
  #[serde(default = "default_attribute_name")]
  pub attribute_name: String,
  ///
  /// Module imported at the top of every file. The first style import is
  /// removed again from files that never use the attribute.
  ///
  /// Defaults to `None`
  ///
  #[serde(default)]
  pub add_import: Option<String>,
  ///
  /// Attributes that receive defaults from the first computed style.
  ///
  /// Defaults to `[]`
  ///
  #[serde(default)]
  pub add_attributes: Vec<String>,
  ///
  /// Module loaded into the processor binding.
  ///
  /// Defaults to `react-native-dynamic-style-processor`
  ///
  #[serde(default = "default_processor_module")]
  pub processor_module: String,
}

impl StyleNameConfig {
  pub fn new(extensions: Vec<String>) -> Self {
    StyleNameConfig {
      extensions,
      attribute_name: default_attribute_name(),
      add_import: None,
      add_attributes: vec![],
      processor_module: default_processor_module(),
    }
  }

  pub fn from_json(options: &str) -> Result<Self, StyleNameError> {
    let value = serde_json::from_str::<Value>(options)
      .map_err(|err| StyleNameError::Configuration(format!("Invalid plugin options: {err}")))?;
    Self::from_value(value)
  }

  /// Reads the options from an untyped JSON value, so missing or mistyped
  /// `extensions` surface as the dedicated configuration error.
  pub fn from_value(value: Value) -> Result<Self, StyleNameError> {
    match value.get("extensions") {
      Some(Value::Array(extensions)) => {
        if extensions.iter().any(|extension| !extension.is_string()) {
          return Err(StyleNameError::Configuration(String::from(
            "The `extensions` plugin option must be a list of strings.",
          )));
        }
      }
      _ => return Err(StyleNameError::missing_extensions()),
    }

    let config = serde_json::from_value::<StyleNameConfig>(value)
      .map_err(|err| StyleNameError::Configuration(format!("Invalid plugin options: {err}")))?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), StyleNameError> {
    if self.extensions.is_empty() {
      return Err(StyleNameError::missing_extensions());
    }

    if self.extensions.iter().any(|extension| extension.is_empty()) {
      return Err(StyleNameError::Configuration(String::from(
        "The `extensions` plugin option must not contain empty suffixes.",
      )));
    }

    Ok(())
  }

  /// Whether `source` ends with one of the configured suffixes
  pub fn is_style_source(&self, source: &str) -> bool {
    self
      .extensions
      .iter()
      .any(|extension| source.ends_with(extension.as_str()))
  }

  /// The original attribute is kept next to the computed `style` unless it is
  /// the default `styleName`.
  pub fn preserves_original_attribute(&self) -> bool {
    self.attribute_name != DEFAULT_ATTRIBUTE_NAME
  }
}
