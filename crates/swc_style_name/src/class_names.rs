/// One entry of a static class name string, eg. `button` or `styles.button`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassNameToken<'a> {
  pub raw: &'a str,
  /// Local name of the style import the rule is read from
  pub module: Option<&'a str>,
  pub name: &'a str,
}

impl<'a> ClassNameToken<'a> {
  /// Splits on the first `.` only; `a.b.c` addresses rule `b` of `a`.
  /// Returns `None` for tokens with an empty module or rule part.
  pub fn parse(raw: &'a str) -> Option<Self> {
    let mut parts = raw.split('.');
    let first = parts.next()?;

    let token = match parts.next() {
      Some(name) => ClassNameToken {
        raw,
        module: Some(first),
        name,
      },
      None => ClassNameToken {
        raw,
        module: None,
        name: first,
      },
    };

    if token.name.is_empty() || token.module.is_some_and(str::is_empty) {
      return None;
    }

    Some(token)
  }
}

/// Tokenizes a class name string. Runs of whitespace are tolerated and
/// malformed tokens are dropped.
pub fn parse_class_names(value: &str) -> Vec<ClassNameToken<'_>> {
  value
    .split_whitespace()
    .filter_map(ClassNameToken::parse)
    .collect()
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn test_unqualified_tokens() {
    assert_eq!(
      parse_class_names("wrapper  title "),
      vec![
        ClassNameToken {
          raw: "wrapper",
          module: None,
          name: "wrapper",
        },
        ClassNameToken {
          raw: "title",
          module: None,
          name: "title",
        },
      ]
    );
  }

  #[test]
  fn test_qualified_tokens() {
    assert_eq!(
      parse_class_names("styles.wrapper other.text-large"),
      vec![
        ClassNameToken {
          raw: "styles.wrapper",
          module: Some("styles"),
          name: "wrapper",
        },
        ClassNameToken {
          raw: "other.text-large",
          module: Some("other"),
          name: "text-large",
        },
      ]
    );
  }

  #[test]
  fn test_extra_segments_are_ignored() {
    assert_eq!(
      ClassNameToken::parse("a.b.c"),
      Some(ClassNameToken {
        raw: "a.b.c",
        module: Some("a"),
        name: "b",
      })
    );
  }

  #[test]
  fn test_malformed_tokens_are_skipped() {
    assert_eq!(parse_class_names(".a b. ."), vec![]);
    assert_eq!(parse_class_names(""), vec![]);
    assert_eq!(parse_class_names("  \n\t "), vec![]);
  }
}
