use swc_core::common::errors::HANDLER;
use swc_core::ecma::ast::Program;
use swc_core::ecma::visit::VisitMutWith;
use swc_core::plugin::{plugin_transform, proxies::TransformPluginProgramMetadata};
use swc_style_name::{StyleNameConfig, StyleNameError, StyleNameTransformer};

/// Plugin options are required, `extensions` has no default.
fn load_config(config: Option<String>) -> Result<StyleNameConfig, StyleNameError> {
  match config {
    Some(config_string) => StyleNameConfig::from_json(&config_string),
    None => Err(StyleNameError::missing_extensions()),
  }
}

fn report(err: &StyleNameError) {
  HANDLER.with(|handler| handler.err(&err.to_string()));
}

#[plugin_transform]
pub fn process_transform(
  mut program: Program,
  metadata: TransformPluginProgramMetadata,
) -> Program {
  let config = match load_config(metadata.get_transform_plugin_config()) {
    Ok(config) => config,
    Err(err) => {
      report(&err);
      return program;
    }
  };

  let mut transformer = StyleNameTransformer::new(metadata.unresolved_mark, config);

  program.visit_mut_with(&mut transformer);
  for err in transformer.take_errors() {
    report(&err);
  }

  program
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_config_is_an_error() {
    assert_eq!(
      load_config(None).unwrap_err(),
      StyleNameError::missing_extensions()
    );
  }

  #[test]
  fn test_config_from_plugin_options() {
    let config = load_config(Some(String::from(
      r#"{ "extensions": [".css"], "addAttributes": ["disabled"] }"#,
    )))
    .unwrap();

    assert_eq!(config.extensions, vec![String::from(".css")]);
    assert_eq!(config.add_attributes, vec![String::from("disabled")]);
    assert_eq!(config.attribute_name, "styleName");
  }
}
