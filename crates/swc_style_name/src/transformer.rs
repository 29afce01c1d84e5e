use swc_core::common::{Mark, DUMMY_SP};
use swc_core::ecma::ast::{
  ImportDecl, ImportPhase, JSXOpeningElement, Module, ModuleDecl, ModuleItem, Str,
};
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

use crate::attributes::rewrite_element;
use crate::config::StyleNameConfig;
use crate::errors::StyleNameError;
use crate::import_resolver::{count_anonymous_style_imports, resolve_style_import};
use crate::injector::inject_processor_require;
use crate::state::{FileSummary, FileTransformState};
use crate::uid::UidGenerator;

/// Rewrites `styleName` attributes of every module it visits.
///
/// Errors do not abort the visit of other files; they are collected and can
/// be read back with [`StyleNameTransformer::errors`]. A file that fails is
/// left untouched. Configurations read with [`StyleNameConfig::from_json`] are
/// already validated, anything else is validated again for every module.
pub struct StyleNameTransformer {
  config: StyleNameConfig,
  unresolved_mark: Mark,
  errors: Vec<StyleNameError>,
  summary: Option<FileSummary>,
}

impl StyleNameTransformer {
  pub fn new(unresolved_mark: Mark, config: StyleNameConfig) -> Self {
    StyleNameTransformer {
      config,
      unresolved_mark,
      errors: vec![],
      summary: None,
    }
  }

  pub fn config(&self) -> &StyleNameConfig {
    &self.config
  }

  pub fn errors(&self) -> &[StyleNameError] {
    &self.errors
  }

  pub fn take_errors(&mut self) -> Vec<StyleNameError> {
    std::mem::take(&mut self.errors)
  }

  /// Summary of the last module that was transformed successfully
  pub fn last_summary(&self) -> Option<&FileSummary> {
    self.summary.as_ref()
  }

  #[tracing::instrument(level = "debug", skip_all)]
  pub fn transform_module(&self, module: &mut Module) -> Result<FileSummary, StyleNameError> {
    self.config.validate()?;

    let added_style_import = self
      .config
      .add_import
      .as_deref()
      .is_some_and(|add_import| self.config.is_style_source(add_import));

    let count =
      count_anonymous_style_imports(&module.body, &self.config) + usize::from(added_style_import);
    if count > 1 {
      return Err(StyleNameError::AmbiguousAnonymousImport { count });
    }

    let mut uids = UidGenerator::from_module(module);
    let processor = uids.generate(&self.config.processor_module);

    if let Some(add_import) = &self.config.add_import {
      module.body.insert(0, side_effect_import(add_import));
    }

    let mut file = FileTransform {
      config: &self.config,
      unresolved_mark: self.unresolved_mark,
      state: FileTransformState::new(processor, uids),
    };
    module.visit_mut_children_with(&mut file);

    let state = file.state;
    let mut summary = FileSummary {
      saw_target_attribute: state.saw_target_attribute,
      performed_rewrite: state.performed_rewrite,
      rewritten_elements: state.rewritten_elements,
      ..Default::default()
    };

    if !state.saw_target_attribute && self.config.add_import.is_some() {
      summary.removed_auxiliary_import = remove_first_style_import(&mut module.body, &self.config);
    }

    if state.performed_rewrite {
      inject_processor_require(
        &mut module.body,
        &state.processor,
        &self.config.processor_module,
        self.unresolved_mark,
      );
      summary.injected_processor = true;
    }

    tracing::debug!(?summary, "Transformed module");

    Ok(summary)
  }
}

impl VisitMut for StyleNameTransformer {
  fn visit_mut_module(&mut self, module: &mut Module) {
    match self.transform_module(module) {
      Ok(summary) => self.summary = Some(summary),
      Err(err) => {
        tracing::debug!("Skipping module: {}", err);
        self.summary = None;
        self.errors.push(err);
      }
    }
  }
}

/// Visitor over a single file. Imports are resolved as they are reached, so
/// elements only see the style imports declared before them.
struct FileTransform<'a> {
  config: &'a StyleNameConfig,
  unresolved_mark: Mark,
  state: FileTransformState,
}

impl VisitMut for FileTransform<'_> {
  fn visit_mut_import_decl(&mut self, import: &mut ImportDecl) {
    resolve_style_import(import, &mut self.state, self.config);
  }

  fn visit_mut_jsx_opening_element(&mut self, element: &mut JSXOpeningElement) {
    element.visit_mut_children_with(self);
    rewrite_element(element, &mut self.state, self.config, self.unresolved_mark);
  }
}

fn side_effect_import(source: &str) -> ModuleItem {
  ModuleItem::ModuleDecl(ModuleDecl::Import(ImportDecl {
    span: DUMMY_SP,
    specifiers: vec![],
    src: Box::new(Str::from(source)),
    type_only: false,
    with: None,
    phase: ImportPhase::Evaluation,
  }))
}

/// Drops the first style import of the body. Returns whether one was found.
fn remove_first_style_import(body: &mut Vec<ModuleItem>, config: &StyleNameConfig) -> bool {
  let index = body.iter().position(|item| {
    matches!(
      item,
      ModuleItem::ModuleDecl(ModuleDecl::Import(import))
        if config.is_style_source(&import.src.value)
    )
  });

  match index {
    Some(index) => {
      body.remove(index);
      tracing::debug!("Removed unused style import");
      true
    }
    None => false,
  }
}

#[cfg(test)]
mod tests {
  use indoc::indoc;
  use pretty_assertions::assert_eq;
  use swc_style_name_runner::test_utils::{
    run_test_visit, squash_code_whitespace, RunTestContext, RunVisitResult,
  };
  use tracing_test::traced_test;

  use super::*;

  fn transformer(config: StyleNameConfig) -> impl FnOnce(RunTestContext) -> StyleNameTransformer {
    move |context| StyleNameTransformer::new(context.unresolved_mark, config)
  }

  fn css_config() -> StyleNameConfig {
    StyleNameConfig::new(vec![".css".into()])
  }

  #[test]
  fn test_rejects_invalid_config() {
    let code = "const el = <View styleName=\"a\"/>;\n";
    let RunVisitResult {
      output_code,
      visitor,
      ..
    } = run_test_visit(code, transformer(StyleNameConfig::new(vec![])));

    assert_eq!(output_code, code);
    assert_eq!(visitor.errors(), &[StyleNameError::missing_extensions()]);
  }

  #[test]
  fn test_static_class_names() {
    let RunVisitResult {
      output_code,
      visitor,
      ..
    } = run_test_visit(
      indoc! {r#"
        import "./Button.css";
        const el = <View styleName="a b"/>;
      "#},
      transformer(css_config()),
    );

    assert_eq!(
      squash_code_whitespace(&output_code),
      squash_code_whitespace(indoc! {r#"
        import _temp from "./Button.css";
        var _reactNativeDynamicStyleProcessor = require("react-native-dynamic-style-processor");
        const el = <View style={[
          _reactNativeDynamicStyleProcessor.process(_temp).a,
          _reactNativeDynamicStyleProcessor.process(_temp).b
        ]}/>;
      "#})
    );
    assert_eq!(
      visitor.last_summary(),
      Some(&FileSummary {
        saw_target_attribute: true,
        performed_rewrite: true,
        rewritten_elements: 1,
        injected_processor: true,
        removed_auxiliary_import: false,
      })
    );
  }

  #[test]
  fn test_ambiguous_anonymous_imports_leave_module_untouched() {
    let code = indoc! {r#"
      import "./a.css";
      import "./b.css";
      const el = <View styleName="a"/>;
    "#};
    let RunVisitResult {
      output_code,
      visitor,
      ..
    } = run_test_visit(code, transformer(css_config()));

    assert_eq!(output_code, code);
    assert_eq!(
      visitor.errors(),
      &[StyleNameError::AmbiguousAnonymousImport { count: 2 }]
    );
    assert_eq!(visitor.last_summary(), None);
  }

  #[test]
  fn test_added_style_import_counts_towards_ambiguity() {
    let mut config = css_config();
    config.add_import = Some("./global.css".into());

    let RunVisitResult { visitor, .. } = run_test_visit(
      r#"import "./Button.css";"#,
      transformer(config),
    );

    assert_eq!(
      visitor.errors(),
      &[StyleNameError::AmbiguousAnonymousImport { count: 2 }]
    );
  }

  #[test]
  fn test_added_import_removed_without_target_attribute() {
    let mut config = StyleNameConfig::new(vec![".style".into()]);
    config.add_import = Some("./global.style".into());

    let RunVisitResult {
      output_code,
      visitor,
      ..
    } = run_test_visit(
      indoc! {r#"
        import React from "react";
        const el = <View/>;
      "#},
      transformer(config),
    );

    assert_eq!(
      output_code,
      indoc! {r#"
        import React from "react";
        const el = <View/>;
      "#}
    );

    let summary = visitor.last_summary().unwrap();
    assert!(summary.removed_auxiliary_import);
    assert!(!summary.injected_processor);
  }

  #[test]
  fn test_target_without_usable_tokens_does_not_inject() {
    let RunVisitResult {
      output_code,
      visitor,
      ..
    } = run_test_visit(
      indoc! {r#"
        import styles from "./Button.css";
        const el = <View styleName="a"/>;
      "#},
      transformer(css_config()),
    );

    assert_eq!(
      output_code,
      indoc! {r#"
        import styles from "./Button.css";
        const el = <View style={[]}/>;
      "#}
    );

    let summary = visitor.last_summary().unwrap();
    assert!(summary.saw_target_attribute);
    assert!(!summary.performed_rewrite);
    assert!(!summary.injected_processor);
  }

  #[test]
  fn test_elements_before_the_style_import_are_skipped() {
    let code = indoc! {r#"
      const el = <View styleName="a"/>;
      import "./Button.css";
    "#};
    let RunVisitResult { visitor, .. } = run_test_visit(code, transformer(css_config()));

    let summary = visitor.last_summary().unwrap();
    assert!(summary.saw_target_attribute);
    assert_eq!(summary.rewritten_elements, 0);
  }

  #[test]
  #[traced_test]
  fn test_logs_injected_processor() {
    run_test_visit(
      indoc! {r#"
        import "./Button.css";
        const el = <View styleName="a"/>;
      "#},
      transformer(css_config()),
    );

    assert!(logs_contain("Resolved style import"));
    assert!(logs_contain("Injected react-native-dynamic-style-processor require"));
  }
}
