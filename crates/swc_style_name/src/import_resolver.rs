use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::{
  Ident, ImportDecl, ImportDefaultSpecifier, ImportSpecifier, ModuleDecl, ModuleItem,
};

use crate::config::StyleNameConfig;
use crate::state::{FileTransformState, StyleImportBinding};

fn specifier_local(specifier: &ImportSpecifier) -> &Ident {
  match specifier {
    ImportSpecifier::Named(named) => &named.local,
    ImportSpecifier::Default(default) => &default.local,
    ImportSpecifier::Namespace(namespace) => &namespace.local,
  }
}

fn is_style_import(import: &ImportDecl, config: &StyleNameConfig) -> bool {
  !import.type_only && config.is_style_source(&import.src.value)
}

/// Style imports of the module body that declare no specifiers at all
pub fn count_anonymous_style_imports(body: &[ModuleItem], config: &StyleNameConfig) -> usize {
  body
    .iter()
    .filter(|item| {
      matches!(
        item,
        ModuleItem::ModuleDecl(ModuleDecl::Import(import))
          if import.specifiers.is_empty() && is_style_import(import, config)
      )
    })
    .count()
}

/// Binds a matching style import to exactly one local alias: its first
/// declared specifier, or a generated default specifier when it has none.
///
/// Returns `false`, leaving the import untouched, when it is not a style import.
pub fn resolve_style_import(
  import: &mut ImportDecl,
  state: &mut FileTransformState,
  config: &StyleNameConfig,
) -> bool {
  if !is_style_import(import, config) {
    return false;
  }

  let named = import.specifiers.first().map(|specifier| specifier_local(specifier).clone());
  let anonymous = state.uids.generate("temp");

  let specifier = match import.specifiers.drain(..).next() {
    Some(specifier) => specifier,
    None => ImportSpecifier::Default(ImportDefaultSpecifier {
      span: DUMMY_SP,
      local: anonymous.clone(),
    }),
  };
  import.specifiers = vec![specifier];

  if let Some(named) = &named {
    state.aliases.insert(named.sym.clone(), named.clone());
  }

  tracing::debug!(
    "Resolved style import {:?} as {:?}",
    import.src.value,
    named.as_ref().unwrap_or(&anonymous).sym
  );

  state.binding = Some(StyleImportBinding {
    named,
    anonymous,
    source: import.src.value.clone(),
  });

  true
}

#[cfg(test)]
mod tests {
  use swc_core::atoms::Atom;
  use swc_core::ecma::ast::Module;
  use swc_core::ecma::visit::{VisitMut, VisitMutWith};
  use swc_style_name_runner::test_utils::{run_test_visit, RunVisitResult};

  use super::*;
  use crate::uid::UidGenerator;

  struct ImportResolver {
    config: StyleNameConfig,
    state: Option<FileTransformState>,
    anonymous_imports: usize,
  }

  impl ImportResolver {
    fn new() -> Self {
      ImportResolver {
        config: StyleNameConfig::new(vec![".css".into()]),
        state: None,
        anonymous_imports: 0,
      }
    }
  }

  impl VisitMut for ImportResolver {
    fn visit_mut_module(&mut self, module: &mut Module) {
      self.anonymous_imports = count_anonymous_style_imports(&module.body, &self.config);
      let mut uids = UidGenerator::from_module(module);
      let processor = uids.generate("processor");
      self.state = Some(FileTransformState::new(processor, uids));
      module.visit_mut_children_with(self);
    }

    fn visit_mut_import_decl(&mut self, import: &mut ImportDecl) {
      if let Some(state) = &mut self.state {
        resolve_style_import(import, state, &self.config);
      }
    }
  }

  #[test]
  fn test_anonymous_import_gets_generated_alias() {
    let RunVisitResult {
      output_code,
      visitor,
      ..
    } = run_test_visit(
      r#"
        import "./Button.css";
        import React from "react";
      "#,
      |_| ImportResolver::new(),
    );

    assert_eq!(
      output_code,
      "import _temp from \"./Button.css\";\nimport React from \"react\";\n"
    );
    assert_eq!(visitor.anonymous_imports, 1);

    let binding = visitor.state.unwrap().binding.unwrap();
    assert!(binding.named.is_none());
    assert_eq!(&*binding.active_alias().sym, "_temp");
    assert_eq!(&*binding.source, "./Button.css");
  }

  #[test]
  fn test_named_import_keeps_first_specifier_only() {
    let RunVisitResult {
      output_code,
      visitor,
      ..
    } = run_test_visit(
      r#"import styles, { button } from "./Button.css";"#,
      |_| ImportResolver::new(),
    );

    assert_eq!(output_code, "import styles from \"./Button.css\";\n");

    let state = visitor.state.unwrap();
    let binding = state.binding.unwrap();
    assert_eq!(&*binding.active_alias().sym, "styles");
    assert!(state.aliases.contains_key(&Atom::from("styles")));
  }

  #[test]
  fn test_namespace_import_is_named() {
    let RunVisitResult { visitor, .. } = run_test_visit(
      r#"import * as styles from "./Button.css";"#,
      |_| ImportResolver::new(),
    );

    let binding = visitor.state.unwrap().binding.unwrap();
    assert_eq!(binding.named.map(|named| named.sym), Some("styles".into()));
  }

  #[test]
  fn test_other_imports_are_untouched() {
    let RunVisitResult {
      output_code,
      visitor,
      ..
    } = run_test_visit(
      r#"import "./polyfills"; import React, { useState } from "react";"#,
      |_| ImportResolver::new(),
    );

    assert_eq!(
      output_code,
      "import \"./polyfills\";\nimport React, { useState } from \"react\";\n"
    );
    assert!(visitor.state.unwrap().binding.is_none());
  }

  #[test]
  fn test_generated_alias_avoids_existing_names() {
    let RunVisitResult { output_code, .. } = run_test_visit(
      r#"
        import "./Button.css";
        const _temp = 1;
      "#,
      |_| ImportResolver::new(),
    );

    assert_eq!(
      output_code,
      "import _temp2 from \"./Button.css\";\nconst _temp = 1;\n"
    );
  }

  #[test]
  fn test_counts_anonymous_style_imports() {
    let RunVisitResult { visitor, .. } = run_test_visit(
      r#"
        import "./a.css";
        import b from "./b.css";
        import "./c.css";
        import "./d.js";
      "#,
      |_| ImportResolver::new(),
    );

    assert_eq!(visitor.anonymous_imports, 2);
  }
}
