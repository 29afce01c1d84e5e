use swc_core::common::{Mark, SyntaxContext, DUMMY_SP};
use swc_core::ecma::ast::{
  BindingIdent, CallExpr, Callee, Decl, Expr, ExprOrSpread, Ident, Lit, ModuleDecl, ModuleItem,
  Pat, Stmt, Str, VarDecl, VarDeclKind, VarDeclarator,
};

/// `var x = require(...)`, judged on the first declarator only
fn is_require_declaration(item: &ModuleItem) -> bool {
  let ModuleItem::Stmt(Stmt::Decl(Decl::Var(var))) = item else {
    return false;
  };

  let Some(init) = var.decls.first().and_then(|decl| decl.init.as_deref()) else {
    return false;
  };

  matches!(
    init,
    Expr::Call(CallExpr {
      callee: Callee::Expr(callee),
      ..
    }) if matches!(&**callee, Expr::Ident(ident) if &*ident.sym == "require")
  )
}

fn is_import_or_require(item: &ModuleItem) -> bool {
  matches!(item, ModuleItem::ModuleDecl(ModuleDecl::Import(_))) || is_require_declaration(item)
}

fn processor_require(processor: &Ident, module: &str, unresolved_mark: Mark) -> ModuleItem {
  let require = Ident::new(
    "require".into(),
    DUMMY_SP,
    SyntaxContext::empty().apply_mark(unresolved_mark),
  );

  let init = Expr::Call(CallExpr {
    span: DUMMY_SP,
    ctxt: SyntaxContext::empty(),
    callee: Callee::Expr(Box::new(Expr::Ident(require))),
    args: vec![ExprOrSpread {
      spread: None,
      expr: Box::new(Expr::Lit(Lit::Str(Str::from(module)))),
    }],
    type_args: None,
  });

  ModuleItem::Stmt(Stmt::Decl(Decl::Var(Box::new(VarDecl {
    span: DUMMY_SP,
    ctxt: SyntaxContext::empty(),
    kind: VarDeclKind::Var,
    declare: false,
    decls: vec![VarDeclarator {
      span: DUMMY_SP,
      name: Pat::Ident(BindingIdent {
        id: processor.clone(),
        type_ann: None,
      }),
      init: Some(Box::new(init)),
      definite: false,
    }],
  }))))
}

/// Inserts `var <processor> = require("<module>")` right after the last
/// top-level import or require, or first in the body when there is none.
/// Returns the index the declaration was inserted at.
pub fn inject_processor_require(
  body: &mut Vec<ModuleItem>,
  processor: &Ident,
  module: &str,
  unresolved_mark: Mark,
) -> usize {
  let index = body
    .iter()
    .rposition(is_import_or_require)
    .map_or(0, |anchor| anchor + 1);

  body.insert(index, processor_require(processor, module, unresolved_mark));
  tracing::debug!("Injected {} require at item {}", module, index);

  index
}
