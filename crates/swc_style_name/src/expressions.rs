use once_cell::sync::Lazy;
use regex::Regex;
use swc_core::atoms::Atom;
use swc_core::common::{Mark, SyntaxContext, DUMMY_SP};
use swc_core::ecma::ast::{
  CallExpr, Callee, ComputedPropName, Expr, ExprOrSpread, Ident, IdentName, Lit, MemberExpr,
  MemberProp, Str,
};
use swc_core::quote;

use crate::class_names::{parse_class_names, ClassNameToken};
use crate::state::{FileTransformState, StyleImportBinding};

static HYPHENATED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+-\w+").unwrap());

const DYNAMIC_PARAMETER: &str = "name";

fn is_identifier_name(name: &str) -> bool {
  let mut chars = name.chars();
  match chars.next() {
    Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
    _ => return false,
  }
  chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Rule names such as `text-large` can only be read with a string key.
pub fn needs_string_key(name: &str) -> bool {
  HYPHENATED.is_match(name) || !is_identifier_name(name)
}

/// `object.name`, or `object["name"]` when the name is not an identifier
pub fn member_lookup(object: Expr, name: &str) -> MemberExpr {
  let prop = if needs_string_key(name) {
    MemberProp::Computed(ComputedPropName {
      span: DUMMY_SP,
      expr: Box::new(Expr::Lit(Lit::Str(Str::from(name)))),
    })
  } else {
    MemberProp::Ident(IdentName::new(name.into(), DUMMY_SP))
  };

  MemberExpr {
    span: DUMMY_SP,
    obj: Box::new(object),
    prop,
  }
}

/// Rewrites `alias.rule` into `processor.process(alias).rule`.
pub fn wrap_in_process_call(state: &mut FileTransformState, mut lookup: MemberExpr) -> MemberExpr {
  let processor = state.processor_for_call();

  let callee = MemberExpr {
    span: DUMMY_SP,
    obj: Box::new(Expr::Ident(processor)),
    prop: MemberProp::Ident(IdentName::new("process".into(), DUMMY_SP)),
  };

  lookup.obj = Box::new(Expr::Call(CallExpr {
    span: DUMMY_SP,
    ctxt: SyntaxContext::empty(),
    callee: Callee::Expr(Box::new(Expr::Member(callee))),
    args: vec![ExprOrSpread {
      spread: None,
      expr: lookup.obj,
    }],
    type_args: None,
  }));

  lookup
}

/// Alias a token reads its rule from. Unqualified tokens are skipped while a
/// named style import is active.
fn resolve_token_alias(
  state: &FileTransformState,
  binding: &StyleImportBinding,
  token: &ClassNameToken<'_>,
  unresolved_mark: Mark,
) -> Option<Ident> {
  match token.module {
    Some(module) => {
      let alias = state.aliases.get(&Atom::from(module)).cloned();
      Some(alias.unwrap_or_else(|| {
        Ident::new(
          module.into(),
          DUMMY_SP,
          SyntaxContext::empty().apply_mark(unresolved_mark),
        )
      }))
    }
    None if binding.named.is_some() => None,
    None => Some(binding.anonymous.clone()),
  }
}

/// Static form: one processed lookup per usable token of `value`.
pub fn styles_from_class_names(
  state: &mut FileTransformState,
  binding: &StyleImportBinding,
  value: &str,
  unresolved_mark: Mark,
) -> Vec<Expr> {
  let mut expressions = vec![];

  for token in parse_class_names(value) {
    let Some(alias) = resolve_token_alias(state, binding, &token, unresolved_mark) else {
      tracing::trace!("Skipping unqualified class name {:?}", token.raw);
      continue;
    };

    let lookup = member_lookup(Expr::Ident(alias), token.name);
    expressions.push(Expr::Member(wrap_in_process_call(state, lookup)));
  }

  expressions
}

/// Dynamic form. Names are only known at run time, so the lookup is always
/// string keyed and always reads from the active alias.
///
/// The callback parameter is `name`, unless the alias itself is called
/// `name`, in which case a unique identifier is used instead.
pub fn style_from_expression(
  state: &mut FileTransformState,
  binding: &StyleImportBinding,
  source: Expr,
) -> Expr {
  let alias = binding.active_alias().clone();
  let name = if &*alias.sym == DYNAMIC_PARAMETER {
    state.uids.generate(DYNAMIC_PARAMETER)
  } else {
    Ident::new(DYNAMIC_PARAMETER.into(), DUMMY_SP, SyntaxContext::empty())
  };

  let lookup = MemberExpr {
    span: DUMMY_SP,
    obj: Box::new(Expr::Ident(alias)),
    prop: MemberProp::Computed(ComputedPropName {
      span: DUMMY_SP,
      expr: Box::new(Expr::Ident(name.clone())),
    }),
  };
  let lookup = wrap_in_process_call(state, lookup);

  quote!(
    r#"($source || "").split(" ").filter(Boolean).map(function($name) {
      return $lookup;
    })"# as Expr,
    source: Expr = source,
    name: Ident = name,
    lookup: Expr = Expr::Member(lookup),
  )
}
