use swc_core::atoms::Atom;
use swc_core::common::{Mark, DUMMY_SP};
use swc_core::ecma::ast::{
  ArrayLit, BinExpr, BinaryOp, Expr, ExprOrSpread, IdentName, JSXAttr, JSXAttrName,
  JSXAttrOrSpread, JSXAttrValue, JSXExpr, JSXExprContainer, JSXOpeningElement, Lit, SpreadElement,
};

use crate::config::StyleNameConfig;
use crate::expressions::{member_lookup, style_from_expression, styles_from_class_names};
use crate::state::FileTransformState;

pub const STYLE_ATTRIBUTE: &str = "style";

/// Per-element scratch state, alive for one opening element only.
struct ElementRewriteState {
  target: usize,
  sibling_style: Option<usize>,
}

impl ElementRewriteState {
  fn find(attrs: &[JSXAttrOrSpread], attribute_name: &str) -> Option<Self> {
    let target = attrs
      .iter()
      .rposition(|attr| attribute_name_is(attr, attribute_name))?;

    let sibling_style = attrs
      .iter()
      .enumerate()
      .rev()
      .find(|(index, attr)| *index != target && attribute_name_is(attr, STYLE_ATTRIBUTE))
      .map(|(index, _)| index);

    Some(ElementRewriteState {
      target,
      sibling_style,
    })
  }
}

fn attribute_name_is(attr: &JSXAttrOrSpread, name: &str) -> bool {
  matches!(
    attr,
    JSXAttrOrSpread::JSXAttr(JSXAttr {
      name: JSXAttrName::Ident(ident),
      ..
    }) if &*ident.sym == name
  )
}

fn jsx_attr_mut(attrs: &mut [JSXAttrOrSpread], index: usize) -> Option<&mut JSXAttr> {
  match attrs.get_mut(index) {
    Some(JSXAttrOrSpread::JSXAttr(attr)) => Some(attr),
    _ => None,
  }
}

/// Expression form of an attribute value; a bare attribute means `true`.
fn attribute_value_expression(value: Option<&JSXAttrValue>) -> Option<Expr> {
  match value {
    None => Some(Expr::Lit(Lit::Bool(true.into()))),
    Some(JSXAttrValue::Lit(lit)) => Some(Expr::Lit(lit.clone())),
    Some(JSXAttrValue::JSXExprContainer(JSXExprContainer {
      expr: JSXExpr::Expr(expr),
      ..
    })) => Some(*expr.clone()),
    Some(JSXAttrValue::JSXExprContainer(_)) => None,
    Some(JSXAttrValue::JSXElement(element)) => Some(Expr::JSXElement(element.clone())),
    Some(JSXAttrValue::JSXFragment(fragment)) => Some(Expr::JSXFragment(fragment.clone())),
  }
}

fn expression_container(expr: Expr) -> JSXAttrValue {
  JSXAttrValue::JSXExprContainer(JSXExprContainer {
    span: DUMMY_SP,
    expr: JSXExpr::Expr(Box::new(expr)),
  })
}

fn array_of(expressions: Vec<Expr>) -> Expr {
  Expr::Array(ArrayLit {
    span: DUMMY_SP,
    elems: expressions
      .into_iter()
      .map(|expr| {
        Some(ExprOrSpread {
          spread: None,
          expr: Box::new(expr),
        })
      })
      .collect(),
  })
}

fn logical(op: BinaryOp, left: Expr, right: Expr) -> Expr {
  Expr::Bin(BinExpr {
    span: DUMMY_SP,
    op,
    left: Box::new(left),
    right: Box::new(right),
  })
}

enum TargetValue {
  ClassNames(Atom),
  Expression(Expr),
}

/// Rewrites the target attribute of one opening element into a `style`
/// value. Returns whether the element was rewritten.
pub fn rewrite_element(
  element: &mut JSXOpeningElement,
  state: &mut FileTransformState,
  config: &StyleNameConfig,
  unresolved_mark: Mark,
) -> bool {
  let Some(scratch) = ElementRewriteState::find(&element.attrs, &config.attribute_name) else {
    return false;
  };
  state.saw_target_attribute = true;

  let Some(binding) = state.binding.clone() else {
    return false;
  };

  let Some(target) = jsx_attr_mut(&mut element.attrs, scratch.target) else {
    return false;
  };
  let original_value = target.value.clone();

  let target_value = match &target.value {
    Some(JSXAttrValue::Lit(Lit::Str(value))) => TargetValue::ClassNames(value.value.clone()),
    Some(JSXAttrValue::JSXExprContainer(JSXExprContainer {
      expr: JSXExpr::Expr(expr),
      ..
    })) => TargetValue::Expression(*expr.clone()),
    _ => return false,
  };

  let expressions = match target_value {
    TargetValue::ClassNames(value) => {
      styles_from_class_names(state, &binding, &value, unresolved_mark)
    }
    TargetValue::Expression(expr) => vec![style_from_expression(state, &binding, expr)],
  };

  if config.preserves_original_attribute() {
    element.attrs.push(JSXAttrOrSpread::JSXAttr(JSXAttr {
      span: DUMMY_SP,
      name: JSXAttrName::Ident(IdentName::new(
        config.attribute_name.as_str().into(),
        DUMMY_SP,
      )),
      value: original_value,
    }));
  }

  match scratch
    .sibling_style
    .and_then(|index| jsx_attr_mut(&mut element.attrs, index))
  {
    Some(sibling) => {
      let mut merged = vec![];
      merged.extend(attribute_value_expression(sibling.value.as_ref()));
      merged.extend(expressions.iter().cloned());
      sibling.value = Some(expression_container(array_of(merged)));
      element.attrs.remove(scratch.target);
    }
    None => {
      if let Some(target) = jsx_attr_mut(&mut element.attrs, scratch.target) {
        let value = if expressions.len() == 1 {
          expressions[0].clone()
        } else {
          array_of(expressions.clone())
        };
        target.value = Some(expression_container(value));
        target.name = JSXAttrName::Ident(IdentName::new(STYLE_ATTRIBUTE.into(), DUMMY_SP));
      }
    }
  }

  if let Some(first) = expressions.first() {
    propagate_attributes(element, first, &config.add_attributes);
  }

  // The named alias only applies to the element that consumed it
  if let Some(binding) = &mut state.binding {
    binding.named = None;
  }

  state.rewritten_elements += 1;
  tracing::debug!(
    "Rewrote {} attribute into {} style expression(s) from {:?}",
    config.attribute_name,
    expressions.len(),
    binding.source
  );

  true
}

/// Every listed attribute prefers the matching member of the first computed
/// style. Attributes missing from the element are filled by spreading that
/// style as the first attribute.
fn propagate_attributes(element: &mut JSXOpeningElement, first: &Expr, names: &[String]) {
  let mut needs_spread = false;

  for name in names {
    let index = element
      .attrs
      .iter()
      .position(|attr| attribute_name_is(attr, name));

    let Some(attr) = index.and_then(|index| jsx_attr_mut(&mut element.attrs, index)) else {
      needs_spread = true;
      continue;
    };

    let guarded = logical(
      BinaryOp::LogicalAnd,
      first.clone(),
      Expr::Member(member_lookup(first.clone(), name)),
    );

    let value = match attribute_value_expression(attr.value.as_ref()) {
      Some(original) => logical(BinaryOp::LogicalOr, guarded, original),
      None => guarded,
    };
    attr.value = Some(expression_container(value));
  }

  if needs_spread {
    element.attrs.insert(
      0,
      JSXAttrOrSpread::SpreadElement(SpreadElement {
        dot3_token: DUMMY_SP,
        expr: Box::new(first.clone()),
      }),
    );
  }
}
