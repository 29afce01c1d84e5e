use std::collections::HashSet;

use inflector::cases::camelcase::to_camel_case;
use swc_core::atoms::Atom;
use swc_core::common::{Mark, SyntaxContext, DUMMY_SP};
use swc_core::ecma::ast::{Ident, Module};
use swc_core::ecma::visit::{Visit, VisitWith};

/// Hands out identifiers that are unique within one file.
///
/// Names follow the `_name`, `_name2`, `_name3` scheme. Each identifier also
/// gets a fresh private mark, so hygiene never confuses it with a user binding
/// of the same name.
#[derive(Debug, Default)]
pub struct UidGenerator {
  used: HashSet<Atom>,
}

impl UidGenerator {
  pub fn from_module(module: &Module) -> Self {
    let mut collector = IdentCollector::default();
    module.visit_with(&mut collector);
    UidGenerator {
      used: collector.idents,
    }
  }

  pub fn is_used(&self, name: &str) -> bool {
    self.used.contains(&Atom::from(name))
  }

  pub fn generate(&mut self, hint: &str) -> Ident {
    let base = uid_base(hint);
    let mut index = 1usize;

    loop {
      let candidate = if index > 1 {
        format!("_{base}{index}")
      } else {
        format!("_{base}")
      };

      let candidate: Atom = candidate.into();
      if !self.used.contains(&candidate) {
        self.used.insert(candidate.clone());
        return Ident::new(
          candidate,
          DUMMY_SP,
          SyntaxContext::empty().apply_mark(Mark::new()),
        );
      }

      index += 1;
    }
  }
}

/// `react-native-dynamic-style-processor` -> `reactNativeDynamicStyleProcessor`
fn uid_base(hint: &str) -> String {
  let camel = to_camel_case(hint);
  let sanitized: String = camel
    .chars()
    .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
    .collect();

  let trimmed = sanitized
    .trim_start_matches(|c: char| c == '_' || c.is_ascii_digit())
    .trim_end_matches(|c: char| c.is_ascii_digit());

  if trimmed.is_empty() {
    String::from("temp")
  } else {
    trimmed.to_string()
  }
}

#[derive(Default)]
struct IdentCollector {
  idents: HashSet<Atom>,
}

impl Visit for IdentCollector {
  fn visit_ident(&mut self, ident: &Ident) {
    self.idents.insert(ident.sym.clone());
  }
}
