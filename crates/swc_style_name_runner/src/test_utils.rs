use swc_core::ecma::visit::VisitMut;

use crate::runner::{run_visit, run_visit_with_options, RunOptions};
pub use crate::runner::{RunContext, RunVisitResult};

/// In the future this might be a different type to `RunContext`
pub type RunTestContext = RunContext;

/// Helper to test SWC visitors.
///
/// * Parse `code` with SWC
/// * Run a visitor over it
/// * Return the result
///
pub fn run_test_visit<V: VisitMut>(
  code: &str,
  make_visit: impl FnOnce(RunTestContext) -> V,
) -> RunVisitResult<V> {
  run_visit(code, make_visit).unwrap()
}

/// Same as `run_test_visit` with explicit parse options, eg. TSX
pub fn run_test_visit_with_options<V: VisitMut>(
  code: &str,
  options: &RunOptions,
  make_visit: impl FnOnce(RunTestContext) -> V,
) -> RunVisitResult<V> {
  run_visit_with_options(code, options, make_visit).unwrap()
}

fn is_word_char(c: char) -> bool {
  c.is_alphanumeric() || c == '_' || c == '$'
}

/// Drop all whitespace that does not separate two words, so both
/// `[\n    a,\n    b\n]` and `[a, b]` compare as `[a,b]`
pub fn squash_code_whitespace(code: &str) -> String {
  let mut output = String::with_capacity(code.len());
  let mut pending_space = false;

  for c in code.trim().chars() {
    if c.is_whitespace() {
      pending_space = true;
      continue;
    }

    if pending_space && output.chars().last().is_some_and(is_word_char) && is_word_char(c) {
      output.push(' ');
    }
    pending_space = false;
    output.push(c);
  }

  output
}
