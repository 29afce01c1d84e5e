pub mod runner;
pub mod test_utils;

pub use runner::{
  run_visit, run_visit_with_options, RunContext, RunError, RunOptions, RunVisitResult,
};
