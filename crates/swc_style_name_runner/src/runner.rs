use std::path::Path;
use std::string::FromUtf8Error;

use swc_core::common::input::StringInput;
use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, Globals, Mark, SourceMap, GLOBALS};
use swc_core::ecma::ast::Module;
use swc_core::ecma::codegen::text_writer::JsWriter;
use swc_core::ecma::codegen::Emitter;
use swc_core::ecma::parser::lexer::Lexer;
use swc_core::ecma::parser::{EsSyntax, Parser, Syntax, TsSyntax};
use swc_core::ecma::transforms::base::fixer::fixer;
use swc_core::ecma::transforms::base::resolver;
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

pub struct RunContext {
  /// Source-map in use
  pub source_map: Lrc<SourceMap>,
  /// Global mark from SWC resolver
  pub global_mark: Mark,
  /// Unresolved mark from SWC resolver
  pub unresolved_mark: Mark,
}

pub struct RunVisitResult<V> {
  pub output_code: String,
  #[allow(unused)]
  pub visitor: V,
  pub source_map: Vec<u8>,
}

/// How a source file should be parsed
#[derive(Clone, Debug)]
pub struct RunOptions {
  /// Name recorded in the source map
  pub file_name: String,
  pub syntax: Syntax,
}

impl Default for RunOptions {
  fn default() -> Self {
    RunOptions {
      file_name: String::from("input.jsx"),
      syntax: Syntax::Es(EsSyntax {
        jsx: true,
        ..Default::default()
      }),
    }
  }
}

impl RunOptions {
  /// Picks TSX parsing for `.ts`/`.tsx`/`.mts`/`.cts` files and ES + JSX for everything else.
  pub fn for_path(path: &Path) -> Self {
    let is_type_script = matches!(
      path.extension().and_then(|ext| ext.to_str()),
      Some("ts" | "tsx" | "mts" | "cts")
    );

    let syntax = if is_type_script {
      Syntax::Typescript(TsSyntax {
        tsx: true,
        ..Default::default()
      })
    } else {
      Syntax::Es(EsSyntax {
        jsx: true,
        ..Default::default()
      })
    };

    RunOptions {
      file_name: path.display().to_string(),
      syntax,
    }
  }
}

/// Parses `code` as ES + JSX, runs the visitor built by `make_visit` and
/// prints the module back.
pub fn run_visit<V: VisitMut>(
  code: &str,
  make_visit: impl FnOnce(RunContext) -> V,
) -> Result<RunVisitResult<V>, RunError> {
  run_visit_with_options(code, &RunOptions::default(), make_visit)
}

/// Same as `run_visit` with explicit parse options
pub fn run_visit_with_options<V: VisitMut>(
  code: &str,
  options: &RunOptions,
  make_visit: impl FnOnce(RunContext) -> V,
) -> Result<RunVisitResult<V>, RunError> {
  let source_map = Lrc::new(SourceMap::default());
  let mut module = parse_module(&source_map, code, options)?;
  let is_type_script = matches!(options.syntax, Syntax::Typescript(_));

  GLOBALS.set(&Globals::new(), || -> Result<RunVisitResult<V>, RunError> {
    let global_mark = Mark::new();
    let unresolved_mark = Mark::new();
    module.visit_mut_with(&mut resolver(unresolved_mark, global_mark, is_type_script));

    let mut visitor = make_visit(RunContext {
      source_map: source_map.clone(),
      global_mark,
      unresolved_mark,
    });
    module.visit_mut_with(&mut visitor);

    // Synthesized expressions carry no parentheses of their own
    module.visit_mut_with(&mut fixer(None));

    let (output_code, source_map) = emit_module(&source_map, &module)?;
    Ok(RunVisitResult {
      output_code,
      visitor,
      source_map,
    })
  })
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
  #[error("Failed to parse module")]
  Parse(swc_core::ecma::parser::error::Error),
  #[error("IO Error: {0}")]
  Io(#[from] std::io::Error),
  #[error("Invalid utf-8 output: {0}")]
  InvalidUtf8Output(#[from] FromUtf8Error),
  #[error("Failed to generate source map")]
  SourceMap(#[from] sourcemap::Error),
}

fn parse_module(
  source_map: &Lrc<SourceMap>,
  code: &str,
  options: &RunOptions,
) -> Result<Module, RunError> {
  let source_file = source_map.new_source_file(
    Lrc::new(FileName::Custom(options.file_name.clone())),
    code.into(),
  );

  let lexer = Lexer::new(
    options.syntax,
    Default::default(),
    StringInput::from(&*source_file),
    None,
  );

  Parser::new_from(lexer)
    .parse_module()
    .map_err(RunError::Parse)
}

/// Prints `module`, returning the code and its serialized source map
fn emit_module(
  source_map: &Lrc<SourceMap>,
  module: &Module,
) -> Result<(String, Vec<u8>), RunError> {
  let mut code = vec![];
  let mut mappings = vec![];

  let mut emitter = Emitter {
    cfg: Default::default(),
    cm: source_map.clone(),
    comments: None,
    wr: JsWriter::new(source_map.clone(), "\n", &mut code, Some(&mut mappings)),
  };
  emitter.emit_module(module)?;

  let mut map = vec![];
  source_map
    .build_source_map(&mappings)
    .to_writer(&mut map)?;

  Ok((String::from_utf8(code)?, map))
}
