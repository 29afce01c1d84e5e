use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use swc_style_name::{FileSummary, StyleNameConfig, StyleNameTransformer};
use swc_style_name_runner::{run_visit_with_options, RunContext, RunOptions, RunVisitResult};

pub struct TransformOptions {
  pub out_dir: Option<PathBuf>,
  pub source_maps: bool,
}

pub struct TransformOutput {
  pub code: String,
  pub source_map: Vec<u8>,
  pub summary: FileSummary,
  /// Output path, when the file was written to disk
  pub written_to: Option<PathBuf>,
}

/// Runs the transform over one source text. Parse errors and transform
/// errors both fail the file.
pub fn transform_source(
  code: &str,
  run_options: &RunOptions,
  config: &StyleNameConfig,
) -> anyhow::Result<TransformOutput> {
  let RunVisitResult {
    output_code,
    mut visitor,
    source_map,
  } = run_visit_with_options(code, run_options, |context: RunContext| {
    StyleNameTransformer::new(context.unresolved_mark, config.clone())
  })
  .with_context(|| format!("Failed to transform {}", run_options.file_name))?;

  if let Some(err) = visitor.take_errors().into_iter().next() {
    return Err(anyhow!(err).context(format!("Failed to transform {}", run_options.file_name)));
  }

  Ok(TransformOutput {
    code: output_code,
    source_map,
    summary: visitor.last_summary().cloned().unwrap_or_default(),
    written_to: None,
  })
}

#[tracing::instrument(level = "debug", skip(config, options))]
pub fn transform_file(
  path: &Path,
  config: &StyleNameConfig,
  options: &TransformOptions,
) -> anyhow::Result<TransformOutput> {
  let code = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read {}", path.display()))?;

  let mut output = transform_source(&code, &RunOptions::for_path(path), config)?;
  tracing::debug!(summary = ?output.summary, "Transformed file");

  let Some(out_dir) = &options.out_dir else {
    return Ok(output);
  };

  let file_name = path
    .file_name()
    .ok_or_else(|| anyhow!("Not a file: {}", path.display()))?;
  std::fs::create_dir_all(out_dir)
    .with_context(|| format!("Failed to create {}", out_dir.display()))?;

  let out_path = out_dir.join(file_name);
  std::fs::write(&out_path, &output.code)
    .with_context(|| format!("Failed to write {}", out_path.display()))?;

  if options.source_maps {
    let mut map_path = out_path.clone().into_os_string();
    map_path.push(".map");
    let map_path = PathBuf::from(map_path);
    std::fs::write(&map_path, &output.source_map)
      .with_context(|| format!("Failed to write {}", map_path.display()))?;
  }

  output.written_to = Some(out_path);
  Ok(output)
}
