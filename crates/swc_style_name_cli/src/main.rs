use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use swc_style_name::StyleNameConfig;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::transform::{transform_file, TransformOptions};

mod transform;

const DEFAULT_LOG_FILTER: &str = "info,swc_ecma_codegen=warn";

/// Rewrites `styleName` attributes of the given files
#[derive(Parser)]
#[command(name = "swc-style-name")]
struct Args {
  /// JSON file holding the transform options, eg. `{ "extensions": [".css"] }`
  #[arg(short, long)]
  config: PathBuf,

  /// Directory transformed files are written to. Printed to stdout when omitted.
  #[arg(short, long)]
  out_dir: Option<PathBuf>,

  /// Write a `.map` file next to every output file
  #[arg(long)]
  source_maps: bool,

  #[arg(required = true)]
  files: Vec<PathBuf>,
}

fn main() {
  initialize_tracing();

  let args = Args::parse();
  run(args).unwrap_or_else(|e| {
    error!("Failed to run swc-style-name: {:#}", e);
    std::process::exit(1);
  });
}

fn initialize_tracing() {
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}

fn run(args: Args) -> anyhow::Result<()> {
  let config_source = std::fs::read_to_string(&args.config)
    .with_context(|| format!("Failed to read config {}", args.config.display()))?;
  let config = StyleNameConfig::from_json(&config_source)
    .with_context(|| format!("Invalid config {}", args.config.display()))?;

  let options = TransformOptions {
    out_dir: args.out_dir,
    source_maps: args.source_maps,
  };

  let mut rewritten_elements = 0;
  for file in &args.files {
    let output = transform_file(file, &config, &options)?;
    rewritten_elements += output.summary.rewritten_elements;

    match &output.written_to {
      Some(path) => info!("{} -> {}", file.display(), path.display()),
      None => print!("{}", output.code),
    }
  }

  info!(
    "Transformed {} file(s), rewrote {} element(s)",
    args.files.len(),
    rewritten_elements
  );

  Ok(())
}
