use std::{
  fs,
  io::{self, Read},
};

use color_eyre::eyre::{Context, Result};
use frontmark::{
  cli::Cli,
  config::Config,
  output::{format_document, write_output},
};
use frontmark_core::{DocumentProcessor, TypedSchema};
use log::{LevelFilter, debug};

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  let config = Config::load(&cli)?;
  debug!("Using configuration: {config:?}");

  let markdown = read_input(&cli)?;
  let processor = DocumentProcessor::new(config.processor_options());

  let content = if config.output.require_frontmatter {
    let document = processor
      .process_with_schema(
        &markdown,
        &TypedSchema::<serde_json::Value>::new(),
      )
      .wrap_err_with(|| format!("Failed to process {}", cli.input.display()))?;
    format_document(&document, config.output.format)?
  } else {
    let document = processor
      .process(&markdown)
      .wrap_err_with(|| format!("Failed to process {}", cli.input.display()))?;
    format_document(&document, config.output.format)?
  };

  write_output(&content, cli.output.as_deref())
}

/// Read the input document from a file or standard input.
fn read_input(cli: &Cli) -> Result<String> {
  if cli.reads_stdin() {
    let mut markdown = String::new();
    io::stdin()
      .read_to_string(&mut markdown)
      .wrap_err("Failed to read standard input")?;
    Ok(markdown)
  } else {
    fs::read_to_string(&cli.input)
      .wrap_err_with(|| format!("Failed to read {}", cli.input.display()))
  }
}
