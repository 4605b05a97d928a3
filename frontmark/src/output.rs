//! Formatting processed documents for output.
use std::{
  fs,
  io::{self, Write},
  path::Path,
};

use color_eyre::eyre::{Context, Result};
use frontmark_core::ProcessedDocument;
use serde::Serialize;

use crate::cli::OutputFormat;

/// Format a processed document.
///
/// JSON output is the whole record, pretty-printed. HTML output is the
/// rendered article alone.
///
/// # Errors
///
/// Returns an error if the metadata cannot be serialized as JSON.
pub fn format_document<T: Serialize>(
  document: &ProcessedDocument<T>,
  format: OutputFormat,
) -> Result<String> {
  match format {
    OutputFormat::Json => {
      let mut json = serde_json::to_string_pretty(document)
        .wrap_err("Failed to serialize document as JSON")?;
      json.push('\n');
      Ok(json)
    },
    OutputFormat::Html => Ok(document.html.clone()),
  }
}

/// Write `content` to `path`, or to standard output when no path is given.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_output(content: &str, path: Option<&Path>) -> Result<()> {
  if let Some(path) = path {
    fs::write(path, content).wrap_err_with(|| {
      format!("Failed to write output to {}", path.display())
    })?;
    log::info!("Wrote {}", path.display());
  } else {
    let mut stdout = io::stdout().lock();
    stdout
      .write_all(content.as_bytes())
      .and_then(|()| stdout.flush())
      .wrap_err("Failed to write to standard output")?;
  }
  Ok(())
}
