use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Command line interface for frontmark
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "Render Markdown documents with metadata blocks"
)]
pub struct Cli {
  /// Markdown file to process, or `-` to read standard input
  pub input: PathBuf,

  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,

  /// Path to a configuration file (TOML or JSON)
  #[arg(short = 'c', long = "config-file")]
  pub config_file: Option<PathBuf>,

  /// Syntax highlighting theme
  #[arg(long)]
  pub theme: Option<String>,

  /// Render code blocks without syntax highlighting
  #[arg(long)]
  pub no_highlight: bool,

  /// Fail unless the document opens with a well-formed metadata block
  #[arg(long)]
  pub require_frontmatter: bool,

  /// Output format
  #[arg(short, long, value_enum)]
  pub format: Option<OutputFormat>,

  /// Write output to this file instead of standard output
  #[arg(short, long)]
  pub output: Option<PathBuf>,
}

impl Cli {
  /// Parse command line arguments
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Whether the input should be read from standard input.
  #[must_use]
  pub fn reads_stdin(&self) -> bool {
    self.input.as_os_str() == "-"
  }
}

/// What to print for a processed document.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  /// The whole record: metadata, article, headings and HTML
  #[default]
  Json,
  /// The rendered HTML only
  Html,
}
