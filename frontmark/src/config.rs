//! Configuration file loading.
//!
//! A configuration file holds the renderer options plus output defaults:
//!
//! ```toml
//! [render]
//! smart_punctuation = false
//!
//! [render.highlight]
//! theme = "Dracula"
//! fallback_to_plain = true
//!
//! [output]
//! format = "html"
//! require_frontmatter = true
//! ```
//!
//! Command line flags override values from the file.
use std::{fs, path::Path};

use color_eyre::eyre::{Context, Result, bail};
use frontmark_core::{ProcessorOptions, RenderOptions};
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, OutputFormat};

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
  /// Output format when `--format` is not given.
  #[serde(default)]
  pub format: OutputFormat,

  /// Require a valid metadata block.
  #[serde(default)]
  pub require_frontmatter: bool,
}

/// Complete configuration for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
  /// Renderer options.
  #[serde(default)]
  pub render: RenderOptions,

  /// Output settings.
  #[serde(default)]
  pub output: OutputConfig,
}

impl Config {
  /// Create a new configuration from a file.
  /// Only TOML and JSON are supported.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, has an unsupported
  /// extension, or does not parse.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).wrap_err_with(|| {
      format!("Failed to read config file: {}", path.display())
    })?;

    let Some(ext) = path.extension() else {
      bail!("Config file has no extension: {}", path.display());
    };

    match ext.to_string_lossy().to_lowercase().as_str() {
      "json" => {
        serde_json::from_str(&content).wrap_err_with(|| {
          format!("Failed to parse JSON config from {}", path.display())
        })
      },
      "toml" => {
        toml::from_str(&content).wrap_err_with(|| {
          format!("Failed to parse TOML config from {}", path.display())
        })
      },
      _ => bail!("Unsupported config file format: {}", path.display()),
    }
  }

  /// Load config from file and CLI arguments.
  ///
  /// # Errors
  ///
  /// Returns an error if an explicitly given config file cannot be loaded.
  pub fn load(cli: &Cli) -> Result<Self> {
    let mut config = if let Some(config_path) = &cli.config_file {
      Self::from_file(config_path).wrap_err_with(|| {
        format!("Failed to load config from {}", config_path.display())
      })?
    } else {
      Self::default()
    };

    config.merge_with_cli(cli);
    Ok(config)
  }

  /// Merge CLI arguments into this config, prioritizing CLI values when
  /// present.
  pub fn merge_with_cli(&mut self, cli: &Cli) {
    if let Some(theme) = &cli.theme {
      self.render.highlight.theme = Some(theme.clone());
    }

    if cli.no_highlight {
      self.render.highlight.enabled = false;
    }

    if cli.require_frontmatter {
      self.output.require_frontmatter = true;
    }

    if let Some(format) = cli.format {
      self.output.format = format;
    }
  }

  /// Options for the document processor.
  #[must_use]
  pub fn processor_options(&self) -> ProcessorOptions {
    ProcessorOptions {
      render: self.render.clone(),
    }
  }
}
