//! Type definitions for the document processor.
//!
//! # Examples
//!
//! ```
//! use frontmark_core::{DocumentProcessor, ProcessorOptionsBuilder};
//!
//! let options = ProcessorOptionsBuilder::new()
//!   .smart_punctuation(false)
//!   .highlight_theme("base16-ocean.dark")
//!   .build();
//!
//! let processor = DocumentProcessor::new(options);
//! ```
use serde::{Deserialize, Serialize};

use crate::render::{RenderOptions, RenderPipeline};

/// Options for configuring the document processor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorOptions {
  /// Rendering options for the article body.
  #[serde(default)]
  pub render: RenderOptions,
}

/// Builder for constructing `ProcessorOptions` with method chaining.
#[derive(Debug, Clone)]
pub struct ProcessorOptionsBuilder {
  options: ProcessorOptions,
}

impl ProcessorOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self {
      options: ProcessorOptions::default(),
    }
  }

  /// Enable or disable GitHub Flavored Markdown.
  #[must_use]
  pub const fn gfm(mut self, enabled: bool) -> Self {
    self.options.render.gfm = enabled;
    self
  }

  /// Enable or disable typographic punctuation.
  #[must_use]
  pub const fn smart_punctuation(mut self, enabled: bool) -> Self {
    self.options.render.smart_punctuation = enabled;
    self
  }

  /// Enable or disable heading `id` attributes.
  #[must_use]
  pub const fn heading_ids(mut self, enabled: bool) -> Self {
    self.options.render.heading_ids = enabled;
    self
  }

  /// Enable or disable syntax highlighting.
  #[must_use]
  pub const fn highlight_code(mut self, enabled: bool) -> Self {
    self.options.render.highlight.enabled = enabled;
    self
  }

  /// Set the syntax highlighting theme.
  #[must_use]
  pub fn highlight_theme<S: Into<String>>(mut self, theme: S) -> Self {
    self.options.render.highlight.theme = Some(theme.into());
    self
  }

  /// Map a code block language name onto another.
  #[must_use]
  pub fn language_alias<A: Into<String>, L: Into<String>>(
    mut self,
    alias: A,
    language: L,
  ) -> Self {
    self
      .options
      .render
      .highlight
      .language_aliases
      .insert(alias.into(), language.into());
    self
  }

  /// Choose whether unknown languages are highlighted as plain text.
  #[must_use]
  pub const fn fallback_to_plain(mut self, enabled: bool) -> Self {
    self.options.render.highlight.fallback_to_plain = enabled;
    self
  }

  /// Build the final `ProcessorOptions`.
  #[must_use]
  pub fn build(self) -> ProcessorOptions {
    self.options
  }
}

impl Default for ProcessorOptionsBuilder {
  fn default() -> Self {
    Self::new()
  }
}

/// Document processor: splits, validates, scans and renders.
///
/// Cheap to clone; clones share the highlighting backend.
#[derive(Debug, Clone)]
pub struct DocumentProcessor {
  pub(crate) options:  ProcessorOptions,
  pub(crate) pipeline: RenderPipeline,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_builder_defaults_match_default_options() {
    assert_eq!(
      ProcessorOptionsBuilder::new().build(),
      ProcessorOptions::default()
    );
  }

  #[test]
  fn test_builder_sets_fields() {
    let options = ProcessorOptionsBuilder::new()
      .gfm(false)
      .smart_punctuation(false)
      .heading_ids(false)
      .highlight_code(false)
      .highlight_theme("Nord")
      .language_alias("rs", "rust")
      .fallback_to_plain(false)
      .build();

    let render = &options.render;
    assert!(!render.gfm);
    assert!(!render.smart_punctuation);
    assert!(!render.heading_ids);
    assert!(!render.highlight.enabled);
    assert!(!render.highlight.fallback_to_plain);
    assert_eq!(render.highlight.theme.as_deref(), Some("Nord"));
    assert_eq!(
      render.highlight.language_aliases.get("rs").map(String::as_str),
      Some("rust")
    );
    // Builder additions keep the stock aliases
    assert!(render.highlight.language_aliases.contains_key("js"));
  }

  #[test]
  fn test_options_deserialize_with_defaults() {
    let options: ProcessorOptions = toml::from_str(
      r#"
[render]
smart_punctuation = false

[render.highlight]
theme = "Dracula"
"#,
    )
    .expect("valid config");

    assert!(options.render.gfm);
    assert!(!options.render.smart_punctuation);
    assert!(options.render.highlight.enabled);
    assert_eq!(options.render.highlight.theme.as_deref(), Some("Dracula"));
  }

  #[test]
  fn test_empty_config_is_default() {
    let options: ProcessorOptions = toml::from_str("").expect("empty config");
    assert_eq!(options, ProcessorOptions::default());
  }
}
