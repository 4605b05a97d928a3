//! Core types and traits for syntax highlighting.

use std::{collections::HashMap, fmt};

use log::debug;
use serde::{Deserialize, Serialize};

use super::error::{SyntaxError, SyntaxResult};

/// Trait for syntax highlighting backends.
///
/// Allows different syntax highlighting implementations to be used
/// interchangeably. Implementations handle language lookup, theme management,
/// and the actual highlighting, and must be shareable across threads.
pub trait SyntaxHighlighter: Send + Sync {
  /// Get the name of this highlighter backend
  fn name(&self) -> &'static str;

  /// Get a list of supported languages
  fn supported_languages(&self) -> Vec<String>;

  /// Get a list of available themes
  fn available_themes(&self) -> Vec<String>;

  /// Language token this backend uses for unhighlighted plain text
  fn plain_language(&self) -> &'static str {
    "text"
  }

  /// Check if a language is supported
  fn supports_language(&self, language: &str) -> bool {
    self
      .supported_languages()
      .iter()
      .any(|lang| lang.eq_ignore_ascii_case(language))
  }

  /// Check if a theme is available
  fn has_theme(&self, theme: &str) -> bool {
    self
      .available_themes()
      .iter()
      .any(|t| t.eq_ignore_ascii_case(theme))
  }

  /// Highlight code with the specified language and theme.
  ///
  /// # Arguments
  ///
  /// * `code` - The source code to highlight
  /// * `language` - The programming language (case-insensitive)
  /// * `theme` - The theme name (case-insensitive, optional)
  ///
  /// # Returns
  ///
  /// Highlighted HTML string on success
  ///
  /// # Errors
  ///
  /// Returns an error if the theme is unknown or the backend fails.
  fn highlight(
    &self,
    code: &str,
    language: &str,
    theme: Option<&str>,
  ) -> SyntaxResult<String>;
}

const fn default_true() -> bool {
  true
}

fn default_language_aliases() -> HashMap<String, String> {
  [
    ("js", "javascript"),
    ("ts", "typescript"),
    ("py", "python"),
    ("rb", "ruby"),
    ("sh", "bash"),
    ("shell", "bash"),
    ("yml", "yaml"),
    ("nixos", "nix"),
    ("md", "markdown"),
  ]
  .into_iter()
  .map(|(alias, language)| (alias.to_string(), language.to_string()))
  .collect()
}

/// Configuration for code block highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightConfig {
  /// Whether fenced code blocks are highlighted at all
  #[serde(default = "default_true")]
  pub enabled: bool,

  /// Theme to highlight with; the backend default when unset
  #[serde(default)]
  pub theme: Option<String>,

  /// Language aliases for mapping common names to supported languages
  #[serde(default = "default_language_aliases")]
  pub language_aliases: HashMap<String, String>,

  /// Whether to fall back to plain text for unsupported languages
  #[serde(default = "default_true")]
  pub fallback_to_plain: bool,
}

impl Default for HighlightConfig {
  fn default() -> Self {
    Self {
      enabled:           true,
      theme:             None,
      language_aliases:  default_language_aliases(),
      fallback_to_plain: true,
    }
  }
}

/// High-level syntax highlighting manager.
///
/// Wraps a backend with alias resolution, the configured theme and the
/// plain-text fallback for unknown languages.
pub struct SyntaxManager {
  highlighter: Box<dyn SyntaxHighlighter>,
  config:      HighlightConfig,
}

impl fmt::Debug for SyntaxManager {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SyntaxManager")
      .field("highlighter", &self.highlighter.name())
      .field("config", &self.config)
      .finish()
  }
}

impl SyntaxManager {
  /// Create a new syntax manager with the given highlighter and config
  #[must_use]
  pub fn new(
    highlighter: Box<dyn SyntaxHighlighter>,
    config: HighlightConfig,
  ) -> Self {
    Self {
      highlighter,
      config,
    }
  }

  /// Create a new syntax manager with the default configuration
  #[must_use]
  pub fn with_highlighter(highlighter: Box<dyn SyntaxHighlighter>) -> Self {
    Self::new(highlighter, HighlightConfig::default())
  }

  /// Get the underlying highlighter
  #[must_use]
  pub fn highlighter(&self) -> &dyn SyntaxHighlighter {
    self.highlighter.as_ref()
  }

  /// Get the configuration
  #[must_use]
  pub const fn config(&self) -> &HighlightConfig {
    &self.config
  }

  /// Resolve a language name using aliases
  #[must_use]
  pub fn resolve_language(&self, language: &str) -> String {
    let language = language.to_lowercase();
    self
      .config
      .language_aliases
      .get(&language)
      .cloned()
      .unwrap_or(language)
  }

  /// Highlight code with alias resolution and plain-text fallback.
  ///
  /// An empty language is highlighted as plain text.
  ///
  /// # Errors
  ///
  /// Returns [`SyntaxError::UnsupportedLanguage`] when the language is unknown
  /// and fallback is disabled, and passes through any backend error.
  pub fn highlight_code(
    &self,
    code: &str,
    language: &str,
  ) -> SyntaxResult<String> {
    let theme = self.config.theme.as_deref();
    let plain = self.highlighter.plain_language();
    let language = language.trim();

    if language.is_empty() {
      return self.highlighter.highlight(code, plain, theme);
    }

    let resolved_language = self.resolve_language(language);
    if self.highlighter.supports_language(&resolved_language) {
      return self.highlighter.highlight(code, &resolved_language, theme);
    }

    if self.config.fallback_to_plain {
      debug!(
        "Language '{resolved_language}' is not supported by {}, using plain \
         text",
        self.highlighter.name()
      );
      return self.highlighter.highlight(code, plain, theme);
    }

    Err(SyntaxError::UnsupportedLanguage(resolved_language))
  }
}
