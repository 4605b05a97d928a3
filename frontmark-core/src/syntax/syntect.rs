//! Syntect-based syntax highlighting backend enhanced with two-face.
//!
//! This module provides a syntax highlighter using the Syntect library,
//! which uses Sublime Text's syntax definitions (TextMate grammars),
//! extended with the two-face crate's syntax definitions and themes.

use std::sync::OnceLock;

use syntect::{
  highlighting::{Theme, ThemeSet},
  html::highlighted_html_for_string,
  parsing::SyntaxSet,
};
use two_face::theme::{EmbeddedLazyThemeSet, EmbeddedThemeName};

use super::{
  error::{SyntaxError, SyntaxResult},
  types::{HighlightConfig, SyntaxHighlighter, SyntaxManager},
};

/// Theme used when neither the caller nor the highlighter names one.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// Themes shipped by two-face, by the names users configure them with.
const EMBEDDED_THEME_NAMES: &[&str] = &[
  "Ansi",
  "Base16",
  "Base16EightiesDark",
  "Base16MochaDark",
  "Base16OceanDark",
  "Base16OceanLight",
  "Base16_256",
  "ColdarkCold",
  "ColdarkDark",
  "DarkNeon",
  "Dracula",
  "Github",
  "GruvboxDark",
  "GruvboxLight",
  "InspiredGithub",
  "Leet",
  "MonokaiExtended",
  "MonokaiExtendedBright",
  "MonokaiExtendedLight",
  "MonokaiExtendedOrigin",
  "Nord",
  "OneHalfDark",
  "OneHalfLight",
  "SolarizedDark",
  "SolarizedLight",
  "SublimeSnazzy",
  "TwoDark",
  "VisualStudioDarkPlus",
  "Zenburn",
];

/// Map a theme name onto a two-face embedded theme, ignoring ASCII case.
fn embedded_theme(name: &str) -> Option<EmbeddedThemeName> {
  let theme = match name.to_ascii_lowercase().as_str() {
    "ansi" => EmbeddedThemeName::Ansi,
    "base16" => EmbeddedThemeName::Base16,
    "base16eightiesdark" => EmbeddedThemeName::Base16EightiesDark,
    "base16mochadark" => EmbeddedThemeName::Base16MochaDark,
    "base16oceandark" => EmbeddedThemeName::Base16OceanDark,
    "base16oceanlight" => EmbeddedThemeName::Base16OceanLight,
    "base16_256" => EmbeddedThemeName::Base16_256,
    "coldarkcold" => EmbeddedThemeName::ColdarkCold,
    "coldarkdark" => EmbeddedThemeName::ColdarkDark,
    "darkneon" => EmbeddedThemeName::DarkNeon,
    "dracula" => EmbeddedThemeName::Dracula,
    "github" => EmbeddedThemeName::Github,
    "gruvboxdark" => EmbeddedThemeName::GruvboxDark,
    "gruvboxlight" => EmbeddedThemeName::GruvboxLight,
    "inspiredgithub" => EmbeddedThemeName::InspiredGithub,
    "leet" => EmbeddedThemeName::Leet,
    "monokaiextended" => EmbeddedThemeName::MonokaiExtended,
    "monokaiextendedbright" => EmbeddedThemeName::MonokaiExtendedBright,
    "monokaiextendedlight" => EmbeddedThemeName::MonokaiExtendedLight,
    "monokaiextendedorigin" => EmbeddedThemeName::MonokaiExtendedOrigin,
    "nord" => EmbeddedThemeName::Nord,
    "onehalfdark" => EmbeddedThemeName::OneHalfDark,
    "onehalflight" => EmbeddedThemeName::OneHalfLight,
    "solarizeddark" => EmbeddedThemeName::SolarizedDark,
    "solarizedlight" => EmbeddedThemeName::SolarizedLight,
    "sublimesnazzy" => EmbeddedThemeName::SublimeSnazzy,
    "twodark" => EmbeddedThemeName::TwoDark,
    "visualstudiodarkplus" => EmbeddedThemeName::VisualStudioDarkPlus,
    "zenburn" => EmbeddedThemeName::Zenburn,
    _ => return None,
  };
  Some(theme)
}

/// Syntect-based syntax highlighter
#[derive(Debug, Clone)]
pub struct SyntectHighlighter {
  theme_name: String,
}

impl SyntectHighlighter {
  /// Create a new Syntect highlighter with the specified default theme.
  #[must_use]
  pub fn new(theme_name: Option<String>) -> Self {
    Self {
      theme_name: theme_name.unwrap_or_else(|| DEFAULT_THEME.to_string()),
    }
  }

  /// Get the syntect `SyntaxSet`.
  fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(two_face::syntax::extra_newlines)
  }

  /// Get the two-face theme set with extended themes.
  fn theme_set() -> &'static EmbeddedLazyThemeSet {
    static THEME_SET: OnceLock<EmbeddedLazyThemeSet> = OnceLock::new();
    THEME_SET.get_or_init(two_face::theme::extra)
  }

  /// Get the default syntect `ThemeSet`.
  fn default_theme_set() -> &'static ThemeSet {
    static DEFAULT_THEME_SET: OnceLock<ThemeSet> = OnceLock::new();
    DEFAULT_THEME_SET.get_or_init(ThemeSet::load_defaults)
  }

  /// Get a theme by name, falling back to this highlighter's default theme.
  fn get_theme(&self, theme_name: Option<&str>) -> SyntaxResult<&'static Theme> {
    let name = theme_name
      .filter(|name| !name.is_empty())
      .unwrap_or(&self.theme_name);

    // Syntect's bundled themes first, then two-face's
    let default_theme_set = Self::default_theme_set();
    if let Some(theme) = default_theme_set.themes.get(name) {
      return Ok(theme);
    }
    if let Some((_, theme)) = default_theme_set
      .themes
      .iter()
      .find(|(key, _)| key.eq_ignore_ascii_case(name))
    {
      return Ok(theme);
    }

    embedded_theme(name)
      .map(|embedded| Self::theme_set().get(embedded))
      .ok_or_else(|| SyntaxError::ThemeNotFound(name.to_string()))
  }
}

impl Default for SyntectHighlighter {
  fn default() -> Self {
    Self::new(None)
  }
}

impl SyntaxHighlighter for SyntectHighlighter {
  fn name(&self) -> &'static str {
    "Syntect"
  }

  fn supported_languages(&self) -> Vec<String> {
    Self::syntax_set()
      .syntaxes()
      .iter()
      .flat_map(|syntax| {
        std::iter::once(syntax.name.to_lowercase())
          .chain(syntax.file_extensions.iter().map(|ext| ext.to_lowercase()))
      })
      .collect()
  }

  fn available_themes(&self) -> Vec<String> {
    let mut themes: Vec<String> =
      Self::default_theme_set().themes.keys().cloned().collect();
    themes.extend(EMBEDDED_THEME_NAMES.iter().map(ToString::to_string));
    themes.sort();
    themes.dedup();
    themes
  }

  fn plain_language(&self) -> &'static str {
    "txt"
  }

  fn supports_language(&self, language: &str) -> bool {
    Self::syntax_set().find_syntax_by_token(language).is_some()
  }

  fn highlight(
    &self,
    code: &str,
    language: &str,
    theme: Option<&str>,
  ) -> SyntaxResult<String> {
    let syntax_set = Self::syntax_set();
    let syntax = syntax_set
      .find_syntax_by_token(language)
      .unwrap_or_else(|| syntax_set.find_syntax_plain_text());

    let theme = self.get_theme(theme)?;

    highlighted_html_for_string(code, syntax_set, syntax, theme)
      .map_err(|e| SyntaxError::HighlightingFailed(e.to_string()))
  }
}

/// Create a Syntect-based syntax manager with the given configuration.
#[must_use]
pub fn create_syntect_manager(config: HighlightConfig) -> SyntaxManager {
  SyntaxManager::new(Box::new(SyntectHighlighter::default()), config)
}
