//! HTML rendering pipeline.
//!
//! A [`RenderPipeline`] is an explicitly constructed, immutable value: build
//! it once, share it across threads, and call [`RenderPipeline::render`] as
//! often as needed. Nothing is registered globally, so pipelines with
//! different highlight settings never interfere.
//!
//! Rendering applies three extensions on top of `comrak`, in this order:
//!
//! - heading IDs taken from each heading's source line with
//!   [`parse_heading_line`], so they always equal the heading scanner's IDs,
//! - typographic punctuation (comrak's smart punctuation, prose only),
//! - code block highlighting through a [`SyntaxManager`].
use std::sync::{Arc, LazyLock};

use comrak::{
  Arena,
  nodes::{AstNode, NodeHeading, NodeValue},
  options::Options,
  parse_document,
};
use log::{debug, trace, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
  error::ProcessResult,
  headings::parse_heading_line,
  syntax::{HighlightConfig, SyntaxManager, create_default_manager},
  utils,
};

const fn default_true() -> bool {
  true
}

/// Options for configuring the rendering pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
  /// Enable GitHub Flavored Markdown (tables, strikethrough, task lists,
  /// autolinks, footnotes).
  #[serde(default = "default_true")]
  pub gfm: bool,

  /// Replace straight quotes, dashes and ellipses with typographic ones.
  #[serde(default = "default_true")]
  pub smart_punctuation: bool,

  /// Give every rendered heading an `id` attribute.
  #[serde(default = "default_true")]
  pub heading_ids: bool,

  /// Code block highlighting.
  #[serde(default)]
  pub highlight: HighlightConfig,
}

impl Default for RenderOptions {
  fn default() -> Self {
    Self {
      gfm:               true,
      smart_punctuation: true,
      heading_ids:       true,
      highlight:         HighlightConfig::default(),
    }
  }
}

/// Trait for AST transformations applied between parsing and rendering.
pub trait AstTransformer {
  /// Transform the tree rooted at `node` in place.
  ///
  /// # Errors
  ///
  /// Returns an error if the transformation cannot be completed; the whole
  /// render is abandoned in that case.
  fn transform<'a>(&self, node: &'a AstNode<'a>) -> ProcessResult<()>;
}

/// AST transformer replacing fenced code blocks with highlighted HTML.
///
/// The language is the first word of the block's info string. Unknown
/// languages never fail: the manager falls back to plain text, and if its
/// fallback is disabled the block keeps comrak's default rendering.
pub struct CodeBlockHighlighter<'m> {
  manager: &'m SyntaxManager,
}

impl<'m> CodeBlockHighlighter<'m> {
  /// Create a transformer that highlights with `manager`.
  #[must_use]
  pub const fn new(manager: &'m SyntaxManager) -> Self {
    Self { manager }
  }
}

impl AstTransformer for CodeBlockHighlighter<'_> {
  fn transform<'a>(&self, node: &'a AstNode<'a>) -> ProcessResult<()> {
    // Collect first so no node is borrowed while we rewrite it
    let mut code_blocks = Vec::new();
    for descendant in node.descendants() {
      if let NodeValue::CodeBlock(ref block) = descendant.data.borrow().value
        && block.fenced
      {
        code_blocks.push((descendant, block.info.clone(), block.literal.clone()));
      }
    }

    for (block_node, info, literal) in code_blocks {
      let language = info.split_whitespace().next().unwrap_or_default();

      let highlighted = match self.manager.highlight_code(&literal, language) {
        Ok(highlighted) => highlighted,
        Err(e) if e.is_unsupported_language() => {
          debug!("Leaving code block unhighlighted: {e}");
          continue;
        },
        Err(e) => return Err(e.into()),
      };

      trace!("Highlighted {} byte code block as '{language}'", literal.len());
      let html = if language.is_empty() {
        format!("<div class=\"highlight\">{}</div>\n", highlighted.trim_end())
      } else {
        format!(
          "<div class=\"highlight\" data-language=\"{}\">{}</div>\n",
          html_escape::encode_double_quoted_attribute(language),
          highlighted.trim_end()
        )
      };
      block_node.data.borrow_mut().value = NodeValue::HtmlInline(html);
    }

    Ok(())
  }
}

/// AST transformer giving every heading an `id` attribute.
///
/// The ID is read from the heading's source line, before any typographic
/// substitution, with the same parser the heading scanner uses. Headings that
/// do not start their source line with `#` (setext headings, headings nested
/// in containers that don't parse) fall back to their rendered text content.
/// An empty ID means no attribute. Raw HTML headings are never touched.
pub struct HeadingIdAssigner<'s, 'o, 'c> {
  source:  &'s str,
  options: &'o Options<'c>,
}

impl<'s, 'o, 'c> HeadingIdAssigner<'s, 'o, 'c> {
  /// Create a transformer for a tree parsed from `source` with `options`.
  #[must_use]
  pub const fn new(source: &'s str, options: &'o Options<'c>) -> Self {
    Self { source, options }
  }

  /// ID of the heading starting at the given 1-based line and column.
  fn source_id(&self, line: usize, column: usize) -> Option<String> {
    let text = self.source.lines().nth(line.checked_sub(1)?)?;
    let text = text.get(column.saturating_sub(1)..).unwrap_or(text);
    parse_heading_line(text).map(|heading| heading.id)
  }
}

impl AstTransformer for HeadingIdAssigner<'_, '_, '_> {
  fn transform<'a>(&self, node: &'a AstNode<'a>) -> ProcessResult<()> {
    let mut headings = Vec::new();
    for descendant in node.descendants() {
      let data = descendant.data.borrow();
      if let NodeValue::Heading(NodeHeading { level, .. }) = data.value {
        headings.push((descendant, level, data.sourcepos.start));
      }
    }

    for (heading, level, start) in headings {
      let mut html = String::new();
      comrak::format_html(heading, self.options, &mut html)?;

      let id = self
        .source_id(start.line, start.column)
        .unwrap_or_else(|| heading_text_id(&html));
      if id.is_empty() {
        continue;
      }

      let Some(rest) = html.strip_prefix(&format!("<h{level}>")) else {
        continue;
      };
      trace!("Heading on line {} gets id '{id}'", start.line);
      let html = format!("<h{level} id=\"{id}\">{rest}");

      let children: Vec<_> = heading.children().collect();
      for child in children {
        child.detach();
      }
      heading.data.borrow_mut().value = NodeValue::HtmlInline(html);
    }

    Ok(())
  }
}

/// Derive an ID from rendered heading HTML: tags stripped, entities decoded.
fn heading_text_id(html: &str) -> String {
  static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*>").unwrap_or_else(|e| {
      log::error!("Failed to compile TAG_RE regex: {e}");
      utils::never_matching_regex()
    })
  });

  let text = TAG_RE.replace_all(html, "");
  utils::slugify(html_escape::decode_html_entities(&text).trim())
}

/// Configured Markdown-to-HTML renderer.
#[derive(Debug, Clone)]
pub struct RenderPipeline {
  options:        RenderOptions,
  syntax_manager: Option<Arc<SyntaxManager>>,
}

impl RenderPipeline {
  /// Create a pipeline, loading the default highlighting backend when
  /// highlighting is enabled.
  ///
  /// If no backend is compiled in, code blocks are rendered without
  /// highlighting and a warning is logged.
  #[must_use]
  pub fn new(options: RenderOptions) -> Self {
    let syntax_manager = if options.highlight.enabled {
      match create_default_manager(options.highlight.clone()) {
        Ok(manager) => Some(Arc::new(manager)),
        Err(e) => {
          warn!("Syntax highlighting disabled: {e}");
          None
        },
      }
    } else {
      None
    };

    Self {
      options,
      syntax_manager,
    }
  }

  /// Create a pipeline around an existing syntax manager.
  ///
  /// The manager's own configuration decides languages, theme and fallback;
  /// `options.highlight.enabled` still switches highlighting off entirely.
  #[must_use]
  pub fn with_syntax_manager(
    options: RenderOptions,
    syntax_manager: Arc<SyntaxManager>,
  ) -> Self {
    let syntax_manager = options.highlight.enabled.then_some(syntax_manager);
    Self {
      options,
      syntax_manager,
    }
  }

  /// Access pipeline options.
  #[must_use]
  pub const fn options(&self) -> &RenderOptions {
    &self.options
  }

  /// Whether code blocks will actually be highlighted.
  #[must_use]
  pub const fn highlights_code(&self) -> bool {
    self.syntax_manager.is_some()
  }

  /// Render a Markdown article to an HTML fragment.
  ///
  /// Output is deterministic for a given pipeline and input.
  ///
  /// # Errors
  ///
  /// Returns an error if the highlighter fails for a reason other than an
  /// unknown language, or if writing the HTML fails.
  pub fn render(&self, article: &str) -> ProcessResult<String> {
    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, article, &options);

    if self.options.heading_ids {
      HeadingIdAssigner::new(article, &options).transform(root)?;
    }

    if let Some(manager) = &self.syntax_manager {
      CodeBlockHighlighter::new(manager).transform(root)?;
    }

    let mut html = String::with_capacity(article.len() * 2);
    comrak::format_html(root, &options, &mut html)?;

    Ok(html)
  }

  /// Build comrak options from `RenderOptions`.
  fn comrak_options(&self) -> Options<'_> {
    let mut options = Options::default();
    if self.options.gfm {
      options.extension.table = true;
      options.extension.footnotes = true;
      options.extension.strikethrough = true;
      options.extension.tasklist = true;
      options.extension.autolink = true;
    }
    options.parse.smart = self.options.smart_punctuation;
    // IDs come from HeadingIdAssigner so they match the heading scanner
    options.extension.header_ids = None;
    // Highlighted blocks are spliced in as raw HTML
    options.render.r#unsafe = true;
    options
  }
}

impl Default for RenderPipeline {
  fn default() -> Self {
    Self::new(RenderOptions::default())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::syntax::{SyntaxError, SyntaxHighlighter, SyntaxResult};

  struct BracketHighlighter;

  impl SyntaxHighlighter for BracketHighlighter {
    fn name(&self) -> &'static str {
      "Bracket"
    }

    fn supported_languages(&self) -> Vec<String> {
      vec!["rust".to_string(), "text".to_string()]
    }

    fn available_themes(&self) -> Vec<String> {
      Vec::new()
    }

    fn highlight(
      &self,
      code: &str,
      language: &str,
      _theme: Option<&str>,
    ) -> SyntaxResult<String> {
      if code.contains("EXPLODE") {
        return Err(SyntaxError::HighlightingFailed("boom".to_string()));
      }
      Ok(format!(
        "<pre class=\"hl-{language}\">{}</pre>",
        html_escape::encode_text(code)
      ))
    }
  }

  fn pipeline(config: HighlightConfig) -> RenderPipeline {
    RenderPipeline::with_syntax_manager(
      RenderOptions::default(),
      Arc::new(SyntaxManager::new(Box::new(BracketHighlighter), config)),
    )
  }

  fn plain_pipeline() -> RenderPipeline {
    RenderPipeline::new(RenderOptions {
      highlight: HighlightConfig {
        enabled: false,
        ..Default::default()
      },
      ..Default::default()
    })
  }

  #[test]
  fn test_heading_ids() {
    let html = plain_pipeline()
      .render("# Hello, World!\n\n## Dup\n\n## Dup\n")
      .expect("render");
    assert!(html.contains("<h1 id=\"hello-world\">Hello, World!</h1>"));
    assert_eq!(html.matches("<h2 id=\"dup\">Dup</h2>").count(), 2);
  }

  #[test]
  fn test_heading_id_ignores_inline_markup() {
    let html = plain_pipeline()
      .render("## Using `code` & *emphasis*\n")
      .expect("render");
    assert!(html.contains("<h2 id=\"using-code--emphasis\">"));
  }

  #[test]
  fn test_heading_ids_can_be_disabled() {
    let pipeline = RenderPipeline::new(RenderOptions {
      heading_ids: false,
      highlight: HighlightConfig {
        enabled: false,
        ..Default::default()
      },
      ..Default::default()
    });
    let html = pipeline.render("# Title\n").expect("render");
    assert_eq!(html, "<h1>Title</h1>\n");
  }

  #[test]
  fn test_empty_ids_and_raw_html_headings_are_skipped() {
    let html = plain_pipeline()
      .render("### !!!\n\n<h2>Raw</h2>\n")
      .expect("render");
    assert!(html.contains("<h3>!!!</h3>"));
    assert!(html.contains("<h2>Raw</h2>"));
  }

  #[test]
  fn test_heading_ids_come_from_source_text() {
    let html = plain_pipeline()
      .render("# A -- B\n\n## Pros --- cons\n\n### See [docs](https://x.io)\n")
      .expect("render");
    assert!(html.contains("<h1 id=\"a----b\">A \u{2013} B</h1>"));
    assert!(html.contains("<h2 id=\"pros-----cons\">"));
    assert!(
      html.contains("<h3 id=\"see-docshttpsxio\">See <a href=\"https://x.io\">")
    );
  }

  #[test]
  fn test_setext_heading_uses_text_content() {
    let html = plain_pipeline()
      .render("Fancy *title*\n=============\n")
      .expect("render");
    assert!(html.contains("<h1 id=\"fancy-title\">Fancy <em>title</em></h1>"));
  }

  #[test]
  fn test_smart_punctuation_outside_code() {
    let html = plain_pipeline()
      .render("\"Quoted\" -- text\n\n`\"code\" --`\n")
      .expect("render");
    assert!(html.contains("\u{201c}Quoted\u{201d}"));
    assert!(html.contains("\u{2013}"));
    assert!(html.contains("<code>&quot;code&quot; --</code>"));
  }

  #[test]
  fn test_code_blocks_are_highlighted() {
    let html = pipeline(HighlightConfig::default())
      .render("```rust\nfn main() {}\n```\n")
      .expect("render");
    assert!(html.contains("<div class=\"highlight\" data-language=\"rust\">"));
    assert!(html.contains("<pre class=\"hl-rust\">fn main() {}"));
  }

  #[test]
  fn test_info_string_extra_words_are_ignored() {
    let html = pipeline(HighlightConfig::default())
      .render("```rust title=\"main.rs\"\nfn main() {}\n```\n")
      .expect("render");
    assert!(html.contains("<pre class=\"hl-rust\">"));
  }

  #[test]
  fn test_unknown_language_degrades_to_plain() {
    let html = pipeline(HighlightConfig::default())
      .render("```brainfudge\n+++\n```\n")
      .expect("unknown language must not fail");
    assert!(html.contains("<pre class=\"hl-text\">+++"));
  }

  #[test]
  fn test_unknown_language_without_fallback_keeps_default_block() {
    let html = pipeline(HighlightConfig {
      fallback_to_plain: false,
      ..Default::default()
    })
    .render("```brainfudge\n+++\n```\n")
    .expect("unknown language must not fail");
    assert!(html.contains("<pre><code class=\"language-brainfudge\">+++"));
    assert!(!html.contains("class=\"highlight\""));
  }

  #[test]
  fn test_highlighter_errors_fail_the_render() {
    let result =
      pipeline(HighlightConfig::default()).render("```rust\nEXPLODE\n```\n");
    assert!(matches!(
      result,
      Err(crate::ProcessError::Highlight(SyntaxError::HighlightingFailed(_)))
    ));
  }

  #[test]
  fn test_indented_code_is_not_highlighted() {
    let html = pipeline(HighlightConfig::default())
      .render("Para\n\n    indented code\n")
      .expect("render");
    assert!(html.contains("<pre><code>indented code"));
    assert!(!html.contains("highlight"));
  }

  #[test]
  fn test_plain_document_is_stable() {
    let pipeline = pipeline(HighlightConfig::default());
    let input = "Just a paragraph.\n\n- one\n- two\n";
    let first = pipeline.render(input).expect("render");
    let second = pipeline.render(input).expect("render");
    assert_eq!(first, second);
    assert!(!first.contains("id="));
    assert!(!first.contains("highlight"));
  }
}
