//! Core implementation of the document processor.
//!
//! Every call runs the same sequence: split the metadata block off, validate
//! it when a schema is given, then scan headings and render HTML side by side
//! on the rayon pool.
use log::debug;

use super::types::{DocumentProcessor, ProcessorOptions};
use crate::{
  error::{ProcessError, ProcessResult},
  frontmatter::{MetadataSchema, split_metadata, validate_metadata},
  headings::scan_headings,
  render::RenderPipeline,
  types::ProcessedDocument,
};

impl DocumentProcessor {
  /// Create a new `DocumentProcessor` with the given options.
  ///
  /// The render pipeline, including the highlighting backend, is built once
  /// here and reused by every call.
  #[must_use]
  pub fn new(options: ProcessorOptions) -> Self {
    let pipeline = RenderPipeline::new(options.render.clone());
    Self { options, pipeline }
  }

  /// Create a processor around an already configured pipeline.
  ///
  /// Use this to plug in a custom [`SyntaxHighlighter`] through
  /// [`RenderPipeline::with_syntax_manager`].
  ///
  /// [`SyntaxHighlighter`]: crate::syntax::SyntaxHighlighter
  #[must_use]
  pub fn with_pipeline(pipeline: RenderPipeline) -> Self {
    let options = ProcessorOptions {
      render: pipeline.options().clone(),
    };
    Self { options, pipeline }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &ProcessorOptions {
    &self.options
  }

  /// Access the render pipeline.
  #[must_use]
  pub const fn pipeline(&self) -> &RenderPipeline {
    &self.pipeline
  }

  /// Process a document without metadata validation.
  ///
  /// A metadata block, if present, is still removed from the article.
  ///
  /// # Errors
  ///
  /// Returns an error if rendering fails.
  pub fn process(&self, markdown: &str) -> ProcessResult<ProcessedDocument> {
    let split = split_metadata(markdown);
    debug!(
      "Processing document ({} bytes, metadata block: {})",
      markdown.len(),
      split.has_metadata()
    );
    self.assemble(split.article, ())
  }

  /// Process a document, validating its metadata block with `schema`.
  ///
  /// # Errors
  ///
  /// Returns [`ProcessError::MissingMetadata`] when the document has no
  /// metadata block, [`ProcessError::MetadataParse`] or
  /// [`ProcessError::MetadataValidation`] when the block is rejected, and
  /// any rendering error.
  pub fn process_with_schema<S>(
    &self,
    markdown: &str,
    schema: &S,
  ) -> ProcessResult<ProcessedDocument<S::Output>>
  where
    S: MetadataSchema + ?Sized,
  {
    let split = split_metadata(markdown);
    let Some(metadata) = split.metadata else {
      debug!("Schema supplied but document has no metadata block");
      return Err(ProcessError::MissingMetadata);
    };

    let frontmatter = validate_metadata(metadata, schema)?;
    debug!("Metadata block validated");
    self.assemble(split.article, frontmatter)
  }

  /// Scan and render `article` concurrently and build the result.
  fn assemble<T>(
    &self,
    article: &str,
    frontmatter: T,
  ) -> ProcessResult<ProcessedDocument<T>> {
    let (headings, html) = rayon::join(
      || scan_headings(article),
      || self.pipeline.render(article),
    );
    let html = html?;

    debug!(
      "Rendered {} bytes of HTML, {} heading(s)",
      html.len(),
      headings.len()
    );

    Ok(ProcessedDocument {
      article: article.to_string(),
      headings,
      html,
      frontmatter,
    })
  }
}

impl Default for DocumentProcessor {
  fn default() -> Self {
    Self::new(ProcessorOptions::default())
  }
}

#[cfg(test)]
#[allow(clippy::panic, reason = "Fine in tests")]
mod tests {
  use serde::Deserialize;

  use super::*;
  use crate::{
    frontmatter::{TypedSchema, ValidationIssue, Value},
    processor::ProcessorOptionsBuilder,
  };

  #[derive(Debug, Deserialize, PartialEq)]
  struct Counter {
    a: i64,
  }

  fn processor() -> DocumentProcessor {
    DocumentProcessor::new(
      ProcessorOptionsBuilder::new().highlight_code(false).build(),
    )
  }

  #[test]
  fn test_process_with_schema_example() {
    let doc = processor()
      .process_with_schema(
        "---\na: 1\n---\nbody",
        &TypedSchema::<Counter>::new(),
      )
      .expect("valid document");

    assert_eq!(doc.frontmatter, Counter { a: 1 });
    assert_eq!(doc.article, "body");
    assert_eq!(doc.html, "<p>body</p>\n");
    assert!(doc.headings.is_empty());
  }

  #[test]
  fn test_missing_metadata_with_schema() {
    let result = processor()
      .process_with_schema("# Title\n", &TypedSchema::<Counter>::new());
    assert!(matches!(result, Err(ProcessError::MissingMetadata)));
  }

  #[test]
  fn test_process_strips_metadata_without_validating() {
    let doc = processor()
      .process("---\nnot: [valid\n---\n# Title\n")
      .expect("no schema means no validation");
    assert_eq!(doc.article, "# Title\n");
    assert_eq!(doc.headings.len(), 1);
  }

  #[test]
  fn test_indented_body_renders_as_code() {
    let body = "    let x = 1;\n\ntext\n";
    let with_metadata = processor()
      .process(&format!("---\nt: x\n---\n{body}"))
      .expect("process");
    let without_metadata = processor().process(body).expect("process");

    assert_eq!(with_metadata.article, body);
    assert!(with_metadata.html.contains("<pre><code>let x = 1;\n</code></pre>"));
    assert_eq!(with_metadata.html, without_metadata.html);
  }

  #[test]
  fn test_process_without_metadata_keeps_document() {
    let markdown = "# Title\n\nText\n";
    let doc = processor().process(markdown).expect("process");
    assert_eq!(doc.article, markdown);
    assert!(doc.html.contains("<h1 id=\"title\">Title</h1>"));
  }

  #[test]
  fn test_first_issue_is_reported() {
    let schema = |_: &Value| -> Result<(), Vec<ValidationIssue>> {
      Err(vec![
        ValidationIssue::new("title", "required"),
        ValidationIssue::new("date", "required"),
      ])
    };

    for _ in 0..3 {
      match processor().process_with_schema("---\nx: 1\n---\n", &schema) {
        Err(ProcessError::MetadataValidation(issue)) => {
          assert_eq!(issue.path, "title");
        },
        other => panic!("expected validation error, got {other:?}"),
      }
    }
  }

  #[test]
  fn test_headings_and_html_agree_on_ids() {
    let doc = processor()
      .process("# Hello, World!\n\n## Dup\n\n## Dup\n")
      .expect("process");

    for heading in &doc.headings {
      assert!(doc.html.contains(&format!("id=\"{}\"", heading.id)));
    }
    assert_eq!(doc.headings.iter().filter(|h| h.id == "dup").count(), 2);
  }

  #[test]
  fn test_with_pipeline_keeps_options() {
    let options = ProcessorOptionsBuilder::new()
      .highlight_code(false)
      .heading_ids(false)
      .build();
    let pipeline = RenderPipeline::new(options.render.clone());
    let processor = DocumentProcessor::with_pipeline(pipeline);
    assert_eq!(processor.options(), &options);
  }
}
