//! High-level processing functions.
use rayon::prelude::*;

use super::types::{DocumentProcessor, ProcessorOptions};
use crate::{
  error::ProcessResult,
  frontmatter::MetadataSchema,
  types::ProcessedDocument,
};

/// Process a document with default options and no metadata validation.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn process_document(markdown: &str) -> ProcessResult<ProcessedDocument> {
  DocumentProcessor::new(ProcessorOptions::default()).process(markdown)
}

/// Process a document with default options, validating its metadata block.
///
/// # Errors
///
/// See [`DocumentProcessor::process_with_schema`].
pub fn process_document_with_schema<S>(
  markdown: &str,
  schema: &S,
) -> ProcessResult<ProcessedDocument<S::Output>>
where
  S: MetadataSchema + ?Sized,
{
  DocumentProcessor::new(ProcessorOptions::default())
    .process_with_schema(markdown, schema)
}

/// Process many documents in parallel with one processor.
///
/// Results are returned in input order; a failing document does not affect
/// the others.
pub fn process_batch<D>(
  processor: &DocumentProcessor,
  documents: &[D],
) -> Vec<ProcessResult<ProcessedDocument>>
where
  D: AsRef<str> + Sync,
{
  documents
    .par_iter()
    .map(|document| processor.process(document.as_ref()))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    error::ProcessError,
    frontmatter::TypedSchema,
    processor::ProcessorOptionsBuilder,
  };

  #[test]
  fn test_process_document_defaults() {
    let doc = process_document("# Hi\n\n\"quoted\"\n").expect("process");
    assert!(doc.html.contains("<h1 id=\"hi\">Hi</h1>"));
    assert!(doc.html.contains("\u{201c}quoted\u{201d}"));
  }

  #[test]
  fn test_process_document_with_schema_missing_block() {
    let result = process_document_with_schema(
      "no metadata here",
      &TypedSchema::<serde_json::Value>::new(),
    );
    assert!(matches!(result, Err(ProcessError::MissingMetadata)));
  }

  #[test]
  fn test_process_batch_preserves_order() {
    let processor = DocumentProcessor::new(
      ProcessorOptionsBuilder::new().highlight_code(false).build(),
    );
    let documents = ["# One", "# Two", "---\nx: 1\n---\n# Three"];

    let results = process_batch(&processor, &documents);
    let names: Vec<String> = results
      .into_iter()
      .map(|result| {
        let doc = result.expect("process");
        doc.headings[0].name.clone()
      })
      .collect();

    assert_eq!(names, ["One", "Two", "Three"]);
  }
}
