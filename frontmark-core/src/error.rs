//! Error types for document processing.
use thiserror::Error;

use crate::{frontmatter::ValidationIssue, syntax::SyntaxError};

/// Result type for document processing.
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Errors that abort processing of a document.
///
/// No partial result is produced when any of these is returned.
#[derive(Debug, Error)]
pub enum ProcessError {
  #[error("A metadata schema was supplied but the document has no metadata block")]
  MissingMetadata,

  #[error("Metadata failed validation: {0}")]
  MetadataValidation(ValidationIssue),

  #[error("Failed to parse metadata block: {0}")]
  MetadataParse(#[from] serde_yaml::Error),

  #[error("Syntax highlighting failed: {0}")]
  Highlight(#[from] SyntaxError),

  #[error("Failed to write HTML: {0}")]
  Render(#[from] std::fmt::Error),
}
