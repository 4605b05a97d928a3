//! Metadata block extraction and validation.
//!
//! A document may open with a metadata block fenced by `---`:
//!
//! ```markdown
//! ---
//! title: My Document
//! tags:
//!   - rust
//! ---
//!
//! # Document Content
//! ```
//!
//! [`split_metadata`] separates the block from the article purely by the
//! delimiter, and [`validate_metadata`] decodes it as YAML and hands the
//! value to a caller-supplied [`MetadataSchema`].
//!
//! # Usage
//!
//! ```rust
//! use frontmark_core::frontmatter::{TypedSchema, split_metadata, validate_metadata};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Meta {
//!   title: String,
//! }
//!
//! let split = split_metadata("---\ntitle: Hello\n---\nBody");
//! assert_eq!(split.article, "Body");
//!
//! let meta = validate_metadata(split.metadata.unwrap_or_default(), &TypedSchema::<Meta>::new())
//!   .unwrap();
//! assert_eq!(meta.title, "Hello");
//! ```
use std::{fmt, marker::PhantomData};

use log::trace;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
pub use serde_yaml::Value;

use crate::error::{ProcessError, ProcessResult};

/// Delimiter that opens and closes the metadata block.
pub const METADATA_DELIMITER: &str = "---";

/// A document split into its metadata block and article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataSplit<'a> {
  /// Raw text of the metadata block, if the document has one.
  pub metadata: Option<&'a str>,
  /// Everything after the metadata block.
  pub article:  &'a str,
}

impl MetadataSplit<'_> {
  /// Check if a metadata block was found.
  #[must_use]
  pub const fn has_metadata(&self) -> bool {
    self.metadata.is_some()
  }
}

/// Split a document into metadata text and article.
///
/// The delimiter has to occur at least twice. The text between the first and
/// second occurrence is the metadata; everything after the second occurrence
/// is the article, minus the line break that ends the closing delimiter line.
/// The article is otherwise kept verbatim, including indentation and later
/// delimiters. Text before
/// the first delimiter is dropped. With fewer than two delimiters the whole
/// document is returned unchanged as the article.
///
/// This is purely lexical: a thematic break written as `---` counts as a
/// delimiter too.
#[must_use]
pub fn split_metadata(doc: &str) -> MetadataSplit<'_> {
  let mut parts = doc.splitn(3, METADATA_DELIMITER);

  match (parts.next(), parts.next(), parts.next()) {
    (Some(_), Some(metadata), Some(rest)) => {
      trace!("Found metadata block of {} bytes", metadata.len());
      MetadataSplit {
        metadata: Some(metadata),
        article:  rest
          .strip_prefix("\r\n")
          .or_else(|| rest.strip_prefix('\n'))
          .unwrap_or(rest),
      }
    },
    _ => {
      MetadataSplit {
        metadata: None,
        article:  doc,
      }
    },
  }
}

/// A single problem reported by a [`MetadataSchema`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationIssue {
  /// Dotted location inside the metadata value; empty for the root.
  pub path:    String,
  /// Human readable description.
  pub message: String,
}

impl ValidationIssue {
  /// Create an issue at the given path.
  #[must_use]
  pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      path:    path.into(),
      message: message.into(),
    }
  }

  /// Create an issue about the metadata value as a whole.
  #[must_use]
  pub fn root(message: impl Into<String>) -> Self {
    Self::new(String::new(), message)
  }
}

impl fmt::Display for ValidationIssue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.path.is_empty() {
      write!(f, "{}", self.message)
    } else {
      write!(f, "{}: {}", self.path, self.message)
    }
  }
}

/// Capability needed to validate a decoded metadata block.
///
/// Implementations take an arbitrary decoded value and either produce a typed
/// result or report every issue they found, in a deterministic order. Any
/// validation library can sit behind this trait.
pub trait MetadataSchema {
  /// The validated, possibly transformed, metadata.
  type Output;

  /// Validate a decoded value without panicking.
  ///
  /// # Errors
  ///
  /// Returns the issues found when the value does not satisfy the schema.
  fn validate(&self, value: &Value) -> Result<Self::Output, Vec<ValidationIssue>>;
}

impl<F, T> MetadataSchema for F
where
  F: Fn(&Value) -> Result<T, Vec<ValidationIssue>>,
{
  type Output = T;

  fn validate(&self, value: &Value) -> Result<T, Vec<ValidationIssue>> {
    self(value)
  }
}

/// Schema backed by a type's `Deserialize` implementation.
///
/// Deserialization errors become a single root-level issue whose message is
/// the serde error (which names the offending field).
pub struct TypedSchema<T> {
  _marker: PhantomData<fn() -> T>,
}

impl<T> TypedSchema<T> {
  /// Create a schema for `T`.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      _marker: PhantomData,
    }
  }
}

impl<T> Default for TypedSchema<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Clone for TypedSchema<T> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<T> Copy for TypedSchema<T> {}

impl<T> fmt::Debug for TypedSchema<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TypedSchema")
      .field("type", &std::any::type_name::<T>())
      .finish()
  }
}

impl<T: DeserializeOwned> MetadataSchema for TypedSchema<T> {
  type Output = T;

  fn validate(&self, value: &Value) -> Result<T, Vec<ValidationIssue>> {
    serde_yaml::from_value(value.clone())
      .map_err(|e| vec![ValidationIssue::root(e.to_string())])
  }
}

/// Decode a metadata block and validate it against a schema.
///
/// An empty block decodes to `Null`. Only the first issue reported by the
/// schema is kept in the error.
///
/// # Errors
///
/// Returns [`ProcessError::MetadataParse`] if the block is not valid YAML and
/// [`ProcessError::MetadataValidation`] if the schema rejects it.
pub fn validate_metadata<S>(metadata: &str, schema: &S) -> ProcessResult<S::Output>
where
  S: MetadataSchema + ?Sized,
{
  let value = if metadata.trim().is_empty() {
    Value::Null
  } else {
    serde_yaml::from_str::<Value>(metadata)?
  };

  schema.validate(&value).map_err(|issues| {
    let first = issues.into_iter().next().unwrap_or_else(|| {
      ValidationIssue::root("metadata did not satisfy the schema")
    });
    ProcessError::MetadataValidation(first)
  })
}
