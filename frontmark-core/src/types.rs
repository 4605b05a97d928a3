//! Types for frontmark-core public API and internal use.
use serde::{Deserialize, Serialize};

use crate::utils;

/// Represents a heading line found in a Markdown document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Heading {
  /// Anchor ID derived from `name`.
  pub id:    String,
  /// Heading level (1-6).
  pub level: u8,
  /// Heading text as written, trimmed.
  pub name:  String,
}

impl Heading {
  /// Build a heading, deriving its ID from the name.
  #[must_use]
  pub fn new(level: u8, name: impl Into<String>) -> Self {
    let name = name.into();
    Self {
      id: utils::slugify(&name),
      level,
      name,
    }
  }
}

/// Result of processing a document.
///
/// `T` is whatever the metadata schema produced, or `()` when the document was
/// processed without one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessedDocument<T = ()> {
  /// Article body with the metadata block removed.
  pub article: String,

  /// Headings found in the article, in document order.
  pub headings: Vec<Heading>,

  /// Rendered HTML of the article.
  pub html: String,

  /// Validated metadata.
  pub frontmatter: T,
}
