//! # frontmark - Markdown documents with metadata
//!
//! Turns a Markdown document that may open with a `---` fenced YAML metadata
//! block into a structured record: the validated metadata, the article body,
//! its heading outline and the rendered HTML.
//!
//! ## Quick Start
//!
//! ```rust
//! use frontmark_core::process_document;
//!
//! let doc = process_document("---\ntitle: Hi\n---\n# Hello, World!\n\nText.")
//!   .expect("document renders");
//!
//! assert_eq!(doc.article, "# Hello, World!\n\nText.");
//! assert_eq!(doc.headings[0].id, "hello-world");
//! assert!(doc.html.contains("<h1 id=\"hello-world\">"));
//! ```
//!
//! ## Validating metadata
//!
//! ```rust
//! use frontmark_core::{DocumentProcessor, ProcessorOptions, TypedSchema};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Post {
//!   title: String,
//!   #[serde(default)]
//!   draft: bool,
//! }
//!
//! let processor = DocumentProcessor::new(ProcessorOptions::default());
//! let doc = processor
//!   .process_with_schema("---\ntitle: Notes\n---\nBody", &TypedSchema::<Post>::new())
//!   .expect("valid metadata");
//!
//! assert_eq!(doc.frontmatter.title, "Notes");
//! assert!(!doc.frontmatter.draft);
//! ```
//!
//! ## Features
//!
//! - **Metadata** split purely by the `---` delimiter, validated by any
//!   [`MetadataSchema`]
//! - **Heading outline** from a line scanner that skips fenced code
//! - **HTML rendering** with `comrak`, heading anchors, typographic
//!   punctuation and pluggable syntax highlighting

pub mod error;
pub mod frontmatter;
pub mod headings;
pub mod processor;
pub mod render;
pub mod syntax;
mod types;
pub mod utils;

pub use crate::{
  error::{ProcessError, ProcessResult},
  frontmatter::{
    MetadataSchema,
    MetadataSplit,
    TypedSchema,
    ValidationIssue,
    split_metadata,
    validate_metadata,
  },
  headings::scan_headings,
  processor::{
    DocumentProcessor,
    ProcessorOptions,
    ProcessorOptionsBuilder,
    process_batch,
    process_document,
    process_document_with_schema,
  },
  render::{RenderOptions, RenderPipeline},
  syntax::HighlightConfig,
  types::{Heading, ProcessedDocument},
};
