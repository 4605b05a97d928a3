//! Document processing.
//!
//! - [`core`]: the [`DocumentProcessor`] pipeline
//! - [`process`]: convenience entry points
//! - [`types`]: options, builder and the processor struct
pub mod core;
pub mod process;
pub mod types;

pub use process::{
  process_batch,
  process_document,
  process_document_with_schema,
};
pub use types::{DocumentProcessor, ProcessorOptions, ProcessorOptionsBuilder};
