//! Provides a trait-based architecture for syntax highlighting that allows
//! multiple backends to be plugged in.
//!
//! The bundled backend is **Syntect**, using Sublime Text syntax definitions
//! with two-face added for extended syntax definitions and themes. Any other
//! engine can be used by implementing [`SyntaxHighlighter`] and handing it to
//! [`SyntaxManager::new`].

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{SyntaxError, SyntaxResult};
pub use types::{HighlightConfig, SyntaxHighlighter, SyntaxManager};

#[cfg(feature = "syntect")] mod syntect;
#[cfg(feature = "syntect")] pub use self::syntect::*;

/// Create the default syntax manager based on available features.
///
/// # Errors
///
/// Returns [`SyntaxError::NoBackendAvailable`] if no backend feature is
/// enabled.
pub fn create_default_manager(
  config: HighlightConfig,
) -> SyntaxResult<SyntaxManager> {
  #[cfg(feature = "syntect")]
  {
    Ok(create_syntect_manager(config))
  }

  #[cfg(not(feature = "syntect"))]
  {
    let _ = config;
    Err(SyntaxError::NoBackendAvailable)
  }
}
