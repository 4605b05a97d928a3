//! Expose frontmark's internal API for use in integration tests. The library
//! crate is `frontmark-core`; prefer it in other programs.
pub mod cli;
pub mod config;
pub mod output;
