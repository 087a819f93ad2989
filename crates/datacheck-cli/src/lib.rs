//! datacheck CLI library.
//!
//! This module exposes internal types for testing purposes.
//! The main entry point is the `datacheck` binary.

pub mod backend;
pub mod check;
pub mod cli;
pub mod config;
pub mod logging;
pub mod output;

// Re-export commonly used types
pub use cli::Args;
