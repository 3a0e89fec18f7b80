//! CLI support for mathexpr
//!
//! Provides programmatic access to the `mathexpr` commands so other tools can
//! embed them without spawning a process.

mod check;
mod convert;

pub use check::{CheckOptions, CheckResult, Command, execute};
pub use convert::{node_to_json, tokens_to_json};

use std::io;
use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Scan error: {0}")]
    Scan(#[from] crate::ScanError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Pass an expression or pipe one to stdin.")]
    NoInput,
}
