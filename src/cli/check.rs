//! Run mathexpr commands against an expression

use super::{CliError, node_to_json, tokens_to_json};
use crate::{Scanner, parse};

/// What to do with the expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// Only validate syntax
    #[default]
    Check,
    /// Print the canonical rendering
    Render,
    /// Print the tree as JSON
    Ast,
    /// Print the scanned tokens as JSON
    Tokens,
}

/// Options for a command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub command: Command,
    /// Source text of the expression
    pub expression: String,
    /// Pretty-print JSON output
    pub pretty: bool,
}

/// Result of a command
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Canonical rendering of the tree
    Rendered(String),
    /// Tree or tokens as JSON
    Json(serde_json::Value),
}

impl CheckResult {
    /// Text to print for this result.
    pub fn to_output(&self, pretty: bool) -> Result<String, CliError> {
        match self {
            CheckResult::SyntaxValid => Ok("Syntax is valid".to_string()),
            CheckResult::Rendered(text) => Ok(text.clone()),
            CheckResult::Json(value) if pretty => Ok(serde_json::to_string_pretty(value)?),
            CheckResult::Json(value) => Ok(serde_json::to_string(value)?),
        }
    }
}

/// Execute a mathexpr command
pub fn execute(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let expression = &options.expression;

    match options.command {
        Command::Check => {
            parse(expression)?;
            Ok(CheckResult::SyntaxValid)
        }
        Command::Render => Ok(CheckResult::Rendered(parse(expression)?.to_string())),
        Command::Ast => Ok(CheckResult::Json(node_to_json(&parse(expression)?))),
        Command::Tokens => {
            let tokens = Scanner::new(expression).scan_tokens()?;
            Ok(CheckResult::Json(tokens_to_json(&tokens)))
        }
    }
}
