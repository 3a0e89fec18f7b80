pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod output;
pub mod parser;
pub mod scanner;
pub mod transform;

pub use ast::{Function, Node, Operator, OperatorFn, Symbol, Token, TokenKind};
pub use output::format_float;
pub use parser::{ErrorKind, MAX_DEPTH, MAX_NESTING, ParseError, Parser, parse};
pub use scanner::{ScanError, Scanner, scan};
pub use transform::Transformed;
