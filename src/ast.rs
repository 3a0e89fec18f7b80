//! # Abstract Syntax Tree
//!
//! Token and node types for the expression language.
//!
//! - **[tokens]** - Tokens produced by the [`Scanner`](crate::scanner::Scanner)
//! - **[operators]** - Canonical operator tags
//! - **[nodes]** - The expression tree
//!
//! ## Quick Start
//!
//! ```text
//! 2 x^2 + 3 x - 1
//! max(a, b) >= 10
//! ```
//!
//! ## Precedence
//!
//! Loosest to tightest:
//!
//! | Level | Operators | Associativity |
//! |---|---|---|
//! | or | `\|` | left |
//! | and | `&` | left |
//! | equality | `==` `!=` | left |
//! | comparison | `<` `<=` `>` `>=` | left |
//! | term | `+` `-` | left |
//! | factor | `*` `/` `%` | left |
//! | power | `^` | right |
//! | unary | prefix `-` | - |
//! | postfix | `!` | - |
//! | implicit | `2 x`, `(a)(b)` | left |
//!
//! ## Statements
//!
//! Lines are separate statements:
//!
//! ```text
//! 2 x + 1
//! f(x)
//! ```
//!
//! More than one statement, or a leading or trailing newline, yields a
//! [`Node::Block`].
pub mod nodes;
pub mod operators;
pub mod tokens;

pub use nodes::{Function, FunctionBuilder, Node, Operator, Symbol};
pub use operators::{OperatorFn, UnknownOperatorFn};
pub use tokens::{Token, TokenKind};
