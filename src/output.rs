//! Canonical text rendering of expression trees.
//!
//! Rendering is a pretty printer, not an echo of the source:
//!
//! - binary operators get one space on each side (`a + b`)
//! - prefix and postfix operators get none (`-a`, `n!`)
//! - calls render as `name(a, b, c)`
//! - blocks join their statements with `\n`
//! - strings are always double quoted
//! - implicit multiplication renders as `*`
//! - numbers use the shortest text that reads back as the same value, in
//!   exponent form (`1e+06`, `1.5e-07`) outside `1e-4 <= |n| < 1e6`
//!
//! Parsing the rendered text and rendering again yields the same text, but not
//! always the same tree. Implicit multiplication binds tighter than `^`, `!`
//! and prefix `-`, while the `*` it renders as does not:
//!
//! ```text
//! 2 x ^ 2     pow(multiply(2, x), 2)
//! 2 * x ^ 2   multiply(2, pow(x, 2))
//! ```
//!
//! Strings have no escapes. A constant holding a `"` (from `'a"b'`) renders
//! as `"a"b"`, which does not scan again.
//!
//! ```
//! use mathexpr::parse;
//!
//! let tree = parse("max( 'a',2x )").unwrap();
//! assert_eq!(tree.to_string(), r#"max("a", 2 * x)"#);
//! ```

use std::fmt;

use crate::ast::{Function, Node, Operator, Symbol};

/// Shortest text that reads back as the same `f64`.
///
/// Switches to exponent form when the decimal exponent is below -4 or at
/// least 6. The exponent is signed and at least two digits long (`1e+21`,
/// `1e-05`). Infinities render as `+Inf` and `-Inf`.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let sign = if value > 0.0 { '+' } else { '-' };
        return format!("{sign}Inf");
    }
    if value == 0.0 {
        return value.to_string();
    }

    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific
        .split_once('e')
        .and_then(|(mantissa, exp)| Some((mantissa, exp.parse::<i32>().ok()?)))
    else {
        return value.to_string();
    };

    if (-4..6).contains(&exponent) {
        value.to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Symbol(symbol) => write!(f, "{symbol}"),
            Node::Function(call) => write!(f, "{call}"),
            Node::Parenthesis(content) => write!(f, "({content})"),
            Node::Operator(op) => write!(f, "{op}"),
            Node::Block(statements) => {
                for (i, statement) in statements.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "{statement}")?;
                }
                Ok(())
            }
            Node::Boolean(value) => write!(f, "{value}"),
            Node::Null => f.write_str("null"),
            Node::Float(value) => f.write_str(&format_float(*value)),
            Node::Int(value) => write!(f, "{value}"),
            Node::Constant(value) => write!(f, "\"{value}\""),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.callee)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.args.as_slice() {
            [operand] if self.func.is_postfix() => write!(f, "{operand}{}", self.op),
            [operand] => write!(f, "{}{operand}", self.op),
            [left, right] => write!(f, "{left} {} {right}", self.op),
            // Only reachable through hand-built operators with a bad arity.
            args => {
                write!(f, "{}(", self.op)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}
