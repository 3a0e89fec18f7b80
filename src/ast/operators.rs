use std::{fmt, str::FromStr};

/// Canonical operator tag.
///
/// Decouples the operation an evaluator performs from the spelling kept in
/// [`Operator::op`](crate::ast::Operator) for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorFn {
    /// `|`
    BitOr,
    /// `&`
    BitAnd,
    /// `+`
    Add,
    /// binary `-`
    Subtract,
    /// `*`, also synthesized for implicit multiplication
    Multiply,
    /// `/`
    Divide,
    /// `!=`
    Unequal,
    /// `==`
    Equal,
    /// `>`
    Larger,
    /// `>=`
    LargerEq,
    /// `<`
    Smaller,
    /// `<=`
    SmallerEq,
    /// postfix `!`
    Factorial,
    /// prefix `-`
    UnaryMinus,
    /// `%`
    Mod,
    /// `^`
    Pow,
}

impl OperatorFn {
    pub const ALL: [OperatorFn; 16] = [
        OperatorFn::BitOr,
        OperatorFn::BitAnd,
        OperatorFn::Add,
        OperatorFn::Subtract,
        OperatorFn::Multiply,
        OperatorFn::Divide,
        OperatorFn::Unequal,
        OperatorFn::Equal,
        OperatorFn::Larger,
        OperatorFn::LargerEq,
        OperatorFn::Smaller,
        OperatorFn::SmallerEq,
        OperatorFn::Factorial,
        OperatorFn::UnaryMinus,
        OperatorFn::Mod,
        OperatorFn::Pow,
    ];

    /// The stable tag name, e.g. `"largerEq"`.
    pub fn name(&self) -> &'static str {
        match self {
            OperatorFn::BitOr => "bitOr",
            OperatorFn::BitAnd => "bitAnd",
            OperatorFn::Add => "add",
            OperatorFn::Subtract => "subtract",
            OperatorFn::Multiply => "multiply",
            OperatorFn::Divide => "divide",
            OperatorFn::Unequal => "unequal",
            OperatorFn::Equal => "equal",
            OperatorFn::Larger => "larger",
            OperatorFn::LargerEq => "largerEq",
            OperatorFn::Smaller => "smaller",
            OperatorFn::SmallerEq => "smallerEq",
            OperatorFn::Factorial => "factorial",
            OperatorFn::UnaryMinus => "unaryMinus",
            OperatorFn::Mod => "mod",
            OperatorFn::Pow => "pow",
        }
    }

    /// The canonical source spelling.
    pub fn symbol(&self) -> &'static str {
        match self {
            OperatorFn::BitOr => "|",
            OperatorFn::BitAnd => "&",
            OperatorFn::Add => "+",
            OperatorFn::Subtract | OperatorFn::UnaryMinus => "-",
            OperatorFn::Multiply => "*",
            OperatorFn::Divide => "/",
            OperatorFn::Unequal => "!=",
            OperatorFn::Equal => "==",
            OperatorFn::Larger => ">",
            OperatorFn::LargerEq => ">=",
            OperatorFn::Smaller => "<",
            OperatorFn::SmallerEq => "<=",
            OperatorFn::Factorial => "!",
            OperatorFn::Mod => "%",
            OperatorFn::Pow => "^",
        }
    }

    /// Number of operands the operator takes.
    pub fn arity(&self) -> usize {
        match self {
            OperatorFn::Factorial | OperatorFn::UnaryMinus => 1,
            _ => 2,
        }
    }

    /// Whether the operator is written after its operand.
    pub fn is_postfix(&self) -> bool {
        matches!(self, OperatorFn::Factorial)
    }
}

impl fmt::Display for OperatorFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a tag name is not in the operator table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operator function: {0}")]
pub struct UnknownOperatorFn(pub String);

impl FromStr for OperatorFn {
    type Err = UnknownOperatorFn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperatorFn::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| UnknownOperatorFn(s.to_string()))
    }
}
