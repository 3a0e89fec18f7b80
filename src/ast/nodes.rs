use crate::ast::OperatorFn;

/// A node of the expression tree.
///
/// Every node owns its children; no node is shared between two parents.
/// Structural equality is `PartialEq`; rendering is `Display` (see
/// [`output`](crate::output)); traversal and rewriting live in
/// [`transform`](crate::transform).
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Variable or constant name
    ///
    /// # Example
    /// ```text
    /// x
    /// ```
    Symbol(Symbol),

    /// Function call
    ///
    /// # Example
    /// ```text
    /// max(a, 2)
    /// ```
    Function(Function),

    /// Parenthesized expression, kept so rendering preserves grouping
    Parenthesis(Box<Node>),

    /// Prefix, postfix or infix operator application
    Operator(Operator),

    /// Newline separated statements, in source order
    Block(Vec<Node>),

    /// `true` or `false`
    Boolean(bool),

    /// `null`
    Null,

    /// Every number literal parses to a float
    Float(f64),

    /// Integer value. The parser never produces this; see [`Node::to_int_node`].
    Int(i64),

    /// String literal (decoded, without quotes)
    Constant(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub name: String,
}

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Symbol { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub callee: Symbol,
    pub args: Vec<Node>,
}

impl Function {
    pub fn new(name: impl Into<String>, args: Vec<Node>) -> Self {
        Function {
            callee: Symbol::new(name),
            args,
        }
    }

    pub fn builder() -> FunctionBuilder {
        FunctionBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.callee.name
    }
}

/// Incremental construction of a [`Function`].
///
/// The callee name defaults to empty.
///
/// ```
/// use mathexpr::ast::{Function, Node};
///
/// let call = Function::builder().name("max").arg(Node::float(1.0)).build();
/// assert_eq!(call.to_string(), "max(1)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FunctionBuilder {
    name: String,
    args: Vec<Node>,
}

impl FunctionBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn arg(mut self, arg: Node) -> Self {
        self.args.push(arg);
        self
    }

    pub fn build(self) -> Function {
        Function::new(self.name, self.args)
    }
}

/// Operator application.
///
/// `args` has one element for [`OperatorFn::UnaryMinus`] and
/// [`OperatorFn::Factorial`], two for everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    /// Spelling used when rendering
    pub op: String,
    pub func: OperatorFn,
    pub args: Vec<Node>,
}

impl Operator {
    /// Returns `None` when the number of arguments does not match the tag.
    pub fn new(func: OperatorFn, op: impl Into<String>, args: Vec<Node>) -> Option<Self> {
        if args.len() != func.arity() {
            return None;
        }
        Some(Operator {
            op: op.into(),
            func,
            args,
        })
    }

    /// Applies a one-operand tag, spelled canonically.
    ///
    /// # Panics
    ///
    /// Panics if `func` takes two operands. Use [`Operator::new`] to check
    /// instead.
    pub fn unary(func: OperatorFn, operand: Node) -> Self {
        assert_eq!(func.arity(), 1, "{func} is not a unary operator");
        Operator {
            op: func.symbol().to_string(),
            func,
            args: vec![operand],
        }
    }

    /// Applies a two-operand tag, spelled canonically.
    ///
    /// # Panics
    ///
    /// Panics if `func` takes one operand.
    pub fn binary(func: OperatorFn, left: Node, right: Node) -> Self {
        assert_eq!(func.arity(), 2, "{func} is not a binary operator");
        Operator {
            op: func.symbol().to_string(),
            func,
            args: vec![left, right],
        }
    }

    pub fn is_unary(&self) -> bool {
        self.args.len() == 1
    }
}

impl Node {
    pub fn symbol(name: impl Into<String>) -> Node {
        Node::Symbol(Symbol::new(name))
    }

    pub fn function(name: impl Into<String>, args: Vec<Node>) -> Node {
        Node::Function(Function::new(name, args))
    }

    pub fn parenthesis(content: Node) -> Node {
        Node::Parenthesis(Box::new(content))
    }

    pub fn unary(func: OperatorFn, operand: Node) -> Node {
        Node::Operator(Operator::unary(func, operand))
    }

    pub fn binary(func: OperatorFn, left: Node, right: Node) -> Node {
        Node::Operator(Operator::binary(func, left, right))
    }

    pub fn block(statements: Vec<Node>) -> Node {
        Node::Block(statements)
    }

    pub fn boolean(value: bool) -> Node {
        Node::Boolean(value)
    }

    pub fn null() -> Node {
        Node::Null
    }

    pub fn float(value: f64) -> Node {
        Node::Float(value)
    }

    pub fn int(value: i64) -> Node {
        Node::Int(value)
    }

    pub fn constant(value: impl Into<String>) -> Node {
        Node::Constant(value.into())
    }

    /// Variant name, e.g. `"Operator"`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Symbol(_) => "Symbol",
            Node::Function(_) => "Function",
            Node::Parenthesis(_) => "Parenthesis",
            Node::Operator(_) => "Operator",
            Node::Block(_) => "Block",
            Node::Boolean(_) => "Boolean",
            Node::Null => "Null",
            Node::Float(_) => "Float",
            Node::Int(_) => "Int",
            Node::Constant(_) => "Constant",
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// Owned child nodes, left to right.
    ///
    /// A function's callee is a [`Symbol`], not a `Node`, so it is not included.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Function(call) => &call.args,
            Node::Parenthesis(content) => std::slice::from_ref(content.as_ref()),
            Node::Operator(op) => &op.args,
            Node::Block(statements) => statements,
            Node::Symbol(_)
            | Node::Boolean(_)
            | Node::Null
            | Node::Float(_)
            | Node::Int(_)
            | Node::Constant(_) => &[],
        }
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        match self {
            Node::Function(call) => &mut call.args,
            Node::Parenthesis(content) => std::slice::from_mut(content.as_mut()),
            Node::Operator(op) => &mut op.args,
            Node::Block(statements) => statements,
            Node::Symbol(_)
            | Node::Boolean(_)
            | Node::Null
            | Node::Float(_)
            | Node::Int(_)
            | Node::Constant(_) => &mut [],
        }
    }

    // Float narrowing

    /// True for an `Int`, or a finite `Float` with no fractional part.
    pub fn is_int(&self) -> bool {
        self.as_int().is_some()
    }

    /// Integer value of an `Int`, or of a `Float` that holds a whole number
    /// within `i64` range.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Node::Int(n) => Some(*n),
            Node::Float(n) => float_to_int(*n),
            _ => None,
        }
    }

    /// Narrows a whole-valued `Float` to an `Int` node.
    pub fn to_int_node(&self) -> Option<Node> {
        match self {
            Node::Float(n) => float_to_int(*n).map(Node::Int),
            Node::Int(n) => Some(Node::Int(*n)),
            _ => None,
        }
    }
}

fn float_to_int(value: f64) -> Option<i64> {
    // 2^63 is exactly representable; anything at or above it overflows i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if value.is_finite() && value.trunc() == value && value >= -LIMIT && value < LIMIT {
        Some(value as i64)
    } else {
        None
    }
}

impl From<Symbol> for Node {
    fn from(symbol: Symbol) -> Self {
        Node::Symbol(symbol)
    }
}

impl From<Function> for Node {
    fn from(call: Function) -> Self {
        Node::Function(call)
    }
}

impl From<Operator> for Node {
    fn from(op: Operator) -> Self {
        Node::Operator(op)
    }
}
