use crate::{
    ast::{Node, Operator, OperatorFn, Token, TokenKind},
    scanner::{ScanError, Scanner},
};
use thiserror::Error;

/// Errors raised while building a tree from tokens.
///
/// The first error aborts the parse; there is no recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input held no tokens at all
    #[error("empty expression")]
    EmptyExpression,

    /// Tokens ran out in the middle of a construct, e.g. `1 +`
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// A complete expression was followed by more tokens
    #[error("unexpected trailing tokens starting at {text:?} on line {line}")]
    UnexpectedTrailingTokens { text: String, line: usize },

    /// A call's argument list did not end with `)`
    #[error("unended call to function '{name}' on line {line}")]
    UnendedFunction { name: String, line: usize },

    /// A token that cannot start an expression
    #[error("unexpected token {text:?} on line {line}")]
    UnexpectedToken { text: String, line: usize },

    /// `(` whose content is not followed by `)`
    #[error("unclosed parenthesis opened on line {line}")]
    UnclosedParenthesis { line: usize },

    /// Nesting went past [`MAX_NESTING`] recursive constructs or [`MAX_DEPTH`]
    /// operators on one path
    #[error("expression nested deeper than {max_depth} levels on line {line}")]
    NestingTooDeep { max_depth: usize, line: usize },

    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Error class, without positions or text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyExpression,
    UnexpectedEndOfInput,
    UnexpectedTrailingTokens,
    UnendedFunction,
    UnexpectedToken,
    UnclosedParenthesis,
    NestingTooDeep,
    InvalidNumericLiteral,
    UnterminatedString,
    UnexpectedCharacter,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::EmptyExpression => ErrorKind::EmptyExpression,
            ParseError::UnexpectedEndOfInput => ErrorKind::UnexpectedEndOfInput,
            ParseError::UnexpectedTrailingTokens { .. } => ErrorKind::UnexpectedTrailingTokens,
            ParseError::UnendedFunction { .. } => ErrorKind::UnendedFunction,
            ParseError::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            ParseError::UnclosedParenthesis { .. } => ErrorKind::UnclosedParenthesis,
            ParseError::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
            ParseError::Scan(ScanError::InvalidNumericLiteral { .. }) => {
                ErrorKind::InvalidNumericLiteral
            }
            ParseError::Scan(ScanError::UnterminatedString { .. }) => ErrorKind::UnterminatedString,
            ParseError::Scan(ScanError::UnexpectedCharacter { .. }) => {
                ErrorKind::UnexpectedCharacter
            }
        }
    }
}

/// Scans and parses `text`.
///
/// ```
/// let tree = mathexpr::parse("2 x + 1").unwrap();
/// assert_eq!(tree.to_string(), "2 * x + 1");
/// ```
pub fn parse(text: &str) -> Result<Node, ParseError> {
    let tokens = Scanner::new(text).scan_tokens()?;
    tracing::debug!(tokens = tokens.len(), "scanned source");

    let result = Parser::new(tokens).parse();
    match &result {
        Ok(node) => tracing::debug!(root = node.kind_name(), "parsed expression"),
        Err(err) => tracing::debug!(error = %err, "parse failed"),
    }
    result
}

/// Parentheses, calls, prefix minus and exponents open at once.
pub const MAX_NESTING: usize = 128;

/// Operator and grouping nodes stacked on a single path from the root,
/// including the left-leaning chains built by `a + b + c ...`.
pub const MAX_DEPTH: usize = 512;

/// Recursive descent parser with one level per precedence tier.
///
/// Holds a cursor into the token list, so each parse needs its own instance.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    nesting: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            current: 0,
            nesting: 0,
            depth: 0,
        }
    }

    /// Parses the whole token list.
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        if self.tokens.is_empty() {
            return Err(ParseError::EmptyExpression);
        }

        self.nesting = 0;
        self.depth = 0;

        let node = self.parse_statements()?;

        if let Some(token) = self.peek() {
            return Err(ParseError::UnexpectedTrailingTokens {
                text: token.text.clone(),
                line: token.line,
            });
        }
        Ok(node)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.current).cloned()?;
        self.current += 1;
        Some(token)
    }

    /// Consumes the current token and returns its text.
    fn advance_text(&mut self) -> String {
        self.advance().map(|token| token.text).unwrap_or_default()
    }

    /// Line of the most recently consumed token.
    fn previous_line(&self) -> usize {
        self.current
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(1, |token| token.line)
    }

    /// Opens a recursive construct. Pair with [`Parser::leave`].
    fn enter(&mut self) -> Result<(), ParseError> {
        self.nesting += 1;
        if self.nesting > MAX_NESTING {
            return Err(ParseError::NestingTooDeep {
                max_depth: MAX_NESTING,
                line: self.previous_line(),
            });
        }
        self.deepen()
    }

    fn leave(&mut self) {
        self.nesting -= 1;
        self.depth -= 1;
    }

    /// One more node on the current path. Loops reset `depth` to the value
    /// they started with once their chain is built.
    fn deepen(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::NestingTooDeep {
                max_depth: MAX_DEPTH,
                line: self.previous_line(),
            });
        }
        Ok(())
    }

    fn skip_newlines(&mut self) -> usize {
        let mut skipped = 0;
        while self.check(TokenKind::Newline) {
            self.current += 1;
            skipped += 1;
        }
        skipped
    }

    /// Newline separated statements. One statement with no newlines around
    /// it comes back bare, anything else as a block.
    fn parse_statements(&mut self) -> Result<Node, ParseError> {
        let mut wrap = self.skip_newlines() > 0;
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_expression()?);

            if self.skip_newlines() == 0 {
                break;
            }
            wrap = true;
        }

        tracing::trace!(statements = statements.len(), wrap, "parsed statements");

        match (wrap, statements.len()) {
            (false, 1) => Ok(statements.swap_remove(0)),
            _ => Ok(Node::Block(statements)),
        }
    }

    pub fn parse_expression(&mut self) -> Result<Node, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_and()?;
        let mark = self.depth;

        while self.check(TokenKind::Pipe) {
            let op = self.advance_text();
            self.deepen()?;
            let right = self.parse_and()?;
            left = binary(OperatorFn::BitOr, op, left, right);
        }
        self.depth = mark;
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_equality()?;
        let mark = self.depth;

        while self.check(TokenKind::Ampersand) {
            let op = self.advance_text();
            self.deepen()?;
            let right = self.parse_equality()?;
            left = binary(OperatorFn::BitAnd, op, left, right);
        }
        self.depth = mark;
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_comparison()?;
        let mark = self.depth;

        loop {
            let func = match self.peek_kind() {
                Some(TokenKind::EqEq) => OperatorFn::Equal,
                Some(TokenKind::NotEq) => OperatorFn::Unequal,
                _ => break,
            };

            let op = self.advance_text();
            self.deepen()?;
            let right = self.parse_comparison()?;
            left = binary(func, op, left, right);
        }
        self.depth = mark;
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_term()?;
        let mark = self.depth;

        loop {
            let func = match self.peek_kind() {
                Some(TokenKind::Lt) => OperatorFn::Smaller,
                Some(TokenKind::LtEq) => OperatorFn::SmallerEq,
                Some(TokenKind::Gt) => OperatorFn::Larger,
                Some(TokenKind::GtEq) => OperatorFn::LargerEq,
                _ => break,
            };

            let op = self.advance_text();
            self.deepen()?;
            let right = self.parse_term()?;
            left = binary(func, op, left, right);
        }
        self.depth = mark;
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_factor()?;
        let mark = self.depth;

        loop {
            let func = match self.peek_kind() {
                Some(TokenKind::Plus) => OperatorFn::Add,
                Some(TokenKind::Minus) => OperatorFn::Subtract,
                _ => break,
            };

            let op = self.advance_text();
            self.deepen()?;
            let right = self.parse_factor()?;
            left = binary(func, op, left, right);
        }
        self.depth = mark;
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_power()?;
        let mark = self.depth;

        loop {
            let func = match self.peek_kind() {
                Some(TokenKind::Star) => OperatorFn::Multiply,
                Some(TokenKind::Slash) => OperatorFn::Divide,
                Some(TokenKind::Percent) => OperatorFn::Mod,
                _ => break,
            };

            let op = self.advance_text();
            self.deepen()?;
            let right = self.parse_power()?;
            left = binary(func, op, left, right);
        }
        self.depth = mark;
        Ok(left)
    }

    /// `^` is right associative: the exponent recurses into this level.
    fn parse_power(&mut self) -> Result<Node, ParseError> {
        let base = self.parse_unary()?;

        if self.check(TokenKind::Caret) {
            let op = self.advance_text();
            self.enter()?;
            let exponent = self.parse_power()?;
            self.leave();
            return Ok(binary(OperatorFn::Pow, op, base, exponent));
        }
        Ok(base)
    }

    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        if self.check(TokenKind::Minus) {
            let op = self.advance_text();
            self.enter()?;
            let operand = self.parse_unary()?;
            self.leave();
            return Ok(unary(OperatorFn::UnaryMinus, op, operand));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Node, ParseError> {
        let mut node = self.parse_implicit()?;
        let mark = self.depth;

        while self.check(TokenKind::Bang) {
            let op = self.advance_text();
            self.deepen()?;
            node = unary(OperatorFn::Factorial, op, node);
        }
        self.depth = mark;
        Ok(node)
    }

    /// Adjacent primaries multiply: `2 x`, `(a)(b)`.
    fn parse_implicit(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_primary()?;
        let mark = self.depth;

        while self.starts_implicit_operand(&left) {
            self.deepen()?;
            let right = self.parse_primary()?;
            left = binary(
                OperatorFn::Multiply,
                OperatorFn::Multiply.symbol().to_string(),
                left,
                right,
            );
        }
        self.depth = mark;
        Ok(left)
    }

    fn starts_implicit_operand(&self, left: &Node) -> bool {
        if matches!(left, Node::Constant(_)) {
            return false;
        }
        matches!(
            self.peek_kind(),
            Some(TokenKind::Identifier | TokenKind::Number | TokenKind::LParen)
        )
    }

    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let Some(token) = self.advance() else {
            return Err(ParseError::UnexpectedEndOfInput);
        };

        match token.kind {
            TokenKind::Identifier => {
                if token.text_is("true") {
                    Ok(Node::Boolean(true))
                } else if token.text_is("false") {
                    Ok(Node::Boolean(false))
                } else if token.text_is("null") {
                    Ok(Node::Null)
                } else if self.check(TokenKind::LParen) {
                    self.parse_call(token)
                } else {
                    Ok(Node::symbol(token.text))
                }
            }

            TokenKind::Number => parse_number(&token).map(Node::Float),

            TokenKind::String => Ok(Node::Constant(token.literal.unwrap_or_default())),

            TokenKind::LParen => {
                self.enter()?;
                let content = self.parse_expression()?;
                match self.advance() {
                    Some(close) if close.is(TokenKind::RParen) => {
                        self.leave();
                        Ok(Node::parenthesis(content))
                    }
                    _ => Err(ParseError::UnclosedParenthesis { line: token.line }),
                }
            }

            _ => Err(ParseError::UnexpectedToken {
                text: token.text,
                line: token.line,
            }),
        }
    }

    /// Comma separated arguments. Newlines may surround an argument but never
    /// separate two of them.
    fn parse_call(&mut self, name: Token) -> Result<Node, ParseError> {
        self.advance(); // consume '('
        self.enter()?;

        let unended = || ParseError::UnendedFunction {
            name: name.text.clone(),
            line: name.line,
        };

        let mut args = Vec::new();

        self.skip_newlines();
        if self.check(TokenKind::RParen) {
            self.advance();
            self.leave();
            return Ok(Node::function(name.text.clone(), args));
        }

        loop {
            self.skip_newlines();
            if self.is_at_end() {
                return Err(unended());
            }

            args.push(self.parse_expression()?);
            self.skip_newlines();

            match self.advance() {
                Some(token) if token.is(TokenKind::Comma) => continue,
                Some(token) if token.is(TokenKind::RParen) => break,
                _ => return Err(unended()),
            }
        }

        self.leave();
        Ok(Node::function(name.text.clone(), args))
    }
}

fn binary(func: OperatorFn, op: String, left: Node, right: Node) -> Node {
    Node::Operator(Operator {
        op,
        func,
        args: vec![left, right],
    })
}

fn unary(func: OperatorFn, op: String, operand: Node) -> Node {
    Node::Operator(Operator {
        op,
        func,
        args: vec![operand],
    })
}

fn parse_number(token: &Token) -> Result<f64, ParseError> {
    let invalid = || {
        ParseError::Scan(ScanError::InvalidNumericLiteral {
            text: token.text.clone(),
            line: token.line,
        })
    };

    match token.text.strip_prefix("0b") {
        Some(digits) => parse_binary(digits).ok_or_else(invalid),
        None => token.text.parse::<f64>().map_err(|_| invalid()),
    }
}

/// Base 2 with an optional fractional part, e.g. `101.1`.
fn parse_binary(digits: &str) -> Option<f64> {
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() {
        return None;
    }

    let bit = |c: char| match c {
        '0' => Some(0.0),
        '1' => Some(1.0),
        _ => None,
    };

    let mut value = 0.0_f64;
    for c in whole.chars() {
        value = value * 2.0 + bit(c)?;
    }

    let mut scale = 0.5;
    for c in fraction.chars() {
        value += bit(c)? * scale;
        scale /= 2.0;
    }
    Some(value)
}
