use std::fmt;

/// Classification of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Delimiters
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,

    // Operators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `^`
    Caret,
    /// `!`, factorial when postfix
    Bang,
    /// `&`
    Ampersand,
    /// `|`
    Pipe,

    // Comparison
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// Plain `=`. Scanned, but no grammar rule accepts it.
    Eq,

    /// A `.` that does not begin a number
    ///
    /// # Examples
    /// ```text
    /// 1234..     // Number("1234.") then Dot
    /// . 5        // Dot then Number("5")
    /// ```
    Dot,

    // Literals
    /// String literal in single or double quotes
    String,

    /// Decimal, scientific or binary number
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// .5
    /// 6.02e23
    /// 0b1011
    /// ```
    Number,

    /// Identifier. Keywords (`true`, `false`, `null`) are identifiers too;
    /// the parser tells them apart.
    Identifier,

    /// `\n`, which separates statements
    Newline,

    /// `;`, reserved
    Semicolon,
}

impl TokenKind {
    /// Short name used in diagnostics and token dumps.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LParen => "lparen",
            TokenKind::RParen => "rparen",
            TokenKind::Comma => "comma",
            TokenKind::Plus => "plus",
            TokenKind::Minus => "minus",
            TokenKind::Star => "star",
            TokenKind::Slash => "slash",
            TokenKind::Percent => "percent",
            TokenKind::Caret => "caret",
            TokenKind::Bang => "bang",
            TokenKind::Ampersand => "ampersand",
            TokenKind::Pipe => "pipe",
            TokenKind::Lt => "lt",
            TokenKind::LtEq => "lteq",
            TokenKind::Gt => "gt",
            TokenKind::GtEq => "gteq",
            TokenKind::EqEq => "eqeq",
            TokenKind::NotEq => "noteq",
            TokenKind::Eq => "eq",
            TokenKind::Dot => "dot",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Identifier => "identifier",
            TokenKind::Newline => "newline",
            TokenKind::Semicolon => "semicolon",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified slice of source text.
///
/// `text` is exactly what appeared in the source (quotes included for strings),
/// `literal` is the decoded payload and is only set for strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub literal: Option<String>,
    /// 1-based line the token starts on
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            literal: None,
            line,
        }
    }

    pub fn string(text: impl Into<String>, literal: impl Into<String>, line: usize) -> Self {
        Token {
            kind: TokenKind::String,
            text: text.into(),
            literal: Some(literal.into()),
            line,
        }
    }

    /// Compares the raw source text, code point by code point.
    ///
    /// Used for keyword checks like `true` and `null`.
    pub fn text_is(&self, word: &str) -> bool {
        self.text == word
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
