//! Token definitions for xpath locator expressions
//!
//! The raw scanner is a logos derive over the reserved symbols of the path grammar.
//! Two shapes need more than a regex:
//!
//!     - Quoted literals honour `\` escapes and must report the opening quote when the
//!       closing one is missing, so they are scanned by a callback over the remainder.
//!     - Axis names (`child::`) share their alphabet with tag names. The name pattern
//!       never contains `::`, so logos' longest match always prefers the axis.
//!
//! Raw tokens are lowered into [`Token`], which carries the kind, the source text and
//! the byte offset where the token began. See [lexing](crate::lexing) for the driver.

use logos::Logos;
use serde::Serialize;
use std::fmt;

/// Category of a lexed unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Element name, bare comparison operand or positional index (`button`, `price`, `2`)
    Tag,
    /// `@` marking an attribute test
    Attribute,
    /// Axis specifier, text is the name without the trailing `::`
    Axis,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// Comparison operator text
    Operator,
    /// Quoted literal, text is the raw content between the quotes
    Literal,
    /// `*`
    Wildcard,
    /// Namespace prefix; never produced by [`tokenize`](crate::lexing::tokenize)
    Namespace,
    /// `/` or the `//` descendant shorthand
    Slash,
    /// End-of-input marker
    End,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Tag => "tag",
            TokenKind::Attribute => "'@'",
            TokenKind::Axis => "axis",
            TokenKind::OpenBracket => "'['",
            TokenKind::CloseBracket => "']'",
            TokenKind::Operator => "operator",
            TokenKind::Literal => "literal",
            TokenKind::Wildcard => "'*'",
            TokenKind::Namespace => "namespace prefix",
            TokenKind::Slash => "slash",
            TokenKind::End => "end of input",
        };
        f.write_str(name)
    }
}

/// A single lexed unit of a path expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Zero-based byte offset where the token began
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            offset,
        }
    }

    /// The terminal marker appended after the last scanned token
    pub fn end(offset: usize) -> Self {
        Token::new(TokenKind::End, "", offset)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// `//`, which the parser expands into a descendant-or-self step
    pub fn is_descendant_shorthand(&self) -> bool {
        self.kind == TokenKind::Slash && self.text == "//"
    }

    /// Whether this is a bare tag starting with a digit, i.e. a positional index
    pub fn is_numeric(&self) -> bool {
        self.kind == TokenKind::Tag && self.text.starts_with(|c: char| c.is_ascii_digit())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::End => write!(f, "end of input"),
            TokenKind::Literal => write!(f, "'{}'", self.text),
            TokenKind::Axis => write!(f, "{}::", self.text),
            _ => write!(f, "{}", self.text),
        }
    }
}

/// Failure raised by the raw scanner
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScanFault {
    #[default]
    Unrecognized,
    UnterminatedLiteral,
}

/// Tokens as produced by logos, before offsets are attached
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = ScanFault)]
#[logos(skip r"[ \t\n\r\f\x0B]+")]
pub enum RawToken {
    #[token("//")]
    DoubleSlash,

    #[token("/")]
    Slash,

    #[token("@")]
    At,

    #[token("[")]
    OpenBracket,

    #[token("]")]
    CloseBracket,

    #[token("*")]
    Star,

    #[token("'", |lex| quoted(lex, b'\''))]
    #[token("\"", |lex| quoted(lex, b'"'))]
    Literal(String),

    #[regex(r"[=!<>]=?", |lex| lex.slice().to_owned())]
    Operator(String),

    #[regex(r#"[^ \t\n\r\f\x0B/\[\]@=!<>*:'"][^ \t\n\r\f\x0B/\[\]@=!<>*:]*::"#, |lex| {
        let slice = lex.slice();
        slice[..slice.len() - 2].to_owned()
    })]
    Axis(String),

    // A name may hold single colons (`ns:button`) but never `::`
    #[regex(
        r#"([^ \t\n\r\f\x0B/\[\]@=!<>*:'"]|:[^ \t\n\r\f\x0B/\[\]@=!<>*:])([^ \t\n\r\f\x0B/\[\]@=!<>*:]|:[^ \t\n\r\f\x0B/\[\]@=!<>*:])*:?"#,
        |lex| lex.slice().to_owned()
    )]
    #[regex(r":+", |lex| lex.slice().to_owned())]
    Name(String),
}

/// Scans a quoted literal whose opening quote has just been matched.
///
/// Leaves the lexer positioned after the closing quote and returns the raw content
/// with escapes intact.
fn quoted(lex: &mut logos::Lexer<RawToken>, quote: u8) -> Result<String, ScanFault> {
    let rest = lex.remainder();
    let bytes = rest.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if i + 1 < bytes.len() => i += 2,
            b if b == quote => {
                let content = rest[..i].to_owned();
                lex.bump(i + 1);
                return Ok(content);
            }
            _ => i += 1,
        }
    }
    lex.bump(bytes.len());
    Err(ScanFault::UnterminatedLiteral)
}

impl RawToken {
    /// Lower into a [`Token`] starting at `offset`
    pub fn into_token(self, offset: usize) -> Token {
        match self {
            RawToken::DoubleSlash => Token::new(TokenKind::Slash, "//", offset),
            RawToken::Slash => Token::new(TokenKind::Slash, "/", offset),
            RawToken::At => Token::new(TokenKind::Attribute, "@", offset),
            RawToken::OpenBracket => Token::new(TokenKind::OpenBracket, "[", offset),
            RawToken::CloseBracket => Token::new(TokenKind::CloseBracket, "]", offset),
            RawToken::Star => Token::new(TokenKind::Wildcard, "*", offset),
            RawToken::Literal(text) => Token::new(TokenKind::Literal, text, offset),
            RawToken::Operator(text) => Token::new(TokenKind::Operator, text, offset),
            RawToken::Axis(text) => Token::new(TokenKind::Axis, text, offset),
            RawToken::Name(text) => Token::new(TokenKind::Tag, text, offset),
        }
    }
}
