//! Lexer
//!
//!     Turns a path expression into an ordered token sequence terminated by exactly one
//!     [`TokenKind::End`] marker. Scanning is done by the logos derive in
//!     [token](crate::token); this module attaches offsets, maps scanner faults onto
//!     [`LexError`] and appends the end marker.
//!
//!     Lexing is total for ASCII input except for one case: a quoted literal whose closing
//!     quote never arrives. The error names the offset of the opening quote.

use crate::token::{RawToken, ScanFault, Token, TokenKind};
use logos::Logos;
use std::fmt;

/// Errors that can occur during lexing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A quoted literal has no closing quote before the end of input
    UnterminatedLiteral { offset: usize },
    /// A character no token rule accepts
    UnexpectedCharacter { offset: usize, found: char },
}

impl LexError {
    /// Byte offset of the failure in the source text
    pub fn offset(&self) -> usize {
        match self {
            LexError::UnterminatedLiteral { offset }
            | LexError::UnexpectedCharacter { offset, .. } => *offset,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnterminatedLiteral { offset } => {
                write!(f, "Unterminated string literal opened at offset {}", offset)
            }
            LexError::UnexpectedCharacter { offset, found } => {
                write!(f, "Unexpected character '{}' at offset {}", found, offset)
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Tokenize a path expression
///
/// The returned sequence always ends with a single [`TokenKind::End`] token whose offset
/// is the length of the input.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let start = lexer.span().start;
        match result {
            Ok(raw) => tokens.push(raw.into_token(start)),
            Err(ScanFault::UnterminatedLiteral) => {
                return Err(LexError::UnterminatedLiteral { offset: start });
            }
            Err(ScanFault::Unrecognized) => {
                let found = lexer.slice().chars().next().unwrap_or('\u{FFFD}');
                return Err(LexError::UnexpectedCharacter {
                    offset: start,
                    found,
                });
            }
        }
    }

    tokens.push(Token::end(source.len()));
    tracing::trace!(count = tokens.len(), "tokenized path expression");
    Ok(tokens)
}

/// Token kinds only, handy for asserting on shapes
pub fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    #[test]
    fn test_empty_input_is_just_end() {
        let tokens = tokenize("").unwrap();
        assert_eq!(tokens, vec![Token::end(0)]);
    }

    #[test]
    fn test_whitespace_only() {
        let tokens = tokenize("   \t ").unwrap();
        assert_eq!(tokens, vec![Token::end(5)]);
    }

    #[test]
    fn test_attribute_predicate() {
        let tokens = tokenize("//button[@name='submit']").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new(Slash, "//", 0),
                Token::new(Tag, "button", 2),
                Token::new(OpenBracket, "[", 8),
                Token::new(Attribute, "@", 9),
                Token::new(Tag, "name", 10),
                Token::new(Operator, "=", 14),
                Token::new(Literal, "submit", 15),
                Token::new(CloseBracket, "]", 23),
                Token::end(24),
            ]
        );
    }

    #[test]
    fn test_absolute_path() {
        let tokens = tokenize("/form/textfield").unwrap();
        assert_eq!(kinds(&tokens), vec![Slash, Tag, Slash, Tag, End]);
    }

    #[test]
    fn test_axis_and_wildcard() {
        let tokens = tokenize("descendant::*").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::new(Axis, "descendant", 0),
                Token::new(Wildcard, "*", 12),
                Token::end(13),
            ]
        );
    }

    #[test]
    fn test_bare_comparison() {
        let tokens = tokenize("book[price>=35]").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![Tag, OpenBracket, Tag, Operator, Tag, CloseBracket, End]
        );
        assert_eq!(tokens[3].text, ">=");
        assert_eq!(tokens[4].text, "35");
    }

    #[test]
    fn test_whitespace_between_tokens() {
        let tokens = tokenize(" a [ @id = 'x' and 2 ] ").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![Tag, OpenBracket, Attribute, Tag, Operator, Literal, Tag, Tag, CloseBracket, End]
        );
        assert_eq!(tokens.last().map(|t| t.offset), Some(23));
    }

    #[test]
    fn test_unterminated_literal() {
        let err = tokenize("book[@id='1").unwrap_err();
        assert_eq!(err, LexError::UnterminatedLiteral { offset: 9 });
        assert_eq!(err.offset(), 9);
    }

    #[test]
    fn test_escaped_quote_does_not_close_literal() {
        let err = tokenize(r"a[@t='x\']").unwrap_err();
        assert_eq!(err, LexError::UnterminatedLiteral { offset: 5 });
    }

    #[test]
    fn test_exactly_one_end_marker() {
        let tokens = tokenize("a/b[1]/c").unwrap();
        let ends = tokens.iter().filter(|t| t.is(End)).count();
        assert_eq!(ends, 1);
        assert!(tokens.last().unwrap().is(End));
    }

    #[test]
    fn test_error_display() {
        let err = LexError::UnterminatedLiteral { offset: 4 };
        assert_eq!(
            format!("{}", err),
            "Unterminated string literal opened at offset 4"
        );
    }
}
