//! Parser
//!
//!     A recursive-descent parser over the token sequence produced by
//!     [lexing](crate::lexing). The grammar needs at most two tokens of lookahead:
//!
//!         path       := ( slash? step | "//" )*
//!         step       := axis? ( "*" | tag ) ( "[" predicate "]" )? namespace?
//!         predicate  := ( bare | attribute | position | "and" | "or" )*
//!         bare       := tag operator ( literal | tag )
//!         attribute  := "@" tag operator literal
//!         position   := tag starting with a digit
//!
//!     The `//` shorthand expands into a synthetic `descendant-or-self::*` step. Steps come
//!     out strictly in source order.
//!
//!     See [parser](parser) for the step grammar, [predicate](predicate) for the bracketed
//!     sub-grammar and [segments](segments) for the regex-only alternative used when the
//!     full grammar is not wanted.

pub mod ast;
pub mod parser;
pub mod predicate;
pub mod segments;

pub use ast::{
    AttributeCondition, Comparison, ComplexPredicate, Condition, PathStep, PositionCondition,
};
pub use parser::Parser;
pub use segments::parse_segments;

use crate::token::Token;
use std::fmt;

/// Errors that can occur while parsing a token sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A step has neither a tag name nor a wildcard after its optional axis
    ExpectedNodeTest { offset: usize, found: String },
    /// A predicate was opened but never closed
    ExpectedClosingBracket { offset: usize, found: String },
    /// A token inside `[...]` matches none of the predicate forms
    UnexpectedPredicateToken { offset: usize, found: String },
    /// A specific token kind was required and another was found
    UnexpectedToken {
        expected: &'static str,
        offset: usize,
        found: String,
    },
}

impl ParseError {
    /// Byte offset of the offending token in the source text
    pub fn offset(&self) -> usize {
        match self {
            ParseError::ExpectedNodeTest { offset, .. }
            | ParseError::ExpectedClosingBracket { offset, .. }
            | ParseError::UnexpectedPredicateToken { offset, .. }
            | ParseError::UnexpectedToken { offset, .. } => *offset,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::ExpectedNodeTest { offset, found } => {
                write!(f, "Expected tag or '*' at offset {}, found {}", offset, found)
            }
            ParseError::ExpectedClosingBracket { offset, found } => {
                write!(f, "Expected closing ']' at offset {}, found {}", offset, found)
            }
            ParseError::UnexpectedPredicateToken { offset, found } => {
                write!(
                    f,
                    "Unexpected token in predicate at offset {}: {}",
                    offset, found
                )
            }
            ParseError::UnexpectedToken {
                expected,
                offset,
                found,
            } => write!(
                f,
                "Expected {} at offset {}, found {}",
                expected, offset, found
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a token sequence into path steps
pub fn parse(tokens: &[Token]) -> Result<Vec<PathStep>, ParseError> {
    Parser::new(tokens).parse()
}

/// Tokenize and parse in one go
pub fn parse_expression(source: &str) -> Result<Vec<PathStep>, crate::transforms::TransformError> {
    let tokens = crate::lexing::tokenize(source)?;
    Ok(parse(&tokens)?)
}
