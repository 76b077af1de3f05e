//! Predicate sub-grammar
//!
//! Parses the conditions between `[` and `]`. Recognised forms, tried in this order:
//!
//! - bare comparison `price>35`: tag, operator, literal or tag; the value is kept raw
//! - attribute test `@name='value'`: backslash escapes in the literal are resolved
//! - positional test `2`: a tag starting with a digit
//! - `and` / `or`: consumed without producing a condition
//!
//! Connectives are skipped, so every condition is implicitly conjoined, `or` included.

use super::ast::{Comparison, ComplexPredicate, Condition};
use super::parser::Parser;
use super::ParseError;
use crate::token::{Token, TokenKind};

/// Parse a predicate body, stopping before `]` or the end marker
pub fn parse_predicate(tokens: &[Token]) -> Result<ComplexPredicate, ParseError> {
    Parser::new(tokens).parse_predicate()
}

impl<'t> Parser<'t> {
    pub(super) fn parse_predicate(&mut self) -> Result<ComplexPredicate, ParseError> {
        let mut predicate = ComplexPredicate::default();

        while !self.check(TokenKind::CloseBracket) && !self.is_at_end() {
            if self.at_bare_comparison() {
                let name = self.consume(TokenKind::Tag, "attribute name")?;
                let op = self.comparison()?;
                let value = match self.match_kind(TokenKind::Literal) {
                    Some(literal) => literal,
                    None => self.consume(TokenKind::Tag, "literal or tag")?,
                };
                predicate
                    .conditions
                    .push(Condition::attribute(&name.text, op, &value.text));
                continue;
            }

            if self.match_kind(TokenKind::Attribute).is_some() {
                let name = self.consume(TokenKind::Tag, "attribute name")?;
                let op = self.comparison()?;
                let value = self.consume(TokenKind::Literal, "quoted literal")?;
                predicate
                    .conditions
                    .push(Condition::attribute(&name.text, op, unescape(&value.text)));
            } else if self.current().is_some_and(Token::is_numeric) {
                let offset = self.offset();
                let found = self.describe_current();
                let token = self.consume(TokenKind::Tag, "position")?;
                let position = leading_number(&token.text)
                    .ok_or(ParseError::UnexpectedPredicateToken { offset, found })?;
                predicate.conditions.push(Condition::position(position));
            } else if self.at_connective() {
                self.advance();
            } else {
                return Err(ParseError::UnexpectedPredicateToken {
                    offset: self.offset(),
                    found: self.describe_current(),
                });
            }
        }

        Ok(predicate)
    }

    fn at_bare_comparison(&self) -> bool {
        self.check(TokenKind::Tag)
            && self.peek_kind(1) == TokenKind::Operator
            && matches!(self.peek_kind(2), TokenKind::Literal | TokenKind::Tag)
    }

    fn at_connective(&self) -> bool {
        self.check(TokenKind::Tag)
            && self
                .current()
                .is_some_and(|t| t.text == "and" || t.text == "or")
    }

    fn comparison(&mut self) -> Result<Comparison, ParseError> {
        let offset = self.offset();
        let token = self.consume(TokenKind::Operator, "comparison operator")?;
        token
            .text
            .parse()
            .map_err(|_| ParseError::UnexpectedToken {
                expected: "comparison operator",
                offset,
                found: format!("'{}'", token.text),
            })
    }
}

/// Resolve backslash escapes: `\x` becomes `x`, a trailing lone `\` is kept
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped) => out.push(escaped),
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Value of the leading digit run, `None` on overflow
fn leading_number(text: &str) -> Option<usize> {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().ok()
}
