//! Step grammar and token cursor

use super::ast::{PathStep, DEFAULT_AXIS, WILDCARD};
use super::ParseError;
use crate::token::{Token, TokenKind};

/// Recursive-descent parser over a borrowed token slice
///
/// The cursor never moves past the first [`TokenKind::End`]. A slice that lacks the end
/// marker behaves as if it had one right after its last token.
pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Parser { tokens, pos: 0 }
    }

    /// Parse the whole sequence
    pub fn parse(mut self) -> Result<Vec<PathStep>, ParseError> {
        let mut steps = Vec::new();

        while !self.is_at_end() {
            let mut absolute = false;
            if let Some(slash) = self.match_kind(TokenKind::Slash) {
                absolute = true;
                if slash.is_descendant_shorthand() || self.match_kind(TokenKind::Slash).is_some()
                {
                    tracing::trace!(offset = slash.offset, "descendant-or-self shorthand");
                    steps.push(PathStep::descendant_or_self());
                    continue;
                }
            }
            let step = self.parse_step(absolute)?;
            tracing::trace!(axis = %step.axis, tag = %step.tag, "parsed step");
            steps.push(step);
        }

        Ok(steps)
    }

    fn parse_step(&mut self, absolute: bool) -> Result<PathStep, ParseError> {
        let axis = match self.match_kind(TokenKind::Axis) {
            Some(token) => token.text.clone(),
            None => DEFAULT_AXIS.to_string(),
        };

        let tag = if self.match_kind(TokenKind::Wildcard).is_some() {
            WILDCARD.to_string()
        } else if let Some(token) = self.match_kind(TokenKind::Tag) {
            token.text.clone()
        } else {
            return Err(ParseError::ExpectedNodeTest {
                offset: self.offset(),
                found: self.describe_current(),
            });
        };

        let mut step = PathStep::child(tag).with_axis(axis).absolute(absolute);

        if self.match_kind(TokenKind::OpenBracket).is_some() {
            let predicate = self.parse_predicate()?;
            if self.match_kind(TokenKind::CloseBracket).is_none() {
                return Err(ParseError::ExpectedClosingBracket {
                    offset: self.offset(),
                    found: self.describe_current(),
                });
            }
            step.predicate = Some(predicate);
        }

        if let Some(prefix) = self.match_kind(TokenKind::Namespace) {
            step.tag = format!("{}:{}", prefix.text, step.tag);
        }

        Ok(step)
    }

    // -----------------------------------------------------------------------
    // Token access helpers
    // -----------------------------------------------------------------------

    pub(super) fn current(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    /// Kind of the token `n` positions ahead, [`TokenKind::End`] past the slice
    pub(super) fn peek_kind(&self, n: usize) -> TokenKind {
        for token in self.tokens.iter().skip(self.pos).take(n + 1) {
            if token.is(TokenKind::End) {
                return TokenKind::End;
            }
        }
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::End, |t| t.kind)
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.current().map_or(true, |t| t.is(TokenKind::End))
    }

    pub(super) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.current().map_or(false, |t| t.is(kind))
    }

    /// Consume the current token if it has `kind`
    pub(super) fn match_kind(&mut self, kind: TokenKind) -> Option<&'t Token> {
        if self.check(kind) {
            self.advance()
        } else {
            None
        }
    }

    /// Consume a token of `kind` or fail with [`ParseError::UnexpectedToken`]
    pub(super) fn consume(
        &mut self,
        kind: TokenKind,
        expected: &'static str,
    ) -> Result<&'t Token, ParseError> {
        self.match_kind(kind)
            .ok_or_else(|| ParseError::UnexpectedToken {
                expected,
                offset: self.offset(),
                found: self.describe_current(),
            })
    }

    pub(super) fn advance(&mut self) -> Option<&'t Token> {
        if self.is_at_end() {
            return None;
        }
        let token = self.current();
        self.pos += 1;
        token
    }

    /// Offset of the current token, or of the end of the last token when past the slice
    pub(super) fn offset(&self) -> usize {
        match self.current() {
            Some(token) => token.offset,
            None => self
                .tokens
                .last()
                .map_or(0, |t| t.offset + t.text.len()),
        }
    }

    pub(super) fn describe_current(&self) -> String {
        match self.current() {
            Some(token) if !token.is(TokenKind::End) => format!("'{}'", token),
            _ => "end of input".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::tokenize;
    use crate::parsing::ast::{Comparison, Condition};
    use crate::parsing::parse;

    fn parse_str(source: &str) -> Result<Vec<PathStep>, ParseError> {
        parse(&tokenize(source).unwrap())
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(parse_str("").unwrap(), vec![]);
    }

    #[test]
    fn test_single_relative_step() {
        assert_eq!(parse_str("button").unwrap(), vec![PathStep::child("button")]);
    }

    #[test]
    fn test_absolute_steps() {
        let steps = parse_str("/form/textfield").unwrap();
        assert_eq!(
            steps,
            vec![
                PathStep::child("form").absolute(true),
                PathStep::child("textfield").absolute(true),
            ]
        );
    }

    #[test]
    fn test_descendant_shorthand_emits_synthetic_step() {
        let steps = parse_str("//button[@name='submit']").unwrap();
        assert_eq!(
            steps,
            vec![
                PathStep::descendant_or_self(),
                PathStep::child("button")
                    .with_predicate(vec![Condition::attribute("name", Comparison::Eq, "submit")]),
            ]
        );
    }

    #[test]
    fn test_separated_slashes_also_expand() {
        let steps = parse_str("a/ /b").unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[1], PathStep::descendant_or_self());
    }

    #[test]
    fn test_explicit_axis() {
        let steps = parse_str("/descendant::panel").unwrap();
        assert_eq!(
            steps,
            vec![PathStep::child("panel").with_axis("descendant").absolute(true)]
        );
    }

    #[test]
    fn test_wildcard_step() {
        let steps = parse_str("form/*").unwrap();
        assert!(steps[1].is_wildcard());
        assert!(steps[1].absolute);
    }

    #[test]
    fn test_missing_node_test_after_slash() {
        let err = parse_str("form/").unwrap_err();
        assert_eq!(
            err,
            ParseError::ExpectedNodeTest {
                offset: 5,
                found: "end of input".to_string()
            }
        );
    }

    #[test]
    fn test_missing_node_test_after_axis() {
        let err = parse_str("child::[1]").unwrap_err();
        assert!(matches!(err, ParseError::ExpectedNodeTest { offset: 7, .. }));
    }

    #[test]
    fn test_stray_closing_bracket() {
        let err = parse_str("a]").unwrap_err();
        assert!(matches!(err, ParseError::ExpectedNodeTest { offset: 1, .. }));
    }

    #[test]
    fn test_unclosed_predicate() {
        let err = parse_str("row[2").unwrap_err();
        assert_eq!(
            err,
            ParseError::ExpectedClosingBracket {
                offset: 5,
                found: "end of input".to_string()
            }
        );
    }

    #[test]
    fn test_namespace_token_prefixes_tag() {
        let tokens = vec![
            Token::new(TokenKind::Tag, "button", 0),
            Token::new(TokenKind::Namespace, "qt", 6),
            Token::end(8),
        ];
        let steps = parse(&tokens).unwrap();
        assert_eq!(steps[0].tag, "qt:button");
    }

    #[test]
    fn test_missing_end_marker_is_tolerated() {
        let tokens = vec![Token::new(TokenKind::Tag, "row", 0)];
        assert_eq!(parse(&tokens).unwrap(), vec![PathStep::child("row")]);
    }

    #[test]
    fn test_never_reads_past_end_marker() {
        let tokens = vec![
            Token::new(TokenKind::Tag, "a", 0),
            Token::end(1),
            Token::new(TokenKind::Tag, "ghost", 2),
        ];
        assert_eq!(parse(&tokens).unwrap(), vec![PathStep::child("a")]);
    }

    #[test]
    fn test_peek_kind_past_slice() {
        let tokens = vec![Token::new(TokenKind::Tag, "a", 0), Token::end(1)];
        let parser = Parser::new(&tokens);
        assert_eq!(parser.peek_kind(0), TokenKind::Tag);
        assert_eq!(parser.peek_kind(1), TokenKind::End);
        assert_eq!(parser.peek_kind(5), TokenKind::End);
    }
}
