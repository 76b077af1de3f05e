//! Path step types produced by the parser
//!
//! A parsed expression is a flat, ordered list of [`PathStep`]s. Each step owns at most one
//! [`ComplexPredicate`], whose conditions keep the order they were written in. That order is
//! load-bearing: the synthesizer folds attribute values into identifiers in the same order.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Axis used when a step names none
pub const DEFAULT_AXIS: &str = "child";

/// Axis of the synthetic step emitted for `//`
pub const DESCENDANT_OR_SELF: &str = "descendant-or-self";

/// Node test matching any tag
pub const WILDCARD: &str = "*";

/// Comparison operator of an attribute condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Ne => "!=",
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
        }
    }
}

impl FromStr for Comparison {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(Comparison::Eq),
            "!=" => Ok(Comparison::Ne),
            "<" => Ok(Comparison::Lt),
            "<=" => Ok(Comparison::Le),
            ">" => Ok(Comparison::Gt),
            ">=" => Ok(Comparison::Ge),
            other => Err(format!("'{}' is not a comparison operator", other)),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `@name op 'value'` or bare `name op value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeCondition {
    pub name: String,
    pub op: Comparison,
    pub value: String,
}

impl AttributeCondition {
    pub fn new(name: impl Into<String>, op: Comparison, value: impl Into<String>) -> Self {
        AttributeCondition {
            name: name.into(),
            op,
            value: value.into(),
        }
    }
}

/// `[N]`, one-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PositionCondition {
    pub position: usize,
}

/// One condition inside a predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    Attribute(AttributeCondition),
    Position(PositionCondition),
}

impl Condition {
    pub fn attribute(name: impl Into<String>, op: Comparison, value: impl Into<String>) -> Self {
        Condition::Attribute(AttributeCondition::new(name, op, value))
    }

    pub fn position(position: usize) -> Self {
        Condition::Position(PositionCondition { position })
    }
}

/// Conditions of one bracketed predicate, implicitly conjoined
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComplexPredicate {
    pub conditions: Vec<Condition>,
}

impl ComplexPredicate {
    pub fn new(conditions: Vec<Condition>) -> Self {
        ComplexPredicate { conditions }
    }

    pub fn attributes(&self) -> impl Iterator<Item = &AttributeCondition> {
        self.conditions.iter().filter_map(|c| match c {
            Condition::Attribute(attr) => Some(attr),
            Condition::Position(_) => None,
        })
    }
}

/// One `/`-separated segment of a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    pub axis: String,
    /// Tag name or [`WILDCARD`]
    pub tag: String,
    pub predicate: Option<ComplexPredicate>,
    /// Whether the step was introduced by a slash
    pub absolute: bool,
}

impl PathStep {
    /// A `child` step with no predicate
    pub fn child(tag: impl Into<String>) -> Self {
        PathStep {
            axis: DEFAULT_AXIS.to_string(),
            tag: tag.into(),
            predicate: None,
            absolute: false,
        }
    }

    /// The step `//` expands into
    pub fn descendant_or_self() -> Self {
        PathStep {
            axis: DESCENDANT_OR_SELF.to_string(),
            tag: WILDCARD.to_string(),
            predicate: None,
            absolute: true,
        }
    }

    pub fn with_axis(mut self, axis: impl Into<String>) -> Self {
        self.axis = axis.into();
        self
    }

    pub fn with_predicate(mut self, conditions: Vec<Condition>) -> Self {
        self.predicate = Some(ComplexPredicate::new(conditions));
        self
    }

    pub fn absolute(mut self, absolute: bool) -> Self {
        self.absolute = absolute;
        self
    }

    pub fn is_wildcard(&self) -> bool {
        self.tag == WILDCARD
    }

    /// Conditions in encounter order, empty when the step has no predicate
    pub fn conditions(&self) -> &[Condition] {
        self.predicate
            .as_ref()
            .map(|p| p.conditions.as_slice())
            .unwrap_or(&[])
    }
}
