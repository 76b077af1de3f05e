//! Locator synthesis
//!
//!     Walks parsed steps in order and produces one [`LocatorRecord`] per step. Records form
//!     a chain: each record's container is the identifier of the record before it, and each
//!     identifier extends its container's identifier.
//!
//! Identifiers
//!
//!     For a step with tag `t` (`any` for the wildcard) and archetype `a` the raw identifier
//!     is `t_a`, prefixed with `parent_` when a parent exists, followed by `_name_value` for
//!     every attribute condition in encounter order. The raw text is then canonicalized
//!     (see [`canonicalize`]).
//!
//!     Position conditions never contribute to identifiers, only to metadata.
//!
//! Metadata
//!
//!     An insertion-ordered document: `archetype`, then one field per attribute condition,
//!     then `occurrence` for every position above 1, then `visible: 1`. Later fields with
//!     the same key overwrite earlier ones in place.

use crate::classify::{Classifier, HeuristicClassifier};
use crate::parsing::ast::{Condition, PathStep};
use serde::Serialize;
use serde_json::{Map, Value};

/// Ordered key → value metadata of one locator
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Metadata(Map<String, Value>);

impl Metadata {
    pub fn new() -> Self {
        Metadata(Map::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The string value stored under `key`
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn archetype(&self) -> Option<&str> {
        self.get_str("archetype")
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Output descriptor for one path step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocatorRecord {
    pub id: String,
    pub meta: Metadata,
    /// Identifier of the previous record, empty for the first
    #[serde(skip_serializing_if = "String::is_empty")]
    pub container: String,
}

impl LocatorRecord {
    pub fn is_root(&self) -> bool {
        self.container.is_empty()
    }
}

/// Convert steps with the heuristic classifier
pub fn convert(steps: &[PathStep]) -> Vec<LocatorRecord> {
    convert_with(steps, &HeuristicClassifier)
}

/// Convert steps, classifying tags with `classifier`
pub fn convert_with<C: Classifier + ?Sized>(
    steps: &[PathStep],
    classifier: &C,
) -> Vec<LocatorRecord> {
    let mut records = Vec::with_capacity(steps.len());
    let mut parent = String::new();

    for step in steps {
        let archetype = classifier.classify(&step.tag);
        let id = identifier(&parent, step, &archetype);
        let meta = metadata(step, archetype);
        tracing::trace!(id = %id, container = %parent, "synthesized locator");

        let container = std::mem::replace(&mut parent, id.clone());
        records.push(LocatorRecord {
            id,
            meta,
            container,
        });
    }

    records
}

fn identifier(parent: &str, step: &PathStep, archetype: &str) -> String {
    let token = if step.is_wildcard() {
        "any"
    } else {
        step.tag.as_str()
    };

    let mut raw = if parent.is_empty() {
        format!("{}_{}", token, archetype)
    } else {
        format!("{}_{}_{}", parent, token, archetype)
    };

    for attr in step.predicate.iter().flat_map(|p| p.attributes()) {
        raw.push('_');
        raw.push_str(&attr.name);
        raw.push('_');
        raw.push_str(&attr.value);
    }

    canonicalize(&raw)
}

fn metadata(step: &PathStep, archetype: String) -> Metadata {
    let mut meta = Metadata::new();
    meta.insert("archetype", archetype);

    for condition in step.conditions() {
        match condition {
            Condition::Attribute(attr) => meta.insert(attr.name.clone(), attr.value.clone()),
            Condition::Position(pos) if pos.position > 1 => {
                meta.insert("occurrence", pos.position)
            }
            Condition::Position(_) => {}
        }
    }

    meta.insert("visible", 1);
    meta
}

/// Restrict an identifier to ASCII alphanumerics joined by single underscores
///
/// Every other character becomes `_`, runs of `_` collapse to one, and leading or
/// trailing `_` are dropped.
pub fn canonicalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    if out.ends_with('_') {
        out.pop();
    }
    out
}
