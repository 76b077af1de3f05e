//! Pipeline stages
//!
//! Each stage is a small struct implementing [`Runnable`] for exactly one input/output
//! pair:
//!
//! | Stage            | Input              | Output               |
//! |------------------|--------------------|----------------------|
//! | `Tokenization`   | `String`           | `Vec<Token>`         |
//! | `Parsing`        | `Vec<Token>`       | `Vec<PathStep>`      |
//! | `SegmentParsing` | `String`           | `Vec<PathStep>`      |
//! | `Conversion`     | `Vec<PathStep>`    | `Vec<LocatorRecord>` |
//! | `Rendering`      | `Vec<LocatorRecord>` | `String`           |

use crate::classify::{Classifier, HeuristicClassifier};
use crate::formats::{DeclarationsFormatter, FormatError, FormatRegistry, Formatter};
use crate::lexing::tokenize;
use crate::parsing::{parse, parse_segments, PathStep};
use crate::synthesis::{convert_with, LocatorRecord};
use crate::token::Token;
use crate::transforms::{Runnable, TransformError};
use std::sync::Arc;

/// Source text to tokens
pub struct Tokenization;

impl Tokenization {
    pub fn new() -> Self {
        Tokenization
    }
}

impl Default for Tokenization {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, Vec<Token>> for Tokenization {
    fn run(&self, input: String) -> Result<Vec<Token>, TransformError> {
        Ok(tokenize(&input)?)
    }
}

impl Runnable<&str, Vec<Token>> for Tokenization {
    fn run(&self, input: &str) -> Result<Vec<Token>, TransformError> {
        Ok(tokenize(input)?)
    }
}

/// Tokens to path steps with the recursive-descent grammar
pub struct Parsing;

impl Parsing {
    pub fn new() -> Self {
        Parsing
    }
}

impl Default for Parsing {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Vec<Token>, Vec<PathStep>> for Parsing {
    fn run(&self, input: Vec<Token>) -> Result<Vec<PathStep>, TransformError> {
        Ok(parse(&input)?)
    }
}

/// Source text straight to path steps with the regex segment parser
///
/// Replaces both `Tokenization` and `Parsing`. Never fails.
pub struct SegmentParsing;

impl SegmentParsing {
    pub fn new() -> Self {
        SegmentParsing
    }
}

impl Default for SegmentParsing {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, Vec<PathStep>> for SegmentParsing {
    fn run(&self, input: String) -> Result<Vec<PathStep>, TransformError> {
        Ok(parse_segments(&input))
    }
}

/// Path steps to locator records
pub struct Conversion<C = HeuristicClassifier> {
    classifier: C,
}

impl Conversion {
    pub fn new() -> Self {
        Conversion {
            classifier: HeuristicClassifier,
        }
    }
}

impl<C: Classifier> Conversion<C> {
    pub fn with_classifier(classifier: C) -> Self {
        Conversion { classifier }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }
}

impl Default for Conversion {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Classifier> Runnable<Vec<PathStep>, Vec<LocatorRecord>> for Conversion<C> {
    fn run(&self, input: Vec<PathStep>) -> Result<Vec<LocatorRecord>, TransformError> {
        Ok(convert_with(&input, &self.classifier))
    }
}

/// Locator records to text through a [`Formatter`]
#[derive(Clone)]
pub struct Rendering {
    formatter: Arc<dyn Formatter>,
}

impl Rendering {
    /// Render as declarations with the default indent
    pub fn new() -> Self {
        Self::with_formatter(DeclarationsFormatter::default())
    }

    pub fn with_formatter<F: Formatter + 'static>(formatter: F) -> Self {
        Rendering {
            formatter: Arc::new(formatter),
        }
    }

    /// Render with a format looked up by name
    pub fn named(registry: &FormatRegistry, format: &str) -> Result<Self, FormatError> {
        Ok(Rendering {
            formatter: registry.shared(format)?,
        })
    }

    pub fn format_name(&self) -> &str {
        self.formatter.name()
    }
}

impl Default for Rendering {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Vec<LocatorRecord>, String> for Rendering {
    fn run(&self, input: Vec<LocatorRecord>) -> Result<String, TransformError> {
        Ok(self.formatter.serialize(&input)?)
    }
}

impl Runnable<&[LocatorRecord], String> for Rendering {
    fn run(&self, input: &[LocatorRecord]) -> Result<String, TransformError> {
        Ok(self.formatter.serialize(input)?)
    }
}
