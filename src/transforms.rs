//! Transform pipeline infrastructure
//!
//! Every stage of the locator pipeline implements [`Runnable<I, O>`]. Stages compose into a
//! [`Transform<I, O>`] with `.then()`, and the compiler checks that each stage's input type
//! matches the previous stage's output:
//!
//! ```rust,ignore
//! let locate = Transform::from_fn(Ok)
//!     .then(Tokenization::new())   // String → Vec<Token>
//!     .then(Parsing::new())        // Vec<Token> → Vec<PathStep>
//!     .then(Conversion::new());    // Vec<PathStep> → Vec<LocatorRecord>
//! ```
//!
//! The usual chains are pre-built as statics in [`standard`]. A failing stage aborts the
//! chain; nothing downstream runs and no partial output escapes.
//!
//! # Module Organization
//!
//! - [`stages`]: tokenization, parsing, segment parsing, conversion, rendering
//! - [`standard`]: pre-built transforms

pub mod stages;
pub mod standard;

use crate::formats::FormatError;
use crate::lexing::LexError;
use crate::parsing::ParseError;
use std::fmt;

/// Error that can occur during transformation
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    Lex(LexError),
    Parse(ParseError),
    Format(FormatError),
    /// Stage failed with an error of its own
    StageFailed { stage: String, message: String },
}

impl TransformError {
    /// Source offset of lexing and parsing failures
    pub fn offset(&self) -> Option<usize> {
        match self {
            TransformError::Lex(err) => Some(err.offset()),
            TransformError::Parse(err) => Some(err.offset()),
            TransformError::Format(_) | TransformError::StageFailed { .. } => None,
        }
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::Lex(err) => write!(f, "{}", err),
            TransformError::Parse(err) => write!(f, "{}", err),
            TransformError::Format(err) => write!(f, "{}", err),
            TransformError::StageFailed { stage, message } => {
                write!(f, "Stage '{}' failed: {}", stage, message)
            }
        }
    }
}

impl std::error::Error for TransformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransformError::Lex(err) => Some(err),
            TransformError::Parse(err) => Some(err),
            TransformError::Format(err) => Some(err),
            TransformError::StageFailed { .. } => None,
        }
    }
}

impl From<LexError> for TransformError {
    fn from(err: LexError) -> Self {
        TransformError::Lex(err)
    }
}

impl From<ParseError> for TransformError {
    fn from(err: ParseError) -> Self {
        TransformError::Parse(err)
    }
}

impl From<FormatError> for TransformError {
    fn from(err: FormatError) -> Self {
        TransformError::Format(err)
    }
}

/// Trait for anything that can transform an input to an output
pub trait Runnable<I, O> {
    /// Execute this transformation on the input
    fn run(&self, input: I) -> Result<O, TransformError>;
}

/// A composable transformation pipeline from `I` to `O`
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, TransformError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, TransformError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Chain a stage after this transform
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Chain a pre-built static transform after this one
    pub fn then_transform<O2>(self, next: &'static Transform<O, O2>) -> Transform<I, O2>
    where
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                next.run(intermediate)
            }),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> Result<O, TransformError> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, TransformError> {
        Transform::run(self, input)
    }
}
