//! Expression loading utilities
//!
//! `ExpressionLoader` reads path expressions from files or strings, one expression per
//! line, and runs any transform over each of them. Blank lines and lines starting with `#`
//! are ignored; surrounding whitespace is trimmed.
//!
//! ```rust,ignore
//! use xloc::loader::ExpressionLoader;
//! use xloc::transforms::standard::STRING_TO_LOCATORS;
//!
//! let loader = ExpressionLoader::from_path("locators.txt")?;
//! let per_line = loader.with(&*STRING_TO_LOCATORS)?;
//! ```

use crate::synthesis::LocatorRecord;
use crate::transforms::standard::{STRING_TO_DECLARATIONS, STRING_TO_LOCATORS};
use crate::transforms::{Runnable, TransformError};
use std::fs;
use std::path::Path;

/// Error that can occur when loading expressions
#[derive(Debug, Clone)]
pub enum LoaderError {
    /// IO error when reading file
    IoError(String),
    /// An expression failed to transform
    TransformError {
        /// 1-based line of the expression in the source
        line: usize,
        expression: String,
        error: TransformError,
    },
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::IoError(msg) => write!(f, "IO error: {}", msg),
            LoaderError::TransformError { line, error, .. } => {
                write!(f, "Line {}: {}", line, error)
            }
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::IoError(err.to_string())
    }
}

/// One expression and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression<'a> {
    pub line: usize,
    pub text: &'a str,
}

pub struct ExpressionLoader {
    source: String,
}

impl ExpressionLoader {
    /// Load from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let source = fs::read_to_string(path)?;
        Ok(ExpressionLoader { source })
    }

    /// Load from a string
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        ExpressionLoader {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expressions(&self) -> Vec<Expression<'_>> {
        self.source
            .lines()
            .enumerate()
            .map(|(i, line)| Expression {
                line: i + 1,
                text: line.trim(),
            })
            .filter(|e| !e.text.is_empty() && !e.text.starts_with('#'))
            .collect()
    }

    /// Run `stage` over every expression, stopping at the first failure
    pub fn with<O, R>(&self, stage: &R) -> Result<Vec<O>, LoaderError>
    where
        R: Runnable<String, O> + ?Sized,
    {
        self.expressions()
            .into_iter()
            .map(|expr| {
                stage
                    .run(expr.text.to_string())
                    .map_err(|error| LoaderError::TransformError {
                        line: expr.line,
                        expression: expr.text.to_string(),
                        error,
                    })
            })
            .collect()
    }

    /// Locator records for every expression
    pub fn locate(&self) -> Result<Vec<Vec<LocatorRecord>>, LoaderError> {
        self.with(&*STRING_TO_LOCATORS)
    }

    /// Rendered declarations for every expression
    pub fn declarations(&self) -> Result<Vec<String>, LoaderError> {
        self.with(&*STRING_TO_DECLARATIONS)
    }
}
