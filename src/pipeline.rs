//! Locator pipeline
//!
//! [`Pipeline`] holds the four stages of a locator run (tokenize, parse, convert, render)
//! and runs them strictly in sequence. Every stage is a type parameter, so any stage can be
//! swapped out for another [`Runnable`] with the same input and output types, and calls
//! are dispatched statically. The classifier lives in the conversion stage.
//!
//! ```rust,ignore
//! use xloc::pipeline::Pipeline;
//!
//! let pipeline = Pipeline::standard();
//! let records = pipeline.locate("form/button")?;
//! let text = pipeline.render(records)?;
//! ```
//!
//! A pipeline keeps no state between invocations. [`CachingPipeline`] is the opt-in wrapper
//! for callers that want the last record list retained; it takes `&mut self` and therefore
//! cannot be shared between concurrent callers.

use crate::classify::Classifier;
use crate::formats::Formatter;
use crate::parsing::PathStep;
use crate::synthesis::LocatorRecord;
use crate::token::Token;
use crate::transforms::stages::{Conversion, Parsing, Rendering, SegmentParsing, Tokenization};
use crate::transforms::{Runnable, TransformError};
use std::marker::PhantomData;

/// Pass-through front stage, for parsers that read source text directly
pub struct Verbatim;

impl Runnable<String, String> for Verbatim {
    fn run(&self, input: String) -> Result<String, TransformError> {
        Ok(input)
    }
}

/// The standard four-stage pipeline
pub type StandardPipeline = Pipeline<Tokenization, Parsing, Conversion, Rendering>;

/// Pipeline that reads steps with the regex segment parser
pub type SegmentPipeline = Pipeline<Verbatim, SegmentParsing, Conversion, Rendering, String>;

/// Four injected stages; `X` is what the first stage hands to the second
pub struct Pipeline<T, P, V, R, X = Vec<Token>> {
    tokenize: T,
    parse: P,
    convert: V,
    render: R,
    _front: PhantomData<fn() -> X>,
}

impl<T, P, V, R> Pipeline<T, P, V, R> {
    pub fn new(tokenize: T, parse: P, convert: V, render: R) -> Self {
        Pipeline {
            tokenize,
            parse,
            convert,
            render,
            _front: PhantomData,
        }
    }
}

impl StandardPipeline {
    /// Full grammar, heuristic classifier, declarations output
    pub fn standard() -> Self {
        Pipeline::new(
            Tokenization::new(),
            Parsing::new(),
            Conversion::new(),
            Rendering::new(),
        )
    }
}

impl SegmentPipeline {
    /// Regex segment parser, heuristic classifier, declarations output
    pub fn segments() -> Self {
        Pipeline {
            tokenize: Verbatim,
            parse: SegmentParsing::new(),
            convert: Conversion::new(),
            render: Rendering::new(),
            _front: PhantomData,
        }
    }
}

impl<T, P, V, R, X> Pipeline<T, P, V, R, X> {
    /// Replace the conversion stage with one using `classifier`
    pub fn with_classifier<C: Classifier>(self, classifier: C) -> Pipeline<T, P, Conversion<C>, R, X> {
        self.with_conversion(Conversion::with_classifier(classifier))
    }

    /// Replace the conversion stage
    pub fn with_conversion<V2>(self, convert: V2) -> Pipeline<T, P, V2, R, X> {
        Pipeline {
            tokenize: self.tokenize,
            parse: self.parse,
            convert,
            render: self.render,
            _front: PhantomData,
        }
    }

    /// Render through `formatter` instead
    pub fn with_formatter<F: Formatter + 'static>(self, formatter: F) -> Pipeline<T, P, V, Rendering, X> {
        self.with_rendering(Rendering::with_formatter(formatter))
    }

    /// Replace the rendering stage
    pub fn with_rendering<R2>(self, render: R2) -> Pipeline<T, P, V, R2, X> {
        Pipeline {
            tokenize: self.tokenize,
            parse: self.parse,
            convert: self.convert,
            render,
            _front: PhantomData,
        }
    }
}

impl<T, P, V, R, X> Pipeline<T, P, V, R, X>
where
    T: Runnable<String, X>,
    P: Runnable<X, Vec<PathStep>>,
    V: Runnable<Vec<PathStep>, Vec<LocatorRecord>>,
{
    /// Run the first three stages
    pub fn locate(&self, text: impl Into<String>) -> Result<Vec<LocatorRecord>, TransformError> {
        let text = text.into();
        tracing::debug!(len = text.len(), "tokenize");
        let front = self.tokenize.run(text)?;

        tracing::debug!("parse");
        let steps = self.parse.run(front)?;

        tracing::debug!(steps = steps.len(), "convert");
        let records = self.convert.run(steps)?;
        tracing::debug!(records = records.len(), "located");
        Ok(records)
    }
}

impl<T, P, V, R, X> Pipeline<T, P, V, R, X>
where
    R: Runnable<Vec<LocatorRecord>, String>,
{
    /// Run the rendering stage alone
    pub fn render(&self, records: Vec<LocatorRecord>) -> Result<String, TransformError> {
        tracing::debug!(records = records.len(), "render");
        self.render.run(records)
    }
}

impl<T, P, V, R, X> Pipeline<T, P, V, R, X>
where
    T: Runnable<String, X>,
    P: Runnable<X, Vec<PathStep>>,
    V: Runnable<Vec<PathStep>, Vec<LocatorRecord>>,
    R: Runnable<Vec<LocatorRecord>, String>,
{
    /// Text in, rendered text out
    pub fn run(&self, text: impl Into<String>) -> Result<String, TransformError> {
        let records = self.locate(text)?;
        self.render(records)
    }
}

impl<T, P, V, R, X> Runnable<String, String> for Pipeline<T, P, V, R, X>
where
    T: Runnable<String, X>,
    P: Runnable<X, Vec<PathStep>>,
    V: Runnable<Vec<PathStep>, Vec<LocatorRecord>>,
    R: Runnable<Vec<LocatorRecord>, String>,
{
    fn run(&self, input: String) -> Result<String, TransformError> {
        Pipeline::run(self, input)
    }
}

impl Default for StandardPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

/// Pipeline that retains the records of its last successful run
pub struct CachingPipeline<T, P, V, R, X = Vec<Token>> {
    inner: Pipeline<T, P, V, R, X>,
    last: Option<Vec<LocatorRecord>>,
}

impl<T, P, V, R, X> CachingPipeline<T, P, V, R, X> {
    pub fn new(inner: Pipeline<T, P, V, R, X>) -> Self {
        CachingPipeline { inner, last: None }
    }

    /// Records of the most recent successful run
    pub fn last_locators(&self) -> Option<&[LocatorRecord]> {
        self.last.as_deref()
    }

    pub fn into_inner(self) -> Pipeline<T, P, V, R, X> {
        self.inner
    }
}

impl<T, P, V, R, X> CachingPipeline<T, P, V, R, X>
where
    T: Runnable<String, X>,
    P: Runnable<X, Vec<PathStep>>,
    V: Runnable<Vec<PathStep>, Vec<LocatorRecord>>,
    R: Runnable<Vec<LocatorRecord>, String>,
{
    /// Run the pipeline, replacing the retained records
    ///
    /// The retained records are cleared when any stage fails.
    pub fn run(&mut self, text: impl Into<String>) -> Result<String, TransformError> {
        self.last = None;
        let records = self.inner.locate(text)?;
        let rendered = self.inner.render(records.clone())?;
        self.last = Some(records);
        Ok(rendered)
    }
}

impl StandardPipeline {
    /// Wrap into a pipeline that retains its last output
    pub fn caching(self) -> CachingPipeline<Tokenization, Parsing, Conversion, Rendering> {
        CachingPipeline::new(self)
    }
}
