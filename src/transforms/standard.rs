//! Standard transform definitions
//!
//! Pre-built transforms for the common chains, defined as statics using
//! `once_cell::sync::Lazy`.

use crate::parsing::PathStep;
use crate::synthesis::LocatorRecord;
use crate::token::Token;
use crate::transforms::stages::{Conversion, Parsing, Rendering, SegmentParsing, Tokenization};
use crate::transforms::Transform;
use once_cell::sync::Lazy;

/// Type alias for the lexing transform
pub type TokenTransform = Transform<String, Vec<Token>>;

/// Type alias for transforms producing path steps
pub type StepTransform = Transform<String, Vec<PathStep>>;

/// Type alias for transforms producing locator records
pub type LocatorTransform = Transform<String, Vec<LocatorRecord>>;

/// Type alias for transforms producing rendered text
pub type RenderTransform = Transform<String, String>;

/// Tokenization: String → Vec<Token>
///
/// ```rust,ignore
/// use xloc::transforms::standard::TOKENIZE;
///
/// let tokens = TOKENIZE.run("form/button".to_string()).unwrap();
/// assert_eq!(tokens.len(), 4);
/// ```
pub static TOKENIZE: Lazy<TokenTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then(Tokenization::new()));

/// Full grammar: String → Vec<PathStep>
pub static PARSE: Lazy<StepTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then_transform(&*TOKENIZE).then(Parsing::new()));

/// String → Vec<LocatorRecord> through the full grammar and the heuristic classifier
pub static STRING_TO_LOCATORS: Lazy<LocatorTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then_transform(&*PARSE).then(Conversion::new()));

/// String → Vec<LocatorRecord> through the regex segment parser
pub static SEGMENTS_TO_LOCATORS: Lazy<LocatorTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then(SegmentParsing::new())
        .then(Conversion::new())
});

/// String → declarations text, the whole default chain
///
/// ```rust,ignore
/// use xloc::transforms::standard::STRING_TO_DECLARATIONS;
///
/// let text = STRING_TO_DECLARATIONS.run("button".to_string()).unwrap();
/// assert!(text.starts_with("button_PushButtonQT = {"));
/// ```
pub static STRING_TO_DECLARATIONS: Lazy<RenderTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then_transform(&*STRING_TO_LOCATORS)
        .then(Rendering::new())
});
