//! # xloc
//!
//! Translates XPath-style path expressions into deterministic, hierarchical widget locators
//! for GUI test automation.
//!
//!     //button[@name='submit']
//!
//! becomes one [`LocatorRecord`] per path step, each carrying a canonical identifier, an
//! ordered metadata document and a reference to the record before it:
//!
//!     any_QWidget = {
//!         "archetype": "QWidget",
//!         "visible": 1
//!     }
//!     any_QWidget_button_PushButtonQT_name_submit = {
//!         "archetype": "PushButtonQT",
//!         "name": "submit",
//!         "visible": 1,
//!         "container": any_QWidget
//!     }
//!
//! ## Pipeline
//!
//!     source text
//!       → lexing::tokenize        Vec<Token>
//!       → parsing::parse          Vec<PathStep>
//!       → synthesis::convert      Vec<LocatorRecord>   (classify::Classifier per step)
//!       → formats::Formatter      String
//!
//! [`pipeline::Pipeline`] holds the four stages and lets each of them be replaced. The
//! [`transforms`] module has the stage types and pre-built static transforms. Only lexing
//! and parsing can fail; classification and synthesis are total.
//!
//! ## Testing
//!
//! The [testing] module has fluent assertions over record lists, used throughout the test
//! suite.

pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod formats;
pub mod lexing;
pub mod loader;
pub mod parsing;
pub mod pipeline;
pub mod synthesis;
pub mod testing;
pub mod token;
pub mod transforms;

pub use classify::{Archetype, Classifier, HeuristicClassifier};
pub use lexing::{tokenize, LexError};
pub use parsing::{parse, parse_expression, ParseError, PathStep};
pub use pipeline::{CachingPipeline, Pipeline};
pub use synthesis::{convert, LocatorRecord, Metadata};
pub use token::{Token, TokenKind};
pub use transforms::TransformError;

/// Locator records for `source`, through the standard pipeline
pub fn locate(source: &str) -> Result<Vec<LocatorRecord>, TransformError> {
    transforms::standard::STRING_TO_LOCATORS.run(source.to_string())
}
