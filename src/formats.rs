//! Output formats for locator records
//!
//! Every renderer implements [`Formatter`] and is looked up by name through a
//! [`FormatRegistry`]:
//!
//! - `declarations`: one `id = {...}` assignment per record (the default)
//! - `json`: the record list as a JSON array
//! - `yaml`: the record list as a YAML sequence

pub mod declarations;
pub mod json;
pub mod registry;
pub mod yaml;

pub use declarations::DeclarationsFormatter;
pub use json::JsonFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use yaml::YamlFormatter;

/// Name of the format used when none is requested
pub const DEFAULT_FORMAT: &str = "declarations";
