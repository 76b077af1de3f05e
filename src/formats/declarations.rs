//! Declarations format
//!
//! Renders each record as an assignment of its metadata document to its identifier:
//!
//!     form_ModuleQT = {
//!         "archetype": "ModuleQT",
//!         "visible": 1
//!     }
//!     form_ModuleQT_button_PushButtonQT = {
//!         "archetype": "PushButtonQT",
//!         "visible": 1,
//!         "container": form_ModuleQT
//!     }
//!
//! The container is written last and unquoted, as a reference to the earlier declaration.

use super::registry::{FormatError, Formatter};
use crate::synthesis::LocatorRecord;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Width used when no indent is configured
pub const DEFAULT_INDENT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclarationsFormatter {
    indent: usize,
}

impl DeclarationsFormatter {
    pub fn new(indent: usize) -> Self {
        DeclarationsFormatter { indent }
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Render a single record, including its trailing newline
    pub fn declaration(&self, record: &LocatorRecord) -> Result<String, FormatError> {
        let pad = " ".repeat(self.indent);
        let mut body = pretty(&record.meta, &pad)?;

        if !record.container.is_empty() {
            let reference = format!("\"container\": {}\n}}", record.container);
            body = match body.strip_suffix("\n}") {
                Some(open) => format!("{open},\n{pad}{reference}"),
                None => format!("{{\n{pad}{reference}"),
            };
        }

        Ok(format!("{} = {}\n", record.id, body))
    }
}

impl Default for DeclarationsFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl Formatter for DeclarationsFormatter {
    fn name(&self) -> &str {
        "declarations"
    }

    fn serialize(&self, records: &[LocatorRecord]) -> Result<String, FormatError> {
        records
            .iter()
            .map(|record| self.declaration(record))
            .collect()
    }

    fn description(&self) -> &str {
        "One `id = {metadata}` declaration per locator"
    }
}

fn pretty<T: Serialize>(value: &T, pad: &str) -> Result<String, FormatError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(pad.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| FormatError::SerializationError(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| FormatError::SerializationError(e.to_string()))
}
