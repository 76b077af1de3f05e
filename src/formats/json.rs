//! JSON format: the record list as a pretty-printed array

use super::registry::{FormatError, Formatter};
use crate::synthesis::LocatorRecord;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, records: &[LocatorRecord]) -> Result<String, FormatError> {
        serde_json::to_string_pretty(records)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "JSON array of {id, meta, container} objects"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::PathStep;
    use crate::synthesis::convert;
    use serde_json::Value;

    #[test]
    fn test_json_shape() {
        let records = convert(&[PathStep::child("form"), PathStep::child("button")]);
        let output = JsonFormatter.serialize(&records).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value[0]["id"], "form_ModuleQT");
        assert!(value[0].get("container").is_none());
        assert_eq!(value[1]["container"], "form_ModuleQT");
        assert_eq!(value[1]["meta"]["archetype"], "PushButtonQT");
    }

    #[test]
    fn test_metadata_key_order_is_kept() {
        let records = convert(&[PathStep::child("button")]);
        let output = JsonFormatter.serialize(&records).unwrap();
        let archetype = output.find("archetype").unwrap();
        let visible = output.find("visible").unwrap();
        assert!(archetype < visible);
    }
}
