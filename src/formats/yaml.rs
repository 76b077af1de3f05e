//! YAML format: the record list as a sequence of mappings

use super::registry::{FormatError, Formatter};
use crate::synthesis::LocatorRecord;

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, records: &[LocatorRecord]) -> Result<String, FormatError> {
        serde_yaml::to_string(records).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "YAML sequence of {id, meta, container} mappings"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{Condition, PathStep};
    use crate::synthesis::convert;

    #[test]
    fn test_yaml_output() {
        let step = PathStep::child("row").with_predicate(vec![Condition::position(2)]);
        let output = YamlFormatter.serialize(&convert(&[step])).unwrap();

        assert!(output.contains("id: row_QWidget"));
        assert!(output.contains("archetype: QWidget"));
        assert!(output.contains("occurrence: 2"));
        assert!(!output.contains("container"));
    }
}
