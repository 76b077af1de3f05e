//! Fluent assertions over locator records
//!
//! ```rust,ignore
//! use xloc::testing::assert_locators;
//!
//! let records = Pipeline::standard().locate("/form/button[@name='ok']")?;
//! assert_locators(&records)
//!     .count(2)
//!     .chained()
//!     .record(1, |r| {
//!         r.id("form_ModuleQT_button_PushButtonQT_name_ok")
//!             .container("form_ModuleQT")
//!             .meta("name", "ok")
//!     });
//! ```
//!
//! Failures panic with the index of the offending record in the message.

use crate::synthesis::LocatorRecord;
use serde_json::Value;

/// Create an assertion builder for a record list
pub fn assert_locators(records: &[LocatorRecord]) -> LocatorsAssertion<'_> {
    LocatorsAssertion { records }
}

pub struct LocatorsAssertion<'a> {
    records: &'a [LocatorRecord],
}

impl<'a> LocatorsAssertion<'a> {
    pub fn count(self, expected: usize) -> Self {
        assert_eq!(
            self.records.len(),
            expected,
            "Expected {} locators, found {}: {:?}",
            expected,
            self.records.len(),
            self.ids()
        );
        self
    }

    pub fn empty(self) -> Self {
        self.count(0)
    }

    /// Identifiers of all records, in order
    pub fn ids(&self) -> Vec<&'a str> {
        self.records.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn ids_are(self, expected: &[&str]) -> Self {
        assert_eq!(self.ids(), expected, "Locator identifiers differ");
        self
    }

    /// Assert every container names the record before it
    pub fn chained(self) -> Self {
        let mut previous = "";
        for (i, record) in self.records.iter().enumerate() {
            assert_eq!(
                record.container, previous,
                "locator[{}]: container should be the previous identifier",
                i
            );
            previous = &record.id;
        }
        self
    }

    /// Run assertions on the record at `index`
    pub fn record<F, R>(self, index: usize, assertions: F) -> Self
    where
        F: FnOnce(RecordAssertion<'a>) -> R,
    {
        let record = self.records.get(index).unwrap_or_else(|| {
            panic!(
                "locator[{}] requested but only {} exist",
                index,
                self.records.len()
            )
        });
        assertions(RecordAssertion {
            record,
            context: format!("locator[{}]", index),
        });
        self
    }

    /// Run assertions on the last record
    pub fn last<F, R>(self, assertions: F) -> Self
    where
        F: FnOnce(RecordAssertion<'a>) -> R,
    {
        assert!(!self.records.is_empty(), "Expected at least one locator");
        let index = self.records.len() - 1;
        self.record(index, assertions)
    }
}

pub struct RecordAssertion<'a> {
    record: &'a LocatorRecord,
    context: String,
}

impl<'a> RecordAssertion<'a> {
    pub fn id(self, expected: &str) -> Self {
        assert_eq!(self.record.id, expected, "{}: identifier", self.context);
        self
    }

    pub fn id_ends_with(self, suffix: &str) -> Self {
        assert!(
            self.record.id.ends_with(suffix),
            "{}: identifier '{}' should end with '{}'",
            self.context,
            self.record.id,
            suffix
        );
        self
    }

    pub fn container(self, expected: &str) -> Self {
        assert_eq!(self.record.container, expected, "{}: container", self.context);
        self
    }

    pub fn root(self) -> Self {
        self.container("")
    }

    pub fn archetype(self, expected: &str) -> Self {
        self.meta("archetype", expected)
    }

    pub fn meta(self, key: &str, expected: impl Into<Value>) -> Self {
        let expected = expected.into();
        assert_eq!(
            self.record.meta.get(key),
            Some(&expected),
            "{}: metadata field '{}'",
            self.context,
            key
        );
        self
    }

    pub fn no_meta(self, key: &str) -> Self {
        assert!(
            self.record.meta.get(key).is_none(),
            "{}: unexpected metadata field '{}'",
            self.context,
            key
        );
        self
    }

    /// Assert the metadata keys, in insertion order
    pub fn meta_keys(self, expected: &[&str]) -> Self {
        let keys: Vec<_> = self.record.meta.keys().collect();
        assert_eq!(keys, expected, "{}: metadata keys", self.context);
        self
    }
}
