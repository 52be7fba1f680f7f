use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A schemaless stored document.
pub type Document = Map<String, Value>;

/// Field every document carries; lists are ordered by it, newest first.
pub const CREATED_AT_FIELD: &str = "created_at";

/// Equality predicate applied by the store while querying.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EqualityFilter {
    pub field: String,
    pub value: Value,
}

impl EqualityFilter {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Returns `true` if the document holds exactly `value` at `field`.
    pub fn matches(&self, document: &Document) -> bool {
        document.get(&self.field) == Some(&self.value)
    }
}
