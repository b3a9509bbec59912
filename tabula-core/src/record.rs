//! Record access.

use serde_json::{Map, Value};

/// An opaque row of named fields.
///
/// The table renderer only needs two capabilities: iteration over field names
/// and lookup by field name. Identity, storage and query semantics are the
/// data-source collaborator's concern.
pub trait Record: Send + Sync {
    /// The record's field names.
    fn field_names(&self) -> Vec<String>;

    /// Look up a field value by name.
    fn field(&self, name: &str) -> Option<Value>;
}

/// A boxed record, as returned by data sources.
pub type BoxRecord = Box<dyn Record>;

impl Record for Map<String, Value> {
    fn field_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Record for BoxRecord {
    fn field_names(&self) -> Vec<String> {
        self.as_ref().field_names()
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.as_ref().field(name)
    }
}
