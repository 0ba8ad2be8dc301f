use serde_json::Value;

use crate::value::sql_data_type;

/// A single `(name, value)` pair observed in an oplog document, together
/// with its derived SQL type. Transient — built while walking a document,
/// never stored.
#[derive(Debug, Clone)]
pub struct Column<'a> {
    pub name: &'a str,
    pub value: &'a Value,
}

impl<'a> Column<'a> {
    pub fn new(name: &'a str, value: &'a Value) -> Self {
        Self { name, value }
    }

    pub fn data_type(&self) -> &'static str {
        sql_data_type(self.value)
    }

    pub fn is_primary_key(&self) -> bool {
        self.name == "_id"
    }
}
