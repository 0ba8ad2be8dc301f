use serde::Deserialize;
use serde_json::{Map, Value};

use crate::Namespace;

/// One MongoDB oplog change record, as read from a JSON-array dump or a
/// tailed replica-set oplog (§2, §6).
#[derive(Debug, Clone, Deserialize)]
pub struct OplogEntry {
    pub op: String,
    pub ns: String,
    #[serde(default)]
    pub o: Map<String, Value>,
    #[serde(default)]
    pub o2: Map<String, Value>,
}

impl OplogEntry {
    pub fn namespace(&self) -> Option<Namespace> {
        Namespace::parse(&self.ns)
    }

    pub fn is_insert(&self) -> bool {
        self.op == "i"
    }

    pub fn is_update(&self) -> bool {
        self.op == "u"
    }

    pub fn is_delete(&self) -> bool {
        self.op == "d"
    }

    /// The update diff envelope's inner object, i.e. `o.diff`, if present.
    pub fn diff(&self) -> Option<&Map<String, Value>> {
        self.o.get("diff")?.as_object()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_insert() {
        let raw = r#"{"op":"i","ns":"school.students","o":{"_id":"1","name":"Alice"}}"#;
        let entry: OplogEntry = serde_json::from_str(raw).unwrap();
        assert!(entry.is_insert());
        assert_eq!(entry.namespace().unwrap().collection, "students");
    }

    #[test]
    fn test_deserialize_delete_has_no_o() {
        let raw = r#"{"op":"d","ns":"school.students","o2":{"_id":"1"}}"#;
        let entry: OplogEntry = serde_json::from_str(raw).unwrap();
        assert!(entry.is_delete());
        assert!(entry.o.is_empty());
    }

    #[test]
    fn test_diff_missing_returns_none() {
        let raw = r#"{"op":"u","ns":"school.students","o":{},"o2":{"_id":"1"}}"#;
        let entry: OplogEntry = serde_json::from_str(raw).unwrap();
        assert!(entry.diff().is_none());
    }
}
