//! Pure translation from a single MongoDB oplog entry into the SQL
//! statements it implies, given a shared per-database schema cache.
//!
//! This crate has no I/O: callers own the queues, the concurrency, and
//! the source/sink wiring (see the `service` crate).

mod ddl;
mod dml;

pub use common::{Column, ForeignKey, Namespace, OplogEntry, SchemaCache, TranslateError};
pub use common::{DefaultUuidProvider, UuidProvider};

/// Translates one oplog entry into zero or more SQL statements, in the
/// order they must be applied. `cache` is shared across every table
/// translated for the same database; `uuid` supplies identifiers for
/// sub-documents that arrive without one of their own.
///
/// Unknown `op` values produce an empty result and are not an error.
pub fn translate(
    entry: &OplogEntry,
    cache: &SchemaCache,
    uuid: &dyn UuidProvider,
) -> Result<Vec<String>, TranslateError> {
    match entry.op.as_str() {
        "i" => ddl::generate_insert(entry, cache, uuid),
        "u" => dml::generate_update(entry).map(|stmt| vec![stmt]),
        "d" => dml::generate_delete(entry).map(|stmt| vec![stmt]),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::DefaultUuidProvider;
    use serde_json::json;

    fn entry(op: &str, ns: &str, o: serde_json::Value, o2: serde_json::Value) -> OplogEntry {
        serde_json::from_value(json!({
            "op": op,
            "ns": ns,
            "o": o,
            "o2": o2,
        }))
        .unwrap()
    }

    #[test]
    fn test_unknown_op_produces_nothing() {
        let e = entry("n", "test.student", json!({}), json!({}));
        let cache = SchemaCache::new();
        let uuid = DefaultUuidProvider;
        assert_eq!(translate(&e, &cache, &uuid).unwrap(), Vec::<String>::new());
    }
}
