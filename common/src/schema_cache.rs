use dashmap::DashSet;

/// Per-database memoisation of which schema/table/column DDL has already
/// been emitted on that database's SQL stream.
///
/// Backed by a `DashSet` so the table-workers sharing one database (§4.6)
/// can test-and-insert concurrently without a single lock guarding the
/// whole cache.
#[derive(Debug, Default)]
pub struct SchemaCache {
    keys: DashSet<String>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only presence test.
    pub fn has(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Atomically tests and inserts `key`, returning whether it was
    /// already present beforehand. Only the caller that observes `false`
    /// is responsible for emitting the corresponding DDL.
    pub fn load_or_store(&self, key: impl Into<String>) -> bool {
        !self.keys.insert(key.into())
    }
}
