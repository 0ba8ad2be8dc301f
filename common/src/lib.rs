pub mod column;
pub mod error;
pub mod namespace;
pub mod oplog;
pub mod schema_cache;
pub mod uuid_provider;
pub mod value;

pub use column::Column;
pub use error::TranslateError;
pub use namespace::Namespace;
pub use oplog::OplogEntry;
pub use schema_cache::SchemaCache;
pub use uuid_provider::{DefaultUuidProvider, UuidProvider};

/// Foreign key synthesised when a nested document/array is expanded into
/// a child table (§4.3). `dataType` is carried alongside the value so the
/// DDL generator doesn't need to re-infer it.
#[derive(Debug, Clone)]
pub struct ForeignKey {
    pub name: String,
    pub value: serde_json::Value,
    pub data_type: &'static str,
}

impl ForeignKey {
    pub fn new(name: impl Into<String>, value: serde_json::Value, data_type: &'static str) -> Self {
        Self {
            name: name.into(),
            value,
            data_type,
        }
    }
}
