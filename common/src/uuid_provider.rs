use uuid::Uuid;

/// Generates identifiers for nested sub-documents that arrive without an
/// `_id` of their own. Injectable so tests can pin the generated id to a
/// literal value.
pub trait UuidProvider: Send + Sync {
    fn new_id(&self) -> String;
}

/// Production provider: a random UUIDv4, rendered in canonical hyphenated
/// form.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultUuidProvider;

impl UuidProvider for DefaultUuidProvider {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
