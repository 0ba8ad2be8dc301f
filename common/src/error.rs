use std::fmt;

/// Per-entry translation failure kinds (§7). Surfaced by the pure
/// translation functions in the `engine` crate; the pipeline logs these
/// at `warn` and moves on to the next entry on that table's queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateError {
    /// An entry whose `op` produced no SQL statements at all.
    InvalidOplog,
    /// A delete entry whose `o` (the match criteria, not `o2`) is empty.
    InvalidDelete,
    /// An update entry whose `o.diff` is missing or not an object.
    InvalidDiff,
    /// An update diff that names neither `u` nor `d`.
    InvalidDiffOperation,
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            TranslateError::InvalidOplog => "invalid oplog",
            TranslateError::InvalidDelete => "invalid delete",
            TranslateError::InvalidDiff => "invalid diff",
            TranslateError::InvalidDiffOperation => "invalid diff operation",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for TranslateError {}
