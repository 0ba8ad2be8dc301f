use std::path::PathBuf;

use anyhow::{Context, Result};
use common::OplogEntry;
use tokio::sync::mpsc;

/// Reads a JSON array of oplog entries from a file, publishing each
/// element in array order and closing the channel at EOF.
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub async fn run(self, tx: mpsc::Sender<OplogEntry>) -> Result<()> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading oplog file {}", self.path.display()))?;
        let entries: Vec<OplogEntry> = serde_json::from_str(&contents)
            .with_context(|| format!("parsing oplog JSON array from {}", self.path.display()))?;

        for entry in entries {
            if tx.send(entry).await.is_err() {
                break;
            }
        }
        Ok(())
    }
}
