use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

/// Appends newline-terminated SQL statements to a file, flushing after
/// each one so a crash doesn't lose already-applied statements.
pub struct FileSink {
    pub path: PathBuf,
}

impl FileSink {
    pub async fn run(self, mut rx: mpsc::Receiver<String>) -> Result<()> {
        let mut file = tokio::fs::File::create(&self.path)
            .await
            .with_context(|| format!("creating sink file {}", self.path.display()))?;

        while let Some(stmt) = rx.recv().await {
            file.write_all(stmt.as_bytes()).await?;
            file.write_all(b"\n").await?;
            file.flush().await?;
        }
        Ok(())
    }
}
