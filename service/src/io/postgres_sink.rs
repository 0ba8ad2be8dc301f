use anyhow::{Context, Result};
use sqlx::PgPool;
use tokio::sync::mpsc;

/// Executes each statement against a `PgPool` inside a batched
/// transaction, committing every `batch_size` statements.
pub struct PostgresSink {
    pub pool: PgPool,
    pub batch_size: usize,
}

impl PostgresSink {
    pub async fn run(self, mut rx: mpsc::Receiver<String>) -> Result<()> {
        let mut tx = self.pool.begin().await.context("beginning transaction")?;
        let mut pending = 0usize;

        while let Some(stmt) = rx.recv().await {
            sqlx::query(&stmt)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("executing statement: {stmt}"))?;
            pending += 1;

            if pending >= self.batch_size {
                tx.commit().await.context("committing batch")?;
                tx = self.pool.begin().await.context("beginning transaction")?;
                pending = 0;
            }
        }

        if pending > 0 {
            tx.commit().await.context("committing final batch")?;
        }
        Ok(())
    }
}
