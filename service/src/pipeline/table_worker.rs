use std::sync::Arc;

use common::{DefaultUuidProvider, OplogEntry, SchemaCache};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Drains one `(database, table)` queue, translating each entry with the
/// database's shared schema cache and forwarding the resulting SQL onto
/// that database's output stream in entry order (§4.6).
///
/// Stops consuming further entries for this table as soon as a
/// translation error is observed. Sibling tables and already-emitted SQL
/// are unaffected (§7).
pub async fn run(
    mut entries_rx: mpsc::Receiver<OplogEntry>,
    sql_tx: mpsc::Sender<String>,
    cache: Arc<SchemaCache>,
    cancel: CancellationToken,
) {
    let uuid = DefaultUuidProvider;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            entry = entries_rx.recv() => {
                let Some(entry) = entry else { break };
                match engine::translate(&entry, &cache, &uuid) {
                    Ok(statements) => {
                        for stmt in statements {
                            if sql_tx.send(stmt).await.is_err() {
                                return;
                            }
                        }
                    }
                    Err(err) => {
                        warn!(ns = %entry.ns, error = %err, "translation failed, dropping the rest of this table's queue");
                        return;
                    }
                }
            }
        }
    }
}
