use std::collections::HashMap;
use std::sync::Arc;

use common::{OplogEntry, SchemaCache};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::table_worker;
use crate::settings::Settings;

/// Owns one database's schema cache and further demultiplexes its entry
/// stream by collection, spawning a table worker the first time each
/// table name is seen (§4.6).
pub async fn run(
    database: String,
    mut entries_rx: mpsc::Receiver<OplogEntry>,
    sql_tx: mpsc::Sender<String>,
    cancel: CancellationToken,
    settings: Settings,
) {
    let cache = Arc::new(SchemaCache::new());
    let mut tables: HashMap<String, mpsc::Sender<OplogEntry>> = HashMap::new();
    let mut handles = Vec::new();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            entry = entries_rx.recv() => {
                let Some(entry) = entry else { break };
                let Some(ns) = entry.namespace() else { continue };
                let table = ns.collection;

                let tx = match tables.get(&table) {
                    Some(tx) => tx.clone(),
                    None => {
                        debug!(database = %database, table = %table, "new table observed");
                        let (tx, rx) = mpsc::channel(settings.table_queue_capacity);
                        let handle = tokio::spawn(table_worker::run(rx, sql_tx.clone(), cache.clone(), cancel.clone()));
                        handles.push(handle);
                        tables.insert(table.clone(), tx.clone());
                        tx
                    }
                };

                if tx.send(entry).await.is_err() {
                    warn!(database = %database, table = %table, "table worker queue closed");
                }
            }
        }
    }

    drop(tables);
    for handle in handles {
        let _ = handle.await;
    }
}
