use std::collections::HashMap;

use common::OplogEntry;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{database_worker, DatabaseStream};
use crate::settings::Settings;

/// Demultiplexes a single ordered entry stream by target database,
/// spawning a database worker (§4.6) the first time each name is seen
/// and publishing its output stream to `streams_tx` immediately so a
/// sink can start draining it before the database has finished filling.
pub async fn run(
    mut entries_rx: mpsc::Receiver<OplogEntry>,
    streams_tx: mpsc::Sender<DatabaseStream>,
    cancel: CancellationToken,
    settings: Settings,
) {
    let mut workers: HashMap<String, mpsc::Sender<OplogEntry>> = HashMap::new();
    let mut handles = Vec::new();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("router cancelled, closing per-database queues");
                break;
            }
            entry = entries_rx.recv() => {
                let Some(entry) = entry else { break };
                let Some(ns) = entry.namespace() else {
                    warn!(ns = %entry.ns, "dropping entry with an unparseable namespace");
                    continue;
                };
                let db = ns.database;

                let tx = match workers.get(&db) {
                    Some(tx) => tx.clone(),
                    None => {
                        debug!(database = %db, "new database observed");
                        let (tx, rx) = mpsc::channel(settings.database_queue_capacity);
                        let (sql_tx, sql_rx) = mpsc::channel(settings.sql_output_capacity);
                        if streams_tx
                            .send(DatabaseStream { database: db.clone(), rx: sql_rx })
                            .await
                            .is_err()
                        {
                            warn!(database = %db, "stream registry closed, no sink will drain this database");
                        }
                        let handle = tokio::spawn(database_worker::run(
                            db.clone(),
                            rx,
                            sql_tx,
                            cancel.clone(),
                            settings.clone(),
                        ));
                        handles.push(handle);
                        workers.insert(db.clone(), tx.clone());
                        tx
                    }
                };

                if tx.send(entry).await.is_err() {
                    warn!(database = %db, "database worker queue closed");
                }
            }
        }
    }

    drop(workers);
    for handle in handles {
        let _ = handle.await;
    }
    info!("router drained, all database workers finished");
}
