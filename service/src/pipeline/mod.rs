pub mod database_worker;
pub mod router;
pub mod table_worker;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::settings::Settings;

/// Capacity of the outer queue the router publishes newly-observed
/// databases' SQL streams onto (§5) — fixed, since sinks attach to it
/// dynamically rather than through `Settings`.
pub const STREAM_REGISTRY_CAPACITY: usize = 1000;

/// A per-database SQL statement stream, handed to the sink layer as soon
/// as that database is first observed (§5).
pub struct DatabaseStream {
    pub database: String,
    pub rx: mpsc::Receiver<String>,
}

/// Drives the router and every worker it spawns to completion: consumes
/// `entries_rx` until the source closes it or `cancel` fires, then waits
/// for all in-flight per-database and per-table work to drain before
/// returning (which closes `streams_tx`, ending the sink loop).
pub async fn run(
    entries_rx: mpsc::Receiver<common::OplogEntry>,
    streams_tx: mpsc::Sender<DatabaseStream>,
    cancel: CancellationToken,
    settings: Settings,
) {
    router::run(entries_rx, streams_tx, cancel, settings).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(raw: serde_json::Value) -> common::OplogEntry {
        serde_json::from_value(raw).unwrap()
    }

    #[tokio::test]
    async fn test_router_fans_out_by_database_and_closes_streams_on_exhaustion() {
        let (entries_tx, entries_rx) = mpsc::channel(16);
        let (streams_tx, mut streams_rx) = mpsc::channel(16);
        let cancel = CancellationToken::new();

        let pipeline_handle =
            tokio::spawn(run(entries_rx, streams_tx, cancel.clone(), Settings::default()));

        entries_tx
            .send(entry(json!({"op": "i", "ns": "school.students", "o": {"_id": "1", "name": "Ada"}})))
            .await
            .unwrap();
        entries_tx
            .send(entry(json!({"op": "i", "ns": "shop.orders", "o": {"_id": "1", "total": 9.5}})))
            .await
            .unwrap();
        drop(entries_tx);

        let mut seen = std::collections::HashMap::new();
        while let Some(mut stream) = streams_rx.recv().await {
            let mut statements = Vec::new();
            while let Some(stmt) = stream.rx.recv().await {
                statements.push(stmt);
            }
            seen.insert(stream.database, statements);
        }

        pipeline_handle.await.unwrap();

        let school = &seen["school"];
        assert!(school.iter().any(|s| s == "CREATE SCHEMA school;"));
        assert!(school.iter().any(|s| s.starts_with("INSERT INTO school.students")));

        let shop = &seen["shop"];
        assert!(shop.iter().any(|s| s == "CREATE SCHEMA shop;"));
        assert!(shop.iter().any(|s| s.starts_with("INSERT INTO shop.orders")));
    }
}
