use anyhow::{Context, Result};
use common::OplogEntry;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::Client;
use tokio::sync::mpsc;

/// Tails `local.oplog.rs` on a live replica set, filtering out no-op
/// (`n`) and command (`c`) entries before handing the rest to the
/// router.
pub struct MongoSource {
    pub uri: String,
}

impl MongoSource {
    pub async fn run(self, tx: mpsc::Sender<OplogEntry>) -> Result<()> {
        let options = ClientOptions::parse(&self.uri).await.context("parsing mongo uri")?;
        let client = Client::with_options(options).context("connecting to mongo")?;
        let oplog = client.database("local").collection::<Document>("oplog.rs");

        let mut cursor = oplog
            .find(doc! { "op": { "$in": ["i", "u", "d"] } })
            .await
            .context("opening oplog cursor")?;

        while let Some(doc) = cursor.try_next().await.context("reading oplog cursor")? {
            let value: serde_json::Value =
                mongodb::bson::from_document(doc).context("decoding oplog document")?;
            let entry: OplogEntry = serde_json::from_value(value).context("parsing oplog entry")?;
            if entry.namespace().is_none() {
                continue;
            }
            if tx.send(entry).await.is_err() {
                break;
            }
        }
        Ok(())
    }
}
