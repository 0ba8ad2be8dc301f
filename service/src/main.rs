mod io;
mod pipeline;
mod settings;

use std::path::PathBuf;

use clap::Parser;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use io::file_sink::FileSink;
use io::file_source::FileSource;
use pipeline::DatabaseStream;
use settings::Settings;

/// Translates a MongoDB oplog stream into an equivalent SQL statement
/// stream, one file or connection per observed database.
#[derive(Parser, Debug, Clone)]
#[command(name = "oplog-to-sql")]
struct Cli {
    /// Path to a JSON array of oplog entries.
    #[arg(long, env = "OPLOG_SOURCE_FILE")]
    source_file: Option<PathBuf>,

    /// Connection string for a live replica set's `local.oplog.rs`.
    #[arg(long, env = "OPLOG_MONGO_URI")]
    mongo_uri: Option<String>,

    /// Base path for the per-database output files; `<database>` is
    /// appended to the file stem.
    #[arg(long, env = "OPLOG_SINK_FILE")]
    sink_file: Option<PathBuf>,

    /// Postgres connection string for direct SQL application.
    #[arg(long, env = "OPLOG_POSTGRES_URL")]
    postgres_url: Option<String>,

    /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or `debug`.
    #[arg(long, env = "OPLOG_LOG_FILTER")]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    let filter_directive = cli.log_filter.clone().unwrap_or_else(|| settings.log_filter.clone());
    let filter = EnvFilter::try_new(&filter_directive).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("received shutdown signal, cancelling pipeline");
                cancel.cancel();
            }
        });
    }

    let (entries_tx, entries_rx) = mpsc::channel(settings.database_queue_capacity);
    let (streams_tx, mut streams_rx) = mpsc::channel::<DatabaseStream>(pipeline::STREAM_REGISTRY_CAPACITY);

    let source_cli = cli.clone();
    let source_handle = tokio::spawn(async move { run_source(source_cli, entries_tx).await });

    let pipeline_cancel = cancel.clone();
    let pipeline_settings = settings.clone();
    let pipeline_handle = tokio::spawn(async move {
        pipeline::run(entries_rx, streams_tx, pipeline_cancel, pipeline_settings).await
    });

    let sink_cli = cli.clone();
    let sink_handle = tokio::spawn(async move {
        let mut sink_tasks = Vec::new();
        while let Some(stream) = streams_rx.recv().await {
            let cli = sink_cli.clone();
            sink_tasks.push(tokio::spawn(async move { run_sink(cli, stream).await }));
        }
        for task in sink_tasks {
            if let Ok(Err(err)) = task.await {
                tracing::error!(error = %err, "sink failed");
            }
        }
    });

    match source_handle.await? {
        Ok(()) => {}
        Err(err) => {
            tracing::error!(error = %err, "source failed");
            cancel.cancel();
        }
    }

    pipeline_handle.await?;
    sink_handle.await?;

    Ok(())
}

async fn run_source(cli: Cli, tx: mpsc::Sender<common::OplogEntry>) -> anyhow::Result<()> {
    if let Some(path) = cli.source_file {
        FileSource { path }.run(tx).await
    } else if let Some(uri) = cli.mongo_uri {
        run_mongo_source(uri, tx).await
    } else {
        anyhow::bail!("either --source-file or --mongo-uri must be provided")
    }
}

#[cfg(feature = "mongo-source")]
async fn run_mongo_source(uri: String, tx: mpsc::Sender<common::OplogEntry>) -> anyhow::Result<()> {
    io::mongo_source::MongoSource { uri }.run(tx).await
}

#[cfg(not(feature = "mongo-source"))]
async fn run_mongo_source(_uri: String, _tx: mpsc::Sender<common::OplogEntry>) -> anyhow::Result<()> {
    anyhow::bail!("built without the mongo-source feature")
}

async fn run_sink(cli: Cli, stream: DatabaseStream) -> anyhow::Result<()> {
    if let Some(path) = cli.sink_file {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("out");
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("sql");
        let path = path.with_file_name(format!("{stem}.{}.{extension}", stream.database));
        FileSink { path }.run(stream.rx).await
    } else if let Some(url) = cli.postgres_url {
        run_postgres_sink(url, stream.rx).await
    } else {
        anyhow::bail!("either --sink-file or --postgres-url must be provided")
    }
}

#[cfg(feature = "postgres-sink")]
async fn run_postgres_sink(url: String, rx: mpsc::Receiver<String>) -> anyhow::Result<()> {
    let pool = sqlx::PgPool::connect(&url).await?;
    io::postgres_sink::PostgresSink { pool, batch_size: 100 }.run(rx).await
}

#[cfg(not(feature = "postgres-sink"))]
async fn run_postgres_sink(_url: String, _rx: mpsc::Receiver<String>) -> anyhow::Result<()> {
    anyhow::bail!("built without the postgres-sink feature")
}
