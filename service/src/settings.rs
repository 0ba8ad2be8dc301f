use serde::Deserialize;

/// Process-wide tuning knobs that aren't exposed as CLI flags: queue
/// capacities and the default log filter. Loaded from an optional
/// `config.yaml` layered under environment variables prefixed `OPLOG_`,
/// after `dotenvy` has loaded a local `.env` if one is present.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default = "default_database_queue_capacity")]
    pub database_queue_capacity: usize,
    #[serde(default = "default_table_queue_capacity")]
    pub table_queue_capacity: usize,
    #[serde(default = "default_sql_output_capacity")]
    pub sql_output_capacity: usize,
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_database_queue_capacity() -> usize {
    1000
}

fn default_table_queue_capacity() -> usize {
    1000
}

fn default_sql_output_capacity() -> usize {
    100
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            database_queue_capacity: default_database_queue_capacity(),
            table_queue_capacity: default_table_queue_capacity(),
            sql_output_capacity: default_sql_output_capacity(),
        }
    }
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("OPLOG").try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}
