pub mod file_sink;
pub mod file_source;

#[cfg(feature = "mongo-source")]
pub mod mongo_source;

#[cfg(feature = "postgres-sink")]
pub mod postgres_sink;
