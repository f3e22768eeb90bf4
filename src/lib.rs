//! # swapi-ingest
//!
//! Fetches every person from the Star Wars API, resolves their films, species,
//! starships and vehicles into display names, and bulk-loads the flattened
//! records into a SQL table.
//!
//! ## How a run works
//!
//! - **Probe**: one request to `people/` yields the total count
//! - **Chunk**: ids `1..=count` are split into fixed-size chunks (default 10)
//! - **Fan out**: every person of a chunk is fetched concurrently; each fetch
//!   resolves its relation URLs one by one
//! - **Persist**: the chunk is inserted as one transaction, ascending by id,
//!   before the next chunk starts
//!
//! Any failure aborts the run. There is no retry and no checkpoint.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use swapi_ingest::{Config, Database, Ingestor};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!
//!     let db = Arc::new(Database::new(&config.database).await?);
//!     let ingestor = Ingestor::new(&config.api, db.clone())?;
//!
//!     let summary = ingestor.run().await?;
//!     println!("stored {} people", summary.persisted);
//!
//!     db.close().await;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// HTTP transport
pub mod client;
/// Configuration types
pub mod config;
/// Database persistence layer
pub mod db;
/// Error types
pub mod error;
/// Fetch-and-enrich pipeline
pub mod ingest;
/// Persistence sinks
pub mod sink;
/// Core types
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use client::SwapiClient;
pub use config::{ApiConfig, Config, DatabaseConfig};
pub use db::Database;
pub use error::{DatabaseError, Error, ErrorKind, ParseError, Result};
pub use ingest::Ingestor;
pub use sink::{MemorySink, PeopleSink};
pub use types::{ChunkRange, PersonRecord, RawPerson, RelationKind, RunSummary};
