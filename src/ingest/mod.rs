//! Concurrent fetch-and-enrich pipeline.
//!
//! [`Ingestor`] drives a run end to end:
//! - [`count`]: probe the collection size once
//! - [`chunks`]: split ids into fixed-size chunks, fan out per chunk, persist per chunk
//! - [`fetch`]: fetch one person and coerce its scalar fields
//! - [`resolve`]: turn relation URLs into display names
//!
//! Concurrency exists only inside a chunk: all fetches of a chunk are polled
//! together on the caller's task and joined before the batch is persisted. The
//! next chunk starts only after that batch is stored.

use std::sync::Arc;

use crate::client::SwapiClient;
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::sink::PeopleSink;

mod chunks;
mod count;
mod fetch;
mod resolve;

pub use chunks::chunk_ranges;
pub use fetch::{parse_height, parse_mass};

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

/// Fetches people from the API, resolves their relations and hands them to a sink
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use swapi_ingest::{ApiConfig, Ingestor};
/// use swapi_ingest::sink::MemorySink;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let sink = Arc::new(MemorySink::new());
/// let ingestor = Ingestor::new(&ApiConfig::default(), sink.clone())?;
///
/// let summary = ingestor.run().await?;
/// println!("stored {} people in {} chunks", summary.persisted, summary.chunks);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Ingestor {
    /// Shared HTTP client (one connection pool for the whole run)
    pub(crate) client: SwapiClient,
    /// Destination of every persisted chunk
    pub(crate) sink: Arc<dyn PeopleSink>,
    /// API settings (chunk size, not-found policy)
    pub(crate) config: Arc<ApiConfig>,
}

impl Ingestor {
    /// Create an ingestor for `config.base_url` persisting into `sink`
    pub fn new(config: &ApiConfig, sink: Arc<dyn PeopleSink>) -> Result<Self> {
        let client = SwapiClient::new(&config.base_url)?;
        Self::with_client(client, config, sink)
    }

    /// Create an ingestor around an existing client
    pub fn with_client(
        client: SwapiClient,
        config: &ApiConfig,
        sink: Arc<dyn PeopleSink>,
    ) -> Result<Self> {
        if config.chunk_size == 0 {
            return Err(Error::config(
                "chunk size must be greater than zero",
                "chunk_size",
            ));
        }

        Ok(Self {
            client,
            sink,
            config: Arc::new(config.clone()),
        })
    }

    /// HTTP client used for every request of this ingestor
    pub fn client(&self) -> &SwapiClient {
        &self.client
    }

    /// Number of people fetched concurrently and persisted per batch
    pub fn chunk_size(&self) -> usize {
        self.config.chunk_size
    }
}
