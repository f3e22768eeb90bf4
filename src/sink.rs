//! Persistence sinks for resolved people
//!
//! The ingest pipeline only needs two storage operations: create the schema once,
//! then insert one batch per chunk. [`PeopleSink`] captures exactly that, so the
//! pipeline runs the same against [`Database`] or the in-memory [`MemorySink`].

use async_trait::async_trait;
use std::sync::Mutex;

use crate::db::Database;
use crate::error::Result;
use crate::types::PersonRecord;

/// Storage collaborator of the ingest pipeline
///
/// # Examples
///
/// ```
/// use swapi_ingest::sink::{MemorySink, PeopleSink};
/// use swapi_ingest::PersonRecord;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let sink = MemorySink::new();
/// sink.create_schema().await?;
/// sink.bulk_insert(&[PersonRecord::placeholder(1)]).await?;
///
/// assert_eq!(sink.batches().len(), 1);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait PeopleSink: Send + Sync {
    /// Prepare storage; must be idempotent
    async fn create_schema(&self) -> Result<()>;

    /// Store one batch atomically, in the given order
    async fn bulk_insert(&self, people: &[PersonRecord]) -> Result<()>;

    /// Human-readable name for logging
    fn name(&self) -> &str;
}

#[async_trait]
impl PeopleSink for Database {
    async fn create_schema(&self) -> Result<()> {
        Database::create_schema(self).await
    }

    async fn bulk_insert(&self, people: &[PersonRecord]) -> Result<()> {
        self.bulk_insert_people(people).await
    }

    fn name(&self) -> &str {
        "database"
    }
}

/// Sink that keeps every batch in memory
///
/// Useful for dry runs and for inspecting exactly what the pipeline would persist.
#[derive(Debug, Default)]
pub struct MemorySink {
    batches: Mutex<Vec<Vec<PersonRecord>>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Batches received so far, in arrival order
    pub fn batches(&self) -> Vec<Vec<PersonRecord>> {
        self.lock().clone()
    }

    /// All received records, flattened in arrival order
    pub fn records(&self) -> Vec<PersonRecord> {
        self.lock().iter().flatten().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Vec<PersonRecord>>> {
        // Only whole batches are ever pushed, so a poisoned lock still holds valid data
        self.batches.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl PeopleSink for MemorySink {
    async fn create_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn bulk_insert(&self, people: &[PersonRecord]) -> Result<()> {
        self.lock().push(people.to_vec());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
