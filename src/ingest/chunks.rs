//! Chunked fan-out/fan-in and batch persistence.

use std::time::Instant;

use chrono::Utc;
use futures::future::try_join_all;

use crate::error::Result;
use crate::types::{ChunkRange, PersonRecord, RunSummary};

use super::Ingestor;

/// Split ids `1..=total_count` into consecutive inclusive ranges of `chunk_size`
///
/// The last range is shorter when `total_count` is not a multiple of `chunk_size`.
/// A non-positive total or a zero chunk size yields no ranges.
pub fn chunk_ranges(total_count: i64, chunk_size: usize) -> Vec<ChunkRange> {
    if total_count <= 0 || chunk_size == 0 {
        return Vec::new();
    }

    let size = i64::try_from(chunk_size).unwrap_or(i64::MAX);
    let mut ranges = Vec::new();
    let mut start = 1i64;

    while start <= total_count {
        let end = start.saturating_add(size - 1).min(total_count);
        ranges.push(ChunkRange {
            index: ranges.len(),
            start,
            end,
        });
        match end.checked_add(1) {
            Some(next) => start = next,
            None => break,
        }
    }

    ranges
}

impl Ingestor {
    /// Run the whole pipeline: schema, count, then every chunk in order
    ///
    /// Stops at the first failure. Chunks persisted before the failure stay
    /// persisted; nothing of the failing chunk is.
    pub async fn run(&self) -> Result<RunSummary> {
        let started_at = Utc::now();
        let timer = Instant::now();

        tracing::info!(
            base_url = %self.client.base_url(),
            chunk_size = self.config.chunk_size,
            sink = self.sink.name(),
            "Starting ingest run"
        );

        self.sink.create_schema().await?;

        let total_count = self.total_count().await?;
        let chunks = chunk_ranges(total_count, self.config.chunk_size);
        tracing::info!(total_count, chunks = chunks.len(), "Planned chunks");

        let mut persisted = 0;
        for chunk in &chunks {
            persisted += self.process_chunk(*chunk).await?;
        }

        let summary = RunSummary {
            total_count,
            chunks: chunks.len(),
            persisted,
            started_at,
            elapsed: timer.elapsed(),
        };

        tracing::info!(
            total_count,
            chunks = summary.chunks,
            persisted,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Ingest run complete"
        );

        Ok(summary)
    }

    /// Fetch one chunk and persist it as a single batch
    ///
    /// Returns the number of records persisted.
    pub async fn process_chunk(&self, chunk: ChunkRange) -> Result<usize> {
        if chunk.is_empty() {
            return Ok(0);
        }

        tracing::debug!(
            chunk = chunk.index,
            size = chunk.len(),
            "Fetching chunk"
        );

        let people = match self.fetch_chunk(chunk).await {
            Ok(people) => people,
            Err(e) => {
                tracing::error!(
                    chunk = chunk.index,
                    start = chunk.start,
                    end = chunk.end,
                    error = %e,
                    "Chunk fetch failed, nothing persisted"
                );
                return Err(e);
            }
        };

        self.sink.bulk_insert(&people).await?;

        tracing::info!(
            chunk = chunk.index,
            start = chunk.start,
            end = chunk.end,
            count = people.len(),
            "Chunk persisted"
        );

        Ok(people.len())
    }

    /// Fetch every person of a chunk concurrently
    ///
    /// Results are collected by position, so the output is ascending by id no
    /// matter in which order the requests finish. The first failure drops the
    /// remaining in-flight fetches of the chunk.
    pub async fn fetch_chunk(&self, chunk: ChunkRange) -> Result<Vec<PersonRecord>> {
        try_join_all(chunk.ids().map(|id| self.fetch_person(id))).await
    }
}
