//! Tests against the public SWAPI instance
//!
//! # Running the tests
//!
//! ```bash
//! cargo test --features live-tests --test live_swapi
//! ```

#![cfg(feature = "live-tests")]

mod common;

use std::sync::Arc;
use swapi_ingest::{ChunkRange, Ingestor, MemorySink};

fn live_ingestor() -> (Ingestor, Arc<MemorySink>) {
    let config = common::load_config();
    let sink = Arc::new(MemorySink::new());
    let ingestor = Ingestor::new(&config.api, sink.clone()).unwrap();
    (ingestor, sink)
}

#[tokio::test]
async fn test_live_total_count() {
    let (ingestor, _sink) = live_ingestor();
    let count = ingestor.total_count().await.unwrap();
    assert!(count >= 82, "SWAPI lists at least 82 people, got {}", count);
}

#[tokio::test]
async fn test_live_fetch_luke() {
    let (ingestor, _sink) = live_ingestor();

    let luke = ingestor.fetch_person(1).await.unwrap();

    assert_eq!(luke.id, 1);
    assert_eq!(luke.name.as_deref(), Some("Luke Skywalker"));
    assert_eq!(luke.height, Some(172.0));
    assert_eq!(luke.mass, Some(77.0));
    assert!(luke.films.contains("A New Hope"));
    assert_eq!(luke.species, "None");
}

#[tokio::test]
async fn test_live_first_chunk() {
    let (ingestor, sink) = live_ingestor();

    let persisted = ingestor
        .process_chunk(ChunkRange {
            index: 0,
            start: 1,
            end: 5,
        })
        .await
        .unwrap();

    assert_eq!(persisted, 5);
    let ids: Vec<i64> = sink.records().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}
