//! Persistence tests against a real PostgreSQL server
//!
//! Connection settings come from `PG_USER`, `PG_PASSWORD`, `PG_DB`, `PG_HOST`
//! and `PG_PORT` (a `.env` file is honored).
//!
//! # Running the tests
//!
//! ```bash
//! docker run -d -p 5432:5432 -e POSTGRES_USER=swapi -e POSTGRES_PASSWORD=swapi \
//!     -e POSTGRES_DB=asyncio_db postgres:16
//! PG_USER=swapi PG_PASSWORD=swapi cargo test --features docker-tests --test postgres_roundtrip
//! ```

#![cfg(feature = "docker-tests")]

mod common;

use common::{load_config, sample_record};
use swapi_ingest::{Database, PersonRecord};

/// Connect, create the schema, and remove rows left over from an earlier run
async fn prepared_database(first_id: i64, last_id: i64) -> Database {
    let config = load_config();
    let db = Database::new(&config.database).await.unwrap();
    db.create_schema().await.unwrap();

    sqlx::query("DELETE FROM swapi_people WHERE id BETWEEN $1 AND $2")
        .bind(first_id)
        .bind(last_id)
        .execute(db.pool())
        .await
        .unwrap();

    db
}

#[tokio::test]
async fn test_postgres_round_trip() {
    let db = prepared_database(9_000_001, 9_000_002).await;

    let full = sample_record(9_000_001);
    let mut sparse = PersonRecord::placeholder(9_000_002);
    sparse.mass = Some(80.5);

    db.bulk_insert_people(&[full.clone(), sparse.clone()])
        .await
        .unwrap();

    assert_eq!(db.get_person(9_000_001).await.unwrap(), Some(full));
    assert_eq!(db.get_person(9_000_002).await.unwrap(), Some(sparse));

    db.close().await;
}

#[tokio::test]
async fn test_postgres_duplicate_rolls_back_batch() {
    let db = prepared_database(9_000_011, 9_000_012).await;

    db.bulk_insert_people(&[sample_record(9_000_011)])
        .await
        .unwrap();

    let err = db
        .bulk_insert_people(&[sample_record(9_000_012), sample_record(9_000_011)])
        .await
        .unwrap_err();

    assert!(err.is_constraint_violation(), "unexpected error: {}", err);
    assert!(db.get_person(9_000_012).await.unwrap().is_none());

    db.close().await;
}
