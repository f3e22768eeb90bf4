//! Database layer for swapi-ingest
//!
//! Persists resolved people into a relational store through an [`sqlx::AnyPool`],
//! so the same code serves PostgreSQL in production and SQLite for local runs
//! and tests. Statements use `$N` placeholders and column types both engines
//! understand.
//!
//! ## Submodules
//!
//! Methods on [`Database`] are organized by concern:
//! - [`schema`]: connection lifecycle and table creation
//! - [`people`]: bulk insert and read-back of person records

use sqlx::AnyPool;

mod people;
mod schema;

/// Name of the table holding resolved people
pub const PEOPLE_TABLE: &str = "swapi_people";

/// Database handle for swapi-ingest
///
/// Built once at startup, handed to the ingest pipeline as its sink and closed
/// explicitly with [`Database::close`].
pub struct Database {
    pool: AnyPool,
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
