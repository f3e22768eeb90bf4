//! Database lifecycle and schema creation.

use crate::config::DatabaseConfig;
use crate::error::DatabaseError;
use crate::{Error, Result};
use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;

use super::Database;

impl Database {
    /// Connect to the database described by `config`
    ///
    /// Only opens the pool; call [`create_schema`](Self::create_schema) before inserting.
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let url = config.connection_url()?;
        Self::connect(&url, config.max_connections).await
    }

    /// Connect to a database URL (`postgres://…` or `sqlite://…`)
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::ConnectionFailed(format!(
                    "Failed to connect to database: {}",
                    e
                )))
            })?;

        tracing::debug!(max_connections, "Database pool opened");

        Ok(Self { pool })
    }

    /// Create the people table if it does not exist yet
    ///
    /// Idempotent; an existing table is left untouched.
    pub async fn create_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS swapi_people (
                id BIGINT PRIMARY KEY,
                name TEXT,
                birth_year TEXT,
                eye_color TEXT,
                films TEXT,
                gender TEXT,
                hair_color TEXT,
                height DOUBLE PRECISION,
                homeworld TEXT,
                mass DOUBLE PRECISION,
                skin_color TEXT,
                species TEXT,
                starships TEXT,
                vehicles TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::SchemaFailed(format!(
                "Failed to create {} table: {}",
                super::PEOPLE_TABLE,
                e
            )))
        })?;

        tracing::info!(table = super::PEOPLE_TABLE, "Schema ready");
        Ok(())
    }

    /// Close the database connection
    ///
    /// Waits for checked-out connections to be returned; later queries fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Get the underlying connection pool
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }
}
