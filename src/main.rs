//! Command-line entry point: ingest every SWAPI person into the configured database.

use std::sync::Arc;
use std::time::Instant;

use swapi_ingest::utils::format_elapsed;
use swapi_ingest::{Config, Database, Ingestor, Result};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let start = Instant::now();

    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("swapi_ingest=info")),
        )
        .init();

    let result = run().await;

    if let Err(e) = &result {
        tracing::error!(
            code = e.error_code(),
            kind = ?e.kind(),
            error = %e,
            "Ingest run failed"
        );
    }
    println!("{}", format_elapsed(start.elapsed()));

    result
}

async fn run() -> Result<()> {
    let config = Config::from_env()?;

    let db = Arc::new(Database::new(&config.database).await?);
    let ingestor = Ingestor::new(&config.api, db.clone())?;

    let result = ingestor.run().await;
    db.close().await;

    let summary = result?;
    tracing::info!(
        persisted = summary.persisted,
        started_at = %summary.started_at,
        "Done"
    );
    Ok(())
}
