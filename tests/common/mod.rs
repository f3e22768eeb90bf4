//! Common test utilities for swapi-ingest integration tests

use swapi_ingest::{Config, PersonRecord};

/// Load configuration from `.env` and the process environment
///
/// Required for the PostgreSQL tests: `PG_USER`, `PG_PASSWORD`.
/// Optional: `PG_DB`, `PG_HOST`, `PG_PORT`, `SWAPI_BASE_URL`.
#[allow(dead_code)]
pub fn load_config() -> Config {
    dotenvy::dotenv().ok();
    match Config::from_env() {
        Ok(config) => config,
        Err(e) => panic!("invalid test configuration: {}", e),
    }
}

/// Fully populated record with an id far above anything SWAPI hands out
#[allow(dead_code)]
pub fn sample_record(id: i64) -> PersonRecord {
    PersonRecord {
        id,
        name: Some("Wedge Antilles".to_string()),
        gender: Some("male".to_string()),
        hair_color: Some("brown".to_string()),
        height: Some(170.0),
        mass: Some(77.0),
        skin_color: Some("fair".to_string()),
        birth_year: Some("21BBY".to_string()),
        eye_color: Some("hazel".to_string()),
        homeworld: Some("https://swapi.dev/api/planets/22/".to_string()),
        films: "A New Hope, The Empire Strikes Back, Return of the Jedi".to_string(),
        species: "Human".to_string(),
        starships: "X-wing".to_string(),
        vehicles: "Snowspeeder".to_string(),
    }
}
