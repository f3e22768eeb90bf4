use super::Database;
use crate::types::PersonRecord;
use tempfile::NamedTempFile;


/// Open a SQLite-backed database in a temp file with the schema created.
/// The temp file must be kept alive for the duration of the test.
async fn create_test_db() -> (Database, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let url = format!("sqlite://{}", temp_file.path().display());
    let db = Database::connect(&url, 1).await.unwrap();
    db.create_schema().await.unwrap();
    (db, temp_file)
}

fn sample_person(id: i64) -> PersonRecord {
    PersonRecord {
        id,
        name: Some(format!("Person {}", id)),
        gender: Some("male".to_string()),
        hair_color: Some("blond".to_string()),
        height: Some(172.0),
        mass: Some(77.0),
        skin_color: Some("fair".to_string()),
        birth_year: Some("19BBY".to_string()),
        eye_color: Some("blue".to_string()),
        homeworld: Some("https://swapi.dev/api/planets/1/".to_string()),
        films: "A New Hope, The Empire Strikes Back".to_string(),
        species: "None".to_string(),
        starships: "X-wing".to_string(),
        vehicles: "Snowspeeder, Imperial Speeder Bike".to_string(),
    }
}
