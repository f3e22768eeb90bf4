//! Person record persistence.

use crate::error::DatabaseError;
use crate::types::PersonRecord;
use crate::{Error, Result};

use super::Database;

const SELECT_PEOPLE: &str = r#"
    SELECT
        id, name, gender, hair_color, height, mass, skin_color,
        birth_year, eye_color, homeworld, films, species, starships, vehicles
    FROM swapi_people
"#;

impl Database {
    /// Insert a batch of people in one transaction
    ///
    /// Either every record is stored or none is. A primary-key collision (for
    /// example from re-running against a filled table) is reported as
    /// [`DatabaseError::ConstraintViolation`] and rolls the batch back.
    pub async fn bulk_insert_people(&self, people: &[PersonRecord]) -> Result<()> {
        if people.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            Error::Database(DatabaseError::ConnectionFailed(format!(
                "Failed to begin transaction: {}",
                e
            )))
        })?;

        for person in people {
            sqlx::query(
                r#"
                INSERT INTO swapi_people (
                    id, name, gender, hair_color, height, mass, skin_color,
                    birth_year, eye_color, homeworld, films, species, starships, vehicles
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                "#,
            )
            .bind(person.id)
            .bind(&person.name)
            .bind(&person.gender)
            .bind(&person.hair_color)
            .bind(person.height)
            .bind(person.mass)
            .bind(&person.skin_color)
            .bind(&person.birth_year)
            .bind(&person.eye_color)
            .bind(&person.homeworld)
            .bind(&person.films)
            .bind(&person.species)
            .bind(&person.starships)
            .bind(&person.vehicles)
            .execute(&mut *tx)
            .await
            .map_err(|e| insert_error(person.id, e))?;
        }

        // Dropping `tx` on an early return above rolls the batch back
        tx.commit().await.map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to commit batch of {} people: {}",
                people.len(),
                e
            )))
        })?;

        tracing::debug!(count = people.len(), "Inserted people batch");
        Ok(())
    }

    /// Get a person by ID
    pub async fn get_person(&self, id: i64) -> Result<Option<PersonRecord>> {
        let sql = format!("{} WHERE id = $1", SELECT_PEOPLE);
        let row = sqlx::query_as::<_, PersonRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::QueryFailed(format!(
                    "Failed to get person {}: {}",
                    id, e
                )))
            })?;

        Ok(row)
    }

    /// List all stored people, ascending by ID
    pub async fn list_people(&self) -> Result<Vec<PersonRecord>> {
        let sql = format!("{} ORDER BY id", SELECT_PEOPLE);
        let rows = sqlx::query_as::<_, PersonRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::QueryFailed(format!(
                    "Failed to list people: {}",
                    e
                )))
            })?;

        Ok(rows)
    }

    /// Number of stored people
    pub async fn count_people(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM swapi_people")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::QueryFailed(format!(
                    "Failed to count people: {}",
                    e
                )))
            })?;

        Ok(count)
    }
}

fn insert_error(id: i64, e: sqlx::Error) -> Error {
    let unique_violation = matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation());

    if unique_violation {
        Error::Database(DatabaseError::ConstraintViolation(format!(
            "person {} is already stored: {}",
            id, e
        )))
    } else {
        Error::Database(DatabaseError::QueryFailed(format!(
            "Failed to insert person {}: {}",
            id, e
        )))
    }
}
