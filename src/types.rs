//! Core types for swapi-ingest

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Placeholder stored in a relation column when a person has no relations of that kind
pub const NO_RELATIONS: &str = "None";

/// Separator between resolved relation names
pub const RELATION_SEPARATOR: &str = ", ";

/// Body of `GET people/{id}`
///
/// Every field is optional; a JSON `null` is treated the same as an absent field.
/// Unknown fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPerson {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Gender
    #[serde(default)]
    pub gender: Option<String>,
    /// Hair color
    #[serde(default)]
    pub hair_color: Option<String>,
    /// Height in centimeters, as text
    #[serde(default)]
    pub height: Option<String>,
    /// Mass in kilograms, as text (may use a comma decimal separator)
    #[serde(default)]
    pub mass: Option<String>,
    /// Skin color
    #[serde(default)]
    pub skin_color: Option<String>,
    /// Birth year, e.g. "19BBY"
    #[serde(default)]
    pub birth_year: Option<String>,
    /// Eye color
    #[serde(default)]
    pub eye_color: Option<String>,
    /// Homeworld URL (kept unresolved)
    #[serde(default)]
    pub homeworld: Option<String>,
    /// Film URLs
    #[serde(default)]
    pub films: Option<Vec<String>>,
    /// Species URLs
    #[serde(default)]
    pub species: Option<Vec<String>>,
    /// Starship URLs
    #[serde(default)]
    pub starships: Option<Vec<String>>,
    /// Vehicle URLs
    #[serde(default)]
    pub vehicles: Option<Vec<String>>,
}

impl RawPerson {
    /// URL list for a relation kind
    pub fn relation_urls(&self, kind: RelationKind) -> Option<&[String]> {
        match kind {
            RelationKind::Films => self.films.as_deref(),
            RelationKind::Species => self.species.as_deref(),
            RelationKind::Starships => self.starships.as_deref(),
            RelationKind::Vehicles => self.vehicles.as_deref(),
        }
    }
}

/// Body of `GET people/` (only the total is read)
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CollectionPage {
    /// Total number of people in the collection
    pub count: i64,
}

/// Relation fields of a person, resolved to display names before persistence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// Films, resolved by `title`
    Films,
    /// Species, resolved by `name`
    Species,
    /// Starships, resolved by `name`
    Starships,
    /// Vehicles, resolved by `name`
    Vehicles,
}

impl RelationKind {
    /// All relation kinds, in column order
    pub const ALL: [RelationKind; 4] = [
        RelationKind::Films,
        RelationKind::Species,
        RelationKind::Starships,
        RelationKind::Vehicles,
    ];

    /// Field of the sub-resource body holding its display name
    pub fn display_field(self) -> &'static str {
        match self {
            RelationKind::Films => "title",
            RelationKind::Species | RelationKind::Starships | RelationKind::Vehicles => "name",
        }
    }

    /// Field name on the person body and column name in storage
    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::Films => "films",
            RelationKind::Species => "species",
            RelationKind::Starships => "starships",
            RelationKind::Vehicles => "vehicles",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resolved person, ready for persistence
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PersonRecord {
    /// Identifier the person was requested by (primary key)
    pub id: i64,
    /// Display name
    pub name: Option<String>,
    /// Gender
    pub gender: Option<String>,
    /// Hair color
    pub hair_color: Option<String>,
    /// Height; `None` unless the source value was all digits
    pub height: Option<f64>,
    /// Mass; `None` when absent or "unknown"
    pub mass: Option<f64>,
    /// Skin color
    pub skin_color: Option<String>,
    /// Birth year
    pub birth_year: Option<String>,
    /// Eye color
    pub eye_color: Option<String>,
    /// Homeworld URL, unresolved
    pub homeworld: Option<String>,
    /// Film titles joined with ", ", or "None"
    pub films: String,
    /// Species names joined with ", ", or "None"
    pub species: String,
    /// Starship names joined with ", ", or "None"
    pub starships: String,
    /// Vehicle names joined with ", ", or "None"
    pub vehicles: String,
}

impl PersonRecord {
    /// Record for a person the API does not know: scalars null, no relations
    pub fn placeholder(id: i64) -> Self {
        Self {
            id,
            name: None,
            gender: None,
            hair_color: None,
            height: None,
            mass: None,
            skin_color: None,
            birth_year: None,
            eye_color: None,
            homeworld: None,
            films: NO_RELATIONS.to_string(),
            species: NO_RELATIONS.to_string(),
            starships: NO_RELATIONS.to_string(),
            vehicles: NO_RELATIONS.to_string(),
        }
    }

    /// Resolved relation column for a kind
    pub fn relation(&self, kind: RelationKind) -> &str {
        match kind {
            RelationKind::Films => &self.films,
            RelationKind::Species => &self.species,
            RelationKind::Starships => &self.starships,
            RelationKind::Vehicles => &self.vehicles,
        }
    }

    pub(crate) fn relation_mut(&mut self, kind: RelationKind) -> &mut String {
        match kind {
            RelationKind::Films => &mut self.films,
            RelationKind::Species => &mut self.species,
            RelationKind::Starships => &mut self.starships,
            RelationKind::Vehicles => &mut self.vehicles,
        }
    }
}

/// Join resolved display names, or the "None" placeholder when there are none
pub fn join_relation_names(names: &[String]) -> String {
    if names.is_empty() {
        NO_RELATIONS.to_string()
    } else {
        names.join(RELATION_SEPARATOR)
    }
}

/// Inclusive id range processed as one fetch/persist unit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkRange {
    /// Zero-based chunk index
    pub index: usize,
    /// First id (inclusive)
    pub start: i64,
    /// Last id (inclusive)
    pub end: i64,
}

impl ChunkRange {
    /// Ids of this chunk in ascending order
    pub fn ids(&self) -> std::ops::RangeInclusive<i64> {
        self.start..=self.end
    }

    /// Number of ids in this chunk
    pub fn len(&self) -> usize {
        usize::try_from(self.end - self.start + 1).unwrap_or(0)
    }

    /// Whether the chunk holds no ids
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// Outcome of a completed run
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Total reported by the collection endpoint
    pub total_count: i64,
    /// Number of chunks processed
    pub chunks: usize,
    /// Number of records handed to the sink
    pub persisted: usize,
    /// Wall-clock start of the run
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_person_tolerates_nulls_and_unknown_fields() {
        let raw: RawPerson = serde_json::from_str(
            r#"{
                "name": "Luke Skywalker",
                "height": null,
                "films": ["https://swapi.dev/api/films/1/"],
                "species": [],
                "created": "2014-12-09T13:50:51.644000Z",
                "url": "https://swapi.dev/api/people/1/"
            }"#,
        )
        .unwrap();

        assert_eq!(raw.name.as_deref(), Some("Luke Skywalker"));
        assert!(raw.height.is_none());
        assert!(raw.mass.is_none());
        assert_eq!(raw.relation_urls(RelationKind::Films).unwrap().len(), 1);
        assert_eq!(raw.relation_urls(RelationKind::Species).map(|u| u.len()), Some(0));
        assert!(raw.relation_urls(RelationKind::Vehicles).is_none());
    }

    #[test]
    fn test_display_fields() {
        assert_eq!(RelationKind::Films.display_field(), "title");
        assert_eq!(RelationKind::Species.display_field(), "name");
        assert_eq!(RelationKind::Starships.display_field(), "name");
        assert_eq!(RelationKind::Vehicles.display_field(), "name");
    }

    #[test]
    fn test_join_relation_names() {
        assert_eq!(join_relation_names(&[]), "None");
        assert_eq!(
            join_relation_names(&["A New Hope".to_string(), "Return of the Jedi".to_string()]),
            "A New Hope, Return of the Jedi"
        );
    }

    #[test]
    fn test_placeholder_record() {
        let record = PersonRecord::placeholder(17);
        assert_eq!(record.id, 17);
        assert!(record.name.is_none());
        for kind in RelationKind::ALL {
            assert_eq!(record.relation(kind), "None");
        }
    }

    #[test]
    fn test_chunk_range_ids() {
        let chunk = ChunkRange {
            index: 2,
            start: 21,
            end: 25,
        };
        assert_eq!(chunk.ids().collect::<Vec<_>>(), vec![21, 22, 23, 24, 25]);
        assert_eq!(chunk.len(), 5);
        assert!(!chunk.is_empty());
    }
}
