//! Single-person fetch with scalar coercion and relation resolution.

use crate::error::{Error, ParseError, Result};
use crate::types::{PersonRecord, RawPerson, RelationKind, join_relation_names};

use super::Ingestor;

/// Source value SWAPI uses for an unknown mass
const UNKNOWN: &str = "unknown";

impl Ingestor {
    /// Fetch person `id` and resolve all four relation fields
    ///
    /// The returned record always carries the requested `id`. Failures are
    /// wrapped in [`Error::Entity`] so the caller knows which person broke.
    pub async fn fetch_person(&self, id: i64) -> Result<PersonRecord> {
        self.fetch_person_unwrapped(id)
            .await
            .map_err(|e| Error::Entity {
                id,
                source: Box::new(e),
            })
    }

    async fn fetch_person_unwrapped(&self, id: i64) -> Result<PersonRecord> {
        let url = self.client.person_url(id)?;

        let raw: RawPerson = if self.config.placeholder_on_not_found {
            match self.client.get_json_optional(url.as_str()).await? {
                Some(raw) => raw,
                None => {
                    tracing::warn!(person_id = id, "Person not found, storing placeholder");
                    return Ok(PersonRecord::placeholder(id));
                }
            }
        } else {
            self.client.get_json(url.as_str()).await?
        };

        let mut record = scalar_fields(id, &raw)?;

        for kind in RelationKind::ALL {
            let names = self
                .resolve_relation(raw.relation_urls(kind), kind.display_field())
                .await?;
            *record.relation_mut(kind) = join_relation_names(&names);
        }

        tracing::debug!(person_id = id, name = ?record.name, "Fetched person");
        Ok(record)
    }
}

/// Record with coerced scalars; relation columns start out as "None"
fn scalar_fields(id: i64, raw: &RawPerson) -> Result<PersonRecord> {
    let mut record = PersonRecord::placeholder(id);
    record.name = raw.name.clone();
    record.gender = raw.gender.clone();
    record.hair_color = raw.hair_color.clone();
    record.height = parse_height(raw.height.as_deref());
    record.mass = parse_mass(raw.mass.as_deref())?;
    record.skin_color = raw.skin_color.clone();
    record.birth_year = raw.birth_year.clone();
    record.eye_color = raw.eye_color.clone();
    record.homeworld = raw.homeworld.clone();
    Ok(record)
}

/// Coerce a source height
///
/// Only values made entirely of ASCII digits (after `,` → `.`) are parsed, so
/// `"172"` becomes `172.0` while `"1,72"` and `"unknown"` become `None`. Any
/// fractional height is therefore dropped; stored data depends on this.
pub fn parse_height(raw: Option<&str>) -> Option<f64> {
    let normalized = raw?.replace(',', ".");
    if normalized.is_empty() || !normalized.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    normalized.parse().ok()
}

/// Coerce a source mass
///
/// `None` and `"unknown"` become `None`; anything else has `,` replaced by `.`
/// and must parse as a float (`"80,5"` → `80.5`). A value that does not parse
/// is an error rather than a silent `None`.
pub fn parse_mass(raw: Option<&str>) -> Result<Option<f64>> {
    match raw {
        None | Some(UNKNOWN) => Ok(None),
        Some(value) => value
            .replace(',', ".")
            .parse::<f64>()
            .map(Some)
            .map_err(|_| {
                Error::from(ParseError::InvalidNumber {
                    field: "mass",
                    value: value.to_string(),
                })
            }),
    }
}
