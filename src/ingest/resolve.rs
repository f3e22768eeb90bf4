//! Relation resolution: sub-resource URLs to display names.

use serde_json::Value;

use crate::error::{ParseError, Result};

use super::Ingestor;

impl Ingestor {
    /// Fetch every URL in order and collect the string at `field_name`
    ///
    /// `None` resolves to an empty list without any request. URLs are fetched
    /// one after another, so the output order always matches the input order.
    /// The first failing fetch or missing field aborts the whole resolution.
    pub async fn resolve_relation(
        &self,
        urls: Option<&[String]>,
        field_name: &str,
    ) -> Result<Vec<String>> {
        let Some(urls) = urls else {
            return Ok(Vec::new());
        };

        let mut values = Vec::with_capacity(urls.len());
        for url in urls {
            let body: Value = self.client.get_json(url).await?;
            values.push(extract_string_field(&body, field_name, url)?);
        }

        tracing::debug!(field = field_name, resolved = values.len(), "Resolved relation");
        Ok(values)
    }
}

fn extract_string_field(body: &Value, field: &str, url: &str) -> Result<String> {
    match body.get(field) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(ParseError::UnexpectedType {
            url: url.to_string(),
            field: field.to_string(),
            expected: "string",
        }
        .into()),
        None => Err(ParseError::MissingField {
            url: url.to_string(),
            field: field.to_string(),
        }
        .into()),
    }
}
