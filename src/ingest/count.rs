//! Collection size probe.

use crate::error::{ParseError, Result};
use crate::types::CollectionPage;

use super::Ingestor;

impl Ingestor {
    /// Total number of people reported by the collection endpoint
    ///
    /// One request, no caching.
    pub async fn total_count(&self) -> Result<i64> {
        let url = self.client.people_url()?;
        let page: CollectionPage = self.client.get_json(url.as_str()).await?;

        if page.count < 0 {
            return Err(ParseError::NegativeCount(page.count).into());
        }

        tracing::info!(count = page.count, "Probed people count");
        Ok(page.count)
    }
}
