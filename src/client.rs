//! HTTP transport for the SWAPI REST API.
//!
//! A thin wrapper around one pooled [`reqwest::Client`]: it issues GET requests,
//! rejects non-success statuses, and parses JSON bodies. Nothing here knows
//! about people or relations.

use crate::error::{Error, ParseError, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

/// Shared HTTP client bound to an API root
///
/// Cloning is cheap: clones share the same connection pool.
#[derive(Clone, Debug)]
pub struct SwapiClient {
    http: Client,
    base_url: Url,
}

impl SwapiClient {
    /// Create a client for the API rooted at `base_url`
    ///
    /// A missing trailing slash is added so relative paths resolve below the root.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("swapi-ingest/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(http, base_url)
    }

    /// Create a client reusing an existing `reqwest::Client`
    pub fn with_client(http: Client, base_url: &str) -> Result<Self> {
        let mut normalized = base_url.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base_url = Url::parse(&normalized).map_err(|e| {
            Error::config(format!("invalid base URL '{}': {}", base_url, e), "base_url")
        })?;

        Ok(Self { http, base_url })
    }

    /// API root this client resolves paths against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the people collection
    pub fn people_url(&self) -> Result<Url> {
        self.endpoint("people/")
    }

    /// URL of a single person
    pub fn person_url(&self, id: i64) -> Result<Url> {
        self.endpoint(&format!("people/{}", id))
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::config(format!("cannot build URL for '{}': {}", path, e), "base_url"))
    }

    /// GET `url` and deserialize the JSON body
    ///
    /// Non-success statuses are [`Error::HttpStatus`]; bodies that do not match `T`
    /// are [`ParseError::InvalidJson`].
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        match self.get_json_optional(url).await? {
            Some(value) => Ok(value),
            None => Err(Error::HttpStatus {
                url: url.to_string(),
                status: StatusCode::NOT_FOUND.as_u16(),
            }),
        }
    }

    /// Like [`get_json`](Self::get_json), but a 404 yields `Ok(None)`
    pub async fn get_json_optional<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        tracing::debug!(url, "GET");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let value = serde_json::from_slice(&body).map_err(|source| ParseError::InvalidJson {
            url: url.to_string(),
            source,
        })?;

        Ok(Some(value))
    }
}
