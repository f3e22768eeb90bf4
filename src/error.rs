//! Error types for swapi-ingest
//!
//! Every failure in the ingest pipeline is fatal for the run, so these types exist
//! to describe *what* went wrong, not to drive recovery:
//! - Transport errors (connection failures, non-2xx responses)
//! - Parse errors (invalid JSON, missing fields, malformed numbers)
//! - Persistence errors (connection, schema, constraint violations)
//! - Configuration errors, with the offending key

use thiserror::Error;

/// Result type alias for swapi-ingest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for swapi-ingest
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "PG_PORT")
        key: Option<String>,
    },

    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLx database error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Network error (connection refused, TLS, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status code
    #[error("GET {url} returned HTTP {status}")]
    HttpStatus {
        /// Requested URL
        url: String,
        /// HTTP status code of the response
        status: u16,
    },

    /// Response body did not match the expected shape
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Fetching a single entity failed
    #[error("failed to fetch person {id}: {source}")]
    Entity {
        /// Identifier of the entity being fetched
        id: i64,
        /// The underlying failure
        #[source]
        source: Box<Error>,
    },
}

/// Database-related errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to connect to database
    #[error("failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create the schema
    #[error("failed to create schema: {0}")]
    SchemaFailed(String),

    /// Query failed
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Constraint violation (e.g., duplicate primary key)
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Errors raised while converting API responses into typed records
#[derive(Debug, Error)]
pub enum ParseError {
    /// Body was not valid JSON, or did not match the expected structure
    #[error("invalid JSON from {url}: {source}")]
    InvalidJson {
        /// URL the body was fetched from
        url: String,
        /// Underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// A required field was absent
    #[error("field '{field}' missing in response from {url}")]
    MissingField {
        /// URL the body was fetched from
        url: String,
        /// Name of the missing field
        field: String,
    },

    /// A field was present but had the wrong JSON type
    #[error("field '{field}' in response from {url} is not a {expected}")]
    UnexpectedType {
        /// URL the body was fetched from
        url: String,
        /// Name of the offending field
        field: String,
        /// Expected JSON type
        expected: &'static str,
    },

    /// A numeric attribute could not be parsed
    #[error("field '{field}' has non-numeric value '{value}'")]
    InvalidNumber {
        /// Name of the attribute
        field: &'static str,
        /// Raw source value
        value: String,
    },

    /// The collection endpoint reported a negative entity count
    #[error("collection count is negative: {0}")]
    NegativeCount(i64),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid or missing configuration
    Config,
    /// Connection failures and non-success HTTP responses
    Transport,
    /// Malformed or unexpected response bodies
    Parse,
    /// Storage failures
    Persistence,
}

impl Error {
    /// Build a configuration error for a specific key
    pub fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Classify this error; entity errors report the kind of their cause
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config { .. } => ErrorKind::Config,
            Error::Network(_) | Error::HttpStatus { .. } => ErrorKind::Transport,
            Error::Parse(_) => ErrorKind::Parse,
            Error::Database(_) | Error::Sqlx(_) => ErrorKind::Persistence,
            Error::Entity { source, .. } => source.kind(),
        }
    }

    /// Machine-readable error code, used in the final log line of a failed run
    pub fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Database(DatabaseError::ConstraintViolation(_)) => "constraint_violation",
            Error::Database(_) | Error::Sqlx(_) => "database_error",
            Error::Network(_) => "network_error",
            Error::HttpStatus { status: 404, .. } => "not_found",
            Error::HttpStatus { .. } => "http_status",
            Error::Parse(_) => "parse_error",
            Error::Entity { source, .. } => source.error_code(),
        }
    }

    /// Whether this is a primary-key collision, e.g. from re-running into a filled table
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Error::Database(DatabaseError::ConstraintViolation(_)) => true,
            Error::Sqlx(sqlx::Error::Database(db)) => db.is_unique_violation(),
            Error::Entity { source, .. } => source.is_constraint_violation(),
            _ => false,
        }
    }

    /// HTTP status code, if this error came from a non-success response
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Network(e) => e.status().map(|s| s.as_u16()),
            Error::Entity { source, .. } => source.http_status(),
            _ => None,
        }
    }
}
