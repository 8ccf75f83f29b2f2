//! Engine error types.

use lintab_core::CoreError;
use lintab_graphql::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Missing or invalid connection configuration (e.g. no token).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Transport failure or GraphQL-level error from the remote API.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The request did not fit the table schema.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A response lacked a field the document selected.
    #[error("{operation}: response is missing '{path}'")]
    MissingField { operation: String, path: String },

    /// The table does not support the requested access path.
    #[error("table '{table}' does not support {operation}")]
    Unsupported {
        table: &'static str,
        operation: &'static str,
    },
}

impl EngineError {
    /// Whether the remote API reported the entity as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Client(e) if e.is_not_found())
    }

    /// Whether the remote API rejected the request due to rate limiting.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Client(e) if e.is_rate_limited())
    }
}
