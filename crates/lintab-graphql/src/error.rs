//! Remote API error types.

use thiserror::Error;

/// Errors that can occur when talking to the remote GraphQL API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status without a GraphQL error body.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The API answered with GraphQL-level errors.
    #[error("GraphQL error: {}", messages.join("; "))]
    Graphql {
        /// `errors[].message` in response order.
        messages: Vec<String>,
        /// `errors[].extensions.code`, where present.
        codes: Vec<String>,
    },

    /// Failed to parse a response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ClientError {
    /// Whether the error means the requested entity does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api { status, .. } => *status == 404,
            Self::Graphql { messages, codes } => {
                codes.iter().any(|c| c.eq_ignore_ascii_case("NOT_FOUND"))
                    || messages.iter().any(|m| {
                        let lower = m.to_ascii_lowercase();
                        lower.contains("not found") || lower.contains("404")
                    })
            }
            _ => false,
        }
    }

    /// Whether the request was rejected by rate limiting.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::Graphql { codes, .. } => codes.iter().any(|c| c.eq_ignore_ascii_case("RATELIMITED")),
            _ => false,
        }
    }

    /// Suggested wait before retrying a rate-limited request.
    #[must_use]
    pub const fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        }
    }
}
