//! # lintab-graphql
//!
//! Transport layer between the engine and the remote GraphQL API.
//!
//! - [`GraphqlExecutor`]: the seam the engine calls through. One request in,
//!   the response's `data` object out.
//! - [`LinearClient`]: the reqwest implementation, bearer-token authenticated.
//! - [`documents`]: list / get / nested-page documents rendered from a
//!   [`lintab_core::TableDef`].

pub mod client;
pub mod documents;

mod error;
mod http;

pub use client::LinearClient;
pub use error::ClientError;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// One GraphQL POST body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub operation_name: String,
    pub query: String,
    pub variables: Value,
}

impl GraphqlRequest {
    #[must_use]
    pub fn new(operation_name: impl Into<String>, query: impl Into<String>, variables: Value) -> Self {
        Self {
            operation_name: operation_name.into(),
            query: query.into(),
            variables,
        }
    }
}

/// Executes GraphQL requests against the remote API.
///
/// Implementations return the response's `data` object, or a
/// [`ClientError`] for transport failures and GraphQL-level errors.
#[async_trait]
pub trait GraphqlExecutor: Send + Sync {
    async fn execute(&self, request: GraphqlRequest) -> Result<Value, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn request_serializes_camel_case() {
        let request = GraphqlRequest::new(
            "ListIssue",
            "query ListIssue { issues { nodes { id } } }",
            serde_json::json!({ "first": 2 }),
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["operationName"], "ListIssue");
        assert_eq!(json["variables"]["first"], 2);
    }
}
