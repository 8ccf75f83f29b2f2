//! reqwest-backed GraphQL client with bearer-token authentication.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientError;
use crate::http::{check_rate_limit, decode_envelope};
use crate::{GraphqlExecutor, GraphqlRequest};

/// Authenticated client for the remote GraphQL endpoint.
///
/// One instance is built per host connection and shared read-only by every
/// query running on it.
pub struct LinearClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl std::fmt::Debug for LinearClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl LinearClient {
    /// Build a client for `endpoint` that sends `token` as a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("lintab/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GraphqlExecutor for LinearClient {
    async fn execute(&self, request: GraphqlRequest) -> Result<Value, ClientError> {
        tracing::trace!(operation = %request.operation_name, variables = %request.variables, "graphql request");

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await?;
        let resp = check_rate_limit(resp)?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        decode_envelope(status, &body)
    }
}
