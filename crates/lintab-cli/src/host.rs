//! Host-side policies the engine leaves to its caller.
//!
//! - [`RetryingExecutor`]: waits out rate limiting and retries the same
//!   request a bounded number of times.
//! - [`ignore_not_found`]: a get for a missing entity yields no row.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lintab_engine::EngineError;
use lintab_graphql::{ClientError, GraphqlExecutor, GraphqlRequest};
use serde_json::Value;

/// Bounds for retrying rate-limited requests.
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Retries after the initial attempt.
    pub max_retries: u32,
    /// Wait used when the error carries no `Retry-After`.
    pub default_delay: Duration,
    /// Upper bound on any single wait.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            default_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    fn delay_for(&self, error: &ClientError) -> Duration {
        error
            .retry_after_secs()
            .map_or(self.default_delay, Duration::from_secs)
            .min(self.max_delay)
    }
}

/// Wraps an executor and retries requests rejected by rate limiting.
pub struct RetryingExecutor {
    inner: Arc<dyn GraphqlExecutor>,
    config: RetryConfig,
}

impl std::fmt::Debug for RetryingExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryingExecutor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RetryingExecutor {
    #[must_use]
    pub fn new(inner: Arc<dyn GraphqlExecutor>, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl GraphqlExecutor for RetryingExecutor {
    async fn execute(&self, request: GraphqlRequest) -> Result<Value, ClientError> {
        let mut attempt = 0;
        loop {
            match self.inner.execute(request.clone()).await {
                Err(error) if error.is_rate_limited() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = self.config.delay_for(&error);
                    tracing::warn!(
                        operation = %request.operation_name,
                        attempt,
                        max_retries = self.config.max_retries,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "rate limited, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                other => return other,
            }
        }
    }
}

/// Map a not-found error from a get into "no row".
///
/// # Errors
///
/// Any other error is returned unchanged.
pub fn ignore_not_found<T>(result: Result<Option<T>, EngineError>) -> Result<Option<T>, EngineError> {
    match result {
        Err(error) if error.is_not_found() => {
            tracing::debug!(error = %error, "entity not found");
            Ok(None)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintab_engine::testing::{FakeExecutor, not_found};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(max_retries: u32) -> RetryConfig {
        RetryConfig {
            max_retries,
            default_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
        }
    }

    /// Rate limited for the first `failures` calls, then succeeds.
    fn flaky(failures: u32) -> Arc<FakeExecutor> {
        let calls = AtomicU32::new(0);
        Arc::new(FakeExecutor::new(move |_| {
            if calls.fetch_add(1, Ordering::SeqCst) < failures {
                Err(ClientError::RateLimited { retry_after_secs: 0 })
            } else {
                Ok(json!({ "organization": { "id": "org-1" } }))
            }
        }))
    }

    fn request() -> GraphqlRequest {
        GraphqlRequest::new("OrganizationId", "query OrganizationId { organization { id } }", json!({}))
    }

    #[tokio::test]
    async fn retries_until_success() {
        let fake = flaky(2);
        let executor = RetryingExecutor::new(fake.clone(), fast(3));

        let data = executor.execute(request()).await.unwrap();

        assert_eq!(data["organization"]["id"], "org-1");
        assert_eq!(fake.total(), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let fake = flaky(5);
        let executor = RetryingExecutor::new(fake.clone(), fast(1));

        let err = executor.execute(request()).await.unwrap_err();

        assert!(err.is_rate_limited());
        assert_eq!(fake.total(), 2);
    }

    #[tokio::test]
    async fn other_errors_are_not_retried() {
        let fake = Arc::new(FakeExecutor::new(|_| Err(not_found("Issue"))));
        let executor = RetryingExecutor::new(fake.clone(), fast(3));

        let err = executor.execute(request()).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(fake.total(), 1);
    }

    #[test]
    fn delay_honors_retry_after_and_cap() {
        let config = RetryConfig::default();
        assert_eq!(
            config.delay_for(&ClientError::RateLimited { retry_after_secs: 7 }),
            Duration::from_secs(7)
        );
        assert_eq!(
            config.delay_for(&ClientError::RateLimited { retry_after_secs: 600 }),
            Duration::from_secs(60)
        );
        let coded = ClientError::Graphql {
            messages: vec!["Rate limit exceeded".into()],
            codes: vec!["RATELIMITED".into()],
        };
        assert_eq!(config.delay_for(&coded), Duration::from_secs(1));
    }

    #[test]
    fn not_found_becomes_no_row() {
        let missing: Result<Option<u8>, EngineError> = Err(EngineError::Client(not_found("Team")));
        assert_eq!(ignore_not_found(missing).unwrap(), None);

        let found: Result<Option<u8>, EngineError> = Ok(Some(1));
        assert_eq!(ignore_not_found(found).unwrap(), Some(1));

        let failed: Result<Option<u8>, EngineError> = Err(EngineError::Client(ClientError::Api {
            status: 500,
            message: "boom".into(),
        }));
        assert!(ignore_not_found(failed).is_err());
    }
}
