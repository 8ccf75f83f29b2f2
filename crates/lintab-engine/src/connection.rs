//! Lazily built, shared remote connection.
//!
//! A [`ConnectionProvider`] is created per host connection. The first query
//! resolves the token, builds the executor and the metadata cache; every
//! later query reuses the same [`Connection`].

use std::sync::Arc;
use std::time::Duration;

use lintab_config::LinearConfig;
use lintab_graphql::{ClientError, GraphqlExecutor, LinearClient};
use tokio::sync::OnceCell;

use crate::cache::SingleFlightCache;
use crate::error::EngineError;
use crate::remote;

/// Environment variable consulted when no token is configured.
pub const TOKEN_ENV_VAR: &str = "LINEAR_TOKEN";

/// Metadata cache key for the organization id.
pub const ORGANIZATION_ID_KEY: &str = "organization_id";

/// Everything a query needs to talk to the remote API.
pub struct Connection {
    executor: Arc<dyn GraphqlExecutor>,
    page_size: u32,
    metadata: SingleFlightCache,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("page_size", &self.page_size)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

impl Connection {
    #[must_use]
    pub fn new(executor: Arc<dyn GraphqlExecutor>, page_size: u32) -> Self {
        Self {
            executor,
            page_size: page_size.max(1),
            metadata: SingleFlightCache::new(),
        }
    }

    #[must_use]
    pub fn executor(&self) -> Arc<dyn GraphqlExecutor> {
        Arc::clone(&self.executor)
    }

    /// Page size for list requests, already clamped by configuration.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Id of the organization owning the token, fetched at most once.
    ///
    /// # Errors
    ///
    /// Returns the fetch error. Failures are not cached.
    pub async fn organization_id(&self) -> Result<String, EngineError> {
        self.metadata
            .get_or_try_init(ORGANIZATION_ID_KEY, || async {
                let id = remote::fetch_organization_id(self.executor.as_ref()).await?;
                tracing::info!(organization_id = %id, "cached organization id");
                Ok::<_, EngineError>(id)
            })
            .await
            .inspect_err(|e| tracing::error!(error = %e, "organization id lookup failed"))
    }
}

/// Pick the configured token, falling back to the environment.
///
/// # Errors
///
/// Returns [`EngineError::Configuration`] when neither is set.
pub fn resolve_token(configured: &str, from_env: Option<String>) -> Result<String, EngineError> {
    let configured = configured.trim();
    if !configured.is_empty() {
        return Ok(configured.to_string());
    }
    match from_env.map(|t| t.trim().to_string()) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(EngineError::Configuration(format!(
            "'token' must be set in the [linear] configuration section or the {TOKEN_ENV_VAR} environment variable"
        ))),
    }
}

type ExecutorFactory =
    Box<dyn Fn(&LinearConfig, &str) -> Result<Arc<dyn GraphqlExecutor>, ClientError> + Send + Sync>;

/// Builds the [`Connection`] once, on first use.
pub struct ConnectionProvider {
    config: LinearConfig,
    factory: ExecutorFactory,
    connection: OnceCell<Arc<Connection>>,
}

impl std::fmt::Debug for ConnectionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionProvider")
            .field("endpoint", &self.config.endpoint)
            .field("connected", &self.connection.initialized())
            .finish_non_exhaustive()
    }
}

impl ConnectionProvider {
    /// Provider that talks HTTP to `config.endpoint`.
    #[must_use]
    pub fn new(config: LinearConfig) -> Self {
        Self::with_executor_factory(config, |config, token| {
            let client = LinearClient::new(
                config.endpoint.clone(),
                token,
                Duration::from_secs(config.timeout_secs),
            )?;
            Ok(Arc::new(client) as Arc<dyn GraphqlExecutor>)
        })
    }

    /// Provider with a custom executor constructor, called with the
    /// configuration and the resolved token.
    pub fn with_executor_factory<F>(config: LinearConfig, factory: F) -> Self
    where
        F: Fn(&LinearConfig, &str) -> Result<Arc<dyn GraphqlExecutor>, ClientError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            config,
            factory: Box::new(factory),
            connection: OnceCell::new(),
        }
    }

    /// The shared connection, built on first call.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] when no token is available, or
    /// the executor construction error. Nothing is cached on failure.
    pub async fn connect(&self) -> Result<Arc<Connection>, EngineError> {
        self.connection
            .get_or_try_init(|| async {
                let token = resolve_token(&self.config.token, std::env::var(TOKEN_ENV_VAR).ok())?;
                let executor = (self.factory)(&self.config, &token)?;
                let page_size = self.config.effective_page_size();
                tracing::info!(endpoint = %self.config.endpoint, page_size, "connected");
                Ok::<_, EngineError>(Arc::new(Connection::new(executor, page_size)))
            })
            .await
            .cloned()
            .inspect_err(|e| tracing::error!(error = %e, "connection failed"))
    }
}
