//! In-memory [`GraphqlExecutor`] for exercising the engine without a network.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use lintab_graphql::{ClientError, GraphqlExecutor, GraphqlRequest};
use serde_json::{Value, json};

type Responder = dyn Fn(&GraphqlRequest) -> Result<Value, ClientError> + Send + Sync;

/// Records every request and answers through a closure.
pub struct FakeExecutor {
    responder: Box<Responder>,
    requests: Mutex<Vec<GraphqlRequest>>,
    delay: Option<Duration>,
}

impl FakeExecutor {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&GraphqlRequest) -> Result<Value, ClientError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Sleep before answering, so concurrent callers overlap.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<GraphqlRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests whose operation name is `operation`.
    pub fn count(&self, operation: &str) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.operation_name == operation)
            .count()
    }

    /// Total number of requests received.
    pub fn total(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl GraphqlExecutor for FakeExecutor {
    async fn execute(&self, request: GraphqlRequest) -> Result<Value, ClientError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.responder)(&request)
    }
}

/// Slice `nodes` into a connection page honoring `$first` and `$after`.
///
/// Cursors are decimal offsets into `nodes`; a missing `$first` serves
/// everything remaining.
pub fn page_of(nodes: &[Value], variables: &Value) -> Value {
    let start = variables
        .get("after")
        .and_then(Value::as_str)
        .and_then(|c| c.parse::<usize>().ok())
        .unwrap_or(0)
        .min(nodes.len());
    let first = variables
        .get("first")
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(nodes.len());
    let end = start.saturating_add(first).min(nodes.len());
    json!({
        "nodes": nodes[start..end].to_vec(),
        "pageInfo": {
            "hasNextPage": end < nodes.len(),
            "endCursor": if end > start { Value::String(end.to_string()) } else { Value::Null },
        },
    })
}

/// Responder serving `nodes` as the paginated list field `field`.
pub fn paged(
    field: &'static str,
    nodes: Vec<Value>,
) -> impl Fn(&GraphqlRequest) -> Result<Value, ClientError> + Send + Sync + 'static {
    move |request| {
        let mut data = serde_json::Map::new();
        data.insert(field.to_string(), page_of(&nodes, &request.variables));
        Ok(Value::Object(data))
    }
}

/// A GraphQL-level not-found error as the remote API reports it.
pub fn not_found(entity: &str) -> ClientError {
    ClientError::Graphql {
        messages: vec![format!("Entity not found: {entity}")],
        codes: vec!["INVALID_INPUT".to_string()],
    }
}
