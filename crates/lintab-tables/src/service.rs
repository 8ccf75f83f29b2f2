//! List and get entry points used by the host.

use std::sync::Arc;

use futures_util::stream::{self, BoxStream, StreamExt};
use lintab_core::{ORGANIZATION_ID, ProjectionSet, QueryContext, Row, TableDef};
use lintab_engine::{Connection, EngineError, Paginator, get_by_id};
use serde_json::Value;

use crate::projection::project_row;

/// Runs queries for any table over one shared [`Connection`].
#[derive(Debug, Clone)]
pub struct TableService {
    connection: Arc<Connection>,
}

impl TableService {
    #[must_use]
    pub const fn new(connection: Arc<Connection>) -> Self {
        Self { connection }
    }

    /// Stream the rows of `table` matching `ctx`.
    ///
    /// Pages are fetched lazily as the stream is polled. The stream ends
    /// after the first error.
    pub fn list(
        &self,
        table: &'static TableDef,
        ctx: &QueryContext,
    ) -> BoxStream<'static, Result<Row, EngineError>> {
        let paginator = Paginator::for_query(
            self.connection.executor(),
            table,
            ctx,
            self.connection.page_size(),
        );
        let scan = Scan {
            paginator,
            connection: Arc::clone(&self.connection),
            table,
            projection: ctx.projection.clone(),
        };

        tracing::debug!(
            table = table.name,
            predicates = ctx.predicates.len(),
            limit = ?ctx.limit,
            "list"
        );
        stream::try_unfold(scan, |mut scan| async move {
            let Some(node) = scan.paginator.next_row().await? else {
                return Ok(None);
            };
            let row = shape(&scan.connection, scan.table, &node, &scan.projection).await?;
            Ok::<_, EngineError>(Some((row, scan)))
        })
        .boxed()
    }

    /// Fetch one row of `table` by id.
    ///
    /// An empty id returns `Ok(None)` without contacting the remote API.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Unsupported`] for tables without get-by-id,
    /// or the remote error unchanged.
    pub async fn get(
        &self,
        table: &'static TableDef,
        id: &str,
        projection: &ProjectionSet,
    ) -> Result<Option<Row>, EngineError> {
        let executor = self.connection.executor();
        match get_by_id(executor.as_ref(), table, id, projection).await? {
            Some(node) => shape(&self.connection, table, &node, projection)
                .await
                .map(Some),
            None => Ok(None),
        }
    }
}

struct Scan {
    paginator: Paginator,
    connection: Arc<Connection>,
    table: &'static TableDef,
    projection: ProjectionSet,
}

/// Project `node`, hydrating the organization id only when it was asked for.
async fn shape(
    connection: &Connection,
    table: &TableDef,
    node: &Value,
    projection: &ProjectionSet,
) -> Result<Row, EngineError> {
    let organization_id = if projection.contains(ORGANIZATION_ID.name) {
        Some(connection.organization_id().await?)
    } else {
        None
    };
    Ok(project_row(
        table,
        node,
        projection,
        organization_id.as_deref(),
    ))
}
