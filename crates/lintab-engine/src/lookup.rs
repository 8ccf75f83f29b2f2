//! Single-entity get by id.

use lintab_core::{ProjectionSet, TableDef};
use lintab_graphql::GraphqlExecutor;
use serde_json::Value;

use crate::error::EngineError;
use crate::inclusion::SuppressFlags;
use crate::{nested, remote};

/// Fetch one entity, completing its nested collection like a listed row.
///
/// An empty `id` yields `Ok(None)` without a remote call.
///
/// # Errors
///
/// Returns [`EngineError::Unsupported`] when the table has no get form, or
/// the remote error unchanged (including not-found).
pub async fn get_by_id(
    executor: &dyn GraphqlExecutor,
    table: &TableDef,
    id: &str,
    projection: &ProjectionSet,
) -> Result<Option<Value>, EngineError> {
    if id.trim().is_empty() {
        tracing::debug!(table = table.name, "empty id, nothing to fetch");
        return Ok(None);
    }
    if !table.supports_get() {
        return Err(EngineError::Unsupported {
            table: table.name,
            operation: "get by id",
        });
    }

    let flags = SuppressFlags::plan(table, projection);
    match remote::fetch_by_id(executor, table, id, &flags).await? {
        Some(node) => nested::drain(executor, table, node).await.map(Some),
        None => Ok(None),
    }
}
