//! Typed wrappers around the remote documents.
//!
//! Each function renders one document for a table, sends it through the
//! executor and digs the relevant object out of the response `data`.

use lintab_core::{ListShape, TableDef};
use lintab_graphql::{GraphqlExecutor, GraphqlRequest, documents};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::comparator::FilterSet;
use crate::error::EngineError;
use crate::inclusion::SuppressFlags;

/// Cursor state reported alongside every page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// One page of a connection.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub nodes: Vec<Value>,
    #[serde(default)]
    pub page_info: PageInfo,
}

/// Cursor variable value. Empty cursors travel as `null`.
fn cursor_variable(after: Option<&str>) -> Value {
    match after {
        Some(cursor) if !cursor.is_empty() => Value::String(cursor.to_string()),
        _ => Value::Null,
    }
}

/// Skip flags plus the nested first-page size, shared by node-selecting documents.
fn node_variables(table: &TableDef, flags: &SuppressFlags) -> Map<String, Value> {
    let mut vars = flags.variables();
    if let Some(nested) = table.nested {
        vars.insert(
            documents::NESTED_FIRST_VARIABLE.to_string(),
            json!(nested.page_size),
        );
    }
    vars
}

fn take_field(mut data: Value, operation: &str, field: &str) -> Result<Value, EngineError> {
    match data.get_mut(field).map(Value::take) {
        Some(value) => Ok(value),
        None => Err(EngineError::MissingField {
            operation: operation.to_string(),
            path: field.to_string(),
        }),
    }
}

fn parse_page(value: Value, operation: &str, field: &str) -> Result<Page, EngineError> {
    serde_json::from_value(value).map_err(|e| EngineError::MissingField {
        operation: operation.to_string(),
        path: format!("{field}: {e}"),
    })
}

/// Fetch one page of a paginated table.
///
/// # Errors
///
/// Returns [`EngineError::Unsupported`] for single-object tables, or the
/// executor's error.
pub async fn fetch_list_page(
    executor: &dyn GraphqlExecutor,
    table: &TableDef,
    first: u32,
    after: Option<&str>,
    filter: &FilterSet,
    flags: &SuppressFlags,
) -> Result<Page, EngineError> {
    let ListShape::Paginated { field, filter_type } = table.list else {
        return Err(EngineError::Unsupported {
            table: table.name,
            operation: "paginated list",
        });
    };
    let query = documents::list_document(table).ok_or(EngineError::Unsupported {
        table: table.name,
        operation: "paginated list",
    })?;
    let operation = documents::list_operation(table);

    let mut vars = node_variables(table, flags);
    vars.insert("first".to_string(), json!(first));
    vars.insert("after".to_string(), cursor_variable(after));
    if filter_type.is_some() {
        vars.insert("filter".to_string(), filter.to_variable());
    }

    tracing::debug!(table = table.name, first, after = ?after, "fetching page");
    let data = executor
        .execute(GraphqlRequest::new(&operation, query, Value::Object(vars)))
        .await?;
    parse_page(take_field(data, &operation, field)?, &operation, field)
}

/// Fetch the object of a single-object table. `None` when the API returns null.
///
/// # Errors
///
/// Returns [`EngineError::Unsupported`] for paginated tables, or the
/// executor's error.
pub async fn fetch_single(
    executor: &dyn GraphqlExecutor,
    table: &TableDef,
    flags: &SuppressFlags,
) -> Result<Option<Value>, EngineError> {
    let ListShape::Single { field } = table.list else {
        return Err(EngineError::Unsupported {
            table: table.name,
            operation: "single-object fetch",
        });
    };
    let query = documents::single_document(table).ok_or(EngineError::Unsupported {
        table: table.name,
        operation: "single-object fetch",
    })?;
    let operation = documents::list_operation(table);

    tracing::debug!(table = table.name, "fetching single object");
    let data = executor
        .execute(GraphqlRequest::new(
            &operation,
            query,
            Value::Object(node_variables(table, flags)),
        ))
        .await?;
    let node = take_field(data, &operation, field)?;
    Ok((!node.is_null()).then_some(node))
}

/// Fetch one entity by id. `None` when the API returns null for it.
///
/// # Errors
///
/// Returns [`EngineError::Unsupported`] when the table has no get form, or
/// the executor's error.
pub async fn fetch_by_id(
    executor: &dyn GraphqlExecutor,
    table: &TableDef,
    id: &str,
    flags: &SuppressFlags,
) -> Result<Option<Value>, EngineError> {
    let (Some(field), Some(query)) = (table.get_field, documents::get_document(table)) else {
        return Err(EngineError::Unsupported {
            table: table.name,
            operation: "get by id",
        });
    };
    let operation = documents::get_operation(table);

    let mut vars = node_variables(table, flags);
    vars.insert("id".to_string(), json!(id));

    tracing::debug!(table = table.name, id, "fetching by id");
    let data = executor
        .execute(GraphqlRequest::new(&operation, query, Value::Object(vars)))
        .await?;
    let node = take_field(data, &operation, field)?;
    Ok((!node.is_null()).then_some(node))
}

/// Fetch a secondary page of a parent's nested collection.
///
/// # Errors
///
/// Returns [`EngineError::Unsupported`] when the table has no nested
/// collection, or the executor's error.
pub async fn fetch_nested_page(
    executor: &dyn GraphqlExecutor,
    table: &TableDef,
    parent_id: &str,
    first: u32,
    after: Option<&str>,
) -> Result<Page, EngineError> {
    let (Some(nested), Some(parent), Some(query)) = (
        table.nested,
        table.get_field,
        documents::nested_page_document(table),
    ) else {
        return Err(EngineError::Unsupported {
            table: table.name,
            operation: "nested collection paging",
        });
    };
    let operation = documents::nested_operation(table);
    let vars = json!({
        "id": parent_id,
        "first": first,
        "after": cursor_variable(after),
    });

    tracing::debug!(table = table.name, parent_id, first, after = ?after, "fetching nested page");
    let data = executor
        .execute(GraphqlRequest::new(&operation, query, vars))
        .await?;
    let parent_node = take_field(data, &operation, parent)?;
    let path = format!("{parent}.{}", nested.field);
    let page = take_field(parent_node, &operation, nested.field).map_err(|_| {
        EngineError::MissingField {
            operation: operation.clone(),
            path: path.clone(),
        }
    })?;
    parse_page(page, &operation, &path)
}

/// Fetch the id of the organization owning the token.
///
/// # Errors
///
/// Returns the executor's error, or [`EngineError::MissingField`] when the
/// response carries no string id.
pub async fn fetch_organization_id(executor: &dyn GraphqlExecutor) -> Result<String, EngineError> {
    const OPERATION: &str = "OrganizationId";
    let data = executor
        .execute(GraphqlRequest::new(
            OPERATION,
            documents::ORGANIZATION_ID_DOCUMENT,
            json!({}),
        ))
        .await?;
    data.pointer("/organization/id")
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| EngineError::MissingField {
            operation: OPERATION.to_string(),
            path: "organization.id".to_string(),
        })
}
