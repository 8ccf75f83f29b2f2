//! Drains a parent's nested collection past its embedded first page.
//!
//! Parent nodes arrive with the first page of their nested collection
//! inline. When that page reports more, the remaining pages are fetched by
//! parent id and appended, so the emitted row carries the complete set.

use lintab_core::TableDef;
use lintab_graphql::GraphqlExecutor;
use serde_json::Value;

use crate::error::EngineError;
use crate::remote::{self, PageInfo};

/// Complete the nested collection on `parent` in place.
///
/// Nodes without the collection, or whose first page is already complete,
/// are returned untouched with no remote call.
///
/// # Errors
///
/// Returns [`EngineError::MissingField`] when more pages exist but the
/// parent has no id or a page has no end cursor, or the executor's error.
pub async fn drain(
    executor: &dyn GraphqlExecutor,
    table: &TableDef,
    mut parent: Value,
) -> Result<Value, EngineError> {
    let Some(nested) = table.nested else {
        return Ok(parent);
    };
    let Some(first_page) = parent.get(nested.field) else {
        return Ok(parent);
    };
    let info: PageInfo = first_page
        .get("pageInfo")
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default();
    if !info.has_next_page {
        return Ok(parent);
    }

    let parent_id = parent
        .get("id")
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| EngineError::MissingField {
            operation: format!("drain {}", nested.field),
            path: "id".to_string(),
        })?;

    let mut cursor = info.end_cursor;
    let mut extra = Vec::new();
    let mut pages = 0_u32;
    let last = loop {
        let Some(after) = cursor.as_deref().filter(|c| !c.is_empty()) else {
            return Err(EngineError::MissingField {
                operation: format!("drain {}", nested.field),
                path: "pageInfo.endCursor".to_string(),
            });
        };
        let page =
            remote::fetch_nested_page(executor, table, &parent_id, nested.page_size, Some(after))
                .await?;
        pages += 1;
        extra.extend(page.nodes);
        if !page.page_info.has_next_page {
            break page.page_info;
        }
        cursor = page.page_info.end_cursor;
    };

    tracing::debug!(
        table = table.name,
        parent_id = %parent_id,
        pages,
        appended = extra.len(),
        "drained nested collection"
    );

    if let Some(collection) = parent.get_mut(nested.field).and_then(Value::as_object_mut) {
        match collection.get_mut("nodes").and_then(Value::as_array_mut) {
            Some(nodes) => nodes.extend(extra),
            None => {
                collection.insert("nodes".to_string(), Value::Array(extra));
            }
        }
        collection.insert(
            "pageInfo".to_string(),
            serde_json::to_value(&last).unwrap_or(Value::Null),
        );
    }
    Ok(parent)
}
