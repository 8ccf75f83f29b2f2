//! Maps remote nodes onto output rows.

use lintab_core::{ColumnSource, ProjectionSet, Row, TableDef, camel_case};
use serde_json::Value;

/// Build the output row for `node`, keeping only projected columns.
///
/// Absent fields (including suppressed relations) become `null`. The
/// `organization_id` column takes `organization_id` when given.
#[must_use]
pub fn project_row(
    table: &TableDef,
    node: &Value,
    projection: &ProjectionSet,
    organization_id: Option<&str>,
) -> Row {
    let mut row = Row::new();
    for column in table.columns() {
        if !projection.contains(column.name) {
            continue;
        }
        let value = match column.source {
            ColumnSource::Field => node.get(camel_case(column.name)).cloned(),
            ColumnSource::Path(path) => lookup(node, path).cloned(),
            ColumnSource::OrganizationId => organization_id.map(|id| Value::String(id.to_string())),
        };
        row.insert(column.name.to_string(), value.unwrap_or(Value::Null));
    }
    row
}

fn lookup<'a>(node: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(node, |value, key| value.get(*key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{ISSUE_LABEL, PROJECT};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn paths_and_camel_case_fields() {
        let node = json!({
            "id": "p1",
            "slugId": "abc",
            "creator": { "id": "u1" },
            "lead": null,
        });
        let projection = ProjectionSet::for_table(&PROJECT, ["id", "slug_id", "creator_id", "lead"]).unwrap();
        let row = project_row(&PROJECT, &node, &projection, None);
        assert_eq!(
            Value::Object(row),
            json!({ "id": "p1", "slug_id": "abc", "creator_id": "u1", "lead": null })
        );
    }

    #[test]
    fn suppressed_relation_path_is_null() {
        let node = json!({ "id": "p1" });
        let projection = ProjectionSet::for_table(&PROJECT, ["creator_id"]).unwrap();
        let row = project_row(&PROJECT, &node, &projection, None);
        assert_eq!(row.get("creator_id"), Some(&Value::Null));
    }

    #[test]
    fn derived_title_and_organization_id() {
        let node = json!({
            "id": "l1",
            "name": "bug",
            "issues": { "nodes": [{ "id": "i1" }, { "id": "i2" }] },
        });
        let projection =
            ProjectionSet::for_table(&ISSUE_LABEL, ["organization_id", "title", "issue_ids"]).unwrap();
        let row = project_row(&ISSUE_LABEL, &node, &projection, Some("org-1"));
        assert_eq!(
            Value::Object(row),
            json!({
                "organization_id": "org-1",
                "title": "bug",
                "issue_ids": [{ "id": "i1" }, { "id": "i2" }],
            })
        );
    }

    #[test]
    fn unprojected_columns_are_left_out() {
        let node = json!({ "id": "l1", "name": "bug", "color": "#fff" });
        let projection = ProjectionSet::for_table(&ISSUE_LABEL, ["color"]).unwrap();
        let row = project_row(&ISSUE_LABEL, &node, &projection, None);
        assert_eq!(row.len(), 1);
        assert_eq!(row["color"], "#fff");
    }
}
