//! Decides which optional relations a request fetches.
//!
//! Every relation is selected in the document behind a `@skip` guard. A
//! relation is fetched only when at least one column it serves is in the
//! projection; otherwise its flag is `true` and the remote API never
//! resolves it.

use lintab_core::{ProjectionSet, Relation, TableDef};
use serde_json::{Map, Value};

/// Suppress flags for one request. `true` means the relation is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressFlags {
    flags: Vec<(Relation, bool)>,
}

impl SuppressFlags {
    /// Plan relation fetching for `projection` over `table`.
    #[must_use]
    pub fn plan(table: &TableDef, projection: &ProjectionSet) -> Self {
        let flags = table
            .relations
            .iter()
            .map(|relation| {
                let wanted = relation.columns.iter().any(|c| projection.contains(c));
                (*relation, !wanted)
            })
            .collect::<Vec<_>>();

        tracing::trace!(
            table = table.name,
            fetched = flags.iter().filter(|(_, s)| !s).count(),
            suppressed = flags.iter().filter(|(_, s)| *s).count(),
            "planned relation inclusion"
        );
        Self { flags }
    }

    /// Whether the relation on remote field `field` is skipped.
    ///
    /// Unknown fields report `true`: nothing outside the plan is fetched.
    #[must_use]
    pub fn is_suppressed(&self, field: &str) -> bool {
        self.flags
            .iter()
            .find(|(r, _)| r.field == field)
            .is_none_or(|(_, suppressed)| *suppressed)
    }

    /// The flags as document variables (`skipCreator: true`, ...).
    #[must_use]
    pub fn variables(&self) -> Map<String, Value> {
        self.flags
            .iter()
            .map(|(relation, suppressed)| (relation.skip_variable(), Value::Bool(*suppressed)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintab_core::{Column, ColumnType, ListShape};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    static COLUMNS: &[Column] = &[
        Column::new("id", ColumnType::String, ""),
        Column::new("creator", ColumnType::Json, ""),
        Column::new("creator_id", ColumnType::String, ""),
        Column::new("lead", ColumnType::Json, ""),
    ];

    static RELATIONS: &[Relation] = &[
        Relation {
            field: "creator",
            columns: &["creator", "creator_id"],
            selection: "{ id name }",
        },
        Relation {
            field: "lead",
            columns: &["lead"],
            selection: "{ id name }",
        },
    ];

    static TABLE: TableDef = TableDef {
        name: "project",
        description: "",
        type_name: "Project",
        list: ListShape::Paginated {
            field: "projects",
            filter_type: None,
        },
        get_field: None,
        columns: COLUMNS,
        filters: &[],
        relations: RELATIONS,
        nested: None,
    };

    fn projection(cols: &[&str]) -> ProjectionSet {
        ProjectionSet::for_table(&TABLE, cols.iter().copied()).unwrap()
    }

    #[test]
    fn projected_relation_is_fetched() {
        let flags = SuppressFlags::plan(&TABLE, &projection(&["id", "lead"]));
        assert!(!flags.is_suppressed("lead"));
        assert!(flags.is_suppressed("creator"));
    }

    #[test]
    fn any_served_column_fetches_relation() {
        let flags = SuppressFlags::plan(&TABLE, &projection(&["creator_id"]));
        assert!(!flags.is_suppressed("creator"));
    }

    #[test]
    fn empty_projection_suppresses_everything() {
        let flags = SuppressFlags::plan(&TABLE, &ProjectionSet::default());
        assert_eq!(
            Value::Object(flags.variables()),
            json!({ "skipCreator": true, "skipLead": true })
        );
    }

    #[test]
    fn unknown_field_is_suppressed() {
        let flags = SuppressFlags::plan(&TABLE, &ProjectionSet::all(&TABLE));
        assert!(flags.is_suppressed("nope"));
        assert_eq!(
            Value::Object(flags.variables()),
            json!({ "skipCreator": false, "skipLead": false })
        );
    }
}
