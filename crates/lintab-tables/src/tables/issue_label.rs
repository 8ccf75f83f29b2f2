use lintab_core::{
    Column, ColumnType, FieldKind, FilterField, ListShape, NestedCollection, Relation, TableDef,
};

use crate::refs;

/// Ids per secondary page when draining a label's issues.
const ISSUE_PAGE_SIZE: u32 = 50;

static COLUMNS: &[Column] = &[
    Column::new("id", ColumnType::String, "The unique identifier of the label."),
    Column::new("archived_at", ColumnType::Timestamp, "When the label was archived, if it was."),
    Column::new("color", ColumnType::String, "The label's color as a HEX string."),
    Column::new("created_at", ColumnType::Timestamp, "When the label was created."),
    Column::new("description", ColumnType::String, "The label's description."),
    Column::new("name", ColumnType::String, "The label's name."),
    Column::new("updated_at", ColumnType::Timestamp, "When the label was last meaningfully updated."),
    Column::new("team", ColumnType::Json, "The team the label belongs to, if it is team scoped."),
    Column::new("issue_ids", ColumnType::Json, "Ids of every issue carrying the label.")
        .from_path(&["issues", "nodes"]),
    Column::new("creator", ColumnType::Json, "The user who created the label."),
    Column::new("organization", ColumnType::Json, "The organization the label belongs to."),
    Column::new("parent", ColumnType::Json, "The parent label."),
    Column::new("title", ColumnType::String, "The label's name.").from_path(&["name"]),
];

static FILTERS: &[FilterField] = &[FilterField::eq("name", &["name"], FieldKind::String)];

static RELATIONS: &[Relation] = &[
    Relation::new("creator", &["creator"], refs::USER),
    Relation::new("organization", &["organization"], refs::ORGANIZATION),
    Relation::new("parent", &["parent"], refs::ISSUE_LABEL),
    Relation::new("team", &["team"], refs::TEAM),
];

pub static ISSUE_LABEL: TableDef = TableDef {
    name: "linear_issue_label",
    description: "Labels that can be attached to issues.",
    type_name: "IssueLabel",
    list: ListShape::Paginated {
        field: "issueLabels",
        filter_type: Some("IssueLabelFilter"),
    },
    get_field: Some("issueLabel"),
    columns: COLUMNS,
    filters: FILTERS,
    relations: RELATIONS,
    nested: Some(NestedCollection {
        field: "issues",
        column: "issue_ids",
        page_size: ISSUE_PAGE_SIZE,
    }),
};
