use lintab_core::{Column, ColumnType, FieldKind, FilterField, ListShape, Relation, TableDef};

use crate::refs;

static COLUMNS: &[Column] = &[
    Column::new("id", ColumnType::String, "The unique identifier of the comment."),
    Column::new("archived_at", ColumnType::Timestamp, "When the comment was archived, if it was."),
    Column::new("body", ColumnType::String, "The comment content in markdown."),
    Column::new("body_data", ColumnType::String, "The comment content as a Prosemirror document."),
    Column::new("created_at", ColumnType::Timestamp, "When the comment was created."),
    Column::new("edited_at", ColumnType::Timestamp, "When the user last edited the comment."),
    Column::new("reaction_data", ColumnType::Json, "Emoji reaction summary."),
    Column::new("updated_at", ColumnType::Timestamp, "When the comment was last meaningfully updated."),
    Column::new("url", ColumnType::String, "Comment URL."),
    Column::new("user", ColumnType::Json, "The user who wrote the comment."),
    Column::new("parent", ColumnType::Json, "The comment this one replies to."),
    Column::new("issue", ColumnType::Json, "The issue the comment is on."),
    Column::new("title", ColumnType::String, "The comment's identifier.").from_path(&["id"]),
];

static FILTERS: &[FilterField] = &[
    FilterField::eq("id", &["id"], FieldKind::Id),
    FilterField::range("created_at", &["createdAt"], FieldKind::Date),
    FilterField::range("updated_at", &["updatedAt"], FieldKind::Date),
    FilterField::eq("body", &["body"], FieldKind::String),
];

static RELATIONS: &[Relation] = &[
    Relation::new("issue", &["issue"], refs::ISSUE),
    Relation::new("parent", &["parent"], refs::COMMENT),
    Relation::new("user", &["user"], refs::USER),
];

pub static COMMENT: TableDef = TableDef {
    name: "linear_comment",
    description: "Comments on issues.",
    type_name: "Comment",
    list: ListShape::Paginated {
        field: "comments",
        filter_type: Some("CommentFilter"),
    },
    get_field: None,
    columns: COLUMNS,
    filters: FILTERS,
    relations: RELATIONS,
    nested: None,
};
