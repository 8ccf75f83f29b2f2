use lintab_core::{Column, ColumnType, FieldKind, FilterField, ListShape, Relation, TableDef};

use crate::refs;

static COLUMNS: &[Column] = &[
    Column::new("id", ColumnType::String, "The unique identifier of the attachment."),
    Column::new("archived_at", ColumnType::Timestamp, "When the attachment was archived, if it was."),
    Column::new("created_at", ColumnType::Timestamp, "When the attachment was created."),
    Column::new("group_by_source", ColumnType::Bool, "Whether attachments from the same source are grouped."),
    Column::new("metadata", ColumnType::Json, "Integration specific metadata."),
    Column::new("source", ColumnType::Json, "Information about the source that created the attachment."),
    Column::new("source_type", ColumnType::String, "Type of the source, e.g. github or zendesk."),
    Column::new("subtitle", ColumnType::String, "Content for the subtitle line."),
    Column::new("updated_at", ColumnType::Timestamp, "When the attachment was last meaningfully updated."),
    Column::new("url", ColumnType::String, "Location of the attachment, also its identifier."),
    Column::new("creator", ColumnType::Json, "The user who created the attachment."),
    Column::new("issue", ColumnType::Json, "The issue the attachment belongs to."),
    Column::new("title", ColumnType::String, "Content for the title line."),
];

static FILTERS: &[FilterField] = &[
    FilterField::eq("id", &["id"], FieldKind::Id),
    FilterField::range("created_at", &["createdAt"], FieldKind::Date),
    FilterField::range("updated_at", &["updatedAt"], FieldKind::Date),
    FilterField::eq("title", &["title"], FieldKind::String),
    FilterField::eq("subtitle", &["subtitle"], FieldKind::NullableString),
    FilterField::eq("source_type", &["sourceType"], FieldKind::SourceType),
    FilterField::eq("url", &["url"], FieldKind::String),
];

static RELATIONS: &[Relation] = &[
    Relation::new("creator", &["creator"], refs::USER),
    Relation::new("issue", &["issue"], refs::ISSUE),
];

pub static ATTACHMENT: TableDef = TableDef {
    name: "linear_attachment",
    description: "Issue attachments: links to external resources such as pull requests or tickets.",
    type_name: "Attachment",
    list: ListShape::Paginated {
        field: "attachments",
        filter_type: Some("AttachmentFilter"),
    },
    get_field: None,
    columns: COLUMNS,
    filters: FILTERS,
    relations: RELATIONS,
    nested: None,
};
