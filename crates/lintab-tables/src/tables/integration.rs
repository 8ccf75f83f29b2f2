use lintab_core::{Column, ColumnType, ListShape, Relation, TableDef};

use crate::refs;

static COLUMNS: &[Column] = &[
    Column::new("id", ColumnType::String, "The unique identifier of the integration."),
    Column::new("archived_at", ColumnType::Timestamp, "When the integration was archived, if it was."),
    Column::new("created_at", ColumnType::Timestamp, "When the integration was created."),
    Column::new("service", ColumnType::String, "The integration's type, e.g. slack or github."),
    Column::new("updated_at", ColumnType::Timestamp, "When the integration was last meaningfully updated."),
    Column::new("team", ColumnType::Json, "The team the integration is scoped to."),
    Column::new("creator", ColumnType::Json, "The user who added the integration."),
    Column::new("organization", ColumnType::Json, "The organization the integration belongs to."),
    Column::new("title", ColumnType::String, "The integration's identifier.").from_path(&["id"]),
];

static RELATIONS: &[Relation] = &[
    Relation::new("creator", &["creator"], refs::USER),
    Relation::new("organization", &["organization"], refs::ORGANIZATION),
    Relation::new("team", &["team"], refs::TEAM),
];

pub static INTEGRATION: TableDef = TableDef {
    name: "linear_integration",
    description: "Integrations connected to the workspace.",
    type_name: "Integration",
    list: ListShape::Paginated {
        field: "integrations",
        filter_type: None,
    },
    get_field: None,
    columns: COLUMNS,
    filters: &[],
    relations: RELATIONS,
    nested: None,
};
