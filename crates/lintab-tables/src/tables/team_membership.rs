use lintab_core::{Column, ColumnType, ListShape, Relation, TableDef};

use crate::refs;

static COLUMNS: &[Column] = &[
    Column::new("id", ColumnType::String, "The unique identifier of the membership."),
    Column::new("archived_at", ColumnType::Timestamp, "When the membership was archived, if it was."),
    Column::new("created_at", ColumnType::Timestamp, "When the membership was created."),
    Column::new("owner", ColumnType::Bool, "Whether the user owns the team."),
    Column::new("sort_order", ColumnType::Double, "Order of the team in the user's sidebar."),
    Column::new("updated_at", ColumnType::Timestamp, "When the membership was last meaningfully updated."),
    Column::new("team", ColumnType::Json, "The team."),
    Column::new("user", ColumnType::Json, "The member."),
    Column::new("title", ColumnType::String, "The membership's identifier.").from_path(&["id"]),
];

static RELATIONS: &[Relation] = &[
    Relation::new("team", &["team"], refs::TEAM),
    Relation::new("user", &["user"], refs::USER),
];

pub static TEAM_MEMBERSHIP: TableDef = TableDef {
    name: "linear_team_membership",
    description: "Which users belong to which teams.",
    type_name: "TeamMembership",
    list: ListShape::Paginated {
        field: "teamMemberships",
        filter_type: None,
    },
    get_field: None,
    columns: COLUMNS,
    filters: &[],
    relations: RELATIONS,
    nested: None,
};
