use lintab_core::{Column, ColumnType, FieldKind, FilterField, ListShape, Relation, TableDef};

use crate::refs;

static COLUMNS: &[Column] = &[
    Column::new("id", ColumnType::String, "The unique identifier of the state."),
    Column::new("archived_at", ColumnType::Timestamp, "When the state was archived, if it was."),
    Column::new("color", ColumnType::String, "The state's UI color."),
    Column::new("created_at", ColumnType::Timestamp, "When the state was created."),
    Column::new("description", ColumnType::String, "The state's description."),
    Column::new("name", ColumnType::String, "The state's name."),
    Column::new("position", ColumnType::Double, "Position of the state in the team's workflow."),
    Column::new("type", ColumnType::String, "Category: triage, backlog, unstarted, started, completed or canceled."),
    Column::new("updated_at", ColumnType::Timestamp, "When the state was last meaningfully updated."),
    Column::new("team", ColumnType::Json, "The team the state belongs to."),
    Column::new("title", ColumnType::String, "The state's name.").from_path(&["name"]),
];

static FILTERS: &[FilterField] = &[
    FilterField::eq("id", &["id"], FieldKind::Id),
    FilterField::range("created_at", &["createdAt"], FieldKind::Date),
    FilterField::eq("name", &["name"], FieldKind::String),
    FilterField::range("position", &["position"], FieldKind::Number),
    FilterField::eq("type", &["type"], FieldKind::String),
    FilterField::range("updated_at", &["updatedAt"], FieldKind::Date),
];

static RELATIONS: &[Relation] = &[Relation::new("team", &["team"], refs::TEAM)];

pub static WORKFLOW_STATE: TableDef = TableDef {
    name: "linear_workflow_state",
    description: "Workflow states issues move through, per team.",
    type_name: "WorkflowState",
    list: ListShape::Paginated {
        field: "workflowStates",
        filter_type: Some("WorkflowStateFilter"),
    },
    get_field: Some("workflowState"),
    columns: COLUMNS,
    filters: FILTERS,
    relations: RELATIONS,
    nested: None,
};
