use lintab_core::{Column, ColumnType, FieldKind, FilterField, ListShape, Relation, TableDef};

use crate::refs;

static COLUMNS: &[Column] = &[
    Column::new("id", ColumnType::String, "The unique identifier of the project."),
    Column::new("archived_at", ColumnType::Timestamp, "When the project was archived, if it was."),
    Column::new("auto_archived_at", ColumnType::Timestamp, "When auto pruning archived the project."),
    Column::new("canceled_at", ColumnType::Timestamp, "When the project was canceled."),
    Column::new("color", ColumnType::String, "The project's color."),
    Column::new("completed_at", ColumnType::Timestamp, "When the project was completed."),
    Column::new("completed_issue_count_history", ColumnType::Json, "Weekly completed issue counts."),
    Column::new("completed_scope_history", ColumnType::Json, "Weekly completed estimation points."),
    Column::new("created_at", ColumnType::Timestamp, "When the project was created."),
    Column::new("description", ColumnType::String, "The project's description."),
    Column::new("icon", ColumnType::String, "The icon of the project."),
    Column::new("in_progress_scope_history", ColumnType::Json, "Weekly in-progress estimation points."),
    Column::new("issue_count_history", ColumnType::Json, "Weekly issue counts."),
    Column::new("name", ColumnType::String, "The project's name."),
    Column::new("progress", ColumnType::Double, "Completion ratio between 0 and 1."),
    Column::new("project_update_reminders_paused_until_at", ColumnType::Timestamp, "Update reminders are paused until this time."),
    Column::new("scope", ColumnType::Double, "Total estimation points."),
    Column::new("scope_history", ColumnType::Json, "Weekly total estimation points."),
    Column::new("slack_issue_comments", ColumnType::Bool, "Whether issue comments are sent to Slack."),
    Column::new("slack_issue_statuses", ColumnType::Bool, "Whether issue status changes are sent to Slack."),
    Column::new("slack_new_issue", ColumnType::Bool, "Whether new issues are sent to Slack."),
    Column::new("slug_id", ColumnType::String, "The project's unique URL slug."),
    Column::new("sort_order", ColumnType::Double, "Order in the project overview."),
    Column::new("start_date", ColumnType::Timestamp, "The planned start date."),
    Column::new("started_at", ColumnType::Timestamp, "When the project moved into a started state."),
    Column::new("state", ColumnType::String, "The project's state."),
    Column::new("target_date", ColumnType::Timestamp, "The planned completion date."),
    Column::new("updated_at", ColumnType::Timestamp, "When the project was last meaningfully updated."),
    Column::new("url", ColumnType::String, "Project URL."),
    Column::new("converted_from_issue", ColumnType::Json, "The issue the project was converted from."),
    Column::new("lead", ColumnType::Json, "The project lead."),
    Column::new("creator_id", ColumnType::String, "Id of the user who created the project.")
        .from_path(&["creator", "id"]),
];

static FILTERS: &[FilterField] = &[FilterField::eq(
    "creator_id",
    &["creator", "id"],
    FieldKind::Id,
)];

static RELATIONS: &[Relation] = &[
    Relation::new("convertedFromIssue", &["converted_from_issue"], refs::ISSUE),
    Relation::new("lead", &["lead"], refs::USER),
    Relation::new("creator", &["creator_id"], refs::ID_ONLY),
];

pub static PROJECT: TableDef = TableDef {
    name: "linear_project",
    description: "Projects: sets of issues working toward a shared goal.",
    type_name: "Project",
    list: ListShape::Paginated {
        field: "projects",
        filter_type: Some("ProjectFilter"),
    },
    get_field: None,
    columns: COLUMNS,
    filters: FILTERS,
    relations: RELATIONS,
    nested: None,
};
