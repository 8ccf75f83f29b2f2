use lintab_core::{Column, ColumnType, FieldKind, FilterField, ListShape, Relation, TableDef};

use crate::refs;

static COLUMNS: &[Column] = &[
    Column::new("id", ColumnType::String, "The unique identifier of the issue."),
    Column::new("created_at", ColumnType::Timestamp, "When the issue was created."),
    Column::new("updated_at", ColumnType::Timestamp, "When the issue was last meaningfully updated."),
    Column::new("archived_at", ColumnType::Timestamp, "When the issue was archived, if it was."),
    Column::new("number", ColumnType::Double, "The issue's number, unique within its team."),
    Column::new("description", ColumnType::String, "The issue's description in markdown."),
    Column::new("priority", ColumnType::Double, "0 = none, 1 = urgent, 2 = high, 3 = normal, 4 = low."),
    Column::new("estimate", ColumnType::Double, "Complexity estimate."),
    Column::new("sort_order", ColumnType::Double, "Order relative to other issues in the organization."),
    Column::new("started_at", ColumnType::Timestamp, "When the issue moved into a started state."),
    Column::new("completed_at", ColumnType::Timestamp, "When the issue moved into a completed state."),
    Column::new("canceled_at", ColumnType::Timestamp, "When the issue moved into a canceled state."),
    Column::new("auto_closed_at", ColumnType::Timestamp, "When auto pruning closed the issue."),
    Column::new("auto_archived_at", ColumnType::Timestamp, "When auto pruning archived the issue."),
    Column::new("due_date", ColumnType::Timestamp, "The date the issue is due."),
    Column::new("trashed", ColumnType::Bool, "Whether the issue is in the trash bin."),
    Column::new("snoozed_until_at", ColumnType::Timestamp, "When the issue wakes up in the triage view."),
    Column::new("previous_identifiers", ColumnType::Json, "Identifiers the issue had in other teams."),
    Column::new("sub_issue_sort_order", ColumnType::Double, "Order within the parent's sub-issue list."),
    Column::new("priority_label", ColumnType::String, "Human readable priority."),
    Column::new("identifier", ColumnType::String, "Human readable identifier, e.g. ENG-123."),
    Column::new("url", ColumnType::String, "Issue URL."),
    Column::new("branch_name", ColumnType::String, "Suggested git branch name."),
    Column::new("customer_ticket_count", ColumnType::Int, "Attachments created by customer support integrations."),
    Column::new("team", ColumnType::Json, "The team the issue belongs to."),
    Column::new("cycle", ColumnType::Json, "The cycle the issue is in."),
    Column::new("project", ColumnType::Json, "The project the issue belongs to."),
    Column::new("creator", ColumnType::Json, "The user who created the issue."),
    Column::new("assignee", ColumnType::Json, "The user the issue is assigned to."),
    Column::new("snoozed_by", ColumnType::Json, "The user who snoozed the issue."),
    Column::new("state", ColumnType::Json, "The issue's workflow state."),
    Column::new("parent", ColumnType::Json, "The parent issue."),
    Column::new("project_milestone", ColumnType::Json, "The project milestone the issue belongs to."),
    Column::new("title", ColumnType::String, "The issue's title."),
];

static FILTERS: &[FilterField] = &[
    FilterField::range("created_at", &["createdAt"], FieldKind::Date),
    FilterField::range("updated_at", &["updatedAt"], FieldKind::Date),
    FilterField::range("number", &["number"], FieldKind::Number),
    FilterField::eq("title", &["title"], FieldKind::String),
    FilterField::range("priority", &["priority"], FieldKind::NullableNumber),
    FilterField::range("started_at", &["startedAt"], FieldKind::NullableDate),
    FilterField::range("completed_at", &["completedAt"], FieldKind::NullableDate),
    FilterField::range("canceled_at", &["canceledAt"], FieldKind::NullableDate),
    FilterField::range("auto_closed_at", &["autoClosedAt"], FieldKind::NullableDate),
    FilterField::range("auto_archived_at", &["autoArchivedAt"], FieldKind::NullableDate),
    FilterField::range("due_date", &["dueDate"], FieldKind::NullableTimelessDate),
    FilterField::range("snoozed_until_at", &["snoozedUntilAt"], FieldKind::NullableDate),
];

static RELATIONS: &[Relation] = &[
    Relation::new("team", &["team"], refs::TEAM),
    Relation::new("cycle", &["cycle"], refs::CYCLE),
    Relation::new("project", &["project"], refs::PROJECT),
    Relation::new("creator", &["creator"], refs::USER),
    Relation::new("assignee", &["assignee"], refs::USER),
    Relation::new("snoozedBy", &["snoozed_by"], refs::USER),
    Relation::new("state", &["state"], refs::WORKFLOW_STATE),
    Relation::new("parent", &["parent"], refs::ISSUE),
    Relation::new("projectMilestone", &["project_milestone"], refs::PROJECT_MILESTONE),
];

pub static ISSUE: TableDef = TableDef {
    name: "linear_issue",
    description: "Issues tracked in Linear, across all teams.",
    type_name: "Issue",
    list: ListShape::Paginated {
        field: "issues",
        filter_type: Some("IssueFilter"),
    },
    get_field: Some("issue"),
    columns: COLUMNS,
    filters: FILTERS,
    relations: RELATIONS,
    nested: None,
};
