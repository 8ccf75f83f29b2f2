use lintab_core::{Column, ColumnType, FieldKind, FilterField, ListShape, Relation, TableDef};

use crate::refs;

static COLUMNS: &[Column] = &[
    Column::new("id", ColumnType::String, "The unique identifier of the team."),
    Column::new("archived_at", ColumnType::Timestamp, "When the team was archived, if it was."),
    Column::new("auto_archive_period", ColumnType::Int, "Months after which closed issues are archived."),
    Column::new("auto_close_period", ColumnType::Int, "Months after which stale issues are closed."),
    Column::new("auto_close_state_id", ColumnType::String, "Workflow state auto-closed issues move to."),
    Column::new("color", ColumnType::String, "The team's color."),
    Column::new("created_at", ColumnType::Timestamp, "When the team was created."),
    Column::new("cycle_calender_url", ColumnType::String, "Calendar feed URL for the team's cycles."),
    Column::new("cycle_cooldown_time", ColumnType::Int, "Cooldown between cycles, in weeks."),
    Column::new("cycle_duration", ColumnType::Int, "Cycle length, in weeks."),
    Column::new("cycle_issue_auto_assign_completed", ColumnType::Bool, "Whether completed issues join the active cycle."),
    Column::new("cycle_issue_auto_assign_started", ColumnType::Bool, "Whether started issues join the active cycle."),
    Column::new("cycle_lock_to_active", ColumnType::Bool, "Whether active-cycle issues lock to it."),
    Column::new("cycle_start_day", ColumnType::String, "Day of the week a new cycle starts."),
    Column::new("cycles_enabled", ColumnType::Bool, "Whether the team uses cycles."),
    Column::new("default_issue_estimate", ColumnType::Int, "Estimate given to issues without one."),
    Column::new("default_template_for_members_id", ColumnType::String, "Default issue template for members."),
    Column::new("default_template_for_non_members_id", ColumnType::String, "Default issue template for non-members."),
    Column::new("description", ColumnType::String, "The team's description."),
    Column::new("group_issue_history", ColumnType::Bool, "Whether issue history entries are grouped."),
    Column::new("icon", ColumnType::String, "The icon of the team."),
    Column::new("invite_hash", ColumnType::String, "Unique hash for the team's invite link."),
    Column::new("issue_estimation_allow_zero", ColumnType::Bool, "Whether zero is a valid estimate."),
    Column::new("issue_estimation_extended", ColumnType::Bool, "Whether the extended estimate scale is used."),
    Column::new("issue_estimation_type", ColumnType::String, "The estimation scale."),
    Column::new("issue_ordering_no_priority_first", ColumnType::Bool, "Whether unprioritized issues sort first."),
    Column::new("issue_sort_order_default_to_bottom", ColumnType::Bool, "Whether new issues go to the bottom."),
    Column::new("key", ColumnType::String, "The team's unique key, used in issue identifiers."),
    Column::new("name", ColumnType::String, "The team's name."),
    Column::new("private", ColumnType::Bool, "Whether the team is private."),
    Column::new("require_priority_to_leave_triage", ColumnType::Bool, "Whether triage issues need a priority to leave triage."),
    Column::new("slack_issue_comments", ColumnType::Bool, "Whether issue comments are sent to Slack."),
    Column::new("slack_issue_statuses", ColumnType::Bool, "Whether issue status changes are sent to Slack."),
    Column::new("slack_new_issue", ColumnType::Bool, "Whether new issues are sent to Slack."),
    Column::new("timezone", ColumnType::String, "The timezone cycles follow."),
    Column::new("triage_enabled", ColumnType::Bool, "Whether the team uses triage."),
    Column::new("upcoming_cycle_count", ColumnType::Double, "How many upcoming cycles are created."),
    Column::new("updated_at", ColumnType::Timestamp, "When the team was last meaningfully updated."),
    Column::new("active_cycle", ColumnType::Json, "The team's current cycle."),
    Column::new("default_issue_state", ColumnType::Json, "State new issues start in."),
    Column::new("default_template_for_members", ColumnType::Json, "Default issue template for members."),
    Column::new("default_template_for_non_members", ColumnType::Json, "Default issue template for non-members."),
    Column::new("draft_workflow_state", ColumnType::Json, "State issues move to when a draft PR opens."),
    Column::new("integrations_settings", ColumnType::Json, "The team's Slack notification settings."),
    Column::new("marked_as_duplicate_workflow_state", ColumnType::Json, "State issues move to when marked duplicate."),
    Column::new("organization", ColumnType::Json, "The organization the team belongs to."),
    Column::new("review_workflow_state", ColumnType::Json, "State issues move to when a review is requested."),
    Column::new("start_workflow_state", ColumnType::Json, "State issues move to when work starts."),
    Column::new("triage_issue_state", ColumnType::Json, "State new triage issues start in."),
    Column::new("title", ColumnType::String, "The team's name.").from_path(&["name"]),
];

static FILTERS: &[FilterField] = &[
    FilterField::eq("key", &["key"], FieldKind::String),
    FilterField::eq("name", &["name"], FieldKind::String),
    FilterField::range("created_at", &["createdAt"], FieldKind::Date),
    FilterField::range("updated_at", &["updatedAt"], FieldKind::Date),
];

static RELATIONS: &[Relation] = &[
    Relation::new("activeCycle", &["active_cycle"], refs::CYCLE),
    Relation::new("defaultIssueState", &["default_issue_state"], refs::WORKFLOW_STATE),
    Relation::new("defaultTemplateForMembers", &["default_template_for_members"], refs::TEMPLATE),
    Relation::new("defaultTemplateForNonMembers", &["default_template_for_non_members"], refs::TEMPLATE),
    Relation::new("draftWorkflowState", &["draft_workflow_state"], refs::WORKFLOW_STATE),
    Relation::new("integrationsSettings", &["integrations_settings"], refs::INTEGRATIONS_SETTINGS),
    Relation::new("markedAsDuplicateWorkflowState", &["marked_as_duplicate_workflow_state"], refs::WORKFLOW_STATE),
    Relation::new("organization", &["organization"], refs::ORGANIZATION),
    Relation::new("reviewWorkflowState", &["review_workflow_state"], refs::WORKFLOW_STATE),
    Relation::new("startWorkflowState", &["start_workflow_state"], refs::WORKFLOW_STATE),
    Relation::new("triageIssueState", &["triage_issue_state"], refs::WORKFLOW_STATE),
];

pub static TEAM: TableDef = TableDef {
    name: "linear_team",
    description: "Teams: groups of users that own issues and workflow states.",
    type_name: "Team",
    list: ListShape::Paginated {
        field: "teams",
        filter_type: Some("TeamFilter"),
    },
    get_field: Some("team"),
    columns: COLUMNS,
    filters: FILTERS,
    relations: RELATIONS,
    nested: None,
};
