use lintab_core::{Column, ColumnType, ListShape, Relation, TableDef};

use crate::refs;

static COLUMNS: &[Column] = &[
    Column::new("id", ColumnType::String, "The unique identifier of the organization."),
    Column::new("allowed_auth_services", ColumnType::Json, "Authentication services members may sign in with."),
    Column::new("archived_at", ColumnType::Timestamp, "When the organization was archived, if it was."),
    Column::new("created_at", ColumnType::Timestamp, "When the organization was created."),
    Column::new("created_issue_count", ColumnType::Int, "Number of issues created in the organization."),
    Column::new("deletion_requested_at", ColumnType::Timestamp, "When deletion of the organization was requested."),
    Column::new("git_branch_format", ColumnType::String, "Template for suggested git branch names."),
    Column::new("git_linkback_messages_enabled", ColumnType::Bool, "Whether git linkback comments go to private repositories."),
    Column::new("git_public_linkback_messages_enabled", ColumnType::Bool, "Whether git linkback comments go to public repositories."),
    Column::new("logo_url", ColumnType::String, "URL of the organization's logo."),
    Column::new("name", ColumnType::String, "The organization's name."),
    Column::new("period_upload_volume", ColumnType::Double, "Rolling 30-day upload volume in megabytes."),
    Column::new("previous_url_keys", ColumnType::Json, "URL keys the organization used before."),
    Column::new("project_update_reminders_day", ColumnType::String, "Weekday project update reminders go out."),
    Column::new("project_update_reminders_hour", ColumnType::Double, "Hour project update reminders go out."),
    Column::new("project_updates_reminder_frequency", ColumnType::String, "How often project update reminders go out."),
    Column::new("release_channel", ColumnType::String, "Feature release channel."),
    Column::new("roadmap_enabled", ColumnType::Bool, "Whether the roadmap is enabled."),
    Column::new("saml_enabled", ColumnType::Bool, "Whether SAML authentication is enabled."),
    Column::new("scim_enabled", ColumnType::Bool, "Whether SCIM provisioning is enabled."),
    Column::new("trial_ends_at", ColumnType::Timestamp, "When the trial ends."),
    Column::new("updated_at", ColumnType::Timestamp, "When the organization was last meaningfully updated."),
    Column::new("url_key", ColumnType::String, "The organization's unique URL key."),
    Column::new("user_count", ColumnType::Int, "Number of active users."),
    Column::new("subscription", ColumnType::Json, "The organization's paid subscription."),
    Column::new("title", ColumnType::String, "The organization's name.").from_path(&["name"]),
];

static RELATIONS: &[Relation] = &[Relation::new(
    "subscription",
    &["subscription"],
    refs::SUBSCRIPTION,
)];

pub static ORGANIZATION: TableDef = TableDef {
    name: "linear_organization",
    description: "The organization owning the API token.",
    type_name: "Organization",
    list: ListShape::Single {
        field: "organization",
    },
    get_field: None,
    columns: COLUMNS,
    filters: &[],
    relations: RELATIONS,
    nested: None,
};
