use lintab_core::{Column, ColumnType, FieldKind, FilterField, ListShape, Relation, TableDef};

use crate::refs;

static COLUMNS: &[Column] = &[
    Column::new("id", ColumnType::String, "The unique identifier of the user."),
    Column::new("active", ColumnType::Bool, "Whether the user account is active."),
    Column::new("admin", ColumnType::Bool, "Whether the user is an organization administrator."),
    Column::new("archived_at", ColumnType::Timestamp, "When the user was archived, if they were."),
    Column::new("avatar_url", ColumnType::String, "URL of the user's avatar image."),
    Column::new("created_at", ColumnType::Timestamp, "When the user was created."),
    Column::new("created_issue_count", ColumnType::Int, "Number of issues the user created."),
    Column::new("description", ColumnType::String, "A short description of the user."),
    Column::new("disable_reason", ColumnType::String, "Why the user account is disabled."),
    Column::new("display_name", ColumnType::String, "The user's display (nick) name."),
    Column::new("email", ColumnType::String, "The user's email address."),
    Column::new("guest", ColumnType::Bool, "Whether the user is a guest with limited access."),
    Column::new("invite_hash", ColumnType::String, "Unique hash for the user's invite link."),
    Column::new("is_me", ColumnType::Bool, "Whether the user is the token's owner."),
    Column::new("last_seen", ColumnType::Timestamp, "When the user was last online."),
    Column::new("name", ColumnType::String, "The user's full name."),
    Column::new("status_emoji", ColumnType::String, "The emoji of the user's status."),
    Column::new("status_label", ColumnType::String, "The label of the user's status."),
    Column::new("status_until_at", ColumnType::Timestamp, "When the user's status clears."),
    Column::new("timezone", ColumnType::String, "The user's local timezone."),
    Column::new("updated_at", ColumnType::Timestamp, "When the user was last meaningfully updated."),
    Column::new("url", ColumnType::String, "User profile URL."),
    Column::new("organization", ColumnType::Json, "The organization the user belongs to."),
    Column::new("title", ColumnType::String, "The user's full name.").from_path(&["name"]),
];

static FILTERS: &[FilterField] = &[
    FilterField::eq("id", &["id"], FieldKind::Id),
    FilterField::eq("active", &["active"], FieldKind::Boolean),
    FilterField::eq("admin", &["admin"], FieldKind::Boolean),
    FilterField::eq("display_name", &["displayName"], FieldKind::String),
    FilterField::range("created_at", &["createdAt"], FieldKind::Date),
    FilterField::range("updated_at", &["updatedAt"], FieldKind::Date),
    FilterField::eq("email", &["email"], FieldKind::String),
    FilterField::eq("is_me", &["isMe"], FieldKind::Boolean),
    FilterField::eq("name", &["name"], FieldKind::String),
];

static RELATIONS: &[Relation] = &[Relation::new(
    "organization",
    &["organization"],
    refs::ORGANIZATION,
)];

pub static USER: TableDef = TableDef {
    name: "linear_user",
    description: "Users of the workspace.",
    type_name: "User",
    list: ListShape::Paginated {
        field: "users",
        filter_type: Some("UserFilter"),
    },
    get_field: None,
    columns: COLUMNS,
    filters: FILTERS,
    relations: RELATIONS,
    nested: None,
};
