//! One declaration per remote entity kind, plus the registry.

mod attachment;
mod comment;
mod integration;
mod issue;
mod issue_label;
mod organization;
mod project;
mod team;
mod team_membership;
mod user;
mod workflow_state;

pub use attachment::ATTACHMENT;
pub use comment::COMMENT;
pub use integration::INTEGRATION;
pub use issue::ISSUE;
pub use issue_label::ISSUE_LABEL;
pub use organization::ORGANIZATION;
pub use project::PROJECT;
pub use team::TEAM;
pub use team_membership::TEAM_MEMBERSHIP;
pub use user::USER;
pub use workflow_state::WORKFLOW_STATE;

use lintab_core::{CoreError, TableDef};

/// Every table, sorted by name.
pub static TABLES: &[&TableDef] = &[
    &ATTACHMENT,
    &COMMENT,
    &INTEGRATION,
    &ISSUE,
    &ISSUE_LABEL,
    &ORGANIZATION,
    &PROJECT,
    &TEAM,
    &TEAM_MEMBERSHIP,
    &USER,
    &WORKFLOW_STATE,
];

const TABLE_PREFIX: &str = "linear_";

/// Look a table up by name. The `linear_` prefix is optional.
///
/// # Errors
///
/// Returns [`CoreError::UnknownTable`] when no table matches.
pub fn table(name: &str) -> Result<&'static TableDef, CoreError> {
    let name = name.trim();
    TABLES
        .iter()
        .copied()
        .find(|t| t.name == name || t.name.strip_prefix(TABLE_PREFIX) == Some(name))
        .ok_or_else(|| CoreError::UnknownTable(name.to_string()))
}
