//! Sub-selections for related entities exposed as JSON columns.
//!
//! Relations are summarized rather than expanded: enough to identify and
//! label the related entity without pulling its own relations.

pub const USER: &str = "{ id name displayName email }";
pub const TEAM: &str = "{ id key name }";
pub const ORGANIZATION: &str = "{ id name urlKey }";
pub const ISSUE: &str = "{ id identifier title }";
pub const COMMENT: &str = "{ id body }";
pub const ISSUE_LABEL: &str = "{ id name color }";
pub const WORKFLOW_STATE: &str = "{ id name type color }";
pub const CYCLE: &str = "{ id number name startsAt endsAt }";
pub const PROJECT: &str = "{ id name slugId }";
pub const PROJECT_MILESTONE: &str = "{ id name targetDate }";
pub const TEMPLATE: &str = "{ id name type }";
pub const INTEGRATIONS_SETTINGS: &str = "{ id slackIssueCreated slackIssueNewComment slackIssueStatusChangedAll slackProjectUpdateCreated }";
pub const SUBSCRIPTION: &str = "{ id type seats canceledAt nextBillingAt }";

/// Only the id, for columns that expose a related entity's identifier.
pub const ID_ONLY: &str = "{ id }";
