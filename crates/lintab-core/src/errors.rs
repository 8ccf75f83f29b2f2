//! Cross-cutting error types for lintab.
//!
//! Errors raised while resolving a request against the table schema.
//! Transport and remote API failures live in `lintab-graphql`, engine-level
//! failures in `lintab-engine`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// No table is registered under this name.
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// The table has no column with this name.
    #[error("Unknown column: {table}.{column}")]
    UnknownColumn { table: String, column: String },

    /// A request failed validation (predicate syntax, literal type).
    #[error("Validation error: {0}")]
    Validation(String),
}
