//! # lintab-core
//!
//! Foundational types shared across all lintab crates:
//! - Declarative table schema (columns, filterable fields, optional relations,
//!   nested collections) describing one remote entity kind per table
//! - Query request types (predicates, projection, row budget, cancellation)
//! - Cross-cutting error types

pub mod errors;
pub mod query;
pub mod schema;

pub use errors::CoreError;
pub use query::{CancelSignal, Predicate, ProjectionSet, QualValue, QueryContext, Row, RowBudget};
pub use schema::{
    Column, ColumnSource, ColumnType, FieldKind, FilterField, ListShape, NestedCollection,
    ORGANIZATION_ID, Operator, Relation, TableDef, camel_case,
};
