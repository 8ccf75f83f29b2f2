//! # lintab-tables
//!
//! Linear entity kinds exposed as relational tables.
//!
//! - [`tables`]: one [`lintab_core::TableDef`] per entity kind and the
//!   [`tables::TABLES`] registry.
//! - [`projection`]: remote node to output row.
//! - [`TableService`]: `list` / `get` over a shared connection.

pub mod projection;
pub mod refs;
pub mod service;
pub mod tables;

pub use service::TableService;
pub use tables::{TABLES, table};
