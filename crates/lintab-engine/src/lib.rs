//! # lintab-engine
//!
//! The table-agnostic query engine. Given a [`lintab_core::TableDef`] and a
//! host [`lintab_core::QueryContext`] it:
//!
//! - translates predicates into the remote `filter` argument ([`comparator`]),
//! - decides which optional relations to fetch ([`inclusion`]),
//! - walks cursor pages lazily under a row budget ([`paginator`]),
//! - completes nested collections past their first page ([`nested`]),
//! - fetches single entities by id ([`lookup`]).
//!
//! [`connection::ConnectionProvider`] builds the shared executor and the
//! per-connection metadata cache once per host connection.

pub mod cache;
pub mod comparator;
pub mod connection;
pub mod inclusion;
pub mod lookup;
pub mod nested;
pub mod paginator;
pub mod remote;

mod error;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use cache::SingleFlightCache;
pub use comparator::{ComparatorObject, FilterSet, residual};
pub use connection::{Connection, ConnectionProvider, ORGANIZATION_ID_KEY, TOKEN_ENV_VAR};
pub use error::EngineError;
pub use inclusion::SuppressFlags;
pub use lookup::get_by_id;
pub use paginator::Paginator;
pub use remote::{Page, PageInfo};
