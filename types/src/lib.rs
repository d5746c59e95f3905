//! Shared type definitions for deltaload
//!
//! This crate holds the pieces of a load that never touch a connection:
//!
//! - [`Dialect`] - destination SQL flavor (Databricks, SQLite, PostgreSQL)
//! - [`TableIdentifier`] - a `catalog.schema.table` triple
//! - [`ColumnType`] - warehouse column types and their per-dialect spelling
//! - [`ddl`] - table definitions and CREATE/DROP generation
//!
//! # Features
//!
//! - `serde` - Enable serde serialization/deserialization

mod column_type;
pub mod ddl;
mod dialect;
mod ident;

pub use column_type::{ColumnType, ColumnTypeParseError};
pub use dialect::{Dialect, DialectParseError};
pub use ident::{IdentifierError, TableIdentifier};

/// Prelude module for commonly used types
pub mod prelude {
    pub use crate::ddl::{ColumnDef, TableDef, TableSql};
    pub use crate::{ColumnType, Dialect, TableIdentifier};
}
