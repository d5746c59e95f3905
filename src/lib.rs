//! # deltaload
//!
//! Chunked, all-or-nothing bulk loading of in-memory tabular data into
//! `catalog.schema.table` warehouse tables.
//!
//! A load resolves the destination table according to an [`ExistsPolicy`],
//! splits the rows into batches that stay under a per-statement value
//! ceiling, compiles each batch into one `INSERT ... VALUES` statement with
//! every value inlined as a literal, and runs all of them inside a single
//! transaction. Either every row lands or none do.
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(feature = "rusqlite")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use deltaload::prelude::*;
//! use deltaload::sqlite::SqliteConnection;
//!
//! let dataset = Dataset::new(vec![
//!     Column::from_values("id", [1, 2, 3]),
//!     Column::from_values("name", ["ada", "grace", "edsger"]),
//! ])?;
//!
//! let mut conn = SqliteConnection::open_in_memory()?;
//! let outcome = Loader::default().load(
//!     &dataset,
//!     &mut conn,
//!     "local.main.people",
//!     &LoadOptions::new(),
//! )?;
//!
//! assert_eq!(outcome.rows(), 3);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "rusqlite"))]
//! # fn main() {}
//! ```
//!
//! ## Destinations
//!
//! | Dialect    | Connection             | Feature Flag |
//! |------------|------------------------|--------------|
//! | Databricks | any [`Connection`]     |              |
//! | PostgreSQL | any [`Connection`]     |              |
//! | SQLite     | [`sqlite::SqliteConnection`] | `rusqlite` |

pub mod compiler;
pub mod config;
pub mod connection;
mod loader;
pub mod materialize;
pub mod outcome;
pub mod planner;
pub mod resolver;
#[cfg(feature = "rusqlite")]
pub mod sqlite;
pub mod transaction;

pub use config::{ConfigError, LoadOptions, LoaderConfig};
pub use connection::Connection;
pub use loader::{Loader, load};
pub use outcome::{LoadOutcome, LoadReport, LoadWarning};
pub use resolver::{ExistsPolicy, TableAction};

pub use deltaload_core::{
    Column, Dataset, DriverError, DriverErrorKind, LiteralError, LiteralRenderer, LoadError,
    Result, Value,
};
pub use deltaload_types::{ColumnType, Dialect, TableIdentifier, ddl};

pub mod prelude {
    pub use crate::config::{LoadOptions, LoaderConfig};
    pub use crate::connection::Connection;
    pub use crate::loader::Loader;
    pub use crate::outcome::{LoadOutcome, LoadWarning};
    pub use crate::resolver::ExistsPolicy;
    pub use deltaload_core::{Column, Dataset, LoadError, Value};
    pub use deltaload_types::{ColumnType, Dialect};
}
