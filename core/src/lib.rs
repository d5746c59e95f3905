//! Core building blocks for deltaload
//!
//! - [`Value`], [`Column`] and [`Dataset`]: the column-oriented input of a load
//! - [`LiteralRenderer`]: inline rendering of values as dialect SQL literals
//! - [`infer`]: column type inference from values
//! - [`error`]: the error taxonomy shared by every stage

pub mod dataset;
pub mod error;
pub mod infer;
pub mod literal;
mod trace;
pub mod value;

// Re-export key types and traits
pub use dataset::{Column, Dataset};
pub use error::{DriverError, DriverErrorKind, LoadError, Result};
pub use literal::{LiteralError, LiteralRenderer};
pub use value::Value;

pub use deltaload_types::{ColumnType, Dialect, TableIdentifier};
