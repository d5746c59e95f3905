//! Table resolution
//!
//! Puts the destination table in the state the exists-policy asks for before
//! any row is inserted. DDL runs on the connection directly, outside the load
//! transaction, and is not undone if the load later fails.

use std::collections::HashMap;

use deltaload_core::infer::infer_column_type;
use deltaload_core::{Dataset, LoadError, Result};
use deltaload_types::ddl::{ColumnDef, TableDef, TableSql};
use deltaload_types::{ColumnType, Dialect, TableIdentifier};

use crate::connection::Connection;

/// What to do when the destination table already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExistsPolicy {
    /// Refuse to load into an existing table
    #[default]
    Fail,
    /// Drop the existing table and create it from the dataset
    Replace,
    /// Insert into the existing table as-is
    Append,
}

impl ExistsPolicy {
    pub const ALL: &'static [&'static str] = &["fail", "replace", "append"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Replace => "replace",
            Self::Append => "append",
        }
    }

    /// Parse a policy name; anything but `fail`, `replace` or `append` is a
    /// configuration error naming the value.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "fail" => Ok(Self::Fail),
            "replace" => Ok(Self::Replace),
            "append" => Ok(Self::Append),
            other => Err(LoadError::Configuration(format!(
                "'{other}' is not a valid exists policy (expected one of: {})",
                Self::ALL.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for ExistsPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExistsPolicy {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// DDL the resolver performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    /// The table did not exist and was created
    Created,
    /// The table existed and was dropped and recreated
    Replaced,
    /// The table existed and was kept as-is
    Reused,
}

/// Produces CREATE and DROP statements for a table definition
pub trait DdlBuilder {
    fn create_table(&self, table: &TableDef, dialect: Dialect) -> String;

    /// Used by `Append`, where another writer may create the table first
    fn create_table_if_not_exists(&self, table: &TableDef, dialect: Dialect) -> String;

    fn drop_table(&self, table: &TableDef, dialect: Dialect) -> String;
}

/// [`DdlBuilder`] backed by [`TableSql`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDdl;

impl DdlBuilder for DefaultDdl {
    fn create_table(&self, table: &TableDef, dialect: Dialect) -> String {
        TableSql::new(table, dialect).create_table_sql()
    }

    fn create_table_if_not_exists(&self, table: &TableDef, dialect: Dialect) -> String {
        TableSql::new(table, dialect).create_table_if_not_exists_sql()
    }

    fn drop_table(&self, table: &TableDef, dialect: Dialect) -> String {
        TableSql::new(table, dialect).drop_table_sql()
    }
}

/// Derive the destination definition from the dataset.
///
/// Each column's type is inferred from its values unless `overrides` names
/// it. Overrides for columns the dataset does not have are rejected.
pub fn table_definition(
    ident: &TableIdentifier,
    dataset: &Dataset,
    overrides: &HashMap<String, ColumnType>,
) -> Result<TableDef> {
    if let Some(unknown) = overrides
        .keys()
        .find(|name| dataset.column(name).is_none())
    {
        return Err(LoadError::InvalidArgument(format!(
            "type override given for unknown column '{unknown}'"
        )));
    }

    let columns = dataset
        .columns()
        .iter()
        .map(|column| {
            let column_type = overrides
                .get(column.name())
                .copied()
                .unwrap_or_else(|| infer_column_type(column.values()));
            ColumnDef::new(column.name(), column_type)
        })
        .collect();

    Ok(TableDef::new(ident.clone(), columns))
}

/// Bring the destination table into the state `policy` asks for.
///
/// `Append` does not compare the existing definition with the dataset; a
/// type mismatch surfaces later as an execution failure.
pub fn resolve_table<C: Connection + ?Sized>(
    conn: &mut C,
    ddl: &dyn DdlBuilder,
    dialect: Dialect,
    table: &TableDef,
    policy: ExistsPolicy,
) -> Result<TableAction> {
    let exists = conn.table_exists(&table.ident).map_err(LoadError::Ddl)?;

    let action = match (policy, exists) {
        (ExistsPolicy::Fail, true) => {
            return Err(LoadError::TableExists(table.ident.to_string()));
        }
        (ExistsPolicy::Append, true) => return Ok(TableAction::Reused),
        (ExistsPolicy::Append, false) => {
            run_ddl(conn, &ddl.create_table_if_not_exists(table, dialect))?;
            TableAction::Created
        }
        (ExistsPolicy::Replace, true) => {
            run_ddl(conn, &ddl.drop_table(table, dialect))?;
            run_ddl(conn, &ddl.create_table(table, dialect))?;
            TableAction::Replaced
        }
        (ExistsPolicy::Fail | ExistsPolicy::Replace, false) => {
            run_ddl(conn, &ddl.create_table(table, dialect))?;
            TableAction::Created
        }
    };

    #[cfg(feature = "tracing")]
    tracing::info!(table = %table.ident, action = ?action, "deltaload.ddl");

    Ok(action)
}

fn run_ddl<C: Connection + ?Sized>(conn: &mut C, sql: &str) -> Result<()> {
    #[cfg(feature = "tracing")]
    tracing::debug!(sql = %sql, "deltaload.ddl.statement");
    conn.execute(sql).map(|_| ()).map_err(LoadError::Ddl)
}
