//! Table definitions and DDL SQL generation
//!
//! Runtime table definitions built from a dataset's columns, plus the
//! CREATE/DROP statements for each [`Dialect`].

use crate::{ColumnType, Dialect, TableIdentifier};

/// A single column of a destination table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub column_type: ColumnType,
    pub nullable: bool,
}

impl ColumnDef {
    /// Create a nullable column
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: true,
        }
    }

    /// Mark the column NOT NULL
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Render the column definition, e.g. `` `id` BIGINT NOT NULL``
    pub fn to_column_sql(&self, dialect: Dialect) -> String {
        let mut sql = format!(
            "{} {}",
            dialect.quote_identifier(&self.name),
            self.column_type.to_sql_type(dialect)
        );
        if !self.nullable {
            sql.push_str(" NOT NULL");
        }
        sql
    }
}

/// A destination table: where it lives and what columns it has
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableDef {
    pub ident: TableIdentifier,
    pub columns: Vec<ColumnDef>,
}

impl TableDef {
    pub fn new(ident: TableIdentifier, columns: Vec<ColumnDef>) -> Self {
        Self { ident, columns }
    }
}

/// SQL generation for a [`TableDef`] in one dialect
#[derive(Clone, Copy, Debug)]
pub struct TableSql<'a> {
    pub table: &'a TableDef,
    pub dialect: Dialect,
}

impl<'a> TableSql<'a> {
    pub fn new(table: &'a TableDef, dialect: Dialect) -> Self {
        Self { table, dialect }
    }

    /// Generate CREATE TABLE SQL
    pub fn create_table_sql(&self) -> String {
        self.create_sql("CREATE TABLE")
    }

    /// Generate CREATE TABLE IF NOT EXISTS SQL
    pub fn create_table_if_not_exists_sql(&self) -> String {
        self.create_sql("CREATE TABLE IF NOT EXISTS")
    }

    /// Generate DROP TABLE IF EXISTS SQL
    pub fn drop_table_sql(&self) -> String {
        format!(
            "DROP TABLE IF EXISTS {}",
            self.dialect.qualified_name(&self.table.ident)
        )
    }

    fn create_sql(&self, prefix: &str) -> String {
        let columns = self
            .table
            .columns
            .iter()
            .map(|c| format!("\t{}", c.to_column_sql(self.dialect)))
            .collect::<Vec<_>>()
            .join(",\n");
        format!(
            "{prefix} {} (\n{columns}\n)",
            self.dialect.qualified_name(&self.table.ident)
        )
    }
}
