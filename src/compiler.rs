//! Statement compilation
//!
//! Turns one [`Batch`] into one self-contained `INSERT ... VALUES` statement
//! with every value inlined as a literal. Bound parameters are not an option:
//! the destination caps parameters per statement far below bulk volumes.

use deltaload_core::{LiteralRenderer, LoadError, Result};
use deltaload_types::{Dialect, TableIdentifier};

use crate::materialize::Batch;

/// Compiles batches for one destination table
pub struct StatementCompiler<'r> {
    /// `INSERT INTO <table> (<columns>) VALUES `
    prefix: String,
    renderer: &'r dyn LiteralRenderer,
}

impl<'r> StatementCompiler<'r> {
    pub fn new(
        dialect: Dialect,
        renderer: &'r dyn LiteralRenderer,
        table: &TableIdentifier,
        column_names: &[&str],
    ) -> Self {
        let columns = column_names
            .iter()
            .map(|name| dialect.quote_identifier(name))
            .collect::<Vec<_>>()
            .join(", ");
        let prefix = format!(
            "INSERT INTO {} ({columns}) VALUES ",
            dialect.qualified_name(table)
        );
        Self { prefix, renderer }
    }

    /// Render `batch` as a single insert statement.
    ///
    /// Rows appear in batch order and each tuple lists values in column order.
    pub fn compile(&self, batch: &Batch<'_>) -> Result<String> {
        let columns = batch.column_names();
        let mut sql = String::with_capacity(
            self.prefix.len() + batch.row_count() * (columns.len() * 8 + 4),
        );
        sql.push_str(&self.prefix);

        for row in 0..batch.row_count() {
            if row > 0 {
                sql.push_str(", ");
            }
            sql.push('(');
            for (col, value) in batch.row(row).enumerate() {
                if col > 0 {
                    sql.push_str(", ");
                }
                self.renderer
                    .render(value, &mut sql)
                    .map_err(|source| LoadError::Compilation {
                        row: batch.range.start + row,
                        column: columns[col].to_string(),
                        source,
                    })?;
            }
            sql.push(')');
        }

        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materialize::Materialized;
    use deltaload_core::{Column, Dataset, LiteralError, Value};

    fn ident() -> TableIdentifier {
        TableIdentifier::parse("main.sales.orders").unwrap()
    }

    #[test]
    fn test_compile_inlines_literals_in_column_order() {
        let ds = Dataset::new(vec![
            Column::from_values("id", [1, 2, 3]),
            Column::new(
                "note",
                vec![Value::from("it's"), Value::Null, Value::from("ok")],
            ),
        ])
        .unwrap();
        let m = Materialized::new(&ds, false);
        let dialect = Dialect::Databricks;
        let compiler = StatementCompiler::new(dialect, &dialect, &ident(), m.column_names());

        let sql = compiler.compile(&m.batch(0, 1..3)).unwrap();
        assert_eq!(
            sql,
            "INSERT INTO `main`.`sales`.`orders` (`id`, `note`) VALUES (2, NULL), (3, 'ok')"
        );

        let sql = compiler.compile(&m.batch(0, 0..1)).unwrap();
        assert!(sql.ends_with("VALUES (1, 'it\\'s')"));
    }

    #[test]
    fn test_compile_reports_failing_cell() {
        let ds = Dataset::new(vec![
            Column::from_values("a", [1, 2, 3, 4]),
            Column::from_values("b", [0.5, 1.5, f64::NAN, 2.5]),
        ])
        .unwrap();
        let m = Materialized::new(&ds, false);
        let dialect = Dialect::SQLite;
        let compiler = StatementCompiler::new(dialect, &dialect, &ident(), m.column_names());

        let err = compiler.compile(&m.batch(1, 2..4)).unwrap_err();
        match err {
            LoadError::Compilation {
                row,
                column,
                source,
            } => {
                assert_eq!(row, 2);
                assert_eq!(column, "b");
                assert!(matches!(source, LiteralError::NonFiniteDouble { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
