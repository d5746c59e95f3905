//! The load entry point
//!
//! Wires the stages together: identifier and argument checks, table
//! resolution, materialization, planning, then compilation and execution
//! inside one transaction.

use deltaload_core::{Dataset, LiteralRenderer, Result, deltaload_warn};
use deltaload_types::TableIdentifier;

use crate::compiler::StatementCompiler;
use crate::config::{LoadOptions, LoaderConfig};
use crate::connection::Connection;
use crate::materialize::Materialized;
use crate::outcome::{LoadOutcome, LoadReport, LoadWarning};
use crate::planner::{plan_chunks, validate_batch_rows};
use crate::resolver::{DdlBuilder, DefaultDdl, resolve_table, table_definition};
use crate::transaction::execute_plan;

/// A configured loader.
///
/// Holds the destination settings plus the two replaceable collaborators:
/// the DDL builder and the literal renderer. By default DDL comes from
/// [`DefaultDdl`] and literals from the dialect itself.
pub struct Loader {
    config: LoaderConfig,
    ddl: Box<dyn DdlBuilder>,
    renderer: Option<Box<dyn LiteralRenderer>>,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("config", &self.config)
            .field("custom_renderer", &self.renderer.is_some())
            .finish_non_exhaustive()
    }
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            ddl: Box::new(DefaultDdl),
            renderer: None,
        }
    }

    pub fn with_ddl_builder(mut self, ddl: impl DdlBuilder + 'static) -> Self {
        self.ddl = Box::new(ddl);
        self
    }

    pub fn with_renderer(mut self, renderer: impl LiteralRenderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    #[inline]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load `dataset` into the table named `table` (`catalog.schema.table`).
    ///
    /// Returns [`LoadOutcome::NoOpEmpty`] when the dataset has no rows. Any
    /// failure after the first batch starts leaves no rows from this load in
    /// the destination.
    pub fn load<C: Connection + ?Sized>(
        &self,
        dataset: &Dataset,
        conn: &mut C,
        table: &str,
        options: &LoadOptions,
    ) -> Result<LoadOutcome> {
        let ident = TableIdentifier::parse(table)?;
        validate_batch_rows(options.batch_rows)?;

        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "deltaload.load",
            table = %ident,
            policy = %options.exists_policy,
            rows = dataset.row_count(),
            columns = dataset.column_count(),
        )
        .entered();

        // No columns means no table definition to create either.
        if dataset.column_count() == 0 {
            return Ok(empty_outcome());
        }

        let dialect = self.config.dialect.unwrap_or_else(|| conn.dialect());
        let table_def = table_definition(&ident, dataset, &options.column_types)?;

        let rows = Materialized::new(dataset, options.index);
        let plan = if rows.row_count() > 0 {
            Some(plan_chunks(
                rows.row_count(),
                rows.column_count(),
                self.config.value_ceiling,
                options.batch_rows,
            )?)
        } else {
            None
        };

        let action = resolve_table(
            conn,
            self.ddl.as_ref(),
            dialect,
            &table_def,
            options.exists_policy,
        )?;

        let Some(plan) = plan else {
            return Ok(empty_outcome());
        };

        let mut warnings = Vec::new();
        if let Some(warning) = plan.ceiling_warning() {
            deltaload_warn!(warning);
            warnings.push(warning);
        }

        let renderer: &dyn LiteralRenderer = match &self.renderer {
            Some(renderer) => renderer.as_ref(),
            None => &dialect,
        };
        let compiler = StatementCompiler::new(dialect, renderer, &ident, rows.column_names());
        let summary = execute_plan(conn, &rows, &plan, &compiler)?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            rows = summary.rows,
            batches = summary.batches,
            rows_affected = summary.rows_affected,
            "deltaload.load complete"
        );

        Ok(LoadOutcome::Loaded(LoadReport {
            table: ident,
            action,
            rows: summary.rows,
            rows_affected: summary.rows_affected,
            batches: summary.batches,
            batch_rows: plan.batch_rows(),
            warnings,
        }))
    }
}

fn empty_outcome() -> LoadOutcome {
    deltaload_warn!(LoadWarning::EmptyDataset);
    LoadOutcome::NoOpEmpty
}

/// Load with a default [`Loader`] built from `config`.
///
/// ```no_run
/// # #[cfg(feature = "rusqlite")]
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use deltaload::prelude::*;
/// use deltaload::sqlite::SqliteConnection;
///
/// let mut conn = SqliteConnection::open_in_memory()?;
/// let dataset = Dataset::from(Column::from_values("n", 0..1000));
/// let outcome = deltaload::load(
///     &dataset,
///     &mut conn,
///     "local.main.numbers",
///     &LoadOptions::new().exists_policy(ExistsPolicy::Append),
///     &LoaderConfig::default(),
/// )?;
/// assert_eq!(outcome.rows(), 1000);
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "rusqlite"))]
/// # fn main() {}
/// ```
pub fn load<C: Connection + ?Sized>(
    dataset: &Dataset,
    conn: &mut C,
    table: &str,
    options: &LoadOptions,
    config: &LoaderConfig,
) -> Result<LoadOutcome> {
    Loader::new(config.clone()).load(dataset, conn, table, options)
}
