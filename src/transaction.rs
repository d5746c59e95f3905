//! Transactional execution
//!
//! Every batch of a load runs inside one transaction. The load commits only
//! after the last batch succeeds; the first failure rolls everything back.

use std::ops::Range;

use deltaload_core::{
    DriverError, LoadError, Result, deltaload_trace_statement, deltaload_trace_tx,
};

use crate::compiler::StatementCompiler;
use crate::connection::Connection;
use crate::materialize::Materialized;
use crate::planner::ChunkPlan;

/// Lifecycle of a [`LoadTransaction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Idle,
    Open,
    Committed,
    RolledBack,
}

/// The single unit of work wrapping every insert of one load.
///
/// Dropping an open transaction rolls it back, so an early return or a
/// panic between batches never leaves rows behind.
pub struct LoadTransaction<'c, C: Connection + ?Sized> {
    conn: &'c mut C,
    state: TransactionState,
}

impl<'c, C: Connection + ?Sized> LoadTransaction<'c, C> {
    /// Wrap a connection without starting anything yet.
    pub fn new(conn: &'c mut C) -> Self {
        Self {
            conn,
            state: TransactionState::Idle,
        }
    }

    #[inline]
    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// `Idle -> Open`
    pub fn begin(&mut self) -> Result<()> {
        if self.state != TransactionState::Idle {
            return Err(LoadError::Transaction(
                DriverError::transaction(format!(
                    "cannot begin a transaction in state {:?}",
                    self.state
                )),
            ));
        }
        self.conn.begin().map_err(LoadError::Transaction)?;
        deltaload_trace_tx!("begin", self.conn.driver_name());
        self.state = TransactionState::Open;
        Ok(())
    }

    /// Execute one batch statement. On failure the transaction is rolled
    /// back and the error carries the batch's row range.
    pub fn execute(&mut self, range: Range<usize>, sql: &str) -> Result<u64> {
        debug_assert_eq!(self.state, TransactionState::Open);
        match self.conn.execute(sql) {
            Ok(affected) => Ok(affected),
            Err(source) => {
                self.rollback();
                Err(LoadError::Execution { range, source })
            }
        }
    }

    /// `Open -> Committed`
    pub fn commit(mut self) -> Result<()> {
        if self.state != TransactionState::Open {
            return Err(LoadError::Transaction(
                DriverError::transaction(format!(
                    "cannot commit a transaction in state {:?}",
                    self.state
                )),
            ));
        }
        match self.conn.commit() {
            Ok(()) => {
                deltaload_trace_tx!("commit", self.conn.driver_name());
                self.state = TransactionState::Committed;
                Ok(())
            }
            Err(source) => {
                self.rollback();
                Err(LoadError::Transaction(source))
            }
        }
    }

    /// `Open -> RolledBack`. A failing rollback is logged; the error that
    /// triggered it is the one callers see.
    pub fn rollback(&mut self) {
        if self.state != TransactionState::Open {
            return;
        }
        self.state = TransactionState::RolledBack;
        match self.conn.rollback() {
            Ok(()) => {
                deltaload_trace_tx!("rollback", self.conn.driver_name());
            }
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::error!(error = %_err, "deltaload.transaction rollback failed");
            }
        }
    }
}

impl<C: Connection + ?Sized> Drop for LoadTransaction<'_, C> {
    fn drop(&mut self) {
        self.rollback();
    }
}

/// Totals of an executed plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutionSummary {
    pub batches: usize,
    pub rows: usize,
    pub rows_affected: u64,
}

/// Compile and run every batch of `plan` in order inside one transaction.
pub fn execute_plan<C: Connection + ?Sized>(
    conn: &mut C,
    rows: &Materialized<'_>,
    plan: &ChunkPlan,
    compiler: &StatementCompiler<'_>,
) -> Result<ExecutionSummary> {
    let mut tx = LoadTransaction::new(conn);
    tx.begin()?;

    let mut summary = ExecutionSummary::default();
    for (index, range) in plan.iter().enumerate() {
        let batch = rows.batch(index, range.clone());
        let sql = match compiler.compile(&batch) {
            Ok(sql) => sql,
            Err(err) => {
                tx.rollback();
                return Err(err);
            }
        };
        deltaload_trace_statement!(index, range, sql.len());

        summary.rows_affected += tx.execute(range.clone(), &sql)?;
        summary.rows += range.len();
        summary.batches += 1;
    }

    tx.commit()?;
    Ok(summary)
}
