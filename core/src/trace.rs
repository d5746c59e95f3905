//! Tracing utilities for load, statement and transaction observability.
//!
//! Enable the `tracing` feature of the calling crate to emit spans and events via
//! the `tracing` crate. These macros no-op when the feature is disabled, avoiding
//! `#[cfg]` boilerplate at every call site.

/// Emit a debug-level tracing event for one compiled insert statement.
///
/// ```ignore
/// deltaload_trace_statement!(batch_index, &range, sql.len());
/// ```
#[macro_export]
macro_rules! deltaload_trace_statement {
    ($batch:expr, $range:expr, $sql_len:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            batch = $batch,
            start = $range.start,
            end = $range.end,
            sql_bytes = $sql_len,
            "deltaload.statement"
        );
    };
}

/// Emit an info-level tracing event for transaction lifecycle (begin, commit, rollback).
///
/// ```ignore
/// deltaload_trace_tx!("begin", "sqlite.rusqlite");
/// deltaload_trace_tx!("rollback", conn.dialect().as_str());
/// ```
#[macro_export]
macro_rules! deltaload_trace_tx {
    ($event:literal, $driver:expr) => {
        #[cfg(feature = "tracing")]
        tracing::info!(event = $event, driver = %$driver, "deltaload.transaction");
    };
}

/// Emit a warn-level tracing event for an advisory load warning.
#[macro_export]
macro_rules! deltaload_warn {
    ($warning:expr) => {
        #[cfg(feature = "tracing")]
        tracing::warn!(warning = %$warning, "deltaload.warning");
    };
}
