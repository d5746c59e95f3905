//! What a load reports back

use deltaload_types::TableIdentifier;

use crate::resolver::TableAction;

/// Advisory conditions noticed during a load; none of them abort it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The dataset had no rows, so nothing was inserted
    EmptyDataset,
    /// An explicit batch size puts more values in one statement than the
    /// ceiling allows; the destination may reject it
    BatchExceedsCeiling {
        batch_rows: usize,
        values: usize,
        ceiling: usize,
    },
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDataset => f.write_str("dataset is empty; no rows were inserted"),
            Self::BatchExceedsCeiling {
                batch_rows,
                values,
                ceiling,
            } => write!(
                f,
                "batch size of {batch_rows} rows puts {values} values in one statement, \
                 above the ceiling of {ceiling}; unset it if the destination rejects the load"
            ),
        }
    }
}

/// Summary of a load that inserted rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub table: TableIdentifier,
    pub action: TableAction,
    /// Rows submitted across all batches
    pub rows: usize,
    /// Sum of the row counts the connection reported
    pub rows_affected: u64,
    pub batches: usize,
    pub batch_rows: usize,
    pub warnings: Vec<LoadWarning>,
}

/// Result of a successful call to [`load`](crate::load)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Every batch was inserted and committed
    Loaded(LoadReport),
    /// The dataset had no rows; no insert statement was run
    NoOpEmpty,
}

impl LoadOutcome {
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOpEmpty)
    }

    /// Rows submitted, zero for an empty dataset
    pub fn rows(&self) -> usize {
        match self {
            Self::Loaded(report) => report.rows,
            Self::NoOpEmpty => 0,
        }
    }

    /// Advisory warnings of the load; an empty dataset always reports
    /// [`LoadWarning::EmptyDataset`].
    pub fn warnings(&self) -> &[LoadWarning] {
        const EMPTY: &[LoadWarning] = &[LoadWarning::EmptyDataset];
        match self {
            Self::Loaded(report) => &report.warnings,
            Self::NoOpEmpty => EMPTY,
        }
    }

    pub fn report(&self) -> Option<&LoadReport> {
        match self {
            Self::Loaded(report) => Some(report),
            Self::NoOpEmpty => None,
        }
    }
}
