//! Chunk planning
//!
//! Splits `[0, row_count)` into contiguous row ranges so that no insert
//! statement carries more than `value_ceiling` literal values, unless the
//! caller asked for an explicit batch size.

use std::ops::Range;

use deltaload_core::{LoadError, Result};

use crate::outcome::LoadWarning;

/// Default ceiling on literal values per statement.
///
/// Statements fail on the destination somewhere near 940,000 values; this
/// stays below that with some margin. It is an empirical figure, not a
/// documented limit, so treat it as a tunable.
pub const DEFAULT_VALUE_CEILING: usize = 900_000;

/// Check a caller-supplied batch size before any planning or I/O.
pub fn validate_batch_rows(requested: Option<i64>) -> Result<Option<usize>> {
    match requested {
        None => Ok(None),
        Some(0) => Err(LoadError::InvalidArgument(
            "batch size should be non-zero".to_string(),
        )),
        Some(n) if n < 0 => Err(LoadError::InvalidArgument(format!(
            "batch size should be greater than zero, got {n}"
        ))),
        Some(n) => usize::try_from(n).map(Some).map_err(|_| {
            LoadError::InvalidArgument(format!("batch size {n} does not fit in memory"))
        }),
    }
}

/// Ordered, gap-free row ranges covering one load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    row_count: usize,
    column_count: usize,
    batch_rows: usize,
    value_ceiling: usize,
    requested: bool,
}

impl ChunkPlan {
    /// Rows per batch; every range but the last has exactly this many rows.
    #[inline]
    pub fn batch_rows(&self) -> usize {
        self.batch_rows
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of ranges in the plan
    pub fn len(&self) -> usize {
        self.row_count.div_ceil(self.batch_rows)
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Iterate the ranges in row order.
    pub fn iter(&self) -> ChunkIter {
        ChunkIter {
            next_start: 0,
            row_count: self.row_count,
            batch_rows: self.batch_rows,
        }
    }

    pub fn ranges(&self) -> Vec<Range<usize>> {
        self.iter().collect()
    }

    /// Advisory warning when an explicit batch size overshoots the ceiling.
    pub fn ceiling_warning(&self) -> Option<LoadWarning> {
        let values = self.batch_rows.saturating_mul(self.column_count);
        (self.requested && values > self.value_ceiling).then_some(
            LoadWarning::BatchExceedsCeiling {
                batch_rows: self.batch_rows,
                values,
                ceiling: self.value_ceiling,
            },
        )
    }
}

impl<'a> IntoIterator for &'a ChunkPlan {
    type Item = Range<usize>;
    type IntoIter = ChunkIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the ranges of a [`ChunkPlan`]
#[derive(Debug, Clone)]
pub struct ChunkIter {
    next_start: usize,
    row_count: usize,
    batch_rows: usize,
}

impl Iterator for ChunkIter {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_start >= self.row_count {
            return None;
        }
        let start = self.next_start;
        let end = start.saturating_add(self.batch_rows).min(self.row_count);
        self.next_start = end;
        Some(start..end)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .row_count
            .saturating_sub(self.next_start)
            .div_ceil(self.batch_rows);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChunkIter {}

/// Compute the batch boundaries for a load.
///
/// Without an explicit size, a dataset under the ceiling goes out as one
/// batch and anything larger is cut into `value_ceiling / column_count` row
/// batches. An explicit size is always honored.
///
/// ```
/// use deltaload::planner::plan_chunks;
///
/// let plan = plan_chunks(1_000_000, 1, 900_000, None).unwrap();
/// assert_eq!(plan.ranges(), vec![0..900_000, 900_000..1_000_000]);
/// ```
pub fn plan_chunks(
    row_count: usize,
    column_count: usize,
    value_ceiling: usize,
    requested_batch_rows: Option<i64>,
) -> Result<ChunkPlan> {
    let requested = validate_batch_rows(requested_batch_rows)?;

    if column_count == 0 {
        return Err(LoadError::InvalidArgument(
            "cannot plan batches for a dataset without columns".to_string(),
        ));
    }

    let ndatapoints = row_count.saturating_mul(column_count);

    let batch_rows = match requested {
        Some(rows) => rows,
        None if ndatapoints < value_ceiling => row_count.max(1),
        None => {
            let rows = value_ceiling / column_count;
            if rows == 0 {
                return Err(LoadError::ChunkSize(format!(
                    "{column_count} columns exceed the ceiling of {value_ceiling} values per statement; \
                     no batch size fits"
                )));
            }
            rows
        }
    };

    Ok(ChunkPlan {
        row_count,
        column_count,
        batch_rows,
        value_ceiling,
        requested: requested.is_some(),
    })
}
