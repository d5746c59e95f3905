//! Row materialization
//!
//! Flattens a [`Dataset`] into the column-name list and column value buffers
//! the compiler slices batches from. Nothing is copied; every buffer borrows
//! from the dataset.

use std::ops::Range;

use deltaload_core::{Dataset, Value};

/// Borrowed, column-oriented view of a dataset
#[derive(Debug, Clone)]
pub struct Materialized<'a> {
    column_names: Vec<&'a str>,
    columns: Vec<&'a [Value]>,
    row_count: usize,
}

impl<'a> Materialized<'a> {
    /// Build the view.
    ///
    /// `include_index` is accepted for callers coming from frame libraries
    /// with row labels and is ignored: the destination has no row index, so
    /// no index column is ever materialized.
    pub fn new(dataset: &'a Dataset, include_index: bool) -> Self {
        if include_index {
            #[cfg(feature = "tracing")]
            tracing::debug!("index columns are not supported by the destination; ignoring");
        }

        Self {
            column_names: dataset.column_names().collect(),
            columns: dataset.columns().iter().map(|c| c.values()).collect(),
            row_count: dataset.row_count(),
        }
    }

    #[inline]
    pub fn column_names(&self) -> &[&'a str] {
        &self.column_names
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Slice the rows in `range` out of every column.
    ///
    /// Panics if `range` reaches past `row_count`; plans never do.
    pub fn batch(&self, index: usize, range: Range<usize>) -> Batch<'_> {
        Batch {
            index,
            columns: self
                .columns
                .iter()
                .map(|values| &values[range.clone()])
                .collect(),
            column_names: &self.column_names,
            range,
        }
    }
}

/// One contiguous row range of the dataset, ready for compilation
#[derive(Debug, Clone)]
pub struct Batch<'a> {
    /// Position of the batch in its plan
    pub index: usize,
    /// Rows of the dataset this batch covers
    pub range: Range<usize>,
    column_names: &'a [&'a str],
    columns: Vec<&'a [Value]>,
}

impl<'a> Batch<'a> {
    #[inline]
    pub fn column_names(&self) -> &[&'a str] {
        self.column_names
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.range.len()
    }

    /// Values of the `row`-th row of the batch, in column order
    pub fn row(&self, row: usize) -> impl Iterator<Item = &'a Value> + '_ {
        self.columns.iter().copied().map(move |values| &values[row])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deltaload_core::Column;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Column::from_values("id", 0..5),
            Column::from_values("label", ["a", "b", "c", "d", "e"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_counts_and_names() {
        let ds = dataset();
        let m = Materialized::new(&ds, true);
        assert_eq!(m.column_names(), &["id", "label"]);
        assert_eq!((m.row_count(), m.column_count()), (5, 2));
    }

    #[test]
    fn test_batch_keeps_row_alignment() {
        let ds = dataset();
        let m = Materialized::new(&ds, false);
        let batch = m.batch(1, 2..4);
        assert_eq!(batch.row_count(), 2);
        let second: Vec<&Value> = batch.row(1).collect();
        assert_eq!(second, vec![&Value::Integer(3), &Value::Text("d".into())]);
    }
}
