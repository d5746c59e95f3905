//! Column-oriented datasets
//!
//! A [`Dataset`] is an ordered list of named [`Column`]s of equal length.
//! It is read-only to the loader; every stage borrows from it.

use std::collections::HashSet;

use crate::error::{LoadError, Result};
use crate::value::Value;

/// A named, ordered sequence of values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Build a column from anything convertible into [`Value`]s.
    ///
    /// ```
    /// use deltaload_core::{Column, Value};
    ///
    /// let col = Column::from_values("n", 0..3);
    /// assert_eq!(col.values(), &[Value::Integer(0), Value::Integer(1), Value::Integer(2)]);
    /// ```
    pub fn from_values<I, T>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::new(name, values.into_iter().map(Into::into).collect())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An in-memory table: named columns, all the same length
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Build a dataset, checking that columns are equally long and uniquely named.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if column.name.is_empty() {
                return Err(LoadError::InvalidArgument(
                    "column names must be non-empty".to_string(),
                ));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(LoadError::InvalidArgument(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
        }

        if let Some(first) = columns.first()
            && let Some(bad) = columns.iter().find(|c| c.len() != first.len())
        {
            return Err(LoadError::InvalidArgument(format!(
                "column '{}' has {} values but column '{}' has {}",
                bad.name,
                bad.len(),
                first.name,
                first.len()
            )));
        }

        Ok(Self { columns })
    }

    /// Build a dataset from row tuples.
    ///
    /// ```
    /// use deltaload_core::{Dataset, Value};
    ///
    /// let ds = Dataset::from_rows(
    ///     ["id", "name"],
    ///     vec![
    ///         vec![Value::from(1), Value::from("a")],
    ///         vec![Value::from(2), Value::from("b")],
    ///     ],
    /// )
    /// .unwrap();
    /// assert_eq!(ds.row_count(), 2);
    /// assert_eq!(ds.column_count(), 2);
    /// ```
    pub fn from_rows<N, S, R>(names: N, rows: R) -> Result<Self>
    where
        N: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator<Item = Vec<Value>>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut buffers: Vec<Vec<Value>> = vec![Vec::new(); names.len()];

        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != names.len() {
                return Err(LoadError::InvalidArgument(format!(
                    "row {index} has {} values, expected {}",
                    row.len(),
                    names.len()
                )));
            }
            for (buffer, value) in buffers.iter_mut().zip(row) {
                buffer.push(value);
            }
        }

        Self::new(
            names
                .into_iter()
                .zip(buffers)
                .map(|(name, values)| Column::new(name, values))
                .collect(),
        )
    }

    /// Number of rows; zero for a dataset without columns.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Total number of cells (`row_count * column_count`)
    #[inline]
    pub fn ndatapoints(&self) -> usize {
        self.row_count() * self.column_count()
    }

    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

impl From<Column> for Dataset {
    /// A single column is a one-column dataset.
    fn from(column: Column) -> Self {
        Self {
            columns: vec![column],
        }
    }
}
