//! SQLite connection via rusqlite
//!
//! The schema part of a table identifier names an attached database (`main`
//! for the primary one). The catalog part is ignored.

use deltaload_core::{DriverError, DriverErrorKind};
use deltaload_types::{Dialect, TableIdentifier};
use rusqlite::OptionalExtension;

use crate::connection::Connection;

/// SQLite transaction types
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SQLiteTransactionType {
    #[default]
    /// A deferred transaction is the default - it does not acquire locks until needed
    Deferred,
    /// An immediate transaction acquires a RESERVED lock immediately
    Immediate,
    /// An exclusive transaction acquires an EXCLUSIVE lock immediately
    Exclusive,
}

impl SQLiteTransactionType {
    const fn begin_sql(self) -> &'static str {
        match self {
            Self::Deferred => "BEGIN DEFERRED",
            Self::Immediate => "BEGIN IMMEDIATE",
            Self::Exclusive => "BEGIN EXCLUSIVE",
        }
    }
}

/// A [`Connection`] over a [`rusqlite::Connection`]
#[derive(Debug)]
pub struct SqliteConnection {
    conn: rusqlite::Connection,
    tx_type: SQLiteTransactionType,
}

impl SqliteConnection {
    pub fn new(conn: rusqlite::Connection) -> Self {
        Self {
            conn,
            tx_type: SQLiteTransactionType::default(),
        }
    }

    pub fn open_in_memory() -> Result<Self, DriverError> {
        Ok(Self::new(rusqlite::Connection::open_in_memory()?))
    }

    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, DriverError> {
        Ok(Self::new(rusqlite::Connection::open(path)?))
    }

    /// Lock mode used when a load opens its transaction
    pub fn with_transaction_type(mut self, tx_type: SQLiteTransactionType) -> Self {
        self.tx_type = tx_type;
        self
    }

    #[inline]
    pub fn tx_type(&self) -> SQLiteTransactionType {
        self.tx_type
    }

    /// Gets a reference to the underlying connection
    #[inline]
    pub fn inner(&self) -> &rusqlite::Connection {
        &self.conn
    }

    pub fn into_inner(self) -> rusqlite::Connection {
        self.conn
    }
}

impl From<rusqlite::Connection> for SqliteConnection {
    fn from(conn: rusqlite::Connection) -> Self {
        Self::new(conn)
    }
}

impl Connection for SqliteConnection {
    fn dialect(&self) -> Dialect {
        Dialect::SQLite
    }

    fn driver_name(&self) -> &str {
        "sqlite.rusqlite"
    }

    fn table_exists(&mut self, ident: &TableIdentifier) -> Result<bool, DriverError> {
        let sql = format!(
            "SELECT 1 FROM {}.sqlite_master WHERE type = 'table' AND name = ?1",
            Dialect::SQLite.quote_identifier(ident.schema())
        );
        let found = self
            .conn
            .query_row(&sql, [ident.table()], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    fn execute(&mut self, sql: &str) -> Result<u64, DriverError> {
        let affected = self.conn.execute(sql, [])?;
        Ok(affected as u64)
    }

    fn begin(&mut self) -> Result<(), DriverError> {
        self.conn
            .execute_batch(self.tx_type.begin_sql())
            .map_err(transaction_error)
    }

    fn commit(&mut self) -> Result<(), DriverError> {
        self.conn.execute_batch("COMMIT").map_err(transaction_error)
    }

    fn rollback(&mut self) -> Result<(), DriverError> {
        self.conn.execute_batch("ROLLBACK").map_err(transaction_error)
    }
}

/// Busy and I/O failures keep their kind; anything else on a transaction
/// control statement is a transaction failure.
fn transaction_error(err: rusqlite::Error) -> DriverError {
    let err = DriverError::from(err);
    match err.kind {
        DriverErrorKind::Statement => DriverError::transaction(err.message),
        _ => err,
    }
}
