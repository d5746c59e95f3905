//! Connection seam
//!
//! The loader never opens, authenticates or pools connections. It is handed
//! something implementing [`Connection`] and drives it: existence checks and
//! DDL in autocommit mode, then every insert inside one transaction.

use deltaload_core::DriverError;
use deltaload_types::{Dialect, TableIdentifier};

/// An open connection to the destination
pub trait Connection {
    /// Grammar the destination speaks
    fn dialect(&self) -> Dialect;

    /// Name used in transaction tracing events
    fn driver_name(&self) -> &str {
        self.dialect().as_str()
    }

    /// Whether `ident` names an existing table
    fn table_exists(&mut self, ident: &TableIdentifier) -> Result<bool, DriverError>;

    /// Execute one statement and return the number of rows it affected.
    ///
    /// Drivers that cannot report a count return 0.
    fn execute(&mut self, sql: &str) -> Result<u64, DriverError>;

    fn begin(&mut self) -> Result<(), DriverError>;

    fn commit(&mut self) -> Result<(), DriverError>;

    fn rollback(&mut self) -> Result<(), DriverError>;
}

impl<C: Connection + ?Sized> Connection for &mut C {
    fn dialect(&self) -> Dialect {
        (**self).dialect()
    }

    fn driver_name(&self) -> &str {
        (**self).driver_name()
    }

    fn table_exists(&mut self, ident: &TableIdentifier) -> Result<bool, DriverError> {
        (**self).table_exists(ident)
    }

    fn execute(&mut self, sql: &str) -> Result<u64, DriverError> {
        (**self).execute(sql)
    }

    fn begin(&mut self) -> Result<(), DriverError> {
        (**self).begin()
    }

    fn commit(&mut self) -> Result<(), DriverError> {
        (**self).commit()
    }

    fn rollback(&mut self) -> Result<(), DriverError> {
        (**self).rollback()
    }
}
