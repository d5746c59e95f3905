use std::ops::Range;

use deltaload_types::IdentifierError;
use thiserror::Error;

use crate::literal::LiteralError;

/// Classification of a failure reported by a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverErrorKind {
    /// The connection gave up waiting on the destination
    Timeout,
    /// Transport or connectivity failure
    Io,
    /// The destination rejected the statement (syntax, constraint, type)
    Statement,
    /// Transaction control (begin, commit, rollback) failed
    Transaction,
}

impl DriverErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Io => "i/o",
            Self::Statement => "statement",
            Self::Transaction => "transaction",
        }
    }
}

impl std::fmt::Display for DriverErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised by a connection while executing DDL, statements or transaction control
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} failure: {message}")]
pub struct DriverError {
    pub kind: DriverErrorKind,
    pub message: String,
}

impl DriverError {
    pub fn new(kind: DriverErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn statement(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::Statement, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::Timeout, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::Io, message)
    }

    pub fn transaction(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::Transaction, message)
    }

    /// Timeouts are surfaced as retryable I/O failures; retrying is the
    /// caller's decision.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, DriverErrorKind::Timeout | DriverErrorKind::Io)
    }
}

#[cfg(feature = "rusqlite")]
impl From<rusqlite::Error> for DriverError {
    fn from(err: rusqlite::Error) -> Self {
        use rusqlite::ErrorCode;

        let kind = match err.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => DriverErrorKind::Timeout,
            Some(
                ErrorCode::SystemIoFailure
                | ErrorCode::CannotOpen
                | ErrorCode::DiskFull
                | ErrorCode::NotADatabase,
            ) => DriverErrorKind::Io,
            _ => DriverErrorKind::Statement,
        };
        Self::new(kind, err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    /// Bad table identifier or exists-policy value; raised before any I/O
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The destination table exists and the policy is `Fail`
    #[error("Table {0} already exists")]
    TableExists(String),

    /// A caller-supplied argument is out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No batch size satisfies the value ceiling
    #[error("Chunk size error: {0}")]
    ChunkSize(String),

    /// A value could not be rendered as a literal
    #[error("Compilation error at row {row}, column '{column}': {source}")]
    Compilation {
        row: usize,
        column: String,
        #[source]
        source: LiteralError,
    },

    /// A batch statement failed; the whole load was rolled back
    #[error("Execution error on rows {}..{}: {source}", .range.start, .range.end)]
    Execution {
        range: Range<usize>,
        #[source]
        source: DriverError,
    },

    /// Creating or dropping the destination table failed
    #[error("DDL error: {0}")]
    Ddl(#[source] DriverError),

    /// Opening or committing the load transaction failed
    #[error("Transaction error: {0}")]
    Transaction(#[source] DriverError),
}

impl LoadError {
    /// Row range of the batch that failed, when the failure belongs to one.
    pub fn failed_range(&self) -> Option<&Range<usize>> {
        match self {
            Self::Execution { range, .. } => Some(range),
            _ => None,
        }
    }

    /// Whether the underlying connection failure is worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Execution { source, .. } | Self::Ddl(source) | Self::Transaction(source) => {
                source.is_retryable()
            }
            _ => false,
        }
    }
}

impl From<IdentifierError> for LoadError {
    fn from(err: IdentifierError) -> Self {
        Self::Configuration(err.to_string())
    }
}

/// Result type for load operations
pub type Result<T> = std::result::Result<T, LoadError>;
