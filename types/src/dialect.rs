//! Destination dialect enum
//!
//! A single source of truth for which SQL grammar a load targets. The dialect
//! decides identifier quoting, how a qualified table name is spelled, and (in
//! `deltaload-core`) how values are rendered as literals.

use crate::TableIdentifier;

/// SQL dialect of the destination warehouse
///
/// # Examples
///
/// ```
/// use deltaload_types::Dialect;
///
/// let dialect = Dialect::Databricks;
/// assert!(dialect.addresses_catalog());
///
/// let sqlite = Dialect::SQLite;
/// assert!(!sqlite.addresses_catalog());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// Databricks SQL (Spark SQL grammar) - backtick identifiers, three-level
    /// `catalog.schema.table` namespace
    #[default]
    Databricks,

    /// SQLite - double-quoted identifiers, `schema.table` namespace where the
    /// schema is an attached database name
    ///
    /// Compatible with: rusqlite
    SQLite,

    /// PostgreSQL - double-quoted identifiers, `schema.table` namespace
    PostgreSQL,
}

impl Dialect {
    /// Returns `true` if the dialect can address the catalog part of a
    /// [`TableIdentifier`] in a statement.
    #[inline]
    #[must_use]
    pub const fn addresses_catalog(&self) -> bool {
        matches!(self, Dialect::Databricks)
    }

    /// Parse a dialect from a string (case-insensitive)
    ///
    /// Supports various common aliases:
    /// - Databricks: `"databricks"`, `"dbx"`, `"spark"`
    /// - SQLite: `"sqlite"`
    /// - PostgreSQL: `"postgresql"`, `"postgres"`, `"pg"`
    ///
    /// # Examples
    ///
    /// ```
    /// use deltaload_types::Dialect;
    ///
    /// assert_eq!(Dialect::parse("dbx"), Some(Dialect::Databricks));
    /// assert_eq!(Dialect::parse("postgres"), Some(Dialect::PostgreSQL));
    /// assert_eq!(Dialect::parse("unknown"), None);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("databricks")
            || s.eq_ignore_ascii_case("dbx")
            || s.eq_ignore_ascii_case("spark")
        {
            Some(Dialect::Databricks)
        } else if s.eq_ignore_ascii_case("sqlite") {
            Some(Dialect::SQLite)
        } else if s.eq_ignore_ascii_case("postgresql")
            || s.eq_ignore_ascii_case("postgres")
            || s.eq_ignore_ascii_case("pg")
        {
            Some(Dialect::PostgreSQL)
        } else {
            None
        }
    }

    /// Get the dialect name as a lowercase string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Dialect::Databricks => "databricks",
            Dialect::SQLite => "sqlite",
            Dialect::PostgreSQL => "postgresql",
        }
    }

    /// Quote a single identifier, doubling any embedded quote character.
    #[must_use]
    pub fn quote_identifier(&self, name: &str) -> String {
        let quote = match self {
            Dialect::Databricks => '`',
            Dialect::SQLite | Dialect::PostgreSQL => '"',
        };
        let mut out = String::with_capacity(name.len() + 2);
        out.push(quote);
        for c in name.chars() {
            if c == quote {
                out.push(quote);
            }
            out.push(c);
        }
        out.push(quote);
        out
    }

    /// Render the fully qualified name of a table for this dialect.
    ///
    /// Databricks keeps all three levels. SQLite and PostgreSQL drop the
    /// catalog, which is the database the connection is already bound to.
    ///
    /// ```
    /// use deltaload_types::{Dialect, TableIdentifier};
    ///
    /// let ident = TableIdentifier::parse("main.sales.orders").unwrap();
    /// assert_eq!(Dialect::Databricks.qualified_name(&ident), "`main`.`sales`.`orders`");
    /// assert_eq!(Dialect::SQLite.qualified_name(&ident), "\"sales\".\"orders\"");
    /// ```
    #[must_use]
    pub fn qualified_name(&self, ident: &TableIdentifier) -> String {
        let mut parts = Vec::with_capacity(3);
        if self.addresses_catalog() {
            parts.push(self.quote_identifier(ident.catalog()));
        }
        parts.push(self.quote_identifier(ident.schema()));
        parts.push(self.quote_identifier(ident.table()));
        parts.join(".")
    }
}

impl core::fmt::Display for Dialect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Dialect {
    type Err = DialectParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::parse(s).ok_or_else(|| DialectParseError(s.to_string()))
    }
}

/// Error returned when parsing an unknown dialect string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dialect '{0}'")]
pub struct DialectParseError(pub String);

/// Accepts every alias [`Dialect::parse`] does.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Dialect {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::string::String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Dialect {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
