//! Warehouse column type definitions
//!
//! A small, dialect-neutral set of column types covering what a tabular
//! dataset can carry. Each type knows its spelling in every [`Dialect`].

use crate::Dialect;

/// Column type of a destination table.
///
/// # Examples
///
/// ```
/// use deltaload_types::{ColumnType, Dialect};
///
/// assert_eq!(ColumnType::BigInt.to_sql_type(Dialect::Databricks), "BIGINT");
/// assert_eq!(ColumnType::String.to_sql_type(Dialect::PostgreSQL), "TEXT");
/// assert_eq!(ColumnType::parse("decimal(10, 2)"), Some(ColumnType::Decimal(10, 2)));
/// ```
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Boolean,
    /// 64-bit signed integer
    BigInt,
    /// 8-byte IEEE floating point
    Double,
    /// Fixed-point number with (precision, scale)
    Decimal(u8, u8),
    /// Unbounded UTF-8 text
    #[default]
    String,
    Binary,
    Date,
    /// Date and time without time zone
    Timestamp,
}

impl ColumnType {
    /// Largest precision accepted for [`ColumnType::Decimal`]
    pub const MAX_DECIMAL_PRECISION: u8 = 38;

    /// Parse a type name as written in configuration or overrides.
    ///
    /// Accepts common aliases case-insensitively; returns `None` for
    /// anything unrecognized.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "boolean" | "bool" => Some(Self::Boolean),
            "bigint" | "int" | "integer" | "long" | "int64" => Some(Self::BigInt),
            "double" | "float" | "real" | "double precision" | "float64" => Some(Self::Double),
            "string" | "text" | "varchar" => Some(Self::String),
            "binary" | "blob" | "bytea" => Some(Self::Binary),
            "date" => Some(Self::Date),
            "timestamp" | "datetime" | "timestamp_ntz" => Some(Self::Timestamp),
            "decimal" | "numeric" => Some(Self::Decimal(10, 0)),
            _ => Self::parse_decimal(&lower),
        }
    }

    fn parse_decimal(lower: &str) -> Option<Self> {
        let args = lower
            .strip_prefix("decimal")
            .or_else(|| lower.strip_prefix("numeric"))?
            .trim()
            .strip_prefix('(')?
            .strip_suffix(')')?;
        let (precision, scale) = args.split_once(',')?;
        let precision: u8 = precision.trim().parse().ok()?;
        let scale: u8 = scale.trim().parse().ok()?;
        if precision == 0 || precision > Self::MAX_DECIMAL_PRECISION || scale > precision {
            return None;
        }
        Some(Self::Decimal(precision, scale))
    }

    /// Get the SQL type string for this type in `dialect`
    #[must_use]
    pub fn to_sql_type(&self, dialect: Dialect) -> std::borrow::Cow<'static, str> {
        use std::borrow::Cow;

        let name = match (self, dialect) {
            (Self::Decimal(p, s), Dialect::Databricks | Dialect::PostgreSQL) => {
                return Cow::Owned(format!("DECIMAL({p}, {s})"));
            }
            (Self::Decimal(..), Dialect::SQLite) => "NUMERIC",

            (Self::Boolean, Dialect::SQLite) => "INTEGER",
            (Self::Boolean, _) => "BOOLEAN",

            (Self::BigInt, Dialect::SQLite) => "INTEGER",
            (Self::BigInt, _) => "BIGINT",

            (Self::Double, Dialect::SQLite) => "REAL",
            (Self::Double, Dialect::PostgreSQL) => "DOUBLE PRECISION",
            (Self::Double, Dialect::Databricks) => "DOUBLE",

            (Self::String, Dialect::Databricks) => "STRING",
            (Self::String, _) => "TEXT",

            (Self::Binary, Dialect::Databricks) => "BINARY",
            (Self::Binary, Dialect::SQLite) => "BLOB",
            (Self::Binary, Dialect::PostgreSQL) => "BYTEA",

            (Self::Date, Dialect::SQLite) => "TEXT",
            (Self::Date, _) => "DATE",

            (Self::Timestamp, Dialect::SQLite) => "TEXT",
            (Self::Timestamp, Dialect::Databricks) => "TIMESTAMP_NTZ",
            (Self::Timestamp, Dialect::PostgreSQL) => "TIMESTAMP",
        };
        Cow::Borrowed(name)
    }
}

impl core::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_sql_type(Dialect::Databricks))
    }
}

impl core::str::FromStr for ColumnType {
    type Err = ColumnTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ColumnTypeParseError(s.to_string()))
    }
}

/// Error returned when parsing an unknown column type name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown column type '{0}'")]
pub struct ColumnTypeParseError(pub String);

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ColumnType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::string::String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ColumnType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(ColumnType::parse("INT"), Some(ColumnType::BigInt));
        assert_eq!(ColumnType::parse("float"), Some(ColumnType::Double));
        assert_eq!(ColumnType::parse("varchar"), Some(ColumnType::String));
        assert_eq!(ColumnType::parse("bool"), Some(ColumnType::Boolean));
        assert_eq!(ColumnType::parse("blob"), Some(ColumnType::Binary));
        assert_eq!(ColumnType::parse("timestamp"), Some(ColumnType::Timestamp));
        assert_eq!(ColumnType::parse("geometry"), None);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(
            ColumnType::parse("DECIMAL(18,4)"),
            Some(ColumnType::Decimal(18, 4))
        );
        assert_eq!(
            ColumnType::parse("numeric( 5 , 0 )"),
            Some(ColumnType::Decimal(5, 0))
        );
        assert_eq!(ColumnType::parse("decimal(39,0)"), None);
        assert_eq!(ColumnType::parse("decimal(4,5)"), None);
        assert_eq!(ColumnType::parse("decimal(4)"), None);
    }

    #[test]
    fn test_sql_type_per_dialect() {
        assert_eq!(ColumnType::Double.to_sql_type(Dialect::SQLite), "REAL");
        assert_eq!(
            ColumnType::Double.to_sql_type(Dialect::PostgreSQL),
            "DOUBLE PRECISION"
        );
        assert_eq!(
            ColumnType::Timestamp.to_sql_type(Dialect::Databricks),
            "TIMESTAMP_NTZ"
        );
        assert_eq!(
            ColumnType::Decimal(12, 3).to_sql_type(Dialect::Databricks),
            "DECIMAL(12, 3)"
        );
        assert_eq!(
            ColumnType::Decimal(12, 3).to_sql_type(Dialect::SQLite),
            "NUMERIC"
        );
    }
}
