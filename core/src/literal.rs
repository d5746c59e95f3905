//! Inline literal rendering
//!
//! Bulk inserts embed every value directly in the statement text instead of
//! binding parameters, so each value has to be rendered in the grammar of the
//! destination. [`LiteralRenderer`] is that seam; [`Dialect`] implements it.

use std::fmt::Write;

use chrono::{NaiveDate, NaiveDateTime};
use deltaload_types::Dialect;
use thiserror::Error;

use crate::value::Value;

/// Why a value has no literal form in a dialect
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("non-finite double {value} has no literal form in {dialect}")]
    NonFiniteDouble { value: String, dialect: Dialect },

    #[error("text contains a NUL character")]
    NulInText,

    #[error("'{0}' is not a valid decimal literal")]
    InvalidDecimal(String),

    #[error("{kind} values have no literal form in {dialect}")]
    Unsupported {
        kind: &'static str,
        dialect: Dialect,
    },
}

/// Renders a value as inline SQL text
pub trait LiteralRenderer {
    /// Append the literal form of `value` to `out`.
    ///
    /// On error `out` may hold a partial literal; callers discard it.
    fn render(&self, value: &Value, out: &mut String) -> Result<(), LiteralError>;

    /// Render a single value into a fresh string.
    fn render_to_string(&self, value: &Value) -> Result<String, LiteralError> {
        let mut out = String::new();
        self.render(value, &mut out)?;
        Ok(out)
    }
}

impl LiteralRenderer for Dialect {
    fn render(&self, value: &Value, out: &mut String) -> Result<(), LiteralError> {
        match value {
            Value::Null => out.push_str("NULL"),
            Value::Boolean(b) => out.push_str(match (self, b) {
                (Dialect::SQLite, true) => "1",
                (Dialect::SQLite, false) => "0",
                (_, true) => "TRUE",
                (_, false) => "FALSE",
            }),
            Value::Integer(i) => {
                let _ = write!(out, "{i}");
            }
            Value::Double(r) => render_double(*self, *r, out)?,
            Value::Decimal(d) => {
                if !is_decimal_literal(d) {
                    return Err(LiteralError::InvalidDecimal(d.clone()));
                }
                out.push_str(d);
            }
            Value::Text(s) => render_text(*self, s, out)?,
            Value::Bytes(b) => render_bytes(*self, b, out),
            Value::Date(d) => render_date(*self, d, out),
            Value::Timestamp(ts) => render_timestamp(*self, ts, out),
        }
        Ok(())
    }
}

fn render_double(dialect: Dialect, value: f64, out: &mut String) -> Result<(), LiteralError> {
    if !value.is_finite() {
        let name = if value.is_nan() {
            "NaN"
        } else if value > 0.0 {
            "Infinity"
        } else {
            "-Infinity"
        };
        match dialect {
            Dialect::Databricks => {
                let _ = write!(out, "CAST('{name}' AS DOUBLE)");
            }
            Dialect::PostgreSQL => {
                let _ = write!(out, "'{name}'::double precision");
            }
            Dialect::SQLite => {
                return Err(LiteralError::NonFiniteDouble {
                    value: name.to_string(),
                    dialect,
                });
            }
        }
        return Ok(());
    }

    match dialect {
        // Spark reads `1.5` as DECIMAL; exponent notation keeps it DOUBLE.
        Dialect::Databricks => {
            let _ = write!(out, "{value:e}");
        }
        // Debug formatting is shortest round-trip and always keeps a `.` or
        // exponent, so the literal never reads back as an integer.
        Dialect::SQLite | Dialect::PostgreSQL => {
            let _ = write!(out, "{value:?}");
        }
    }
    Ok(())
}

fn render_text(dialect: Dialect, text: &str, out: &mut String) -> Result<(), LiteralError> {
    if text.contains('\0') {
        return Err(LiteralError::NulInText);
    }
    out.reserve(text.len() + 2);
    out.push('\'');
    match dialect {
        // Spark string literals treat backslash as an escape and concatenate
        // adjacent literals, so `''` would silently drop the quote.
        Dialect::Databricks => {
            for c in text.chars() {
                match c {
                    '\\' => out.push_str("\\\\"),
                    '\'' => out.push_str("\\'"),
                    _ => out.push(c),
                }
            }
        }
        Dialect::SQLite | Dialect::PostgreSQL => {
            for c in text.chars() {
                if c == '\'' {
                    out.push('\'');
                }
                out.push(c);
            }
        }
    }
    out.push('\'');
    Ok(())
}

fn render_bytes(dialect: Dialect, bytes: &[u8], out: &mut String) {
    out.reserve(bytes.len() * 2 + 12);
    match dialect {
        Dialect::Databricks | Dialect::SQLite => {
            out.push_str("X'");
            push_hex(bytes, out);
            out.push('\'');
        }
        Dialect::PostgreSQL => {
            out.push_str("'\\x");
            push_hex(bytes, out);
            out.push_str("'::bytea");
        }
    }
}

fn push_hex(bytes: &[u8], out: &mut String) {
    for byte in bytes {
        let _ = write!(out, "{byte:02X}");
    }
}

fn render_date(dialect: Dialect, date: &NaiveDate, out: &mut String) {
    let text = date.format("%Y-%m-%d");
    let _ = match dialect {
        Dialect::Databricks => write!(out, "DATE'{text}'"),
        Dialect::PostgreSQL => write!(out, "DATE '{text}'"),
        Dialect::SQLite => write!(out, "'{text}'"),
    };
}

fn render_timestamp(dialect: Dialect, ts: &NaiveDateTime, out: &mut String) {
    let text = ts.format("%Y-%m-%d %H:%M:%S%.f");
    let _ = match dialect {
        Dialect::Databricks => write!(out, "TIMESTAMP_NTZ'{text}'"),
        Dialect::PostgreSQL => write!(out, "TIMESTAMP '{text}'"),
        Dialect::SQLite => write!(out, "'{text}'"),
    };
}

/// `-?digits[.digits]`
fn is_decimal_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    all_digits(int) && frac.is_none_or(all_digits)
}
