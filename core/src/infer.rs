//! Column type inference
//!
//! Picks a [`ColumnType`] for a column from the values it holds. The first
//! non-null value decides, except that integer and double values mixed in
//! one column widen to [`ColumnType::Double`]. All-null columns are text.

use deltaload_types::ColumnType;

use crate::value::Value;

/// Precision used for inferred decimal columns
pub const INFERRED_DECIMAL_PRECISION: u8 = ColumnType::MAX_DECIMAL_PRECISION;

/// Infer the destination type of a column.
///
/// ```
/// use deltaload_core::{Value, infer::infer_column_type};
/// use deltaload_types::ColumnType;
///
/// let values = [Value::Null, Value::from(1), Value::from(2.5)];
/// assert_eq!(infer_column_type(&values), ColumnType::Double);
/// ```
pub fn infer_column_type(values: &[Value]) -> ColumnType {
    let mut non_null = values.iter().filter(|v| !v.is_null());
    let Some(first) = non_null.next() else {
        return ColumnType::String;
    };

    match first {
        Value::Integer(_) | Value::Double(_) => {
            let mut saw_double = matches!(first, Value::Double(_));
            for value in non_null {
                match value {
                    Value::Double(_) => saw_double = true,
                    Value::Integer(_) => {}
                    _ => return ColumnType::String,
                }
            }
            if saw_double {
                ColumnType::Double
            } else {
                ColumnType::BigInt
            }
        }
        Value::Decimal(_) => {
            let scale = values
                .iter()
                .filter_map(|v| match v {
                    Value::Decimal(d) => Some(decimal_scale(d)),
                    _ => None,
                })
                .max()
                .unwrap_or(0);
            ColumnType::Decimal(INFERRED_DECIMAL_PRECISION, scale)
        }
        Value::Boolean(_) => ColumnType::Boolean,
        Value::Text(_) => ColumnType::String,
        Value::Bytes(_) => ColumnType::Binary,
        Value::Date(_) => ColumnType::Date,
        Value::Timestamp(_) => ColumnType::Timestamp,
        Value::Null => ColumnType::String,
    }
}

fn decimal_scale(digits: &str) -> u8 {
    let scale = digits.split_once('.').map_or(0, |(_, frac)| frac.len());
    u8::try_from(scale)
        .unwrap_or(INFERRED_DECIMAL_PRECISION)
        .min(INFERRED_DECIMAL_PRECISION)
}
