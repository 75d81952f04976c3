//! Built-in field types.
//!
//! Each type implements [`ValueComparator`] and [`ValueTransformer`];
//! discrete types also implement [`ValueIncrementer`].

use chrono::NaiveDate;

use crate::comparator::{type_mismatch, ValueComparator, ValueIncrementer, ValueTransformer};
use crate::error::TransformError;
use crate::field::FieldOptions;
use crate::value::Value;

/// Date pattern used when the `pattern` option is not set.
pub const DEFAULT_DATE_PATTERN: &str = "%d.%m.%Y";

// =============================================================================
// Integer
// =============================================================================

/// Whole numbers (`i64`).
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerType;

impl IntegerType {
    fn pair(a: &Value, b: &Value) -> (i64, i64) {
        match (a, b) {
            (Value::Integer(a), Value::Integer(b)) => (*a, *b),
            _ => type_mismatch("integer", a, b),
        }
    }
}

impl ValueComparator for IntegerType {
    fn is_equal(&self, a: &Value, b: &Value, _options: &FieldOptions) -> bool {
        let (a, b) = Self::pair(a, b);
        a == b
    }

    fn is_lower(&self, a: &Value, b: &Value, _options: &FieldOptions) -> bool {
        let (a, b) = Self::pair(a, b);
        a < b
    }

    fn is_higher(&self, a: &Value, b: &Value, _options: &FieldOptions) -> bool {
        let (a, b) = Self::pair(a, b);
        a > b
    }

    fn as_incrementer(&self) -> Option<&dyn ValueIncrementer> {
        Some(self)
    }
}

impl ValueIncrementer for IntegerType {
    fn incremented_value(&self, value: &Value, _options: &FieldOptions) -> Option<Value> {
        match value {
            Value::Integer(v) => v.checked_add(1).map(Value::Integer),
            other => type_mismatch("integer", other, other),
        }
    }
}

impl ValueTransformer for IntegerType {
    fn reverse_transform(&self, view: &str, _options: &FieldOptions) -> Result<Value, TransformError> {
        view.trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| TransformError::InvalidInteger)
    }

    fn transform(&self, value: &Value, _options: &FieldOptions) -> String {
        value.to_string()
    }
}

// =============================================================================
// Decimal
// =============================================================================

/// Decimal numbers (`f64`). Not discrete, so no incrementer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalType;

impl DecimalType {
    fn pair(a: &Value, b: &Value) -> (f64, f64) {
        match (a, b) {
            (Value::Decimal(a), Value::Decimal(b)) => (*a, *b),
            _ => type_mismatch("decimal", a, b),
        }
    }
}

impl ValueComparator for DecimalType {
    fn is_equal(&self, a: &Value, b: &Value, _options: &FieldOptions) -> bool {
        let (a, b) = Self::pair(a, b);
        a == b
    }

    fn is_lower(&self, a: &Value, b: &Value, _options: &FieldOptions) -> bool {
        let (a, b) = Self::pair(a, b);
        a < b
    }

    fn is_higher(&self, a: &Value, b: &Value, _options: &FieldOptions) -> bool {
        let (a, b) = Self::pair(a, b);
        a > b
    }
}

impl ValueTransformer for DecimalType {
    fn reverse_transform(&self, view: &str, _options: &FieldOptions) -> Result<Value, TransformError> {
        match view.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Value::Decimal(v)),
            _ => Err(TransformError::InvalidDecimal),
        }
    }

    fn transform(&self, value: &Value, _options: &FieldOptions) -> String {
        value.to_string()
    }
}

// =============================================================================
// Date
// =============================================================================

/// Calendar dates. The `pattern` option holds the chrono format used for
/// input and output.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateType;

impl DateType {
    fn pair(a: &Value, b: &Value) -> (NaiveDate, NaiveDate) {
        match (a, b) {
            (Value::Date(a), Value::Date(b)) => (*a, *b),
            _ => type_mismatch("date", a, b),
        }
    }

    fn pattern(options: &FieldOptions) -> &str {
        options.get_str("pattern").unwrap_or(DEFAULT_DATE_PATTERN)
    }
}

impl ValueComparator for DateType {
    fn is_equal(&self, a: &Value, b: &Value, _options: &FieldOptions) -> bool {
        let (a, b) = Self::pair(a, b);
        a == b
    }

    fn is_lower(&self, a: &Value, b: &Value, _options: &FieldOptions) -> bool {
        let (a, b) = Self::pair(a, b);
        a < b
    }

    fn is_higher(&self, a: &Value, b: &Value, _options: &FieldOptions) -> bool {
        let (a, b) = Self::pair(a, b);
        a > b
    }

    fn as_incrementer(&self) -> Option<&dyn ValueIncrementer> {
        Some(self)
    }
}

impl ValueIncrementer for DateType {
    fn incremented_value(&self, value: &Value, _options: &FieldOptions) -> Option<Value> {
        match value {
            Value::Date(date) => date.succ_opt().map(Value::Date),
            other => type_mismatch("date", other, other),
        }
    }
}

impl ValueTransformer for DateType {
    fn reverse_transform(&self, view: &str, options: &FieldOptions) -> Result<Value, TransformError> {
        let pattern = Self::pattern(options);
        NaiveDate::parse_from_str(view.trim(), pattern)
            .map(Value::Date)
            .map_err(|_| TransformError::InvalidDate {
                pattern: pattern.to_string(),
            })
    }

    fn transform(&self, value: &Value, options: &FieldOptions) -> String {
        match value {
            Value::Date(date) => date.format(Self::pattern(options)).to_string(),
            other => other.to_string(),
        }
    }
}

// =============================================================================
// Text
// =============================================================================

/// Free text. With the `case_insensitive` option set, letter case is
/// ignored when comparing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextType;

impl TextType {
    fn pair(a: &Value, b: &Value, options: &FieldOptions) -> (String, String) {
        match (a, b) {
            (Value::Text(a), Value::Text(b)) => {
                if options.get_bool("case_insensitive").unwrap_or(false) {
                    (a.to_lowercase(), b.to_lowercase())
                } else {
                    (a.clone(), b.clone())
                }
            }
            _ => type_mismatch("text", a, b),
        }
    }
}

impl ValueComparator for TextType {
    fn is_equal(&self, a: &Value, b: &Value, options: &FieldOptions) -> bool {
        let (a, b) = Self::pair(a, b, options);
        a == b
    }

    fn is_lower(&self, a: &Value, b: &Value, options: &FieldOptions) -> bool {
        let (a, b) = Self::pair(a, b, options);
        a < b
    }

    fn is_higher(&self, a: &Value, b: &Value, options: &FieldOptions) -> bool {
        let (a, b) = Self::pair(a, b, options);
        a > b
    }
}

impl ValueTransformer for TextType {
    fn reverse_transform(&self, view: &str, _options: &FieldOptions) -> Result<Value, TransformError> {
        Ok(Value::Text(view.to_string()))
    }

    fn transform(&self, value: &Value, _options: &FieldOptions) -> String {
        value.to_string()
    }
}
