//! Contracts a field type provides to the rest of the library.
//!
//! The optimizer never orders or compares values on its own. Every
//! decision goes through the [`ValueComparator`] of the field the values
//! belong to, so integers, dates, decimals and custom types all behave the
//! same way.
//!
//! # Implementing a comparator
//!
//! ```rust
//! use search_condition::{FieldOptions, Value, ValueComparator};
//!
//! #[derive(Debug)]
//! struct LengthComparator;
//!
//! fn len(value: &Value) -> usize {
//!     match value {
//!         Value::Text(text) => text.chars().count(),
//!         other => panic!("expected text, got {}", other.type_name()),
//!     }
//! }
//!
//! impl ValueComparator for LengthComparator {
//!     fn is_equal(&self, a: &Value, b: &Value, _options: &FieldOptions) -> bool {
//!         len(a) == len(b)
//!     }
//!
//!     fn is_lower(&self, a: &Value, b: &Value, _options: &FieldOptions) -> bool {
//!         len(a) < len(b)
//!     }
//!
//!     fn is_higher(&self, a: &Value, b: &Value, _options: &FieldOptions) -> bool {
//!         len(a) > len(b)
//!     }
//! }
//! ```

use std::fmt;

use crate::error::TransformError;
use crate::field::FieldOptions;
use crate::value::Value;

/// Equality and ordering of two domain values of one field type.
///
/// Implementations must be deterministic and free of side effects.
///
/// # Panics
///
/// Implementations may panic when handed a [`Value`] variant they do not
/// handle. That is a contract violation by the caller and is not recoverable.
pub trait ValueComparator: fmt::Debug + Send + Sync {
    /// Returns true if `a` equals `b`.
    fn is_equal(&self, a: &Value, b: &Value, options: &FieldOptions) -> bool;

    /// Returns true if `a` is lower than `b`.
    fn is_lower(&self, a: &Value, b: &Value, options: &FieldOptions) -> bool;

    /// Returns true if `a` is higher than `b`.
    fn is_higher(&self, a: &Value, b: &Value, options: &FieldOptions) -> bool;

    /// Returns the increment capability when the type is discrete.
    fn as_incrementer(&self) -> Option<&dyn ValueIncrementer> {
        None
    }
}

/// Optional capability of discrete types: computing the next value.
pub trait ValueIncrementer: ValueComparator {
    /// Returns the value directly following `value`, or `None` when there is
    /// no such value (e.g. at the type's maximum).
    fn incremented_value(&self, value: &Value, options: &FieldOptions) -> Option<Value>;
}

/// Conversion between the text a user types and the domain value.
pub trait ValueTransformer: fmt::Debug + Send + Sync {
    /// Turns user input into a domain value.
    fn reverse_transform(&self, view: &str, options: &FieldOptions) -> Result<Value, TransformError>;

    /// Turns a domain value into its user-facing text.
    fn transform(&self, value: &Value, options: &FieldOptions) -> String;
}

/// Aborts on a value variant the comparator does not handle.
pub(crate) fn type_mismatch(expected: &str, a: &Value, b: &Value) -> ! {
    panic!(
        "comparator for {} values called with {} and {}",
        expected,
        a.type_name(),
        b.type_name()
    )
}
