//! Error types for search condition input processing.

use thiserror::Error;

use crate::field::ValueKind;

/// Errors that can occur while building a search condition from user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConditionError {
    /// Parse error at a specific position in the input.
    #[error("parse error at position {position}: {message}")]
    ParseError {
        /// Position in the input where the error occurred.
        position: usize,
        /// Description of the error.
        message: String,
    },

    /// Empty input provided.
    #[error("empty search condition")]
    EmptyCondition,

    /// The field is not registered in the field set.
    #[error("unknown field '{0}'")]
    UnknownField(String),

    /// The field was given more than once within the same group.
    #[error("field '{field}' is given more than once in group {group}")]
    DuplicateField {
        /// Field name.
        field: String,
        /// Group number (root group is 1).
        group: usize,
    },

    /// The field does not accept this kind of value.
    #[error("field '{field}' does not accept {kind} values")]
    UnsupportedValueKind {
        /// Field name.
        field: String,
        /// Rejected kind.
        kind: ValueKind,
    },

    /// A value could not be transformed into the field's domain type.
    #[error("invalid value \"{view}\" for field '{field}': {source}")]
    InvalidValue {
        /// Field name.
        field: String,
        /// The value as typed by the user.
        view: String,
        /// Underlying transformation failure.
        #[source]
        source: TransformError,
    },

    /// The lower bound of a range is higher than its upper bound.
    #[error("range \"{range}\" in field '{field}' has a lower bound above its upper bound")]
    InvalidRange {
        /// Field name.
        field: String,
        /// The range as typed by the user.
        range: String,
    },
}

/// Failure to turn a user supplied view value into a domain value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// The input is not a valid integer.
    #[error("not a valid integer")]
    InvalidInteger,

    /// The input is not a valid decimal number.
    #[error("not a valid decimal number")]
    InvalidDecimal,

    /// The input does not match the date pattern.
    #[error("not a valid date (expected pattern {pattern})")]
    InvalidDate {
        /// The chrono format pattern that was expected.
        pattern: String,
    },
}

/// Result type for search condition operations.
pub type ConditionResult<T> = std::result::Result<T, ConditionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unknown_field() {
        let err = ConditionError::UnknownField("price".to_string());
        assert_eq!(err.to_string(), "unknown field 'price'");
    }

    #[test]
    fn test_error_display_unsupported_kind() {
        let err = ConditionError::UnsupportedValueKind {
            field: "status".to_string(),
            kind: ValueKind::Range,
        };
        assert_eq!(err.to_string(), "field 'status' does not accept range values");
    }

    #[test]
    fn test_error_display_invalid_value() {
        let err = ConditionError::InvalidValue {
            field: "date".to_string(),
            view: "31.02.2010".to_string(),
            source: TransformError::InvalidDate {
                pattern: "%d.%m.%Y".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "invalid value \"31.02.2010\" for field 'date': not a valid date (expected pattern %d.%m.%Y)"
        );
    }
}
