//! Value types held by a [`ValuesBag`](crate::ValuesBag).

use std::fmt;

use chrono::NaiveDate;

// =============================================================================
// Domain values
// =============================================================================

/// A domain value after transformation from user input.
///
/// Ordering and equality between values are never decided here; they are
/// the business of the field's [`ValueComparator`](crate::ValueComparator).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Whole number.
    Integer(i64),
    /// Decimal number.
    Decimal(f64),
    /// Calendar date.
    Date(NaiveDate),
    /// Free text.
    Text(String),
}

impl Value {
    /// Short name of the variant, used in diagnostics for contract violations.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::Date(_) => "date",
            Value::Text(_) => "text",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Value::Text(v) => write!(f, "{}", v),
        }
    }
}

/// A single value together with the text the user typed for it.
///
/// The view is kept so diagnostics and exporters can show the value
/// exactly as it was given.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SingleValue {
    /// Domain value.
    pub value: Value,
    /// Original textual representation.
    pub view: String,
}

impl SingleValue {
    /// Creates a single value from its domain value and view.
    pub fn new(value: Value, view: impl Into<String>) -> Self {
        Self {
            value,
            view: view.into(),
        }
    }

    /// Creates a single value whose view is the display form of the value.
    pub fn from_value(value: Value) -> Self {
        let view = value.to_string();
        Self { value, view }
    }
}

impl fmt::Display for SingleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.view)
    }
}

/// Selects the simple or the excluded single value collection of a bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SingleValueKind {
    /// Values the field must match.
    Simple,
    /// Values the field must not match.
    Excluded,
}

// =============================================================================
// Ranges
// =============================================================================

/// A range between two bounds.
///
/// `lower <= upper` is expected to hold under the field's comparator; the
/// input processor validates it, the range itself does not.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    /// Lower bound.
    pub lower: SingleValue,
    /// Upper bound.
    pub upper: SingleValue,
    /// Whether the lower bound itself is part of the range.
    pub lower_inclusive: bool,
    /// Whether the upper bound itself is part of the range.
    pub upper_inclusive: bool,
}

impl Range {
    /// Creates a range that includes both bounds.
    pub fn new(lower: SingleValue, upper: SingleValue) -> Self {
        Self {
            lower,
            upper,
            lower_inclusive: true,
            upper_inclusive: true,
        }
    }

    /// Creates a range with explicit inclusiveness for both bounds.
    pub fn with_bounds(
        lower: SingleValue,
        upper: SingleValue,
        lower_inclusive: bool,
        upper_inclusive: bool,
    ) -> Self {
        Self {
            lower,
            upper,
            lower_inclusive,
            upper_inclusive,
        }
    }

    /// Returns true if both bounds are inclusive.
    pub fn is_inclusive(&self) -> bool {
        self.lower_inclusive && self.upper_inclusive
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.lower_inclusive {
            write!(f, "]")?;
        }
        write!(f, "{}-{}", self.lower, self.upper)?;
        if !self.upper_inclusive {
            write!(f, "[")?;
        }
        Ok(())
    }
}

/// Selects the normal or the excluded range collection of a bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RangeKind {
    /// Ranges the field must fall in.
    Range,
    /// Ranges the field must not fall in.
    ExcludedRange,
}

// =============================================================================
// Comparisons
// =============================================================================

/// Operator of a [`Compare`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompareOperator {
    /// `<`
    Lower,
    /// `<=`
    LowerOrEqual,
    /// `>`
    Higher,
    /// `>=`
    HigherOrEqual,
    /// `<>`
    NotEqual,
}

impl CompareOperator {
    /// Returns the strict operator an inclusive operator covers.
    ///
    /// `>=` covers `>` and `<=` covers `<`; every other operator covers nothing.
    pub fn covered_strict(self) -> Option<CompareOperator> {
        match self {
            CompareOperator::HigherOrEqual => Some(CompareOperator::Higher),
            CompareOperator::LowerOrEqual => Some(CompareOperator::Lower),
            _ => None,
        }
    }

    /// Textual form of the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOperator::Lower => "<",
            CompareOperator::LowerOrEqual => "<=",
            CompareOperator::Higher => ">",
            CompareOperator::HigherOrEqual => ">=",
            CompareOperator::NotEqual => "<>",
        }
    }
}

impl fmt::Display for CompareOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A comparison such as `>=10`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Compare {
    /// Comparison operator.
    pub operator: CompareOperator,
    /// Value compared against.
    pub value: SingleValue,
}

impl Compare {
    /// Creates a comparison.
    pub fn new(operator: CompareOperator, value: SingleValue) -> Self {
        Self { operator, value }
    }
}

impl fmt::Display for Compare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.value)
    }
}

// =============================================================================
// Pattern matchers
// =============================================================================

/// How a [`PatternMatch`] is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternMatchType {
    /// Value contains the pattern.
    Contains,
    /// Value starts with the pattern.
    StartsWith,
    /// Value ends with the pattern.
    EndsWith,
    /// Value equals the pattern.
    Equals,
    /// Value matches the regular expression.
    Regex,
    /// Value does not contain the pattern.
    NotContains,
    /// Value does not start with the pattern.
    NotStartsWith,
    /// Value does not end with the pattern.
    NotEndsWith,
    /// Value does not equal the pattern.
    NotEquals,
    /// Value does not match the regular expression.
    NotRegex,
}

impl PatternMatchType {
    /// Returns true for the negated variants.
    pub fn is_negated(self) -> bool {
        matches!(
            self,
            PatternMatchType::NotContains
                | PatternMatchType::NotStartsWith
                | PatternMatchType::NotEndsWith
                | PatternMatchType::NotEquals
                | PatternMatchType::NotRegex
        )
    }

    /// The marker character used in the query syntax.
    pub fn marker(self) -> char {
        match self {
            PatternMatchType::Contains | PatternMatchType::NotContains => '*',
            PatternMatchType::StartsWith | PatternMatchType::NotStartsWith => '>',
            PatternMatchType::EndsWith | PatternMatchType::NotEndsWith => '<',
            PatternMatchType::Equals | PatternMatchType::NotEquals => '=',
            PatternMatchType::Regex | PatternMatchType::NotRegex => '?',
        }
    }

    /// Resolves a marker character and negation flag to a type.
    pub fn from_marker(marker: char, negated: bool) -> Option<Self> {
        let kind = match (marker, negated) {
            ('*', false) => PatternMatchType::Contains,
            ('>', false) => PatternMatchType::StartsWith,
            ('<', false) => PatternMatchType::EndsWith,
            ('=', false) => PatternMatchType::Equals,
            ('?', false) => PatternMatchType::Regex,
            ('*', true) => PatternMatchType::NotContains,
            ('>', true) => PatternMatchType::NotStartsWith,
            ('<', true) => PatternMatchType::NotEndsWith,
            ('=', true) => PatternMatchType::NotEquals,
            ('?', true) => PatternMatchType::NotRegex,
            _ => return None,
        };
        Some(kind)
    }
}

/// A textual pattern matcher such as `~*foo` (contains "foo").
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternMatch {
    /// Match type.
    pub kind: PatternMatchType,
    /// Pattern text.
    pub value: String,
    /// Whether letter case is ignored while matching.
    pub case_insensitive: bool,
}

impl PatternMatch {
    /// Creates a case sensitive pattern matcher.
    pub fn new(kind: PatternMatchType, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            case_insensitive: false,
        }
    }

    /// Sets case insensitivity.
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }
}

impl fmt::Display for PatternMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "~")?;
        if self.case_insensitive {
            write!(f, "i")?;
        }
        if self.kind.is_negated() {
            write!(f, "!")?;
        }
        write!(f, "{}{}", self.kind.marker(), self.value)
    }
}
