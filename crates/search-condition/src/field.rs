//! Field configuration: the schema a search condition is checked against.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::comparator::{ValueComparator, ValueTransformer};

/// Field-specific configuration such as a date pattern.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldOptions(BTreeMap<String, serde_json::Value>);

impl FieldOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an option, returning the options for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Sets an option.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw option value.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// Option value as a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_str())
    }

    /// Option value as a boolean.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(|v| v.as_bool())
    }
}

/// Value kinds a field may or may not accept.
///
/// Simple and excluded simple values are always accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    /// Ranges and excluded ranges.
    Range,
    /// Comparisons.
    Compare,
    /// Pattern matchers.
    PatternMatch,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Range => write!(f, "range"),
            ValueKind::Compare => write!(f, "comparison"),
            ValueKind::PatternMatch => write!(f, "pattern match"),
        }
    }
}

/// Configuration of a single searchable field.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    name: String,
    comparator: Arc<dyn ValueComparator>,
    transformer: Arc<dyn ValueTransformer>,
    options: FieldOptions,
    accepts_ranges: bool,
    accepts_compares: bool,
    accepts_pattern_match: bool,
}

impl FieldConfig {
    /// Creates a field backed by a type that both compares and transforms
    /// its values (see [`crate::types`]).
    ///
    /// Only simple values are accepted until value kinds are enabled.
    pub fn new<T>(name: impl Into<String>, field_type: T) -> Self
    where
        T: ValueComparator + ValueTransformer + 'static,
    {
        let field_type = Arc::new(field_type);
        Self {
            name: name.into(),
            comparator: field_type.clone(),
            transformer: field_type,
            options: FieldOptions::default(),
            accepts_ranges: false,
            accepts_compares: false,
            accepts_pattern_match: false,
        }
    }

    /// Creates a field from separate comparator and transformer instances.
    pub fn from_parts(
        name: impl Into<String>,
        comparator: Arc<dyn ValueComparator>,
        transformer: Arc<dyn ValueTransformer>,
    ) -> Self {
        Self {
            name: name.into(),
            comparator,
            transformer,
            options: FieldOptions::default(),
            accepts_ranges: false,
            accepts_compares: false,
            accepts_pattern_match: false,
        }
    }

    /// Enables ranges and excluded ranges.
    pub fn with_ranges(mut self) -> Self {
        self.accepts_ranges = true;
        self
    }

    /// Enables comparisons.
    pub fn with_compares(mut self) -> Self {
        self.accepts_compares = true;
        self
    }

    /// Enables pattern matchers.
    pub fn with_pattern_match(mut self) -> Self {
        self.accepts_pattern_match = true;
        self
    }

    /// Replaces the field options.
    pub fn with_options(mut self, options: FieldOptions) -> Self {
        self.options = options;
        self
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Comparator of the field's type.
    pub fn value_comparator(&self) -> &dyn ValueComparator {
        self.comparator.as_ref()
    }

    /// Transformer of the field's type.
    pub fn value_transformer(&self) -> &dyn ValueTransformer {
        self.transformer.as_ref()
    }

    /// Field options.
    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// Returns true if the field accepts the value kind.
    pub fn supports_value_type(&self, kind: ValueKind) -> bool {
        match kind {
            ValueKind::Range => self.accepts_ranges,
            ValueKind::Compare => self.accepts_compares,
            ValueKind::PatternMatch => self.accepts_pattern_match,
        }
    }
}

/// The set of fields a search condition may reference.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    name: String,
    fields: IndexMap<String, FieldConfig>,
}

impl FieldSet {
    /// Creates an empty field set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Adds a field, returning the set for chaining.
    pub fn with_field(mut self, field: FieldConfig) -> Self {
        self.add(field);
        self
    }

    /// Adds or replaces a field.
    pub fn add(&mut self, field: FieldConfig) {
        self.fields.insert(field.name.clone(), field);
    }

    /// Name of the set.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a field by its exact name.
    pub fn get(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.get(name)
    }

    /// Looks up a field ignoring letter case.
    pub fn resolve(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.get(name).or_else(|| {
            self.fields
                .values()
                .find(|field| field.name.eq_ignore_ascii_case(name))
        })
    }

    /// Returns true if the field is registered.
    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns true if at least one field accepts the value kind.
    pub fn supports_value_type(&self, kind: ValueKind) -> bool {
        self.fields
            .values()
            .any(|field| field.supports_value_type(kind))
    }

    /// Fields in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldConfig> + '_ {
        self.fields.values()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the set has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
