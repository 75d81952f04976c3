//! Boolean tree nodes of a search condition.

use std::fmt;

use indexmap::IndexMap;

use crate::bag::ValuesBag;

/// How the fields and subgroups of a [`ValuesGroup`] are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Logical {
    /// Everything must match.
    #[default]
    And,
    /// Any one must match.
    Or,
}

impl fmt::Display for Logical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Logical::And => write!(f, "AND"),
            Logical::Or => write!(f, "OR"),
        }
    }
}

/// A node in the condition tree.
///
/// Holds at most one [`ValuesBag`] per field plus nested child groups.
/// Children are owned by value; the tree has no back references.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValuesGroup {
    fields: IndexMap<String, ValuesBag>,
    groups: Vec<ValuesGroup>,
    logical: Logical,
}

impl ValuesGroup {
    /// Creates an empty AND group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty group with the given logical operator.
    pub fn with_logical(logical: Logical) -> Self {
        Self {
            logical,
            ..Self::default()
        }
    }

    /// Logical operator of this group.
    pub fn logical(&self) -> Logical {
        self.logical
    }

    /// Sets the logical operator.
    pub fn set_logical(&mut self, logical: Logical) {
        self.logical = logical;
    }

    /// Sets the values of a field, replacing any previous bag.
    pub fn add_field(&mut self, name: impl Into<String>, bag: ValuesBag) {
        self.fields.insert(name.into(), bag);
    }

    /// Returns true if the field has a bag in this group.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Values of a field.
    pub fn field(&self, name: &str) -> Option<&ValuesBag> {
        self.fields.get(name)
    }

    /// Mutable values of a field.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut ValuesBag> {
        self.fields.get_mut(name)
    }

    /// Removes a field's bag.
    pub fn remove_field(&mut self, name: &str) -> Option<ValuesBag> {
        self.fields.shift_remove(name)
    }

    /// Fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &ValuesBag)> + '_ {
        self.fields.iter().map(|(name, bag)| (name.as_str(), bag))
    }

    /// Mutable fields in insertion order.
    pub fn fields_mut(&mut self) -> impl Iterator<Item = (&str, &mut ValuesBag)> + '_ {
        self.fields.iter_mut().map(|(name, bag)| (name.as_str(), bag))
    }

    /// Appends a child group.
    pub fn add_group(&mut self, group: ValuesGroup) {
        self.groups.push(group);
    }

    /// Child groups.
    pub fn groups(&self) -> &[ValuesGroup] {
        &self.groups
    }

    /// Mutable child groups.
    pub fn groups_mut(&mut self) -> &mut [ValuesGroup] {
        &mut self.groups
    }

    /// Returns true if the group has fields.
    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Returns true if the group has neither fields nor child groups.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.groups.is_empty()
    }
}
