//! The top-level search condition.

use indexmap::IndexMap;

use crate::field::FieldSet;
use crate::group::ValuesGroup;

/// Sort direction of an ordered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

/// Requested result ordering, by field in priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOrder {
    fields: IndexMap<String, Direction>,
}

impl SearchOrder {
    /// Creates an empty ordering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, returning the ordering for chaining.
    pub fn with(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.fields.insert(field.into(), direction);
        self
    }

    /// Ordered fields in priority order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Direction)> + '_ {
        self.fields.iter().map(|(name, dir)| (name.as_str(), *dir))
    }
}

/// A field set paired with the values group built against it.
///
/// The primary condition is an application-supplied constraint that is
/// always applied next to the user's condition. Optimizers leave it as is.
#[derive(Debug, Clone)]
pub struct SearchCondition {
    field_set: FieldSet,
    values_group: ValuesGroup,
    primary_condition: Option<ValuesGroup>,
    order: Option<SearchOrder>,
}

impl SearchCondition {
    /// Creates a condition.
    pub fn new(field_set: FieldSet, values_group: ValuesGroup) -> Self {
        Self {
            field_set,
            values_group,
            primary_condition: None,
            order: None,
        }
    }

    /// Sets the primary condition.
    pub fn with_primary_condition(mut self, primary: ValuesGroup) -> Self {
        self.primary_condition = Some(primary);
        self
    }

    /// Sets the ordering.
    pub fn with_order(mut self, order: SearchOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Field set.
    pub fn field_set(&self) -> &FieldSet {
        &self.field_set
    }

    /// Root values group.
    pub fn values_group(&self) -> &ValuesGroup {
        &self.values_group
    }

    /// Mutable root values group.
    pub fn values_group_mut(&mut self) -> &mut ValuesGroup {
        &mut self.values_group
    }

    /// Borrows the field set and the mutable root group together.
    pub fn split_mut(&mut self) -> (&FieldSet, &mut ValuesGroup) {
        (&self.field_set, &mut self.values_group)
    }

    /// Primary condition, if any.
    pub fn primary_condition(&self) -> Option<&ValuesGroup> {
        self.primary_condition.as_ref()
    }

    /// Ordering, if any.
    pub fn order(&self) -> Option<&SearchOrder> {
        self.order.as_ref()
    }
}
