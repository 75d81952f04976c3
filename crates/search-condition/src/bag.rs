//! Per-field value storage.

use std::collections::BTreeMap;

use crate::value::{Compare, PatternMatch, Range, RangeKind, SingleValue, SingleValueKind};

/// An ordered collection whose entries keep the index they were added at.
///
/// Removing an entry never renumbers the others, and an index is never
/// handed out twice. Diagnostics refer to entries by these indices, so they
/// stay valid while optimizer passes remove entries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueCollection<T> {
    entries: BTreeMap<usize, T>,
    next_index: usize,
}

impl<T> Default for ValueCollection<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_index: 0,
        }
    }
}

impl<T> ValueCollection<T> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value and returns its index.
    pub fn push(&mut self, value: T) -> usize {
        let index = self.next_index;
        self.entries.insert(index, value);
        self.next_index += 1;
        index
    }

    /// Removes the value at `index`, leaving every other index untouched.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        self.entries.remove(&index)
    }

    /// Returns the value at `index` if it is still present.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(&index)
    }

    /// Returns true if `index` is still present.
    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    /// Number of present values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no values are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates present values with their indices, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.entries.iter().map(|(index, value)| (*index, value))
    }

    /// Iterates present values in index order.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.values()
    }

    /// Snapshot of the present indices.
    ///
    /// Passes that remove entries while scanning iterate over this snapshot
    /// and check [`contains`](Self::contains) before acting on an index.
    pub fn indices(&self) -> Vec<usize> {
        self.entries.keys().copied().collect()
    }
}

impl<T> FromIterator<T> for ValueCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        for value in iter {
            collection.push(value);
        }
        collection
    }
}

/// All values given for one field within one group.
///
/// Each value kind lives in its own [`ValueCollection`] with its own
/// index space.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValuesBag {
    simple_values: ValueCollection<SingleValue>,
    excluded_simple_values: ValueCollection<SingleValue>,
    ranges: ValueCollection<Range>,
    excluded_ranges: ValueCollection<Range>,
    comparisons: ValueCollection<Compare>,
    pattern_matchers: ValueCollection<PatternMatch>,
}

impl ValuesBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a simple value and returns its index.
    pub fn add_simple_value(&mut self, value: SingleValue) -> usize {
        self.simple_values.push(value)
    }

    /// Adds an excluded simple value and returns its index.
    pub fn add_excluded_simple_value(&mut self, value: SingleValue) -> usize {
        self.excluded_simple_values.push(value)
    }

    /// Adds a range and returns its index.
    pub fn add_range(&mut self, range: Range) -> usize {
        self.ranges.push(range)
    }

    /// Adds an excluded range and returns its index.
    pub fn add_excluded_range(&mut self, range: Range) -> usize {
        self.excluded_ranges.push(range)
    }

    /// Adds a comparison and returns its index.
    pub fn add_comparison(&mut self, compare: Compare) -> usize {
        self.comparisons.push(compare)
    }

    /// Adds a pattern matcher and returns its index.
    pub fn add_pattern_match(&mut self, pattern: PatternMatch) -> usize {
        self.pattern_matchers.push(pattern)
    }

    /// Simple values.
    pub fn simple_values(&self) -> &ValueCollection<SingleValue> {
        &self.simple_values
    }

    /// Excluded simple values.
    pub fn excluded_simple_values(&self) -> &ValueCollection<SingleValue> {
        &self.excluded_simple_values
    }

    /// Ranges.
    pub fn ranges(&self) -> &ValueCollection<Range> {
        &self.ranges
    }

    /// Excluded ranges.
    pub fn excluded_ranges(&self) -> &ValueCollection<Range> {
        &self.excluded_ranges
    }

    /// Comparisons.
    pub fn comparisons(&self) -> &ValueCollection<Compare> {
        &self.comparisons
    }

    /// Mutable comparisons.
    pub fn comparisons_mut(&mut self) -> &mut ValueCollection<Compare> {
        &mut self.comparisons
    }

    /// Pattern matchers.
    pub fn pattern_matchers(&self) -> &ValueCollection<PatternMatch> {
        &self.pattern_matchers
    }

    /// Mutable pattern matchers.
    pub fn pattern_matchers_mut(&mut self) -> &mut ValueCollection<PatternMatch> {
        &mut self.pattern_matchers
    }

    /// Single value collection selected by `kind`.
    pub fn single_values_of(&self, kind: SingleValueKind) -> &ValueCollection<SingleValue> {
        match kind {
            SingleValueKind::Simple => &self.simple_values,
            SingleValueKind::Excluded => &self.excluded_simple_values,
        }
    }

    /// Mutable single value collection selected by `kind`.
    pub fn single_values_of_mut(
        &mut self,
        kind: SingleValueKind,
    ) -> &mut ValueCollection<SingleValue> {
        match kind {
            SingleValueKind::Simple => &mut self.simple_values,
            SingleValueKind::Excluded => &mut self.excluded_simple_values,
        }
    }

    /// Range collection selected by `kind`.
    pub fn ranges_of(&self, kind: RangeKind) -> &ValueCollection<Range> {
        match kind {
            RangeKind::Range => &self.ranges,
            RangeKind::ExcludedRange => &self.excluded_ranges,
        }
    }

    /// Mutable range collection selected by `kind`.
    pub fn ranges_of_mut(&mut self, kind: RangeKind) -> &mut ValueCollection<Range> {
        match kind {
            RangeKind::Range => &mut self.ranges,
            RangeKind::ExcludedRange => &mut self.excluded_ranges,
        }
    }

    /// Borrows a range collection and a single value collection at once.
    pub fn ranges_and_values_mut(
        &mut self,
        range_kind: RangeKind,
        value_kind: SingleValueKind,
    ) -> (&ValueCollection<Range>, &mut ValueCollection<SingleValue>) {
        let ranges = match range_kind {
            RangeKind::Range => &self.ranges,
            RangeKind::ExcludedRange => &self.excluded_ranges,
        };
        let values = match value_kind {
            SingleValueKind::Simple => &mut self.simple_values,
            SingleValueKind::Excluded => &mut self.excluded_simple_values,
        };
        (ranges, values)
    }

    /// Returns true if any range or excluded range is present.
    pub fn has_ranges(&self) -> bool {
        !self.ranges.is_empty() || !self.excluded_ranges.is_empty()
    }

    /// Total number of values over all kinds.
    pub fn count(&self) -> usize {
        self.simple_values.len()
            + self.excluded_simple_values.len()
            + self.ranges.len()
            + self.excluded_ranges.len()
            + self.comparisons.len()
            + self.pattern_matchers.len()
    }

    /// Returns true if the bag holds no values at all.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn int(v: i64) -> SingleValue {
        SingleValue::new(Value::Integer(v), v.to_string())
    }

    #[test]
    fn test_removal_keeps_other_indices() {
        let mut collection: ValueCollection<SingleValue> = (1..=5).map(int).collect();
        assert_eq!(collection.indices(), vec![0, 1, 2, 3, 4]);

        let removed = collection.remove(2).unwrap();
        assert_eq!(removed.view, "3");
        assert_eq!(collection.indices(), vec![0, 1, 3, 4]);
        assert_eq!(collection.get(3).unwrap().view, "4");
        assert!(!collection.contains(2));
    }

    #[test]
    fn test_indices_are_never_reused() {
        let mut collection = ValueCollection::new();
        let first = collection.push(int(1));
        collection.remove(first);
        let second = collection.push(int(2));
        assert_ne!(first, second);
        assert_eq!(second, 1);
    }

    #[test]
    fn test_remove_missing_index() {
        let mut collection: ValueCollection<SingleValue> = ValueCollection::new();
        assert!(collection.remove(7).is_none());
        assert!(collection.is_empty());
    }

    #[test]
    fn test_bag_kind_selectors() {
        let mut bag = ValuesBag::new();
        bag.add_simple_value(int(1));
        bag.add_excluded_simple_value(int(2));
        bag.add_range(Range::new(int(1), int(5)));
        bag.add_excluded_range(Range::new(int(6), int(9)));

        assert_eq!(bag.single_values_of(SingleValueKind::Simple).len(), 1);
        assert_eq!(bag.single_values_of(SingleValueKind::Excluded).len(), 1);
        assert_eq!(bag.ranges_of(RangeKind::Range).len(), 1);
        assert_eq!(bag.ranges_of(RangeKind::ExcludedRange).len(), 1);
        assert!(bag.has_ranges());
        assert_eq!(bag.count(), 4);

        bag.ranges_of_mut(RangeKind::ExcludedRange).remove(0);
        assert_eq!(bag.excluded_ranges().len(), 0);
        assert_eq!(bag.ranges().len(), 1);
    }

    #[test]
    fn test_empty_bag() {
        let bag = ValuesBag::new();
        assert!(bag.is_empty());
        assert!(!bag.has_ranges());
    }
}
