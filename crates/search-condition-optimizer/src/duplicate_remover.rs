//! Removes duplicated values from every field.
//!
//! Each value kind is scanned on its own: a simple value and an excluded
//! value that are equal are not duplicates of each other. Of two equal
//! entries the one with the lower index is kept.

use search_condition::{
    MessageBag, PatternMatch, Range, RangeKind, SearchCondition, SingleValueKind, ValueCollection,
    ValuesBag,
};

use crate::traits::SearchConditionOptimizer;
use crate::walk::{walk_fields, FieldContext};

const DUPLICATE_VALUE: &str =
    "Duplicate value \"{{ value }}\" in field '{{ field }}' in group {{ group }} (removed).";
const DUPLICATE_EXCLUDED_VALUE: &str =
    "Duplicate excluded value \"{{ value }}\" in field '{{ field }}' in group {{ group }} (removed).";
const DUPLICATE_RANGE: &str =
    "Duplicate range \"{{ range }}\" in field '{{ field }}' in group {{ group }} (removed).";
const DUPLICATE_EXCLUDED_RANGE: &str =
    "Duplicate excluded range \"{{ range }}\" in field '{{ field }}' in group {{ group }} (removed).";
const DUPLICATE_COMPARISON: &str =
    "Duplicate comparison \"{{ comparison }}\" in field '{{ field }}' in group {{ group }} (removed).";
const DUPLICATE_PATTERN_MATCH: &str =
    "Duplicate pattern match \"{{ pattern }}\" in field '{{ field }}' in group {{ group }} (removed).";

/// Removes duplicate values, excluded values, ranges, excluded ranges,
/// comparisons and pattern matchers.
///
/// Duplicates are only detected within one field of one group.
#[derive(Debug, Clone, Default)]
pub struct DuplicateRemover {
    _private: (),
}

impl DuplicateRemover {
    /// Creates the pass.
    pub fn new() -> Self {
        Self::default()
    }

    fn process_bag(&self, ctx: &FieldContext<'_>, bag: &mut ValuesBag, messages: &mut MessageBag) {
        for (kind, template) in [
            (SingleValueKind::Simple, DUPLICATE_VALUE),
            (SingleValueKind::Excluded, DUPLICATE_EXCLUDED_VALUE),
        ] {
            let removed = remove_duplicates(bag.single_values_of_mut(kind), |a, b| {
                ctx.is_equal(&a.value, &b.value)
            });
            for value in removed {
                log::debug!("removed duplicate {:?} value {} from '{}'", kind, value, ctx.field);
                messages.add_info(ctx.info(template).with_param("value", &value.view));
            }
        }

        for (kind, template) in [
            (RangeKind::Range, DUPLICATE_RANGE),
            (RangeKind::ExcludedRange, DUPLICATE_EXCLUDED_RANGE),
        ] {
            let removed =
                remove_duplicates(bag.ranges_of_mut(kind), |a, b| is_same_range(ctx, a, b));
            for range in removed {
                log::debug!("removed duplicate {:?} {} from '{}'", kind, range, ctx.field);
                messages.add_info(ctx.info(template).with_param("range", &range));
            }
        }

        let removed = remove_duplicates(bag.comparisons_mut(), |a, b| {
            a.operator == b.operator && ctx.is_equal(&a.value.value, &b.value.value)
        });
        for compare in removed {
            log::debug!("removed duplicate comparison {} from '{}'", compare, ctx.field);
            messages.add_info(ctx.info(DUPLICATE_COMPARISON).with_param("comparison", &compare));
        }

        let removed = remove_duplicates(bag.pattern_matchers_mut(), is_same_pattern);
        for pattern in removed {
            log::debug!("removed duplicate pattern match {} from '{}'", pattern, ctx.field);
            messages.add_info(ctx.info(DUPLICATE_PATTERN_MATCH).with_param("pattern", &pattern));
        }
    }
}

impl SearchConditionOptimizer for DuplicateRemover {
    fn name(&self) -> &'static str {
        "duplicate-remover"
    }

    fn process(&self, condition: &mut SearchCondition, messages: &mut MessageBag) {
        walk_fields(condition, |ctx, bag| self.process_bag(ctx, bag, messages));
    }

    fn priority(&self) -> i32 {
        20
    }
}

/// Removes every entry equal to an entry with a lower index.
///
/// Returns the removed entries in removal order.
fn remove_duplicates<T, F>(collection: &mut ValueCollection<T>, is_duplicate: F) -> Vec<T>
where
    F: Fn(&T, &T) -> bool,
{
    let indices = collection.indices();
    let mut removed = Vec::new();

    for (pos, &kept) in indices.iter().enumerate() {
        for &candidate in &indices[pos + 1..] {
            let duplicate = match (collection.get(kept), collection.get(candidate)) {
                (Some(a), Some(b)) => is_duplicate(a, b),
                _ => false,
            };
            if duplicate {
                removed.extend(collection.remove(candidate));
            }
        }
    }

    removed
}

fn is_same_range(ctx: &FieldContext<'_>, a: &Range, b: &Range) -> bool {
    a.lower_inclusive == b.lower_inclusive
        && a.upper_inclusive == b.upper_inclusive
        && ctx.is_equal(&a.lower.value, &b.lower.value)
        && ctx.is_equal(&a.upper.value, &b.upper.value)
}

/// Patterns are text regardless of the field type, so they are compared
/// as text; case is folded when both are case insensitive.
fn is_same_pattern(a: &PatternMatch, b: &PatternMatch) -> bool {
    if a.kind != b.kind || a.case_insensitive != b.case_insensitive {
        return false;
    }
    if a.case_insensitive {
        a.value.to_lowercase() == b.value.to_lowercase()
    } else {
        a.value == b.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_condition::{
        parse, DateType, FieldConfig, FieldSet, IntegerType, Severity, TextType,
    };

    fn field_set() -> FieldSet {
        FieldSet::new("test")
            .with_field(
                FieldConfig::new("user", IntegerType)
                    .with_ranges()
                    .with_compares(),
            )
            .with_field(FieldConfig::new("status", TextType).with_pattern_match())
            .with_field(FieldConfig::new("date", DateType))
    }

    fn optimize(input: &str) -> (SearchCondition, MessageBag) {
        let mut condition = parse(input, &field_set()).unwrap();
        let mut messages = MessageBag::new();
        DuplicateRemover::new().process(&mut condition, &mut messages);
        (condition, messages)
    }

    fn views(condition: &SearchCondition, field: &str) -> Vec<String> {
        condition
            .values_group()
            .field(field)
            .unwrap()
            .simple_values()
            .values()
            .map(|v| v.view.clone())
            .collect()
    }

    #[test]
    fn test_removes_duplicate_simple_values() {
        let (condition, messages) = optimize("date: 29.10.2010, 29.10.2010");
        assert_eq!(views(&condition, "date"), vec!["29.10.2010"]);
        assert_eq!(
            messages.rendered(),
            vec!["Duplicate value \"29.10.2010\" in field 'date' in group 1 (removed)."]
        );
        assert!(messages.iter().all(|m| m.severity == Severity::Info));
    }

    #[test]
    fn test_earlier_index_survives() {
        let (condition, _) = optimize("user: 1, 2, 1, 3, 2, 1");
        let bag = condition.values_group().field("user").unwrap();
        assert_eq!(bag.simple_values().indices(), vec![0, 1, 3]);
    }

    #[test]
    fn test_kinds_are_independent() {
        let (condition, messages) = optimize("user: 5, !5, 1-5, !1-5, >5");
        assert!(messages.is_empty());
        assert_eq!(condition.values_group().field("user").unwrap().count(), 5);
    }

    #[test]
    fn test_excluded_values() {
        let (condition, messages) = optimize("user: !3, !3, !4");
        let bag = condition.values_group().field("user").unwrap();
        assert_eq!(bag.excluded_simple_values().len(), 2);
        assert_eq!(
            messages.rendered(),
            vec!["Duplicate excluded value \"3\" in field 'user' in group 1 (removed)."]
        );
    }

    #[test]
    fn test_ranges_need_matching_inclusiveness() {
        let (condition, messages) = optimize("user: 1-10, ]1-10, 1-10, !2-3, !2-3");
        let bag = condition.values_group().field("user").unwrap();
        assert_eq!(bag.ranges().len(), 2);
        assert_eq!(bag.excluded_ranges().len(), 1);
        assert_eq!(
            messages.rendered(),
            vec![
                "Duplicate range \"1-10\" in field 'user' in group 1 (removed).",
                "Duplicate excluded range \"2-3\" in field 'user' in group 1 (removed).",
            ]
        );
    }

    #[test]
    fn test_comparisons_need_matching_operator() {
        let (condition, messages) = optimize("user: >5, >=5, >5, <5");
        let bag = condition.values_group().field("user").unwrap();
        assert_eq!(bag.comparisons().len(), 3);
        assert_eq!(
            messages.rendered(),
            vec!["Duplicate comparison \">5\" in field 'user' in group 1 (removed)."]
        );
    }

    #[test]
    fn test_pattern_matchers() {
        let (condition, messages) = optimize("status: ~*foo, ~*foo, ~i*FOO, ~i*foo, ~>foo, ~*Foo");
        let bag = condition.values_group().field("status").unwrap();
        assert_eq!(bag.pattern_matchers().indices(), vec![0, 2, 4, 5]);
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages.rendered()[1],
            "Duplicate pattern match \"~i*foo\" in field 'status' in group 1 (removed)."
        );
    }

    #[test]
    fn test_values_in_other_groups_are_not_duplicates() {
        let (condition, messages) = optimize("user: 1; (user: 1, 1)");
        assert_eq!(views(&condition, "user"), vec!["1"]);
        assert_eq!(
            messages.rendered(),
            vec!["Duplicate value \"1\" in field 'user' in group 2 (removed)."]
        );
        let child = &condition.values_group().groups()[0];
        assert_eq!(child.field("user").unwrap().simple_values().len(), 1);
    }

    #[test]
    fn test_remove_duplicates_helper() {
        let mut collection: ValueCollection<i32> = [1, 2, 2, 3, 1].into_iter().collect();
        let removed = remove_duplicates(&mut collection, |a, b| a == b);
        assert_eq!(removed, vec![1, 2]);
        assert_eq!(collection.indices(), vec![0, 1, 3]);
    }
}
