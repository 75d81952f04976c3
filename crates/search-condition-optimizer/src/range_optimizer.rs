//! Range normalization.
//!
//! For ranges and excluded ranges separately, in this order:
//!
//! 1. ranges fully covered by another range are removed,
//! 2. connected ranges (`1-10` and `10-20`) are merged, repeatedly, so a
//!    chain collapses into one range,
//! 3. single values inside a range are removed (simple values against
//!    ranges, excluded values against excluded ranges).
//!
//! Afterwards an excluded range with the same bounds as a range is
//! reported as an error: the condition can never match.

use search_condition::{
    MessageBag, Range, RangeKind, SearchCondition, SingleValue, SingleValueKind, ValueCollection,
    ValueKind, ValuesBag,
};

use crate::traits::SearchConditionOptimizer;
use crate::walk::{walk_fields, FieldContext};

const RANGE_COVERED: &str = "Range \"{{ range1 }}\" in field '{{ field }}' in group {{ group }} is already covered by \"{{ range2 }}\" (removed).";
const RANGES_MERGED: &str = "Ranges \"{{ range1 }}\" and \"{{ range2 }}\" in field '{{ field }}' in group {{ group }} are connected and were merged into \"{{ range3 }}\".";
const VALUE_COVERED: &str = "Value \"{{ value }}\" in field '{{ field }}' in group {{ group }} is already covered by range \"{{ range }}\" (removed).";
const EXCLUDED_RANGE_CONFLICT: &str = "Excluded range \"{{ range }}\" also exists as a normal range in field '{{ field }}' in group {{ group }}.";

/// Removes covered ranges and values and merges connected ranges.
#[derive(Debug, Clone, Default)]
pub struct RangeOptimizer {
    _private: (),
}

impl RangeOptimizer {
    /// Creates the pass.
    pub fn new() -> Self {
        Self::default()
    }

    fn process_bag(&self, ctx: &FieldContext<'_>, bag: &mut ValuesBag, messages: &mut MessageBag) {
        if !bag.has_ranges() {
            return;
        }

        for (range_kind, value_kind) in [
            (RangeKind::Range, SingleValueKind::Simple),
            (RangeKind::ExcludedRange, SingleValueKind::Excluded),
        ] {
            let ranges = bag.ranges_of_mut(range_kind);
            remove_overlapping_ranges(ctx, ranges, messages);
            if optimize_connected_ranges(ctx, ranges, messages) {
                remove_overlapping_ranges(ctx, ranges, messages);
            }

            let (ranges, values) = bag.ranges_and_values_mut(range_kind, value_kind);
            remove_overlapping_single_values(ctx, ranges, values, messages);
        }

        report_excluded_conflicts(ctx, bag, messages);
    }
}

impl SearchConditionOptimizer for RangeOptimizer {
    fn name(&self) -> &'static str {
        "range-optimizer"
    }

    fn process(&self, condition: &mut SearchCondition, messages: &mut MessageBag) {
        if !condition.field_set().supports_value_type(ValueKind::Range) {
            log::trace!("no field supports ranges, skipping {}", self.name());
            return;
        }

        walk_fields(condition, |ctx, bag| self.process_bag(ctx, bag, messages));
    }
}

fn remove_overlapping_ranges(
    ctx: &FieldContext<'_>,
    ranges: &mut ValueCollection<Range>,
    messages: &mut MessageBag,
) {
    let indices = ranges.indices();

    for &outer in &indices {
        for &inner in &indices {
            if outer == inner {
                continue;
            }
            let covered = match (ranges.get(inner), ranges.get(outer)) {
                (Some(a), Some(b)) => is_range_in_range(ctx, a, b),
                _ => false,
            };
            if !covered {
                continue;
            }

            if let Some(removed) = ranges.remove(inner) {
                let Some(kept) = ranges.get(outer) else {
                    continue;
                };
                log::debug!("removed range {} of '{}', covered by {}", removed, ctx.field, kept);
                messages.add_info(
                    ctx.info(RANGE_COVERED)
                        .with_param("range1", &removed)
                        .with_param("range2", kept),
                );
            }
        }
    }
}

/// Merges connected ranges until no pair is left. Returns true if any
/// range was merged.
fn optimize_connected_ranges(
    ctx: &FieldContext<'_>,
    ranges: &mut ValueCollection<Range>,
    messages: &mut MessageBag,
) -> bool {
    let mut merged_any = false;

    while let Some((first, second)) = find_connected_pair(ctx, ranges) {
        let (Some(a), Some(b)) = (ranges.remove(first), ranges.remove(second)) else {
            break;
        };
        let merged = Range::with_bounds(
            a.lower.clone(),
            b.upper.clone(),
            a.lower_inclusive,
            b.upper_inclusive,
        );

        log::debug!("merged ranges {} and {} of '{}' into {}", a, b, ctx.field, merged);
        messages.add_info(
            ctx.info(RANGES_MERGED)
                .with_param("range1", &a)
                .with_param("range2", &b)
                .with_param("range3", &merged),
        );
        ranges.push(merged);
        merged_any = true;
    }

    merged_any
}

fn find_connected_pair(
    ctx: &FieldContext<'_>,
    ranges: &ValueCollection<Range>,
) -> Option<(usize, usize)> {
    for (i, a) in ranges.iter() {
        for (c, b) in ranges.iter() {
            if i != c && is_connected(ctx, a, b) {
                return Some((i, c));
            }
        }
    }
    None
}

/// True if `b` starts where `a` ends and both share their bound flags.
///
/// `]1-5[` and `]5-10[` are not connected: neither contains 5.
fn is_connected(ctx: &FieldContext<'_>, a: &Range, b: &Range) -> bool {
    a.lower_inclusive == b.lower_inclusive
        && a.upper_inclusive == b.upper_inclusive
        && (a.upper_inclusive || b.lower_inclusive)
        && ctx.is_equal(&a.upper.value, &b.lower.value)
}

fn remove_overlapping_single_values(
    ctx: &FieldContext<'_>,
    ranges: &ValueCollection<Range>,
    values: &mut ValueCollection<SingleValue>,
    messages: &mut MessageBag,
) {
    for range in ranges.values() {
        for index in values.indices() {
            let inside = values
                .get(index)
                .is_some_and(|value| is_value_in_range(ctx, value, range));
            if !inside {
                continue;
            }

            if let Some(removed) = values.remove(index) {
                log::debug!("removed value {} of '{}', covered by {}", removed, ctx.field, range);
                messages.add_info(
                    ctx.info(VALUE_COVERED)
                        .with_param("value", &removed.view)
                        .with_param("range", range),
                );
            }
        }
    }
}

fn report_excluded_conflicts(ctx: &FieldContext<'_>, bag: &ValuesBag, messages: &mut MessageBag) {
    for excluded in bag.excluded_ranges().values() {
        let conflicts = bag.ranges().values().any(|range| {
            ctx.is_equal(&range.lower.value, &excluded.lower.value)
                && ctx.is_equal(&range.upper.value, &excluded.upper.value)
        });
        if conflicts {
            log::debug!("excluded range {} of '{}' is also a range", excluded, ctx.field);
            messages.add_error(ctx.error(EXCLUDED_RANGE_CONFLICT).with_param("range", excluded));
        }
    }
}

/// True if `inner` lies within `outer`.
///
/// On equal bounds `inner` is covered unless `outer` excludes the bound
/// and `inner` includes it.
fn is_range_in_range(ctx: &FieldContext<'_>, inner: &Range, outer: &Range) -> bool {
    let lower = if ctx.is_equal(&inner.lower.value, &outer.lower.value) {
        outer.lower_inclusive || !inner.lower_inclusive
    } else {
        ctx.is_higher(&inner.lower.value, &outer.lower.value)
    };

    let upper = if ctx.is_equal(&inner.upper.value, &outer.upper.value) {
        outer.upper_inclusive || !inner.upper_inclusive
    } else {
        ctx.is_lower(&inner.upper.value, &outer.upper.value)
    };

    lower && upper
}

fn is_value_in_range(ctx: &FieldContext<'_>, value: &SingleValue, range: &Range) -> bool {
    let above_lower = if ctx.is_equal(&value.value, &range.lower.value) {
        range.lower_inclusive
    } else {
        ctx.is_higher(&value.value, &range.lower.value)
    };

    let below_upper = if ctx.is_equal(&value.value, &range.upper.value) {
        range.upper_inclusive
    } else {
        ctx.is_lower(&value.value, &range.upper.value)
    };

    above_lower && below_upper
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_condition::{parse, DateType, FieldConfig, FieldSet, IntegerType, Severity, TextType};

    fn field_set() -> FieldSet {
        FieldSet::new("test")
            .with_field(FieldConfig::new("user", IntegerType).with_ranges())
            .with_field(FieldConfig::new("date", DateType).with_ranges())
    }

    fn optimize(input: &str) -> (SearchCondition, MessageBag) {
        let mut condition = parse(input, &field_set()).unwrap();
        let mut messages = MessageBag::new();
        RangeOptimizer::new().process(&mut condition, &mut messages);
        (condition, messages)
    }

    fn ranges(condition: &SearchCondition, field: &str, kind: RangeKind) -> Vec<String> {
        condition
            .values_group()
            .field(field)
            .unwrap()
            .ranges_of(kind)
            .values()
            .map(|r| r.to_string())
            .collect()
    }

    fn values(condition: &SearchCondition, field: &str, kind: SingleValueKind) -> Vec<String> {
        condition
            .values_group()
            .field(field)
            .unwrap()
            .single_values_of(kind)
            .values()
            .map(|v| v.view.clone())
            .collect()
    }

    #[test]
    fn test_covered_range_is_removed() {
        let (condition, messages) = optimize("user: 5-10, 1-20");
        assert_eq!(ranges(&condition, "user", RangeKind::Range), vec!["1-20"]);
        assert_eq!(
            messages.rendered(),
            vec!["Range \"5-10\" in field 'user' in group 1 is already covered by \"1-20\" (removed)."]
        );
    }

    #[test]
    fn test_exclusive_outer_bound_does_not_cover_inclusive_inner() {
        let (condition, messages) = optimize("user: ]1-10, 1-5");
        assert_eq!(ranges(&condition, "user", RangeKind::Range).len(), 2);
        assert!(messages.is_empty());

        let (condition, _) = optimize("user: 1-10, ]1-5");
        assert_eq!(ranges(&condition, "user", RangeKind::Range), vec!["1-10"]);
    }

    #[test]
    fn test_equal_ranges_keep_earlier() {
        let (condition, _) = optimize("user: 1-10, 1-10");
        let user = condition.values_group().field("user").unwrap();
        assert_eq!(user.ranges().indices(), vec![0]);
    }

    #[test]
    fn test_connected_ranges_are_merged() {
        let (condition, messages) = optimize("user: 1-10, 10-20");
        assert_eq!(ranges(&condition, "user", RangeKind::Range), vec!["1-20"]);
        assert_eq!(
            messages.rendered(),
            vec!["Ranges \"1-10\" and \"10-20\" in field 'user' in group 1 are connected and were merged into \"1-20\"."]
        );
    }

    #[test]
    fn test_chain_collapses_in_one_pass() {
        let (condition, messages) = optimize("user: 30-40, 10-20, 1-10, 20-30");
        assert_eq!(ranges(&condition, "user", RangeKind::Range), vec!["1-40"]);
        assert_eq!(messages.len(), 3);
    }

    #[test]
    fn test_connected_ranges_need_same_bounds() {
        let (condition, _) = optimize("user: 1-10, ]10-20");
        assert_eq!(ranges(&condition, "user", RangeKind::Range).len(), 2);

        let (condition, _) = optimize("user: 1-10[, 10-20[");
        assert_eq!(ranges(&condition, "user", RangeKind::Range), vec!["1-20["]);

        let (condition, _) = optimize("user: ]1-10[, ]10-20[");
        assert_eq!(ranges(&condition, "user", RangeKind::Range).len(), 2);
    }

    #[test]
    fn test_merged_range_covers_others() {
        let (condition, _) = optimize("user: 1-10, 10-20, 12-15");
        assert_eq!(ranges(&condition, "user", RangeKind::Range), vec!["1-20"]);
    }

    #[test]
    fn test_values_inside_range_are_removed() {
        let (condition, messages) = optimize("user: 5, 1, 10, 11, 1-10");
        assert_eq!(values(&condition, "user", SingleValueKind::Simple), vec!["11"]);
        assert_eq!(messages.len(), 3);
        assert_eq!(
            messages.rendered()[0],
            "Value \"5\" in field 'user' in group 1 is already covered by range \"1-10\" (removed)."
        );
    }

    #[test]
    fn test_value_on_exclusive_bound_is_kept() {
        let (condition, messages) = optimize("user: 1, 10, 5, ]1-10[");
        assert_eq!(values(&condition, "user", SingleValueKind::Simple), vec!["1", "10"]);
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn test_excluded_values_against_excluded_ranges() {
        let (condition, _) = optimize("user: !5, 5, !1-10");
        assert!(values(&condition, "user", SingleValueKind::Excluded).is_empty());
        assert_eq!(values(&condition, "user", SingleValueKind::Simple), vec!["5"]);
    }

    #[test]
    fn test_excluded_range_conflict_is_an_error() {
        let (condition, messages) = optimize("user: 25-30, !25-30");
        assert!(messages.has_errors());
        let error = messages.errors().next().unwrap();
        assert_eq!(error.severity, Severity::Error);
        assert_eq!(error.param("field"), Some("user"));
        assert_eq!(
            error.render(),
            "Excluded range \"25-30\" also exists as a normal range in field 'user' in group 1."
        );
        assert_eq!(ranges(&condition, "user", RangeKind::ExcludedRange), vec!["25-30"]);
    }

    #[test]
    fn test_excluded_range_conflict_ignores_bound_flags() {
        let (_, messages) = optimize("user: 25-30, !]25-30[");
        assert!(messages.has_errors());
    }

    #[test]
    fn test_dates() {
        let (condition, _) = optimize("date: 01.01.2010-31.01.2010, 15.01.2010, 31.01.2010-28.02.2010");
        assert_eq!(
            ranges(&condition, "date", RangeKind::Range),
            vec!["01.01.2010-28.02.2010"]
        );
        assert!(values(&condition, "date", SingleValueKind::Simple).is_empty());
    }

    #[test]
    fn test_skipped_without_range_fields() {
        let fields = FieldSet::new("plain").with_field(FieldConfig::new("name", TextType));
        let mut condition = parse("name: a, a", &fields).unwrap();
        let mut messages = MessageBag::new();
        RangeOptimizer::new().process(&mut condition, &mut messages);
        assert!(messages.is_empty());
    }
}
