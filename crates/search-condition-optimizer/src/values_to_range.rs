//! Converts runs of consecutive values into ranges.
//!
//! Only fields whose type can compute the next value (see
//! [`ValueIncrementer`](search_condition::ValueIncrementer)) and that accept
//! ranges are converted. `1, 2, 3, 4, 5` becomes `1-5`; a run needs at
//! least three values, so `1, 2` is left alone.

use search_condition::{
    MessageBag, Range, RangeKind, SearchCondition, SingleValue, SingleValueKind, ValueKind,
    ValuesBag,
};

use crate::traits::SearchConditionOptimizer;
use crate::walk::{walk_fields, FieldContext};

const VALUES_CONVERTED: &str = "Values {{ values }} in field '{{ field }}' in group {{ group }} were converted to range \"{{ range }}\".";

/// Minimum number of values a run must have to become a range.
const MIN_RUN_LENGTH: usize = 3;

/// Replaces runs of incrementing simple (or excluded) values with an
/// inclusive range (or excluded range).
#[derive(Debug, Clone, Default)]
pub struct ValuesToRange {
    _private: (),
}

impl ValuesToRange {
    /// Creates the pass.
    pub fn new() -> Self {
        Self::default()
    }

    fn process_bag(&self, ctx: &FieldContext<'_>, bag: &mut ValuesBag, messages: &mut MessageBag) {
        if !ctx.config.supports_value_type(ValueKind::Range) {
            return;
        }
        let Some(incrementer) = ctx.comparator().as_incrementer() else {
            return;
        };

        for (value_kind, range_kind) in [
            (SingleValueKind::Simple, RangeKind::Range),
            (SingleValueKind::Excluded, RangeKind::ExcludedRange),
        ] {
            let values = bag.single_values_of(value_kind);
            if values.len() < MIN_RUN_LENGTH {
                continue;
            }

            let mut sorted: Vec<(usize, &SingleValue)> = values.iter().collect();
            sorted.sort_by(|(_, a), (_, b)| ctx.ordering(&a.value, &b.value));

            let runs = find_runs(&sorted, |(_, prev), (_, next)| {
                incrementer
                    .incremented_value(&prev.value, ctx.options())
                    .is_some_and(|incremented| ctx.is_equal(&incremented, &next.value))
            });

            let conversions: Vec<(Vec<usize>, Range, String)> = runs
                .into_iter()
                .map(|run| {
                    let run = &sorted[run];
                    let views = run
                        .iter()
                        .map(|(_, value)| value.view.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    let (first, last) = (run[0].1, run[run.len() - 1].1);
                    let range = Range::new(first.clone(), last.clone());
                    (run.iter().map(|(index, _)| *index).collect(), range, views)
                })
                .collect();

            for (indices, range, views) in conversions {
                let values = bag.single_values_of_mut(value_kind);
                for index in indices {
                    values.remove(index);
                }
                log::debug!("converted values {} of '{}' to range {}", views, ctx.field, range);
                messages.add_info(
                    ctx.info(VALUES_CONVERTED)
                        .with_param("values", views)
                        .with_param("range", &range),
                );
                bag.ranges_of_mut(range_kind).push(range);
            }
        }
    }
}

impl SearchConditionOptimizer for ValuesToRange {
    fn name(&self) -> &'static str {
        "values-to-range"
    }

    fn process(&self, condition: &mut SearchCondition, messages: &mut MessageBag) {
        let applicable = condition.field_set().fields().any(|config| {
            config.supports_value_type(ValueKind::Range)
                && config.value_comparator().as_incrementer().is_some()
        });
        if !applicable {
            log::trace!("no field supports incrementing ranges, skipping {}", self.name());
            return;
        }

        walk_fields(condition, |ctx, bag| self.process_bag(ctx, bag, messages));
    }

    fn priority(&self) -> i32 {
        10
    }
}

/// Positions (into `sorted`) of every run of at least [`MIN_RUN_LENGTH`]
/// items where each item follows its predecessor.
fn find_runs<T, F>(sorted: &[T], follows: F) -> Vec<std::ops::Range<usize>>
where
    F: Fn(&T, &T) -> bool,
{
    let mut runs = Vec::new();
    let mut start = 0;

    for pos in 1..=sorted.len() {
        let continues = pos < sorted.len() && follows(&sorted[pos - 1], &sorted[pos]);
        if !continues {
            if pos - start >= MIN_RUN_LENGTH {
                runs.push(start..pos);
            }
            start = pos;
        }
    }

    runs
}
