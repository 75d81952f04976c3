//! Removes strict comparisons made redundant by an inclusive one.
//!
//! `>=5` already matches everything `>5` does, so `>5, >=5` is reduced to
//! `>=5`. The same holds for `<` and `<=`.

use search_condition::{MessageBag, SearchCondition, ValueKind, ValuesBag};

use crate::traits::SearchConditionOptimizer;
use crate::walk::{walk_fields, FieldContext};

const COMPARISON_REDUNDANT: &str = "Comparison \"{{ comparison }}\" in field '{{ field }}' in group {{ group }} is redundant against \"{{ other }}\" (removed).";

/// Drops `>v` next to `>=v` and `<v` next to `<=v`.
#[derive(Debug, Clone, Default)]
pub struct CompareNormalizer {
    _private: (),
}

impl CompareNormalizer {
    /// Creates the pass.
    pub fn new() -> Self {
        Self::default()
    }

    fn process_bag(&self, ctx: &FieldContext<'_>, bag: &mut ValuesBag, messages: &mut MessageBag) {
        let comparisons = bag.comparisons_mut();
        if comparisons.len() < 2 {
            return;
        }

        let indices = comparisons.indices();
        for &inclusive in &indices {
            let Some(strict) = comparisons
                .get(inclusive)
                .and_then(|compare| compare.operator.covered_strict())
            else {
                continue;
            };

            for &candidate in &indices {
                let redundant = match (comparisons.get(candidate), comparisons.get(inclusive)) {
                    (Some(c), Some(i)) => {
                        c.operator == strict && ctx.is_equal(&c.value.value, &i.value.value)
                    }
                    _ => false,
                };
                if !redundant {
                    continue;
                }

                let (Some(removed), Some(kept)) =
                    (comparisons.remove(candidate), comparisons.get(inclusive))
                else {
                    continue;
                };
                log::debug!("removed comparison {} of '{}', covered by {}", removed, ctx.field, kept);
                messages.add_info(
                    ctx.info(COMPARISON_REDUNDANT)
                        .with_param("comparison", &removed)
                        .with_param("other", kept),
                );
            }
        }
    }
}

impl SearchConditionOptimizer for CompareNormalizer {
    fn name(&self) -> &'static str {
        "compare-normalizer"
    }

    fn process(&self, condition: &mut SearchCondition, messages: &mut MessageBag) {
        if !condition.field_set().supports_value_type(ValueKind::Compare) {
            log::trace!("no field supports comparisons, skipping {}", self.name());
            return;
        }

        walk_fields(condition, |ctx, bag| self.process_bag(ctx, bag, messages));
    }

    fn priority(&self) -> i32 {
        -10
    }
}
