//! Runs several passes in priority order.

use search_condition::{MessageBag, SearchCondition};

use crate::compare_normalizer::CompareNormalizer;
use crate::config::OptimizerConfig;
use crate::duplicate_remover::DuplicateRemover;
use crate::range_optimizer::RangeOptimizer;
use crate::traits::SearchConditionOptimizer;
use crate::values_to_range::ValuesToRange;

/// An ordered chain of optimizer passes.
///
/// Passes run by descending [`priority`](SearchConditionOptimizer::priority);
/// passes with the same priority keep the order they were added in. Once
/// the message bag holds an error, the remaining passes are skipped.
///
/// # Example
///
/// ```rust
/// use search_condition::{parse, FieldConfig, FieldSet, IntegerType, StringExporter};
/// use search_condition_optimizer::ChainOptimizer;
///
/// let fields = FieldSet::new("users")
///     .with_field(FieldConfig::new("user", IntegerType).with_ranges());
/// let mut condition = parse("user: 1, 2, 3, 3, 10-20, 15", &fields).unwrap();
///
/// let messages = ChainOptimizer::new().process(&mut condition);
///
/// assert!(!messages.has_errors());
/// assert_eq!(StringExporter::export_condition(&condition), "user: 10-20, 1-3;");
/// ```
#[derive(Debug)]
pub struct ChainOptimizer {
    optimizers: Vec<Box<dyn SearchConditionOptimizer>>,
}

impl Default for ChainOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainOptimizer {
    /// Creates a chain with every built-in pass.
    pub fn new() -> Self {
        Self::with_config(OptimizerConfig::default())
    }

    /// Creates a chain without passes.
    pub fn empty() -> Self {
        Self {
            optimizers: Vec::new(),
        }
    }

    /// Creates a chain with the built-in passes enabled in `config`.
    pub fn with_config(config: OptimizerConfig) -> Self {
        let mut chain = Self::empty();
        if config.duplicate_removal {
            chain.add_optimizer(DuplicateRemover::new());
        }
        if config.values_to_range {
            chain.add_optimizer(ValuesToRange::new());
        }
        if config.range_optimization {
            chain.add_optimizer(RangeOptimizer::new());
        }
        if config.compare_normalization {
            chain.add_optimizer(CompareNormalizer::new());
        }
        chain
    }

    /// Adds a pass (builder style).
    pub fn with_optimizer(mut self, optimizer: impl SearchConditionOptimizer + 'static) -> Self {
        self.add_optimizer(optimizer);
        self
    }

    /// Adds a pass.
    pub fn add_optimizer(&mut self, optimizer: impl SearchConditionOptimizer + 'static) {
        self.optimizers.push(Box::new(optimizer));
        // stable: equal priorities keep insertion order
        self.optimizers
            .sort_by_key(|optimizer| std::cmp::Reverse(optimizer.priority()));
    }

    /// Names of the passes in the order they run.
    pub fn names(&self) -> Vec<&'static str> {
        self.optimizers.iter().map(|o| o.name()).collect()
    }

    /// Number of passes.
    pub fn len(&self) -> usize {
        self.optimizers.len()
    }

    /// Returns true if the chain has no passes.
    pub fn is_empty(&self) -> bool {
        self.optimizers.is_empty()
    }

    /// Runs every pass and returns the collected messages.
    pub fn process(&self, condition: &mut SearchCondition) -> MessageBag {
        let mut messages = MessageBag::new();
        self.process_with(condition, &mut messages);
        messages
    }

    /// Runs every pass, appending to an existing message bag.
    ///
    /// Nothing runs if `messages` already holds an error.
    pub fn process_with(&self, condition: &mut SearchCondition, messages: &mut MessageBag) {
        for optimizer in &self.optimizers {
            if messages.has_errors() {
                log::debug!(
                    "condition has errors, skipping '{}' and later passes",
                    optimizer.name()
                );
                return;
            }

            let before = messages.len();
            optimizer.process(condition, messages);
            log::debug!(
                "pass '{}' recorded {} message(s)",
                optimizer.name(),
                messages.len() - before
            );
        }
    }
}

impl SearchConditionOptimizer for ChainOptimizer {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn process(&self, condition: &mut SearchCondition, messages: &mut MessageBag) {
        self.process_with(condition, messages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_condition::{
        parse, ConditionMessage, DateType, FieldConfig, FieldSet, IntegerType, Severity,
    };

    fn field_set() -> FieldSet {
        FieldSet::new("test")
            .with_field(
                FieldConfig::new("user", IntegerType)
                    .with_ranges()
                    .with_compares(),
            )
            .with_field(FieldConfig::new("date", DateType).with_ranges().with_compares())
    }

    #[derive(Debug)]
    struct Flag {
        priority: i32,
        severity: Severity,
    }

    impl SearchConditionOptimizer for Flag {
        fn name(&self) -> &'static str {
            "flag"
        }

        fn process(&self, _condition: &mut SearchCondition, messages: &mut MessageBag) {
            messages.add(ConditionMessage::new(self.severity, "flag {{ p }}").with_param("p", self.priority));
        }

        fn priority(&self) -> i32 {
            self.priority
        }
    }

    #[test]
    fn test_default_order() {
        let chain = ChainOptimizer::new();
        assert_eq!(
            chain.names(),
            vec!["duplicate-remover", "values-to-range", "range-optimizer", "compare-normalizer"]
        );
    }

    #[test]
    fn test_with_config() {
        let config = OptimizerConfig::builder()
            .with_values_to_range(false)
            .with_compare_normalization(false)
            .build();
        let chain = ChainOptimizer::with_config(config);
        assert_eq!(chain.names(), vec!["duplicate-remover", "range-optimizer"]);
        assert!(ChainOptimizer::with_config(OptimizerConfig::none()).is_empty());
    }

    #[test]
    fn test_custom_passes_sorted_by_priority() {
        let chain = ChainOptimizer::empty()
            .with_optimizer(Flag { priority: 1, severity: Severity::Info })
            .with_optimizer(Flag { priority: 5, severity: Severity::Info })
            .with_optimizer(Flag { priority: 1, severity: Severity::Info });
        let mut condition = parse("user: 1", &field_set()).unwrap();
        let messages = chain.process(&mut condition);
        assert_eq!(messages.rendered(), vec!["flag 5", "flag 1", "flag 1"]);
    }

    #[test]
    fn test_error_stops_later_passes() {
        let chain = ChainOptimizer::empty()
            .with_optimizer(Flag { priority: 2, severity: Severity::Error })
            .with_optimizer(Flag { priority: 1, severity: Severity::Info });
        let mut condition = parse("user: 1", &field_set()).unwrap();
        let messages = chain.process(&mut condition);
        assert_eq!(messages.rendered(), vec!["flag 2"]);
    }

    #[test]
    fn test_existing_error_skips_everything() {
        let mut condition = parse("user: 1, 1", &field_set()).unwrap();
        let mut messages = MessageBag::new();
        messages.add_error(ConditionMessage::new(Severity::Error, "earlier"));
        ChainOptimizer::new().process_with(&mut condition, &mut messages);
        assert_eq!(messages.len(), 1);
        assert_eq!(condition.values_group().field("user").unwrap().simple_values().len(), 2);
    }

    #[test]
    fn test_values_converted_then_merged() {
        let mut condition = parse("user: 1, 2, 3, 3-10, 5", &field_set()).unwrap();
        let messages = ChainOptimizer::new().process(&mut condition);
        let user = condition.values_group().field("user").unwrap();
        let ranges: Vec<String> = user.ranges().values().map(|r| r.to_string()).collect();
        assert_eq!(ranges, vec!["1-10"]);
        assert!(user.simple_values().is_empty());
        assert!(!messages.has_errors());
    }

    #[test]
    fn test_chain_is_an_optimizer() {
        let outer = ChainOptimizer::empty().with_optimizer(ChainOptimizer::new());
        let mut condition = parse("user: >5, >=5, 7, 7", &field_set()).unwrap();
        let mut messages = MessageBag::new();
        SearchConditionOptimizer::process(&outer, &mut condition, &mut messages);
        assert_eq!(messages.len(), 2);
    }
}
