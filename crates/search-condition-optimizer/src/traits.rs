//! The optimizer pass contract.

use std::fmt;

use search_condition::{MessageBag, SearchCondition};

/// A pass that rewrites a search condition in place.
///
/// Passes never fail for user data: they either clean up silently
/// (recording info messages) or record an error message and carry on, so
/// the caller sees every diagnostic at once.
///
/// # Example
///
/// ```rust
/// use search_condition::{MessageBag, SearchCondition};
/// use search_condition_optimizer::{ChainOptimizer, SearchConditionOptimizer};
///
/// #[derive(Debug)]
/// struct DropEmptyGroups;
///
/// impl SearchConditionOptimizer for DropEmptyGroups {
///     fn name(&self) -> &'static str {
///         "drop-empty-groups"
///     }
///
///     fn process(&self, _condition: &mut SearchCondition, _messages: &mut MessageBag) {
///         // ...
///     }
/// }
///
/// let chain = ChainOptimizer::new().with_optimizer(DropEmptyGroups);
/// assert_eq!(chain.len(), 5);
/// ```
pub trait SearchConditionOptimizer: fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Rewrites the condition, appending diagnostics to `messages`.
    fn process(&self, condition: &mut SearchCondition, messages: &mut MessageBag);

    /// Passes with a higher priority run first.
    fn priority(&self) -> i32 {
        0
    }
}
