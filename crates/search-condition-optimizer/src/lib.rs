//! # search-condition-optimizer
//!
//! Redundancy removal for [`search_condition::SearchCondition`]s.
//!
//! Users type conditions like `user: 1, 2, 3, 2, 1-10` that contain values
//! already covered by other values. The passes in this crate rewrite the
//! condition in place into an equivalent, smaller one and record what they
//! changed in a [`MessageBag`](search_condition::MessageBag).
//!
//! ## Passes
//!
//! | Pass | Priority | Effect |
//! |------|----------|--------|
//! | [`DuplicateRemover`] | 20 | `1, 1` → `1` |
//! | [`ValuesToRange`] | 10 | `1, 2, 3` → `1-3` |
//! | [`RangeOptimizer`] | 0 | `1-10, 5-8` → `1-10`; `1-10, 10-20` → `1-20`; `5, 1-10` → `1-10` |
//! | [`CompareNormalizer`] | -10 | `>5, >=5` → `>=5` |
//!
//! All passes work per field and per group: values in different groups are
//! never compared. The only error a pass reports is an excluded range that
//! equals a range of the same field (`25-30, !25-30`); callers must not use
//! a condition whose message bag [`has_errors`](search_condition::MessageBag::has_errors).
//!
//! ## Quick Start
//!
//! ```rust
//! use search_condition::{parse, DateType, FieldConfig, FieldSet, IntegerType, TextType};
//! use search_condition_optimizer::ChainOptimizer;
//!
//! let fields = FieldSet::new("users")
//!     .with_field(FieldConfig::new("user", IntegerType).with_ranges())
//!     .with_field(FieldConfig::new("status", TextType))
//!     .with_field(FieldConfig::new("date", DateType));
//!
//! let mut condition =
//!     parse("User=2,3,10-20; Status=Active; date=29.10.2010,29.10.2010", &fields).unwrap();
//! let messages = ChainOptimizer::new().process(&mut condition);
//!
//! assert_eq!(
//!     messages.rendered(),
//!     vec!["Duplicate value \"29.10.2010\" in field 'date' in group 1 (removed)."]
//! );
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use search_condition_optimizer::{ChainOptimizer, OptimizerConfig};
//!
//! let chain = ChainOptimizer::with_config(
//!     OptimizerConfig::builder().with_values_to_range(false).build(),
//! );
//! assert_eq!(chain.len(), 3);
//! ```

#![warn(missing_docs)]

mod chain;
mod compare_normalizer;
mod config;
mod duplicate_remover;
mod range_optimizer;
mod traits;
mod values_to_range;
mod walk;

pub use chain::ChainOptimizer;
pub use compare_normalizer::CompareNormalizer;
pub use config::{OptimizerConfig, OptimizerConfigBuilder};
pub use duplicate_remover::DuplicateRemover;
pub use range_optimizer::RangeOptimizer;
pub use traits::SearchConditionOptimizer;
pub use values_to_range::ValuesToRange;
