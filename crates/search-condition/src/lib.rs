//! # search-condition
//!
//! Typed, nested search conditions built from a user-facing filter syntax.
//!
//! This crate provides:
//! - **Condition model**: [`ValuesGroup`] trees holding one [`ValuesBag`] per field
//! - **Field system**: [`FieldSet`] / [`FieldConfig`] with pluggable
//!   [`ValueComparator`]s and built-in [`types`]
//! - **Input processor**: [`parse`] for the string query syntax
//! - **Exporter**: [`StringExporter`] rendering a condition back to that syntax
//! - **Diagnostics**: [`MessageBag`] of structured, templated messages
//!
//! Redundancy removal lives in the `search-condition-optimizer` crate.
//!
//! ## Usage
//!
//! ```rust
//! use search_condition::{parse, DateType, FieldConfig, FieldSet, IntegerType, StringExporter};
//!
//! let fields = FieldSet::new("invoices")
//!     .with_field(FieldConfig::new("id", IntegerType).with_ranges().with_compares())
//!     .with_field(FieldConfig::new("date", DateType).with_ranges());
//!
//! let condition = parse("id: 1, 5-10, >=100; date: 29.10.2010", &fields).unwrap();
//! assert_eq!(
//!     StringExporter::export_condition(&condition),
//!     "id: 1, 5-10, >=100; date: 29.10.2010;"
//! );
//! ```
//!
//! ## Syntax Quick Reference
//!
//! | Syntax | Meaning | Example |
//! |--------|---------|---------|
//! | `v` | Simple value | `user: 5` |
//! | `!v` | Excluded value | `user: !5` |
//! | `a-b` | Inclusive range | `user: 1-10` |
//! | `]a-b[` | Exclusive lower / upper bound | `user: ]1-10[` |
//! | `!a-b` | Excluded range | `user: !1-10` |
//! | `>v` `>=v` `<v` `<=v` `<>v` | Comparison | `user: >=100` |
//! | `~*v` `~>v` `~<v` `~=v` `~?v` | Contains / starts / ends / equals / regex | `name: ~*foo` |
//! | `~i` `~!` | Case insensitive / negated pattern | `name: ~i!>foo` |
//! | `(...)` `*(...)` | AND / OR subgroup | `*(user: 1; date: 01.01.2010)` |
//! | `"..."` | Quoted value (`""` escapes a quote) | `name: "a, b"` |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod bag;
mod comparator;
mod condition;
mod error;
mod exporter;
mod field;
mod group;
mod message;
mod parser;
pub mod types;
mod value;

pub use bag::{ValueCollection, ValuesBag};
pub use comparator::{ValueComparator, ValueIncrementer, ValueTransformer};
pub use condition::{Direction, SearchCondition, SearchOrder};
pub use error::{ConditionError, ConditionResult, TransformError};
pub use exporter::StringExporter;
pub use field::{FieldConfig, FieldOptions, FieldSet, ValueKind};
pub use group::{Logical, ValuesGroup};
pub use message::{ConditionMessage, MessageBag, Severity};
pub use parser::parse;
pub use types::{DateType, DecimalType, IntegerType, TextType};
pub use value::{
    Compare, CompareOperator, PatternMatch, PatternMatchType, Range, RangeKind, SingleValue,
    SingleValueKind, Value,
};
