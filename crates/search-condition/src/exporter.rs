//! Renders a search condition back to the string query syntax.
//!
//! The output always parses back to an equivalent condition, so an
//! optimized condition can be shown to the user in the syntax they typed.

use crate::bag::ValuesBag;
use crate::condition::SearchCondition;
use crate::group::{Logical, ValuesGroup};
use crate::parser::RESERVED_CHARS;
use crate::value::{Compare, PatternMatch, Range};

/// String query exporter.
#[derive(Debug, Clone, Default)]
pub struct StringExporter {
    _private: (),
}

impl StringExporter {
    /// Create a new exporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Export a condition.
    pub fn export(&self, condition: &SearchCondition) -> String {
        Self::export_condition(condition)
    }

    /// Export a condition (static method).
    pub fn export_condition(condition: &SearchCondition) -> String {
        let root = condition.values_group();
        let body = Self::export_group_body(root);
        match root.logical() {
            Logical::And => body,
            // a bare `*(` would read as an OR subgroup
            Logical::Or => format!("* {}", body),
        }
    }

    fn export_group_body(group: &ValuesGroup) -> String {
        let mut parts = Vec::new();

        for (name, bag) in group.fields() {
            if bag.is_empty() {
                continue;
            }
            parts.push(format!("{}: {};", name, Self::export_bag(bag)));
        }

        for child in group.groups() {
            let marker = match child.logical() {
                Logical::And => "",
                Logical::Or => "*",
            };
            parts.push(format!("{}({})", marker, Self::export_group_body(child)));
        }

        parts.join(" ")
    }

    fn export_bag(bag: &ValuesBag) -> String {
        let mut values: Vec<String> = Vec::with_capacity(bag.count());

        values.extend(bag.simple_values().values().map(|v| quote(&v.view)));
        values.extend(
            bag.excluded_simple_values()
                .values()
                .map(|v| format!("!{}", quote(&v.view))),
        );
        values.extend(bag.ranges().values().map(export_range));
        values.extend(
            bag.excluded_ranges()
                .values()
                .map(|r| format!("!{}", export_range(r))),
        );
        values.extend(bag.comparisons().values().map(export_compare));
        values.extend(bag.pattern_matchers().values().map(export_pattern));

        values.join(", ")
    }
}

fn export_range(range: &Range) -> String {
    format!(
        "{}{}-{}{}",
        if range.lower_inclusive { "" } else { "]" },
        quote(&range.lower.view),
        quote(&range.upper.view),
        if range.upper_inclusive { "" } else { "[" },
    )
}

fn export_compare(compare: &Compare) -> String {
    format!("{}{}", compare.operator, quote(&compare.value.view))
}

fn export_pattern(pattern: &PatternMatch) -> String {
    format!(
        "~{}{}{}{}",
        if pattern.case_insensitive { "i" } else { "" },
        if pattern.kind.is_negated() { "!" } else { "" },
        pattern.kind.marker(),
        quote(&pattern.value),
    )
}

/// Quotes a value when it would not survive as a bare value.
fn quote(view: &str) -> String {
    let needs_quotes = view.is_empty()
        || view
            .chars()
            .any(|c| c.is_whitespace() || RESERVED_CHARS.contains(c));

    if needs_quotes {
        format!("\"{}\"", view.replace('"', "\"\""))
    } else {
        view.to_string()
    }
}
