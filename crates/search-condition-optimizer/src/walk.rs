//! Depth-first traversal of a condition's values groups.
//!
//! Every pass works on one field's [`ValuesBag`] at a time. The walker
//! resolves the field's configuration and hands both to the pass together
//! with the group number used in diagnostics.
//!
//! Groups are numbered in visiting order, starting at 1 for the root.
//! Values in different groups are never compared with each other: a value
//! repeated in a subgroup is not a duplicate of the parent's value.

use std::cmp::Ordering;

use search_condition::{
    ConditionMessage, FieldConfig, FieldOptions, FieldSet, SearchCondition, Severity, Value,
    ValueComparator, ValuesBag, ValuesGroup,
};

/// The field a pass is currently working on.
pub(crate) struct FieldContext<'a> {
    /// Group number (root group is 1).
    pub group: usize,
    /// Field name.
    pub field: &'a str,
    /// Field configuration.
    pub config: &'a FieldConfig,
}

impl FieldContext<'_> {
    pub fn comparator(&self) -> &dyn ValueComparator {
        self.config.value_comparator()
    }

    pub fn options(&self) -> &FieldOptions {
        self.config.options()
    }

    pub fn is_equal(&self, a: &Value, b: &Value) -> bool {
        self.comparator().is_equal(a, b, self.options())
    }

    pub fn is_lower(&self, a: &Value, b: &Value) -> bool {
        self.comparator().is_lower(a, b, self.options())
    }

    pub fn is_higher(&self, a: &Value, b: &Value) -> bool {
        self.comparator().is_higher(a, b, self.options())
    }

    /// Total order derived from the comparator, for sorting.
    pub fn ordering(&self, a: &Value, b: &Value) -> Ordering {
        if self.is_lower(a, b) {
            Ordering::Less
        } else if self.is_higher(a, b) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Info message with the field and group placeholders filled in.
    pub fn info(&self, template: &str) -> ConditionMessage {
        self.message(Severity::Info, template)
    }

    /// Error message with the field and group placeholders filled in.
    pub fn error(&self, template: &str) -> ConditionMessage {
        self.message(Severity::Error, template)
    }

    fn message(&self, severity: Severity, template: &str) -> ConditionMessage {
        ConditionMessage::new(severity, template)
            .with_param("field", self.field)
            .with_param("group", self.group)
    }
}

/// Visits every field of every group in the condition's root group.
pub(crate) fn walk_fields<F>(condition: &mut SearchCondition, mut visit: F)
where
    F: FnMut(&FieldContext<'_>, &mut ValuesBag),
{
    let (field_set, root) = condition.split_mut();
    let mut counter = 0;
    walk_group(root, field_set, &mut counter, &mut visit);
}

fn walk_group<F>(group: &mut ValuesGroup, field_set: &FieldSet, counter: &mut usize, visit: &mut F)
where
    F: FnMut(&FieldContext<'_>, &mut ValuesBag),
{
    *counter += 1;
    let number = *counter;
    log::trace!("visiting group {}", number);

    for (name, bag) in group.fields_mut() {
        let Some(config) = field_set.get(name) else {
            log::warn!(
                "field '{}' in group {} is not part of field set '{}', skipped",
                name,
                number,
                field_set.name()
            );
            continue;
        };

        let context = FieldContext {
            group: number,
            field: name,
            config,
        };
        visit(&context, bag);
    }

    for child in group.groups_mut() {
        walk_group(child, field_set, counter, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_condition::{FieldConfig, IntegerType, SingleValue, ValuesBag};

    fn condition() -> SearchCondition {
        let field_set = FieldSet::new("test").with_field(FieldConfig::new("id", IntegerType));

        let mut leaf = ValuesGroup::new();
        leaf.add_field("id", ValuesBag::new());
        let mut middle = ValuesGroup::new();
        middle.add_group(leaf);
        middle.add_field("unknown", ValuesBag::new());

        let mut root = ValuesGroup::new();
        root.add_field("id", ValuesBag::new());
        root.add_group(middle);
        root.add_group(ValuesGroup::new());

        SearchCondition::new(field_set, root)
    }

    #[test]
    fn test_groups_numbered_depth_first() {
        let mut condition = condition();
        let mut visited = Vec::new();
        walk_fields(&mut condition, |ctx, _| visited.push((ctx.group, ctx.field.to_string())));
        assert_eq!(visited, vec![(1, "id".to_string()), (3, "id".to_string())]);
    }

    #[test]
    fn test_visitor_can_mutate_bags() {
        let mut condition = condition();
        walk_fields(&mut condition, |_, bag| {
            bag.add_simple_value(SingleValue::from_value(Value::Integer(1)));
        });
        let root = condition.values_group();
        assert_eq!(root.field("id").unwrap().simple_values().len(), 1);
        assert!(root.groups()[0].field("unknown").unwrap().is_empty());
    }

    #[test]
    fn test_context_message_params() {
        let config = FieldConfig::new("id", IntegerType);
        let ctx = FieldContext {
            group: 2,
            field: "id",
            config: &config,
        };
        let message = ctx.info("{{ field }}@{{ group }}");
        assert_eq!(message.render(), "id@2");
        assert_eq!(message.severity, Severity::Info);
        assert_eq!(ctx.error("x").severity, Severity::Error);
        assert_eq!(ctx.ordering(&Value::Integer(1), &Value::Integer(2)), Ordering::Less);
        assert_eq!(ctx.ordering(&Value::Integer(2), &Value::Integer(2)), Ordering::Equal);
    }
}
