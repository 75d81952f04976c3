//! Structured diagnostics collected while processing a condition.
//!
//! Messages carry a template with `{{ name }}` placeholders and the
//! parameter values separately, so consumers can translate the template
//! before rendering it.

use std::fmt;

use indexmap::IndexMap;

/// Severity of a [`ConditionMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// The condition was changed; processing goes on.
    Info,
    /// The condition is invalid and must not be used for query generation.
    Error,
}

/// A single diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionMessage {
    /// Severity.
    pub severity: Severity,
    /// Message template, also used as the message key.
    pub template: String,
    /// Placeholder values by name (without braces).
    pub parameters: IndexMap<String, String>,
}

impl ConditionMessage {
    /// Creates a message without parameters.
    pub fn new(severity: Severity, template: impl Into<String>) -> Self {
        Self {
            severity,
            template: template.into(),
            parameters: IndexMap::new(),
        }
    }

    /// Adds a placeholder value.
    pub fn with_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.parameters.insert(name.into(), value.to_string());
        self
    }

    /// Returns the value of a placeholder.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// Substitutes every `{{ name }}` placeholder of the template.
    pub fn render(&self) -> String {
        let mut rendered = self.template.clone();
        for (name, value) in &self.parameters {
            rendered = rendered.replace(&format!("{{{{ {} }}}}", name), value);
        }
        rendered
    }
}

impl fmt::Display for ConditionMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Append-only, ordered list of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageBag {
    messages: Vec<ConditionMessage>,
}

impl MessageBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message.
    pub fn add(&mut self, message: ConditionMessage) {
        self.messages.push(message);
    }

    /// Appends an info message.
    pub fn add_info(&mut self, message: ConditionMessage) {
        debug_assert_eq!(message.severity, Severity::Info);
        self.messages.push(message);
    }

    /// Appends an error message.
    pub fn add_error(&mut self, message: ConditionMessage) {
        debug_assert_eq!(message.severity, Severity::Error);
        self.messages.push(message);
    }

    /// Returns true if any error was recorded.
    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.severity == Severity::Error)
    }

    /// All messages in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ConditionMessage> + '_ {
        self.messages.iter()
    }

    /// Info messages in insertion order.
    pub fn infos(&self) -> impl Iterator<Item = &ConditionMessage> + '_ {
        self.messages.iter().filter(|m| m.severity == Severity::Info)
    }

    /// Error messages in insertion order.
    pub fn errors(&self) -> impl Iterator<Item = &ConditionMessage> + '_ {
        self.messages.iter().filter(|m| m.severity == Severity::Error)
    }

    /// Rendered messages in insertion order.
    pub fn rendered(&self) -> Vec<String> {
        self.messages.iter().map(ConditionMessage::render).collect()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if no message was recorded.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_placeholders() {
        let message = ConditionMessage::new(
            Severity::Info,
            "Duplicate value \"{{ value }}\" in field '{{ field }}' in group {{ group }} (removed).",
        )
        .with_param("value", "29.10.2010")
        .with_param("field", "date")
        .with_param("group", 1);

        assert_eq!(
            message.render(),
            "Duplicate value \"29.10.2010\" in field 'date' in group 1 (removed)."
        );
        assert_eq!(message.param("group"), Some("1"));
    }

    #[test]
    fn test_unknown_placeholder_is_left_untouched() {
        let message = ConditionMessage::new(Severity::Info, "value {{ value }}");
        assert_eq!(message.render(), "value {{ value }}");
    }

    #[test]
    fn test_bag_severity_filters() {
        let mut bag = MessageBag::new();
        assert!(bag.is_empty());
        bag.add_info(ConditionMessage::new(Severity::Info, "one"));
        assert!(!bag.has_errors());
        bag.add_error(ConditionMessage::new(Severity::Error, "two"));
        bag.add_info(ConditionMessage::new(Severity::Info, "three"));

        assert!(bag.has_errors());
        assert_eq!(bag.len(), 3);
        assert_eq!(bag.infos().count(), 2);
        assert_eq!(bag.errors().count(), 1);
        assert_eq!(bag.rendered(), vec!["one", "two", "three"]);
    }
}
