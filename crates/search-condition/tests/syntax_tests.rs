//! Integration tests for the string query syntax.
//!
//! Every condition here is parsed, inspected and exported back.

use search_condition::{
    parse, ConditionError, DateType, DecimalType, FieldConfig, FieldOptions, FieldSet,
    IntegerType, Logical, PatternMatchType, SearchCondition, StringExporter, TextType, Value,
    ValueKind,
};

fn field_set() -> FieldSet {
    FieldSet::new("invoices")
        .with_field(
            FieldConfig::new("id", IntegerType)
                .with_ranges()
                .with_compares(),
        )
        .with_field(FieldConfig::new("amount", DecimalType).with_compares())
        .with_field(FieldConfig::new("label", TextType).with_pattern_match())
        .with_field(
            FieldConfig::new("issued", DateType)
                .with_ranges()
                .with_options(FieldOptions::new().with("pattern", "%Y/%m/%d")),
        )
}

fn roundtrip(input: &str) -> (SearchCondition, String) {
    let condition = parse(input, &field_set()).expect("valid condition");
    let exported = StringExporter::export_condition(&condition);
    let reparsed = parse(&exported, &field_set()).expect("exported condition parses");
    assert_eq!(StringExporter::export_condition(&reparsed), exported);
    (condition, exported)
}

#[test]
fn test_all_value_kinds() {
    let (condition, exported) = roundtrip(
        "id: 1, !2, 3-5, !]6-9[, >=10, <>12; label: ~*abc, ~i!>x; amount: <9.5",
    );
    assert_eq!(
        exported,
        "id: 1, !2, 3-5, !]6-9[, >=10, <>12; label: ~*abc, ~i!>x; amount: <9.5;"
    );

    let id = condition.values_group().field("id").unwrap();
    assert_eq!(id.count(), 6);
    let label = condition.values_group().field("label").unwrap();
    let kinds: Vec<_> = label.pattern_matchers().values().map(|p| p.kind).collect();
    assert_eq!(kinds, vec![PatternMatchType::Contains, PatternMatchType::NotStartsWith]);
}

#[test]
fn test_custom_date_pattern() {
    let (condition, exported) = roundtrip("issued: 2010/01/01-2010/12/31");
    assert_eq!(exported, "issued: 2010/01/01-2010/12/31;");
    let range = condition
        .values_group()
        .field("issued")
        .unwrap()
        .ranges()
        .values()
        .next()
        .cloned()
        .unwrap();
    assert!(matches!(range.lower.value, Value::Date(_)));
}

#[test]
fn test_quoted_text_survives_export() {
    let (condition, exported) = roundtrip("label: \"a, b\", \"say \"\"hi\"\"\", plain");
    assert_eq!(exported, "label: \"a, b\", \"say \"\"hi\"\"\", plain;");
    let views: Vec<_> = condition
        .values_group()
        .field("label")
        .unwrap()
        .simple_values()
        .values()
        .map(|v| v.view.clone())
        .collect();
    assert_eq!(views, vec!["a, b", "say \"hi\"", "plain"]);
}

#[test]
fn test_groups_and_logical_operators() {
    let (condition, exported) = roundtrip("* id: 1; (label: x; *(id: 2; label: y))");
    assert_eq!(condition.values_group().logical(), Logical::Or);
    assert_eq!(exported, "* id: 1; (label: x; *(id: 2; label: y;))");

    let child = &condition.values_group().groups()[0];
    assert_eq!(child.logical(), Logical::And);
    assert_eq!(child.groups()[0].logical(), Logical::Or);
}

#[test]
fn test_errors() {
    let fields = field_set();

    assert_eq!(parse("   ", &fields).unwrap_err(), ConditionError::EmptyCondition);
    assert_eq!(
        parse("nope: 1", &fields).unwrap_err(),
        ConditionError::UnknownField("nope".to_string())
    );
    assert_eq!(
        parse("amount: 1-2", &fields).unwrap_err(),
        ConditionError::UnsupportedValueKind {
            field: "amount".to_string(),
            kind: ValueKind::Range,
        }
    );
    assert!(matches!(
        parse("id: abc", &fields).unwrap_err(),
        ConditionError::InvalidValue { .. }
    ));
    assert_eq!(
        parse("id: 9-1", &fields).unwrap_err().to_string(),
        "range \"9-1\" in field 'id' has a lower bound above its upper bound"
    );
}
