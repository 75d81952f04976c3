//! String query input processor using nom.
//!
//! Parses the user-facing filter syntax into a [`SearchCondition`]:
//!
//! ```text
//! user: 1, 5-10, !7, >=100; status: Active; *(date: 29.10.2010; date: >01.01.2012)
//! ```
//!
//! Parsing happens in two steps. nom turns the text into a raw syntax tree
//! of unresolved strings, then every value is checked against its field's
//! configuration and transformed into a domain [`Value`](crate::Value).

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0, one_of},
    combinator::{all_consuming, map, not, opt, value},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use crate::bag::ValuesBag;
use crate::condition::SearchCondition;
use crate::error::{ConditionError, ConditionResult};
use crate::field::{FieldConfig, FieldSet, ValueKind};
use crate::group::{Logical, ValuesGroup};
use crate::value::{Compare, CompareOperator, PatternMatch, PatternMatchType, Range, SingleValue};

/// Parse a string query against a field set.
///
/// # Examples
///
/// ```rust
/// use search_condition::{parse, FieldConfig, FieldSet, IntegerType, TextType};
///
/// let fields = FieldSet::new("users")
///     .with_field(FieldConfig::new("user", IntegerType).with_ranges())
///     .with_field(FieldConfig::new("status", TextType));
///
/// let condition = parse("User=2,3,10-20; Status=Active", &fields).unwrap();
/// let user = condition.values_group().field("user").unwrap();
/// assert_eq!(user.simple_values().len(), 2);
/// assert_eq!(user.ranges().len(), 1);
/// ```
pub fn parse(input: &str, field_set: &FieldSet) -> ConditionResult<SearchCondition> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ConditionError::EmptyCondition);
    }

    let raw = match all_consuming(condition)(input) {
        Ok((_, raw)) => raw,
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            let position = input.len() - e.input.len();
            return Err(ConditionError::ParseError {
                position,
                message: format!("unexpected input at: '{}'", truncate(e.input, 20)),
            });
        }
        Err(nom::Err::Incomplete(_)) => {
            return Err(ConditionError::ParseError {
                position: input.len(),
                message: "unexpected end of input".to_string(),
            })
        }
    };

    let mut group_counter = 0;
    let values_group = build_group(raw, field_set, &mut group_counter)?;
    log::debug!(
        "parsed search condition for field set '{}' with {} group(s)",
        field_set.name(),
        group_counter
    );

    Ok(SearchCondition::new(field_set.clone(), values_group))
}

fn truncate(s: &str, max_len: usize) -> &str {
    match s.char_indices().nth(max_len) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// ============================================================================
// Raw syntax tree
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum RawValue {
    Single(String),
    Excluded(String),
    Range(RawRange),
    ExcludedRange(RawRange),
    Compare(CompareOperator, String),
    Pattern {
        kind: PatternMatchType,
        case_insensitive: bool,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct RawRange {
    lower: String,
    upper: String,
    lower_inclusive: bool,
    upper_inclusive: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct RawField {
    name: String,
    values: Vec<RawValue>,
}

#[derive(Debug, Clone, PartialEq)]
enum RawItem {
    Field(RawField),
    Group(RawGroup),
}

#[derive(Debug, Clone, PartialEq)]
struct RawGroup {
    logical: Logical,
    items: Vec<RawItem>,
}

// ============================================================================
// Grammar
// ============================================================================

fn condition(input: &str) -> IResult<&str, RawGroup> {
    let (input, _) = ws(input)?;
    // `*(` opens an OR subgroup; any other leading `*` marks the root as OR
    let (input, root_or) = opt(terminated(char('*'), not(char('('))))(input)?;
    let logical = if root_or.is_some() {
        Logical::Or
    } else {
        Logical::And
    };
    let (input, items) = group_body(input)?;
    let (input, _) = ws(input)?;
    Ok((input, RawGroup { logical, items }))
}

fn logical_marker(input: &str) -> IResult<&str, Logical> {
    map(opt(char('*')), |marker| {
        if marker.is_some() {
            Logical::Or
        } else {
            Logical::And
        }
    })(input)
}

fn group_body(input: &str) -> IResult<&str, Vec<RawItem>> {
    many0(preceded(
        ws,
        alt((
            map(nested_group, RawItem::Group),
            map(field_entry, RawItem::Field),
        )),
    ))(input)
}

fn nested_group(input: &str) -> IResult<&str, RawGroup> {
    let (input, logical) = logical_marker(input)?;
    let (input, items) = delimited(
        pair(char('('), ws),
        group_body,
        pair(ws, char(')')),
    )(input)?;
    let (input, _) = opt(preceded(ws, char(';')))(input)?;
    Ok((input, RawGroup { logical, items }))
}

fn field_entry(input: &str) -> IResult<&str, RawField> {
    let (input, name) = field_name(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = one_of(":=")(input)?;
    let (input, _) = ws(input)?;
    let (input, values) = separated_list1(delimited(ws, char(','), ws), value_item)(input)?;
    let (input, _) = opt(preceded(ws, char(';')))(input)?;
    Ok((
        input,
        RawField {
            name: name.to_string(),
            values,
        },
    ))
}

fn field_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '.')(input)
}

fn value_item(input: &str) -> IResult<&str, RawValue> {
    alt((excluded_value, compare_value, pattern_value, range_value, single_value))(input)
}

fn excluded_value(input: &str) -> IResult<&str, RawValue> {
    preceded(
        char('!'),
        alt((
            map(raw_range, RawValue::ExcludedRange),
            map(single, RawValue::Excluded),
        )),
    )(input)
}

fn compare_operator(input: &str) -> IResult<&str, CompareOperator> {
    alt((
        // Order matters - longer matches first
        value(CompareOperator::HigherOrEqual, tag(">=")),
        value(CompareOperator::LowerOrEqual, tag("<=")),
        value(CompareOperator::NotEqual, tag("<>")),
        value(CompareOperator::Higher, char('>')),
        value(CompareOperator::Lower, char('<')),
    ))(input)
}

fn compare_value(input: &str) -> IResult<&str, RawValue> {
    let (input, operator) = compare_operator(input)?;
    let (input, _) = ws(input)?;
    let (input, value) = single(input)?;
    Ok((input, RawValue::Compare(operator, value)))
}

fn pattern_value(input: &str) -> IResult<&str, RawValue> {
    let (input, (_, case_insensitive, negated, marker)) = tuple((
        char('~'),
        opt(char('i')),
        opt(char('!')),
        one_of("*><=?"),
    ))(input)?;
    let (input, _) = ws(input)?;
    let (input, value) = single(input)?;

    // one_of above only yields known markers
    let kind = match PatternMatchType::from_marker(marker, negated.is_some()) {
        Some(kind) => kind,
        None => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::OneOf,
            )))
        }
    };

    Ok((
        input,
        RawValue::Pattern {
            kind,
            case_insensitive: case_insensitive.is_some(),
            value,
        },
    ))
}

fn range_value(input: &str) -> IResult<&str, RawValue> {
    map(raw_range, RawValue::Range)(input)
}

/// Parse a range: `1-10`, `]1-10`, `1-10[`.
fn raw_range(input: &str) -> IResult<&str, RawRange> {
    let (input, lower_exclusive) = opt(char(']'))(input)?;
    let (input, lower) = single(input)?;
    let (input, _) = delimited(ws, char('-'), ws)(input)?;
    let (input, upper) = single(input)?;
    let (input, upper_exclusive) = opt(char('['))(input)?;
    Ok((
        input,
        RawRange {
            lower,
            upper,
            lower_inclusive: lower_exclusive.is_none(),
            upper_inclusive: upper_exclusive.is_none(),
        },
    ))
}

fn single_value(input: &str) -> IResult<&str, RawValue> {
    map(single, RawValue::Single)(input)
}

fn single(input: &str) -> IResult<&str, String> {
    alt((quoted, map(bare, str::to_string)))(input)
}

/// Characters that end a bare (unquoted) value.
pub(crate) const RESERVED_CHARS: &str = ",;()\"[]-!<>=~*:";

fn bare(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && !RESERVED_CHARS.contains(c))(input)
}

/// Parse a quoted value. A doubled quote inside stands for one quote.
fn quoted(input: &str) -> IResult<&str, String> {
    let (mut rest, _) = char('"')(input)?;
    let mut content = String::new();
    loop {
        let Some(pos) = rest.find('"') else {
            return Err(nom::Err::Error(nom::error::Error::new(
                rest,
                nom::error::ErrorKind::Char,
            )));
        };
        content.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        if let Some(stripped) = after.strip_prefix('"') {
            content.push('"');
            rest = stripped;
        } else {
            return Ok((after, content));
        }
    }
}

/// Optional whitespace
fn ws(input: &str) -> IResult<&str, &str> {
    multispace0(input)
}

// ============================================================================
// Resolution against the field set
// ============================================================================

fn build_group(
    raw: RawGroup,
    field_set: &FieldSet,
    group_counter: &mut usize,
) -> ConditionResult<ValuesGroup> {
    *group_counter += 1;
    let group_number = *group_counter;
    let mut group = ValuesGroup::with_logical(raw.logical);

    for item in raw.items {
        match item {
            RawItem::Field(raw_field) => {
                let config = field_set
                    .resolve(&raw_field.name)
                    .ok_or_else(|| ConditionError::UnknownField(raw_field.name.clone()))?;

                if group.has_field(config.name()) {
                    return Err(ConditionError::DuplicateField {
                        field: config.name().to_string(),
                        group: group_number,
                    });
                }

                let bag = build_bag(raw_field.values, config)?;
                group.add_field(config.name(), bag);
            }
            RawItem::Group(raw_group) => {
                let child = build_group(raw_group, field_set, group_counter)?;
                group.add_group(child);
            }
        }
    }

    Ok(group)
}

fn build_bag(values: Vec<RawValue>, config: &FieldConfig) -> ConditionResult<ValuesBag> {
    let mut bag = ValuesBag::new();

    for raw in values {
        match raw {
            RawValue::Single(view) => {
                bag.add_simple_value(transform(config, view)?);
            }
            RawValue::Excluded(view) => {
                bag.add_excluded_simple_value(transform(config, view)?);
            }
            RawValue::Range(range) => {
                require(config, ValueKind::Range)?;
                bag.add_range(build_range(config, range)?);
            }
            RawValue::ExcludedRange(range) => {
                require(config, ValueKind::Range)?;
                bag.add_excluded_range(build_range(config, range)?);
            }
            RawValue::Compare(operator, view) => {
                require(config, ValueKind::Compare)?;
                bag.add_comparison(Compare::new(operator, transform(config, view)?));
            }
            RawValue::Pattern {
                kind,
                case_insensitive,
                value,
            } => {
                require(config, ValueKind::PatternMatch)?;
                bag.add_pattern_match(
                    PatternMatch::new(kind, value).with_case_insensitive(case_insensitive),
                );
            }
        }
    }

    Ok(bag)
}

fn require(config: &FieldConfig, kind: ValueKind) -> ConditionResult<()> {
    if config.supports_value_type(kind) {
        Ok(())
    } else {
        Err(ConditionError::UnsupportedValueKind {
            field: config.name().to_string(),
            kind,
        })
    }
}

fn transform(config: &FieldConfig, view: String) -> ConditionResult<SingleValue> {
    match config
        .value_transformer()
        .reverse_transform(&view, config.options())
    {
        Ok(value) => Ok(SingleValue::new(value, view)),
        Err(source) => Err(ConditionError::InvalidValue {
            field: config.name().to_string(),
            view,
            source,
        }),
    }
}

fn build_range(config: &FieldConfig, raw: RawRange) -> ConditionResult<Range> {
    let lower = transform(config, raw.lower)?;
    let upper = transform(config, raw.upper)?;
    let range = Range::with_bounds(lower, upper, raw.lower_inclusive, raw.upper_inclusive);

    if config
        .value_comparator()
        .is_higher(&range.lower.value, &range.upper.value, config.options())
    {
        return Err(ConditionError::InvalidRange {
            field: config.name().to_string(),
            range: range.to_string(),
        });
    }

    Ok(range)
}
