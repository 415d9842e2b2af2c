use crate::document::logic::{NOT_KEY, first_entry, value_text, var_name};
use crate::draft::{Condition, DEFAULT_SEMVER_COMPARATOR, Operator};
use itertools::Itertools;
use serde_json::Value;
use tracing::warn;

/// Parses a logic-tree condition back into its form shape.
///
/// Anything outside the supported operator table degrades to the default
/// condition; nothing here fails.
pub fn parse_condition(cond: &Value) -> Condition {
    let Some((key, operands)) = first_entry(cond) else {
        return Condition::default();
    };

    if key == NOT_KEY {
        return parse_negated(operands).unwrap_or_else(|| {
            warn!(condition = %cond, "unsupported negated condition, using default");
            Condition::default()
        });
    }

    let name = subject_name(operands);
    match key.as_str() {
        "sem_ver" => Condition {
            name,
            operator: Operator::SemVer,
            sub_operator: operands
                .get(1)
                .map(value_text)
                .unwrap_or_else(|| DEFAULT_SEMVER_COMPARATOR.to_string()),
            value: operands.get(2).map(value_text).unwrap_or_default(),
        },
        "in" => {
            let (operator, value) = membership(operands.get(1), Operator::InList, Operator::InString);
            Condition {
                name,
                operator,
                value,
                ..Condition::default()
            }
        }
        other => Condition {
            name,
            operator: Operator::from_wire_key(other),
            value: operands.get(1).map(value_text).unwrap_or_default(),
            ..Condition::default()
        },
    }
}

/// Only `{"!": {"in": ...}}` can be reconstructed.
fn parse_negated(inner: &Value) -> Option<Condition> {
    let (key, operands) = first_entry(inner)?;
    if key != "in" {
        return None;
    }
    let (operator, value) = membership(operands.get(1), Operator::NotInList, Operator::NotInString);
    Some(Condition {
        name: subject_name(operands),
        operator,
        value,
        ..Condition::default()
    })
}

/// An array haystack is a list, anything else is a substring test.
fn membership(haystack: Option<&Value>, list: Operator, string: Operator) -> (Operator, String) {
    match haystack {
        Some(Value::Array(items)) => (list, items.iter().map(value_text).join(", ")),
        Some(other) => (string, value_text(other)),
        None => (string, String::new()),
    }
}

fn subject_name(operands: &Value) -> String {
    operands.get(0).and_then(var_name).unwrap_or_default()
}
