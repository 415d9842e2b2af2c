use crate::document::logic::{IF_KEY, NOT_KEY, VAR_KEY, kind_name, split_if_items};
use crate::draft::SEMVER_COMPARATORS;
use crate::error::SchemaViolation;
use serde_json::{Map, Value};

/// Checks a targeting object against the `if`-chain shape the compiler emits.
///
/// `variants` is `None` when the flag's variants were unusable; reference
/// checks are skipped then so one problem is not reported many times.
pub(super) fn check_targeting(
    flag: &str,
    targeting: &Map<String, Value>,
    variants: Option<&Map<String, Value>>,
    violations: &mut Vec<SchemaViolation>,
) {
    // An empty targeting object means "no targeting" to the evaluator.
    if targeting.is_empty() {
        return;
    }
    let items = match targeting.get(IF_KEY) {
        None => {
            violations.push(SchemaViolation::MissingField {
                flag: flag.to_string(),
                field: "targeting.if",
            });
            return;
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            violations.push(SchemaViolation::TypeMismatch {
                flag: flag.to_string(),
                field: "targeting.if".to_string(),
                expected: "an array",
                found: kind_name(other),
            });
            return;
        }
    };

    match items.len() {
        0 => violations.push(SchemaViolation::EmptyIf(flag.to_string())),
        1 => violations.push(SchemaViolation::IfWithoutCondition(flag.to_string())),
        _ => {}
    }

    let (pairs, fallback) = split_if_items(items);
    for (index, (condition, target)) in pairs.into_iter().enumerate() {
        let rule = index + 1;
        check_condition(flag, rule, condition, violations);
        match target {
            Value::String(name) => {
                if variants.is_some_and(|v| !v.contains_key(name)) {
                    violations.push(SchemaViolation::UnknownTargetVariant {
                        flag: flag.to_string(),
                        rule,
                        variant: name.clone(),
                    });
                }
            }
            _ => violations.push(SchemaViolation::TargetNotString {
                flag: flag.to_string(),
                rule,
            }),
        }
    }

    match fallback {
        None => {}
        Some(Value::String(name)) => {
            if variants.is_some_and(|v| !v.contains_key(name)) {
                violations.push(SchemaViolation::UnknownFallbackVariant {
                    flag: flag.to_string(),
                    variant: name.clone(),
                });
            }
        }
        Some(_) => violations.push(SchemaViolation::FallbackNotString(flag.to_string())),
    }
}

fn check_condition(
    flag: &str,
    rule: usize,
    condition: &Value,
    violations: &mut Vec<SchemaViolation>,
) {
    let Some((operator, operands)) = single_operator(condition) else {
        violations.push(SchemaViolation::MalformedCondition {
            flag: flag.to_string(),
            rule,
        });
        return;
    };

    if operator == NOT_KEY {
        // Accept both `{"!": cond}` and the unary-array form `{"!": [cond]}`.
        let inner = match operands {
            Value::Array(items) if items.len() == 1 => &items[0],
            other => other,
        };
        check_condition(flag, rule, inner, violations);
        return;
    }

    let Some(args) = operands.as_array() else {
        violations.push(SchemaViolation::OperandsNotArray {
            flag: flag.to_string(),
            rule,
            operator: operator.clone(),
        });
        return;
    };

    for arg in args {
        if let Some(reference) = arg.as_object().and_then(|o| o.get(VAR_KEY)) {
            if !reference.as_str().is_some_and(|name| !name.is_empty()) {
                violations.push(SchemaViolation::InvalidVarReference {
                    flag: flag.to_string(),
                    rule,
                });
            }
        }
    }

    if operator == "sem_ver" {
        let comparator = args.get(1).and_then(Value::as_str).unwrap_or_default();
        if !SEMVER_COMPARATORS.contains(&comparator) {
            violations.push(SchemaViolation::UnsupportedComparator {
                flag: flag.to_string(),
                rule,
                comparator: comparator.to_string(),
            });
        }
    }
}

fn single_operator(condition: &Value) -> Option<(&String, &Value)> {
    let map = condition.as_object()?;
    if map.len() != 1 {
        return None;
    }
    map.iter().next()
}
