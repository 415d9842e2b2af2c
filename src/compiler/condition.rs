use crate::document::logic::{negate, single_key, var_ref};
use crate::draft::{Condition, Operator};
use serde_json::{Value, json};

/// Serializes a form condition into its logic-tree shape.
///
/// The first operand is always `{"var": name}`, even when the name is empty;
/// whether a condition makes sense is the validator's concern.
pub fn serialize_condition(condition: &Condition) -> Value {
    let subject = var_ref(&condition.name);
    match &condition.operator {
        Operator::SemVer => json!({
            "sem_ver": [subject, condition.sub_operator, condition.value]
        }),
        Operator::InList => membership(subject, json!(condition.list_values())),
        Operator::NotInList => negate(membership(subject, json!(condition.list_values()))),
        Operator::InString => membership(subject, json!(condition.value)),
        Operator::NotInString => negate(membership(subject, json!(condition.value))),
        Operator::EndsWith | Operator::StartsWith | Operator::Equals | Operator::Other(_) => {
            single_key(
                condition.operator.as_str(),
                json!([subject, condition.value]),
            )
        }
    }
}

fn membership(subject: Value, haystack: Value) -> Value {
    json!({ "in": [subject, haystack] })
}
