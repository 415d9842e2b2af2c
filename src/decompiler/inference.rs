use crate::draft::FlagType;
use serde_json::Value;

/// Infers a flag's type from a sample variant value.
///
/// Only the first variant is consulted; later variants of a different kind
/// do not change the answer. Arrays count as objects. A missing sample, a
/// `null` or a string all give `String`.
pub fn infer_type(sample: Option<&Value>) -> FlagType {
    match sample {
        Some(Value::Bool(_)) => FlagType::Boolean,
        Some(Value::Number(_)) => FlagType::Number,
        Some(Value::Object(_) | Value::Array(_)) => FlagType::Object,
        Some(Value::String(_) | Value::Null) | None => FlagType::String,
    }
}
