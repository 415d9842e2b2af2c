//! Helpers for the logic-tree fragments the compiler emits and reads.

use itertools::Itertools;
use serde_json::{Map, Value, json};

/// Key of the targeting chain: `{"if": [cond0, variant0, ..., fallback?]}`.
pub const IF_KEY: &str = "if";
/// Key of an attribute reference: `{"var": "user.email"}`.
pub const VAR_KEY: &str = "var";
/// Key of a negation wrapper: `{"!": cond}`.
pub const NOT_KEY: &str = "!";

/// One (condition, variant) pair of an `if` chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub condition: Value,
    pub variant: String,
}

/// A targeting `if` chain in structured form.
///
/// The wire array is strictly positional: an even-length array is all pairs,
/// an odd-length array carries a trailing fallback variant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IfChain {
    pub branches: Vec<Branch>,
    pub fallback: Option<String>,
}

impl IfChain {
    pub fn into_targeting(self) -> Value {
        let mut items = Vec::with_capacity(self.branches.len() * 2 + 1);
        for branch in self.branches {
            items.push(branch.condition);
            items.push(Value::String(branch.variant));
        }
        if let Some(fallback) = self.fallback {
            items.push(Value::String(fallback));
        }
        json!({ IF_KEY: items })
    }
}

/// The raw `if` array of a targeting object, if it has one.
pub fn if_items(targeting: &Value) -> Option<&Vec<Value>> {
    targeting.get(IF_KEY).and_then(Value::as_array)
}

/// Splits an `if` array into its positional pairs and the trailing fallback.
///
/// When the length is odd the last element is the fallback and is never
/// paired, whatever its shape.
pub fn split_if_items(items: &[Value]) -> (Vec<(&Value, &Value)>, Option<&Value>) {
    let (paired, fallback) = if items.len() % 2 == 1 {
        let (last, rest) = items.split_last().map_or((None, items), |(l, r)| (Some(l), r));
        (rest, last)
    } else {
        (items, None)
    };
    (paired.iter().tuples().collect(), fallback)
}

/// `{"var": name}`.
pub fn var_ref(name: &str) -> Value {
    json!({ VAR_KEY: name })
}

/// Reads the attribute name out of a `{"var": ...}` operand.
pub fn var_name(operand: &Value) -> Option<String> {
    operand.as_object()?.get(VAR_KEY).map(value_text)
}

/// A single-key object `{key: value}`.
pub fn single_key(key: &str, value: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(key.to_string(), value);
    Value::Object(map)
}

/// `{"!": inner}`.
pub fn negate(inner: Value) -> Value {
    single_key(NOT_KEY, inner)
}

/// The first entry of a non-empty object.
pub fn first_entry(value: &Value) -> Option<(&String, &Value)> {
    value.as_object()?.iter().next()
}

/// Renders an operand as the text an edit field would hold.
///
/// Strings are taken verbatim, arrays are comma joined, anything else uses
/// its JSON text.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(value_text).join(","),
        other => other.to_string(),
    }
}

/// The JSON kind name used in messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
