use super::condition::Condition;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// The value type shared by every variant of a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagType {
    #[default]
    Boolean,
    String,
    Number,
    Object,
}

impl FlagType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagType::Boolean => "boolean",
            FlagType::String => "string",
            FlagType::Number => "number",
            FlagType::Object => "object",
        }
    }
}

impl std::fmt::Display for FlagType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A variant value as held by the edit form.
///
/// Object-typed flags keep their values as JSON source text (`Text`) until
/// compile time, so a half-typed object never blocks editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariantValue {
    Bool(bool),
    Number(Number),
    Text(String),
    Null,
}

impl VariantValue {
    /// The value a newly added variant starts with for the given flag type.
    pub fn zero(flag_type: FlagType) -> Self {
        match flag_type {
            FlagType::Boolean => VariantValue::Bool(false),
            FlagType::String => VariantValue::Text(String::new()),
            FlagType::Number => VariantValue::Number(Number::from(0)),
            FlagType::Object => VariantValue::Text("{}".to_string()),
        }
    }

    /// Converts to the engine representation without interpreting object text.
    pub fn to_json(&self) -> Value {
        match self {
            VariantValue::Bool(b) => Value::Bool(*b),
            VariantValue::Number(n) => Value::Number(n.clone()),
            VariantValue::Text(s) => Value::String(s.clone()),
            VariantValue::Null => Value::Null,
        }
    }

    /// Reads an engine value back into its edit-form shape.
    ///
    /// For object flags every value is re-serialized to JSON text. Otherwise
    /// scalars map across directly and any stray array or object in a
    /// non-object flag is kept as its JSON text.
    pub fn from_engine(value: &Value, flag_type: FlagType) -> Self {
        if flag_type == FlagType::Object {
            return VariantValue::Text(value.to_string());
        }
        match value {
            Value::Bool(b) => VariantValue::Bool(*b),
            Value::Number(n) => VariantValue::Number(n.clone()),
            Value::String(s) => VariantValue::Text(s.clone()),
            Value::Null => VariantValue::Null,
            other => VariantValue::Text(other.to_string()),
        }
    }
}

impl From<bool> for VariantValue {
    fn from(b: bool) -> Self {
        VariantValue::Bool(b)
    }
}

impl From<i32> for VariantValue {
    fn from(n: i32) -> Self {
        VariantValue::Number(Number::from(n))
    }
}

impl From<i64> for VariantValue {
    fn from(n: i64) -> Self {
        VariantValue::Number(Number::from(n))
    }
}

impl From<&str> for VariantValue {
    fn from(s: &str) -> Self {
        VariantValue::Text(s.to_string())
    }
}

impl From<String> for VariantValue {
    fn from(s: String) -> Self {
        VariantValue::Text(s)
    }
}

/// A named value option of a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub value: VariantValue,
}

impl Variant {
    pub fn new(name: impl Into<String>, value: impl Into<VariantValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An ordered (condition, variant) pair. The first matching rule wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(default)]
    pub condition: Condition,
    pub target_variant: String,
}

impl Rule {
    pub fn new(condition: Condition, target_variant: impl Into<String>) -> Self {
        Self {
            condition,
            target_variant: target_variant.into(),
        }
    }

    /// An empty rule used to keep the editor's rule list non-empty.
    pub fn placeholder(target_variant: impl Into<String>) -> Self {
        Self::new(Condition::default(), target_variant)
    }
}

/// The structured, UI-side model of a single flag.
///
/// This is what the editor mutates. It is compiled into an `EngineFlag` for
/// saving and rebuilt from one when an existing flag is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagDraft {
    pub flag_key: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub state: bool,
    #[serde(rename = "type", default)]
    pub flag_type: FlagType,
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub default_variant: String,
    #[serde(default)]
    pub has_targeting: bool,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub has_default_rule: bool,
    #[serde(default)]
    pub default_rule: String,
}

impl FlagDraft {
    /// Name of the first variant, if any.
    pub fn first_variant_name(&self) -> Option<&str> {
        self.variants.first().map(|v| v.name.as_str())
    }
}
