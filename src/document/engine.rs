use crate::error::DocumentError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;

/// Whether a flag is served by the evaluator.
///
/// Reads either the engine literals or a plain boolean, and always writes the literal.
/// A `null` state reads as disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "&'static str")]
pub enum FlagState {
    Enabled,
    #[default]
    Disabled,
}

impl FlagState {
    pub const ENABLED: &'static str = "ENABLED";
    pub const DISABLED: &'static str = "DISABLED";

    pub fn as_str(&self) -> &'static str {
        match self {
            FlagState::Enabled => Self::ENABLED,
            FlagState::Disabled => Self::DISABLED,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, FlagState::Enabled)
    }
}

impl From<bool> for FlagState {
    fn from(enabled: bool) -> Self {
        if enabled {
            FlagState::Enabled
        } else {
            FlagState::Disabled
        }
    }
}

impl From<FlagState> for &'static str {
    fn from(state: FlagState) -> Self {
        state.as_str()
    }
}

impl TryFrom<Value> for FlagState {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match &value {
            Value::String(s) if s == Self::ENABLED => Ok(FlagState::Enabled),
            Value::String(s) if s == Self::DISABLED => Ok(FlagState::Disabled),
            Value::Bool(b) => Ok(FlagState::from(*b)),
            Value::Null => Ok(FlagState::default()),
            other => Err(format!(
                "expected \"{}\" or \"{}\", found {}",
                Self::ENABLED,
                Self::DISABLED,
                other
            )),
        }
    }
}

impl std::fmt::Display for FlagState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single flag as the rule evaluator consumes it.
///
/// Every field tolerates being absent so partially written flags can still be
/// opened for editing. `targeting` is kept as raw logic-tree JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineFlag {
    #[serde(default)]
    pub state: FlagState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_variant: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variants: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targeting: Option<Value>,
}

/// Reads a field that the flag store may send as `null` as its default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The top-level flag document: `{"flags": {"<key>": <EngineFlag>, ...}}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineDocument {
    pub flags: BTreeMap<String, EngineFlag>,
}

impl EngineDocument {
    /// A document holding exactly one flag.
    pub fn single(flag_key: impl Into<String>, flag: EngineFlag) -> Self {
        let mut flags = BTreeMap::new();
        flags.insert(flag_key.into(), flag);
        Self { flags }
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> Result<Value, DocumentError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Reads a JSON file into an untyped value.
///
/// Callers decide what the file holds (a document, a single flag or a draft)
/// by looking at the value before typing it.
pub fn load_json(path: &str) -> Result<Value, DocumentError> {
    let content = fs::read_to_string(path).map_err(|e| DocumentError::Io {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    Ok(serde_json::from_str(&content)?)
}
