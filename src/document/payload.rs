use super::engine::{EngineFlag, FlagState, null_as_default};
use crate::compiler::compile_flag;
use crate::decompiler::decompile;
use crate::draft::FlagDraft;
use crate::error::CompileError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A flag as returned by the flag store, one level less nested than a document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagDto {
    #[serde(default, deserialize_with = "null_as_default")]
    pub flag_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub state: FlagState,
    #[serde(default)]
    pub default_variant: Option<String>,
    #[serde(default)]
    pub variants: Option<Map<String, Value>>,
    #[serde(default)]
    pub targeting: Option<Value>,
}

impl FlagDto {
    /// The key the flag is edited under: its name, or its id when unnamed.
    pub fn flag_key(&self) -> &str {
        if self.name.is_empty() {
            &self.flag_id
        } else {
            &self.name
        }
    }

    /// Hydrates an edit model from the fetched flag.
    pub fn into_draft(self) -> FlagDraft {
        let key = self.flag_key().to_string();
        let flag = EngineFlag {
            state: self.state,
            default_variant: self.default_variant,
            variants: self.variants.unwrap_or_default(),
            targeting: self.targeting,
        };
        let mut draft = decompile(&flag, &key);
        draft.description = self.description.filter(|d| !d.is_empty());
        draft
    }
}

/// The body sent to the flag store when saving a flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFlagRequest {
    pub name: String,
    pub description: Option<String>,
    pub state: FlagState,
    pub default_variant: Option<String>,
    pub variants: Option<Map<String, Value>>,
    pub targeting: Option<Value>,
}

impl SaveFlagRequest {
    /// Compiles the draft and lifts its flag into a save body.
    ///
    /// Empty descriptions and default variants are sent as `null`.
    pub fn from_draft(draft: &FlagDraft) -> Result<Self, CompileError> {
        let flag = compile_flag(draft)?;
        Ok(Self {
            name: draft.flag_key.clone(),
            description: draft.description.clone().filter(|d| !d.is_empty()),
            state: flag.state,
            default_variant: flag.default_variant.filter(|d| !d.is_empty()),
            variants: Some(flag.variants),
            targeting: flag.targeting,
        })
    }
}
