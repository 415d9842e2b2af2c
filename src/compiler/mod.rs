//! The forward compiler: `FlagDraft` to engine document.

use crate::document::{Branch, EngineDocument, EngineFlag, FlagState, IfChain};
use crate::draft::{FlagDraft, FlagType, VariantValue};
use crate::error::CompileError;
use serde_json::{Map, Value};
use tracing::{debug, trace};

mod condition;

pub use condition::serialize_condition;

/// Compiles a draft into a document holding that single flag.
pub fn compile(draft: &FlagDraft) -> Result<EngineDocument, CompileError> {
    let flag = compile_flag(draft)?;
    Ok(EngineDocument::single(draft.flag_key.clone(), flag))
}

/// Compiles a draft into the engine form of its flag.
///
/// The only failure is object variant text that is not valid JSON.
pub fn compile_flag(draft: &FlagDraft) -> Result<EngineFlag, CompileError> {
    let variants = compile_variants(draft)?;
    let targeting = draft.has_targeting.then(|| compile_targeting(draft));
    let rules = if draft.has_targeting { draft.rules.len() } else { 0 };

    debug!(
        flag = %draft.flag_key,
        variants = variants.len(),
        rules,
        fallback = draft.has_targeting && draft.has_default_rule,
        "compiled flag"
    );

    Ok(EngineFlag {
        state: FlagState::from(draft.state),
        default_variant: Some(draft.default_variant.clone()),
        variants,
        targeting,
    })
}

fn compile_variants(draft: &FlagDraft) -> Result<Map<String, Value>, CompileError> {
    let mut variants = Map::with_capacity(draft.variants.len());
    for variant in &draft.variants {
        let value = match (draft.flag_type, &variant.value) {
            (FlagType::Object, VariantValue::Text(source)) => serde_json::from_str(source)
                .map_err(|e| CompileError::InvalidVariantJson {
                    variant: variant.name.clone(),
                    message: e.to_string(),
                })?,
            (_, value) => value.to_json(),
        };
        variants.insert(variant.name.clone(), value);
    }
    Ok(variants)
}

fn compile_targeting(draft: &FlagDraft) -> Value {
    let branches = draft
        .rules
        .iter()
        .enumerate()
        .map(|(index, rule)| {
            trace!(
                rule = index,
                operator = %rule.condition.operator,
                variant = %rule.target_variant,
                "serializing rule"
            );
            Branch {
                condition: serialize_condition(&rule.condition),
                variant: rule.target_variant.clone(),
            }
        })
        .collect();

    IfChain {
        branches,
        fallback: draft
            .has_default_rule
            .then(|| draft.default_rule.clone()),
    }
    .into_targeting()
}
