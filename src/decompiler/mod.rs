//! The reverse compiler: engine flag to `FlagDraft`.
//!
//! This is best effort. Missing fields get documented defaults and condition
//! shapes outside the supported table come back as the default condition, so
//! a structurally valid flag always opens in the editor.

use crate::document::logic::{if_items, split_if_items, value_text};
use crate::document::{EngineDocument, EngineFlag};
use crate::draft::{FlagDraft, Rule, Variant, VariantValue};
use crate::error::DecompileError;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};

mod condition;
mod inference;

pub use condition::parse_condition;
pub use inference::infer_type;

/// Placeholder target used when a flag has no variants at all.
const PLACEHOLDER_TARGET: &str = "true";

/// Rebuilds an edit model from an engine flag.
///
/// The engine flag carries no key of its own, so `fallback_flag_key` names it.
pub fn decompile(flag: &EngineFlag, fallback_flag_key: &str) -> FlagDraft {
    let flag_type = infer_type(flag.variants.values().next());
    let variants: Vec<Variant> = flag
        .variants
        .iter()
        .map(|(name, value)| Variant {
            name: name.clone(),
            value: VariantValue::from_engine(value, flag_type),
        })
        .collect();
    let first_variant = flag.variants.keys().next().cloned();

    let default_variant = flag
        .default_variant
        .clone()
        .filter(|name| !name.is_empty())
        .or_else(|| first_variant.clone())
        .unwrap_or_default();

    let items = flag
        .targeting
        .as_ref()
        .and_then(if_items)
        .filter(|items| !items.is_empty());
    let has_targeting = items.is_some();

    let mut rules = Vec::new();
    let mut fallback = None;
    if let Some(items) = items {
        let (pairs, trailing) = split_if_items(items);
        fallback = trailing.map(value_text);
        rules = pairs
            .into_iter()
            .map(|(cond, target)| Rule {
                condition: parse_condition(cond),
                target_variant: value_text(target),
            })
            .collect();
    }

    if rules.is_empty() {
        let target = first_variant.as_deref().unwrap_or(PLACEHOLDER_TARGET);
        trace!(placeholder = target, "no rules found");
        rules.push(Rule::placeholder(target));
    }

    debug!(
        flag = fallback_flag_key,
        flag_type = %flag_type,
        variants = variants.len(),
        rules = rules.len(),
        has_targeting,
        "decompiled flag"
    );

    FlagDraft {
        flag_key: fallback_flag_key.to_string(),
        description: None,
        state: flag.state.is_enabled(),
        flag_type,
        variants,
        default_rule: fallback.clone().unwrap_or_else(|| default_variant.clone()),
        has_default_rule: fallback.is_some(),
        default_variant,
        has_targeting,
        rules,
    }
}

/// Reads raw JSON as an engine flag and decompiles it.
///
/// Fails only when the value cannot be read as a flag at all, for example
/// when it is not an object or `variants` is not a map.
pub fn decompile_value(value: &Value, fallback_flag_key: &str) -> Result<FlagDraft, DecompileError> {
    let flag = EngineFlag::deserialize(value)
        .map_err(|e| DecompileError::MalformedFlag(e.to_string()))?;
    Ok(decompile(&flag, fallback_flag_key))
}

/// Decompiles every flag in a document, keyed by its document key.
pub fn decompile_document(document: &EngineDocument) -> Vec<FlagDraft> {
    document
        .flags
        .iter()
        .map(|(key, flag)| decompile(flag, key))
        .collect()
}
