//! Structural validation of engine documents.
//!
//! Every check runs and every problem is collected, so one pass shows the
//! user the full list.

use crate::compiler::compile;
use crate::document::EngineDocument;
use crate::document::logic::kind_name;
use crate::draft::FlagDraft;
use crate::error::SchemaViolation;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

mod targeting;

use targeting::check_targeting;

/// The outcome of a validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_violations(violations: Vec<SchemaViolation>) -> Self {
        Self {
            valid: violations.is_empty(),
            errors: violations.iter().map(ToString::to_string).collect(),
        }
    }

    /// A failed report carrying a single message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![message.into()],
        }
    }
}

/// Validates a raw JSON document.
pub fn validate(document: &Value) -> ValidationReport {
    let violations = collect_violations(document);
    debug!(violations = violations.len(), "validated document");
    ValidationReport::from_violations(violations)
}

/// Validates a typed document.
pub fn validate_document(document: &EngineDocument) -> ValidationReport {
    match document.to_value() {
        Ok(value) => validate(&value),
        Err(e) => ValidationReport::failure(e.to_string()),
    }
}

/// Compiles a draft and validates the result.
///
/// A compile failure is reported as the only error. Duplicate variant names,
/// which the compiled map would silently collapse, are checked on the draft.
pub fn validate_draft(draft: &FlagDraft) -> ValidationReport {
    let document = match compile(draft) {
        Ok(document) => document,
        Err(e) => return ValidationReport::failure(e.to_string()),
    };

    let mut violations = duplicate_variants(draft);
    match document.to_value() {
        Ok(value) => violations.extend(collect_violations(&value)),
        Err(e) => return ValidationReport::failure(e.to_string()),
    }
    debug!(
        flag = %draft.flag_key,
        violations = violations.len(),
        "validated draft"
    );
    ValidationReport::from_violations(violations)
}

fn duplicate_variants(draft: &FlagDraft) -> Vec<SchemaViolation> {
    let mut seen = AHashSet::new();
    let mut reported = AHashSet::new();
    let mut violations = Vec::new();
    for variant in &draft.variants {
        let name = variant.name.as_str();
        if !seen.insert(name) && reported.insert(name) {
            violations.push(SchemaViolation::DuplicateVariantName {
                flag: draft.flag_key.clone(),
                variant: name.to_string(),
            });
        }
    }
    violations
}

fn collect_violations(document: &Value) -> Vec<SchemaViolation> {
    let mut violations = Vec::new();
    let Some(root) = document.as_object() else {
        violations.push(SchemaViolation::RootNotObject);
        return violations;
    };
    match root.get("flags") {
        None => violations.push(SchemaViolation::MissingFlags),
        Some(Value::Object(flags)) => {
            for (key, flag) in flags {
                check_flag(key, flag, &mut violations);
            }
        }
        Some(_) => violations.push(SchemaViolation::FlagsNotObject),
    }
    violations
}

fn check_flag(key: &str, flag: &Value, violations: &mut Vec<SchemaViolation>) {
    if key.is_empty() {
        violations.push(SchemaViolation::EmptyFlagKey);
    }
    let Some(flag) = flag.as_object() else {
        violations.push(SchemaViolation::FlagNotObject(key.to_string()));
        return;
    };

    check_state(key, flag, violations);
    let variants = check_variants(key, flag, violations);

    match flag.get("defaultVariant") {
        None => violations.push(SchemaViolation::MissingField {
            flag: key.to_string(),
            field: "defaultVariant",
        }),
        Some(Value::String(name)) => {
            if variants.is_some_and(|v| !v.contains_key(name)) {
                violations.push(SchemaViolation::UnknownDefaultVariant {
                    flag: key.to_string(),
                    variant: name.clone(),
                });
            }
        }
        Some(other) => violations.push(type_mismatch(key, "defaultVariant", "a string", other)),
    }

    match flag.get("targeting") {
        None | Some(Value::Null) => {}
        Some(Value::Object(targeting)) => check_targeting(key, targeting, variants, violations),
        Some(other) => violations.push(type_mismatch(key, "targeting", "an object", other)),
    }
}

fn check_state(key: &str, flag: &Map<String, Value>, violations: &mut Vec<SchemaViolation>) {
    match flag.get("state") {
        None => violations.push(SchemaViolation::MissingField {
            flag: key.to_string(),
            field: "state",
        }),
        Some(Value::String(s)) if s == "ENABLED" || s == "DISABLED" => {}
        Some(other) => violations.push(SchemaViolation::InvalidState {
            flag: key.to_string(),
            found: match other {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }),
    }
}

/// Returns the variants map when it is usable for reference checks.
fn check_variants<'a>(
    key: &str,
    flag: &'a Map<String, Value>,
    violations: &mut Vec<SchemaViolation>,
) -> Option<&'a Map<String, Value>> {
    let variants = match flag.get("variants") {
        None => {
            violations.push(SchemaViolation::MissingField {
                flag: key.to_string(),
                field: "variants",
            });
            return None;
        }
        Some(Value::Object(variants)) => variants,
        Some(other) => {
            violations.push(type_mismatch(key, "variants", "an object", other));
            return None;
        }
    };

    let Some(first) = variants.values().next() else {
        violations.push(SchemaViolation::NoVariants(key.to_string()));
        return Some(variants);
    };

    let expected = kind_name(first);
    for (name, value) in variants {
        if name.is_empty() {
            violations.push(SchemaViolation::EmptyVariantName(key.to_string()));
        }
        let found = kind_name(value);
        if found != expected {
            violations.push(SchemaViolation::MixedVariantTypes {
                flag: key.to_string(),
                variant: name.clone(),
                expected,
                found,
            });
        }
    }
    Some(variants)
}

fn type_mismatch(key: &str, field: &str, expected: &'static str, found: &Value) -> SchemaViolation {
    SchemaViolation::TypeMismatch {
        flag: key.to_string(),
        field: field.to_string(),
        expected,
        found: kind_name(found),
    }
}
