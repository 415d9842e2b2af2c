//! Common test utilities for building flag drafts and documents.
use hata::prelude::*;
use serde_json::{Value, json};

/// A boolean flag with targeting switched off.
///
/// Variants: `true` / `false`, default `false`.
#[allow(dead_code)]
pub fn create_boolean_draft() -> FlagDraft {
    FlagDraft {
        flag_key: "f".to_string(),
        description: None,
        state: true,
        flag_type: FlagType::Boolean,
        variants: vec![Variant::new("true", true), Variant::new("false", false)],
        default_variant: "false".to_string(),
        has_targeting: false,
        rules: vec![Rule::placeholder("true")],
        has_default_rule: false,
        default_rule: "false".to_string(),
    }
}

/// A boolean flag with one email allow-list rule and a fallback.
///
/// Logic: `user.email in [a@x.com, b@x.com]` -> `true`, else `false`
#[allow(dead_code)]
pub fn create_targeted_draft() -> FlagDraft {
    let mut draft = create_boolean_draft();
    draft.has_targeting = true;
    draft.rules = vec![Rule::new(
        Condition::new("user.email", Operator::InList, "a@x.com, b@x.com"),
        "true",
    )];
    draft.has_default_rule = true;
    draft.default_rule = "false".to_string();
    draft
}

/// A boolean flag exercising every supported operator once, without a fallback.
#[allow(dead_code)]
pub fn create_all_operators_draft() -> FlagDraft {
    let mut draft = create_boolean_draft();
    draft.flag_key = "all-operators".to_string();
    draft.has_targeting = true;
    draft.rules = vec![
        Rule::new(
            Condition::new("user.email", Operator::EndsWith, "@example.com"),
            "true",
        ),
        Rule::new(Condition::new("user.name", Operator::StartsWith, "adm"), "false"),
        Rule::new(Condition::sem_ver("app.version", ">", "2.1.0"), "true"),
        Rule::new(
            Condition::new("user.country", Operator::InList, "de, fr, it"),
            "true",
        ),
        Rule::new(
            Condition::new("user.country", Operator::NotInList, "us, ca"),
            "false",
        ),
        Rule::new(
            Condition::new("user.email", Operator::InString, "@example.com"),
            "true",
        ),
        Rule::new(
            Condition::new("user.email", Operator::NotInString, "admin@example.com"),
            "false",
        ),
    ];
    draft
}

/// An object flag with two JSON-text variants.
#[allow(dead_code)]
pub fn create_object_draft() -> FlagDraft {
    let mut draft = create_boolean_draft();
    draft.flag_key = "theme".to_string();
    draft.set_type(FlagType::Object);
    draft
}

/// A stored flag in engine form, with one rule and a fallback.
#[allow(dead_code)]
pub fn create_engine_flag_json() -> Value {
    json!({
        "state": "ENABLED",
        "defaultVariant": "off",
        "variants": { "on": true, "off": false },
        "targeting": {
            "if": [
                { "in": [{ "var": "user.email" }, ["admin@example.com", "user@example.com"]] },
                "on",
                "off"
            ]
        }
    })
}

/// Wraps a single flag into a document.
#[allow(dead_code)]
pub fn wrap_document(key: &str, flag: Value) -> Value {
    json!({ "flags": { key: flag } })
}
