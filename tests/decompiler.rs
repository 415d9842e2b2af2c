//! Tests for the reverse compiler: engine flags back into drafts.
mod common;
use common::*;
use hata::decompiler::parse_condition;
use hata::prelude::*;
use serde_json::{Value, json};

fn flag_with_if(items: Value) -> Value {
    json!({
        "state": "ENABLED",
        "defaultVariant": "off",
        "variants": { "on": true, "off": false },
        "targeting": { "if": items }
    })
}

#[test]
fn test_decompile_stored_flag() {
    let draft = decompile_value(&create_engine_flag_json(), "test-flag").unwrap();

    assert_eq!(draft.flag_key, "test-flag");
    assert!(draft.state);
    assert_eq!(draft.flag_type, FlagType::Boolean);
    assert_eq!(
        draft.variants,
        vec![Variant::new("on", true), Variant::new("off", false)]
    );
    assert_eq!(draft.default_variant, "off");
    assert!(draft.has_targeting);
    assert!(draft.has_default_rule);
    assert_eq!(draft.default_rule, "off");

    assert_eq!(draft.rules.len(), 1);
    let rule = &draft.rules[0];
    assert_eq!(rule.target_variant, "on");
    assert_eq!(rule.condition.name, "user.email");
    assert_eq!(rule.condition.operator, Operator::InList);
    assert_eq!(rule.condition.value, "admin@example.com, user@example.com");
}

#[test]
fn test_fallback_parity() {
    for pairs in 0..4usize {
        let mut items = Vec::new();
        for i in 0..pairs {
            items.push(json!({ "ends_with": [{ "var": "user.email" }, format!("@{}.com", i)] }));
            items.push(json!("on"));
        }

        let even = decompile_value(&flag_with_if(json!(items.clone())), "f").unwrap();
        assert!(!even.has_default_rule, "length {} has no fallback", items.len());

        items.push(json!("off"));
        let odd = decompile_value(&flag_with_if(json!(items.clone())), "f").unwrap();
        assert!(odd.has_default_rule, "length {} has a fallback", items.len());
        assert_eq!(odd.default_rule, "off");
        assert_eq!(odd.rules.len(), pairs.max(1));
    }
}

#[test]
fn test_trailing_element_is_never_a_condition() {
    // An odd array whose last element looks like a condition still treats it as the fallback.
    let items = json!([
        { "starts_with": [{ "var": "user.name" }, "a"] },
        "on",
        { "ends_with": [{ "var": "user.name" }, "z"] }
    ]);
    let draft = decompile_value(&flag_with_if(items), "f").unwrap();
    assert_eq!(draft.rules.len(), 1);
    assert_eq!(draft.rules[0].condition.operator, Operator::StartsWith);
    assert!(draft.has_default_rule);
    assert!(draft.default_rule.contains("ends_with"));
}

#[test]
fn test_missing_targeting_inserts_placeholder() {
    let flag = json!({
        "state": "DISABLED",
        "defaultVariant": "blue",
        "variants": { "red": "#f00", "blue": "#00f" }
    });
    let draft = decompile_value(&flag, "color").unwrap();

    assert!(!draft.state);
    assert_eq!(draft.flag_type, FlagType::String);
    assert!(!draft.has_targeting);
    assert!(!draft.has_default_rule);
    assert_eq!(draft.rules, vec![Rule::placeholder("red")]);
    assert_eq!(draft.rules[0].condition, Condition::default());
}

#[test]
fn test_empty_if_array_means_no_targeting() {
    let draft = decompile_value(&flag_with_if(json!([])), "f").unwrap();
    assert!(!draft.has_targeting);
    assert_eq!(draft.rules, vec![Rule::placeholder("on")]);
}

#[test]
fn test_empty_flag_uses_defaults() {
    let draft = decompile_value(&json!({}), "empty").unwrap();
    assert_eq!(draft.flag_type, FlagType::String);
    assert!(draft.variants.is_empty());
    assert_eq!(draft.default_variant, "");
    assert!(!draft.state);
    assert_eq!(draft.rules, vec![Rule::placeholder("true")]);
}

#[test]
fn test_default_variant_falls_back_to_first() {
    let flag = json!({ "state": "ENABLED", "variants": { "a": 1, "b": 2 } });
    let draft = decompile_value(&flag, "n").unwrap();
    assert_eq!(draft.flag_type, FlagType::Number);
    assert_eq!(draft.default_variant, "a");
}

#[test]
fn test_object_variants_become_json_text() {
    let flag = json!({
        "state": "ENABLED",
        "defaultVariant": "dark",
        "variants": { "dark": { "bg": "#000" }, "light": { "bg": "#fff" } }
    });
    let draft = decompile_value(&flag, "theme").unwrap();
    assert_eq!(draft.flag_type, FlagType::Object);
    assert_eq!(draft.variants[0].value, VariantValue::Text(r##"{"bg":"#000"}"##.to_string()));
}

#[test]
fn test_malformed_flag_is_an_error() {
    let err = decompile_value(&json!("not a flag"), "f").unwrap_err();
    assert!(matches!(err, DecompileError::MalformedFlag(_)));

    let err = decompile_value(&json!({ "variants": [1, 2] }), "f").unwrap_err();
    assert!(err.to_string().contains("malformed"));
}

#[test]
fn test_boolean_state_is_accepted() {
    let flag = json!({ "state": true, "variants": { "on": true } });
    let draft = decompile_value(&flag, "f").unwrap();
    assert!(draft.state);
}

#[test]
fn test_null_fields_from_flag_store() {
    let flag = json!({ "state": "ENABLED", "variants": null, "defaultVariant": null });
    let draft = decompile_value(&flag, "f").unwrap();
    assert!(draft.state);
    assert!(draft.variants.is_empty());
    assert_eq!(draft.default_variant, "");
    assert_eq!(draft.rules, vec![Rule::placeholder("true")]);

    let flag = json!({ "state": null, "variants": { "on": true } });
    let draft = decompile_value(&flag, "f").unwrap();
    assert!(!draft.state);
    assert_eq!(draft.default_variant, "on");
}

#[test]
fn test_parse_sem_ver() {
    let condition = parse_condition(&json!({ "sem_ver": [{ "var": "app.version" }, "<", "3.0.0"] }));
    assert_eq!(condition, Condition::sem_ver("app.version", "<", "3.0.0"));

    let partial = parse_condition(&json!({ "sem_ver": [{ "var": "app.version" }] }));
    assert_eq!(partial.sub_operator, ">=");
    assert_eq!(partial.value, "");
}

#[test]
fn test_parse_membership_forms() {
    let list = parse_condition(&json!({ "in": [{ "var": "x" }, ["a", "b", "c"]] }));
    assert_eq!(list.operator, Operator::InList);
    assert_eq!(list.value, "a, b, c");

    let string = parse_condition(&json!({ "in": [{ "var": "x" }, "abc"] }));
    assert_eq!(string.operator, Operator::InString);
    assert_eq!(string.value, "abc");

    let missing = parse_condition(&json!({ "in": [{ "var": "x" }] }));
    assert_eq!(missing.operator, Operator::InString);
    assert_eq!(missing.value, "");
}

#[test]
fn test_parse_negations() {
    let not_list = parse_condition(&json!({ "!": { "in": [{ "var": "x" }, ["a", "b"]] } }));
    assert_eq!(not_list.operator, Operator::NotInList);
    assert_eq!(not_list.value, "a, b");
    assert_eq!(not_list.name, "x");

    let not_string =
        parse_condition(&json!({ "!": { "in": [{ "var": "user.email" }, "admin@example.com"] } }));
    assert_eq!(not_string.operator, Operator::NotInString);
    assert_eq!(not_string.value, "admin@example.com");

    // Other negated operators are not reconstructed.
    let unsupported = parse_condition(&json!({ "!": { "ends_with": [{ "var": "x" }, "y"] } }));
    assert_eq!(unsupported, Condition::default());
}

#[test]
fn test_parse_unary_array_negation_is_lossy() {
    // `{"!": [cond]}` is accepted by the validator but not reconstructed.
    let unary = parse_condition(&json!({ "!": [{ "in": [{ "var": "x" }, ["a", "b"]] }] }));
    assert_eq!(unary, Condition::default());
}

#[test]
fn test_parse_passthrough_operators() {
    let eq = parse_condition(&json!({ "==": [{ "var": "tier" }, "gold"] }));
    assert_eq!(eq.operator, Operator::Equals);
    assert_eq!(eq.value, "gold");

    let numeric = parse_condition(&json!({ ">": [{ "var": "age" }, 18] }));
    assert_eq!(numeric.operator, Operator::Other(">".to_string()));
    assert_eq!(numeric.value, "18");

    let no_operand = parse_condition(&json!({ "starts_with": [{ "var": "x" }] }));
    assert_eq!(no_operand.operator, Operator::StartsWith);
    assert_eq!(no_operand.value, "");
}

#[test]
fn test_parse_degenerate_conditions() {
    assert_eq!(parse_condition(&json!("on")), Condition::default());
    assert_eq!(parse_condition(&json!({})), Condition::default());
    assert_eq!(parse_condition(&Value::Null), Condition::default());

    // A subject that is not a var reference leaves the name empty.
    let literal_subject = parse_condition(&json!({ "ends_with": ["literal", "x"] }));
    assert_eq!(literal_subject.name, "");
    assert_eq!(literal_subject.value, "x");
}

#[test]
fn test_decompile_whole_document() {
    let document: EngineDocument =
        serde_json::from_value(wrap_document("beta", create_engine_flag_json())).unwrap();
    let drafts = decompile_document(&document);
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].flag_key, "beta");
}

#[test]
fn test_flag_dto_into_draft() {
    let dto: FlagDto = serde_json::from_value(json!({
        "flagId": "flag-1",
        "name": "",
        "description": "Gate for the new checkout",
        "state": "ENABLED",
        "defaultVariant": "off",
        "variants": { "on": true, "off": false },
        "targeting": null
    }))
    .unwrap();

    let draft = dto.into_draft();
    assert_eq!(draft.flag_key, "flag-1");
    assert_eq!(draft.description.as_deref(), Some("Gate for the new checkout"));
    assert!(!draft.has_targeting);
}

#[test]
fn test_flag_dto_with_null_fields() {
    let dto: FlagDto = serde_json::from_value(json!({
        "flagId": "flag-2",
        "name": null,
        "description": null,
        "state": null,
        "defaultVariant": null,
        "variants": null,
        "targeting": null
    }))
    .unwrap();

    assert_eq!(dto.state, FlagState::Disabled);
    assert_eq!(dto.flag_key(), "flag-2");

    let draft = dto.into_draft();
    assert_eq!(draft.flag_key, "flag-2");
    assert!(!draft.state);
    assert!(draft.variants.is_empty());
    assert!(!draft.has_targeting);
}
