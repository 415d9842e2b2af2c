//! Form-level edits on a `FlagDraft`.
//!
//! These keep the draft coherent while a user works on it: presets when the
//! type changes, and default-variant recovery when variants go away. None of
//! this is a compiler guarantee; unresolved references are left for the
//! validator to report.

use super::definition::{FlagDraft, FlagType, Rule, Variant, VariantValue};
use serde_json::Number;

/// Target used for new rules when the flag has no variants to point at.
const FALLBACK_TARGET: &str = "true";

impl FlagDraft {
    /// A new boolean flag with `true`/`false` variants, defaulting to `false`.
    pub fn new(flag_key: impl Into<String>) -> Self {
        Self {
            flag_key: flag_key.into(),
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

    /// Switches the flag type, replacing variants with that type's preset.
    ///
    /// The default variant, the fallback rule and the rule list are all reset
    /// to point at the preset default.
    pub fn set_type(&mut self, flag_type: FlagType) {
        let (variants, default) = type_preset(flag_type);
        self.flag_type = flag_type;
        self.variants = variants;
        self.default_variant = default.to_string();
        self.default_rule = default.to_string();
        self.rules = vec![Rule::placeholder(default)];
    }

    /// Appends an unnamed variant holding the type's zero value.
    pub fn add_variant(&mut self) {
        self.variants.push(Variant {
            name: String::new(),
            value: VariantValue::zero(self.flag_type),
        });
    }

    /// Renames the variant at `index`. Returns `false` if there is no such variant.
    pub fn rename_variant(&mut self, index: usize, name: impl Into<String>) -> bool {
        let Some(variant) = self.variants.get_mut(index) else {
            return false;
        };
        variant.name = name.into();
        self.adopt_sole_variant();
        true
    }

    /// Replaces the value of the variant at `index`.
    pub fn set_variant_value(&mut self, index: usize, value: impl Into<VariantValue>) -> bool {
        let Some(variant) = self.variants.get_mut(index) else {
            return false;
        };
        variant.value = value.into();
        self.adopt_sole_variant();
        true
    }

    /// Removes the variant at `index`.
    ///
    /// If it was the default variant, the default falls back to the first
    /// remaining variant, or to an empty name when none are left.
    pub fn remove_variant(&mut self, index: usize) -> bool {
        if index >= self.variants.len() {
            return false;
        }
        let removed = self.variants.remove(index);
        if removed.name == self.default_variant {
            self.default_variant = self.first_variant_name().unwrap_or_default().to_string();
        }
        true
    }

    /// Appends a placeholder rule targeting the first variant.
    pub fn add_rule(&mut self) {
        let target = self.first_variant_name().unwrap_or(FALLBACK_TARGET).to_string();
        self.rules.push(Rule::placeholder(target));
    }

    pub fn remove_rule(&mut self, index: usize) -> bool {
        if index >= self.rules.len() {
            return false;
        }
        self.rules.remove(index);
        true
    }

    /// A flag with a single variant always defaults to it.
    fn adopt_sole_variant(&mut self) {
        if let [only] = self.variants.as_slice() {
            self.default_variant = only.name.clone();
        }
    }
}

fn type_preset(flag_type: FlagType) -> (Vec<Variant>, &'static str) {
    match flag_type {
        FlagType::Boolean => (
            vec![Variant::new("true", true), Variant::new("false", false)],
            "false",
        ),
        FlagType::String => (
            vec![Variant::new("foo", "foo"), Variant::new("bar", "bar")],
            "foo",
        ),
        FlagType::Number => (
            vec![
                Variant::new("1", VariantValue::Number(Number::from(1))),
                Variant::new("2", VariantValue::Number(Number::from(2))),
            ],
            "1",
        ),
        FlagType::Object => (
            vec![
                Variant::new("foo", r#"{"foo":"foo"}"#),
                Variant::new("bar", r#"{"bar":"bar"}"#),
            ],
            "foo",
        ),
    }
}
