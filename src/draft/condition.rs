use serde::{Deserialize, Serialize};

/// Comparator used by a freshly created `sem_ver` condition.
pub const DEFAULT_SEMVER_COMPARATOR: &str = ">=";

/// Comparator tokens accepted by the `sem_ver` operator.
pub const SEMVER_COMPARATORS: [&str; 6] = [">=", ">", "<", "<=", "==", "!="];

/// Master macro to define the operator set, its form names and its wire keys.
///
/// The first group lists operators whose engine shape is the generic
/// `{name: [{"var": attr}, value]}`, so their form name doubles as the wire key.
/// The second group lists operators with a dedicated wire shape.
macro_rules! define_operators {
    ( $( ($pt_variant:ident, $pt_name:literal) ),* $(,)? ; $( ($variant:ident, $name:literal) ),* $(,)? ) => {
        /// A condition operator as offered by the flag editor.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum Operator {
            $( $pt_variant, )*
            $( $variant, )*
            /// Any other single-argument operator, kept by its raw name.
            Other(String),
        }

        impl Operator {
            /// The name used for this operator in the edit model.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Operator::$pt_variant => $pt_name, )*
                    $( Operator::$variant => $name, )*
                    Operator::Other(name) => name,
                }
            }

            /// Resolves an edit-model operator name.
            pub fn from_name(name: &str) -> Self {
                match name {
                    $( $pt_name => Operator::$pt_variant, )*
                    $( $name => Operator::$variant, )*
                    other => Operator::Other(other.to_string()),
                }
            }

            /// Resolves the top-level key of a generic engine condition.
            ///
            /// Only passthrough operators are recognised here; keys such as
            /// `in_list` never appear on the wire, so they stay `Other`.
            pub fn from_wire_key(key: &str) -> Self {
                match key {
                    $( $pt_name => Operator::$pt_variant, )*
                    other => Operator::Other(other.to_string()),
                }
            }
        }
    };
}

define_operators! {
    // Generic `{op: [var, value]}` operators
    (EndsWith, "ends_with"),
    (StartsWith, "starts_with"),
    (Equals, "==")

    ; // Separator between passthrough and dedicated shapes

    (SemVer, "sem_ver"),
    (InList, "in_list"),
    (NotInList, "not_in_list"),
    (InString, "in_string"),
    (NotInString, "not_in_string")
}

impl Default for Operator {
    fn default() -> Self {
        Operator::EndsWith
    }
}

impl From<String> for Operator {
    fn from(name: String) -> Self {
        Operator::from_name(&name)
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        match op {
            Operator::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The condition half of a targeting rule, in the flat shape the edit form uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Condition {
    /// Context attribute path being tested. Empty means unset.
    pub name: String,
    pub operator: Operator,
    /// Comparator token, only meaningful for `sem_ver`.
    pub sub_operator: String,
    /// Raw operand. Comma separated for the `*_list` operators.
    pub value: String,
}

impl Default for Condition {
    fn default() -> Self {
        Self {
            name: String::new(),
            operator: Operator::EndsWith,
            sub_operator: DEFAULT_SEMVER_COMPARATOR.to_string(),
            value: String::new(),
        }
    }
}

impl Condition {
    pub fn new(name: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operator,
            value: value.into(),
            ..Self::default()
        }
    }

    /// A `sem_ver` condition comparing `name` against `version`.
    pub fn sem_ver(
        name: impl Into<String>,
        comparator: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            operator: Operator::SemVer,
            sub_operator: comparator.into(),
            value: version.into(),
        }
    }

    /// Splits the raw value on commas, trimming each element.
    ///
    /// A blank value yields no elements at all rather than one empty string.
    pub fn list_values(&self) -> Vec<String> {
        if self.value.trim().is_empty() {
            return Vec::new();
        }
        self.value
            .split(',')
            .map(|item| item.trim().to_string())
            .collect()
    }
}
