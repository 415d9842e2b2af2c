use thiserror::Error;

/// Errors that can occur while compiling a `FlagDraft` into an engine document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("JSON error: {message}")]
    InvalidVariantJson { variant: String, message: String },
}

/// Errors that can occur while reading an engine flag back into a `FlagDraft`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecompileError {
    #[error("Flag document is malformed: {0}")]
    MalformedFlag(String),
}

/// Errors raised when loading or storing whole engine documents.
#[derive(Error, Debug, Clone)]
pub enum DocumentError {
    #[error("Failed to parse document JSON: {0}")]
    JsonParseError(String),

    #[error("Could not access '{path}': {message}")]
    Io { path: String, message: String },

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Decompile(#[from] DecompileError),
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        DocumentError::JsonParseError(err.to_string())
    }
}

/// A single structural problem found by the schema validator.
///
/// Violations are rendered to plain strings in a `ValidationReport`, so the
/// display text is the user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("Document must be a JSON object")]
    RootNotObject,

    #[error("Document is missing the required 'flags' object")]
    MissingFlags,

    #[error("'flags' must be an object mapping flag keys to flag definitions")]
    FlagsNotObject,

    #[error("Flag keys must not be empty")]
    EmptyFlagKey,

    #[error("Flag '{0}' must be an object")]
    FlagNotObject(String),

    #[error("Flag '{flag}' is missing required field '{field}'")]
    MissingField { flag: String, field: &'static str },

    #[error("Flag '{flag}' has invalid state '{found}', expected \"ENABLED\" or \"DISABLED\"")]
    InvalidState { flag: String, found: String },

    #[error("Flag '{flag}': field '{field}' must be {expected}, found {found}")]
    TypeMismatch {
        flag: String,
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Flag '{0}' must define at least one variant")]
    NoVariants(String),

    #[error(
        "Flag '{flag}': variant '{variant}' is a {found}, but the first variant makes this a {expected} flag"
    )]
    MixedVariantTypes {
        flag: String,
        variant: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Flag '{flag}': defaultVariant '{variant}' does not match any variant")]
    UnknownDefaultVariant { flag: String, variant: String },

    #[error("Flag '{0}': targeting 'if' must not be empty")]
    EmptyIf(String),

    #[error("Flag '{0}': targeting 'if' contains no condition, only a fallback variant")]
    IfWithoutCondition(String),

    #[error("Flag '{flag}': rule {rule} condition must be an object with exactly one operator")]
    MalformedCondition { flag: String, rule: usize },

    #[error("Flag '{flag}': rule {rule} operator '{operator}' must take an array of operands")]
    OperandsNotArray {
        flag: String,
        rule: usize,
        operator: String,
    },

    #[error("Flag '{flag}': rule {rule} has a 'var' reference that is not a non-empty string")]
    InvalidVarReference { flag: String, rule: usize },

    #[error("Flag '{flag}': rule {rule} target variant must be a string")]
    TargetNotString { flag: String, rule: usize },

    #[error("Flag '{flag}': rule {rule} targets unknown variant '{variant}'")]
    UnknownTargetVariant {
        flag: String,
        rule: usize,
        variant: String,
    },

    #[error("Flag '{flag}': rule {rule} uses unsupported sem_ver comparator '{comparator}'")]
    UnsupportedComparator {
        flag: String,
        rule: usize,
        comparator: String,
    },

    #[error("Flag '{0}' has a variant with an empty name")]
    EmptyVariantName(String),

    #[error("Flag '{flag}': variant name '{variant}' is used more than once")]
    DuplicateVariantName { flag: String, variant: String },

    #[error("Flag '{0}': fallback variant must be a string")]
    FallbackNotString(String),

    #[error("Flag '{flag}': fallback variant '{variant}' does not match any variant")]
    UnknownFallbackVariant { flag: String, variant: String },
}
