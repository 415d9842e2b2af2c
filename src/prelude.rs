//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the hata crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use hata::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/flags.json")?;
//! let document = EngineDocument::from_json(&json)?;
//!
//! let report = validate_document(&document);
//! println!("valid: {}", report.valid);
//!
//! for draft in decompile_document(&document) {
//!     println!("{} has {} rule(s)", draft.flag_key, draft.rules.len());
//! }
//! # Ok(())
//! # }
//! ```

// Compilation in both directions
pub use crate::compiler::{compile, compile_flag};
pub use crate::decompiler::{decompile, decompile_document, decompile_value, infer_type};

// Validation
pub use crate::validator::{ValidationReport, validate, validate_document, validate_draft};

// Edit model
pub use crate::draft::{
    Condition, FlagDraft, FlagType, Operator, Rule, Variant, VariantValue,
};

// Engine documents and API payloads
pub use crate::document::{
    EngineDocument, EngineFlag, FlagDto, FlagState, SaveFlagRequest, load_json,
};

// Error types
pub use crate::error::{CompileError, DecompileError, DocumentError, SchemaViolation};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
