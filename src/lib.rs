//! # Hata - Feature Flag Rule Compiler
//!
//! **Hata** translates between the structured model a flag editor works with and the
//! nested logic-tree documents a flagd-style rule evaluator consumes. It is a pair of
//! pure, synchronous transformations plus a structural validator, safe to call from
//! any UI event handler or request handler.
//!
//! ## Core Workflow
//!
//! 1.  **Edit**: Build or mutate a [`FlagDraft`](draft::FlagDraft): variants, a default,
//!     ordered targeting rules and an optional fallback.
//! 2.  **Compile**: [`compile`](compiler::compile) turns the draft into an
//!     [`EngineDocument`](document::EngineDocument) of the shape
//!     `{"flags": {"<key>": {"state", "defaultVariant", "variants", "targeting"}}}`.
//! 3.  **Validate**: [`validate`](validator::validate) checks a document's structure and
//!     variant references, collecting every problem instead of stopping at the first.
//! 4.  **Decompile**: [`decompile`](decompiler::decompile) reads a stored flag back into
//!     a draft for editing. This is best effort: condition shapes the editor cannot
//!     express come back as the default condition.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hata::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut draft = FlagDraft::new("new-checkout");
//!     draft.has_targeting = true;
//!     draft.rules = vec![Rule::new(
//!         Condition::new("user.email", Operator::InList, "a@x.com, b@x.com"),
//!         "true",
//!     )];
//!     draft.has_default_rule = true;
//!     draft.default_rule = "false".to_string();
//!
//!     // Compile to the evaluator's document format
//!     let document = compile(&draft)?;
//!     println!("{}", document.to_json_pretty()?);
//!
//!     // Check it before saving
//!     let report = validate_document(&document);
//!     if !report.valid {
//!         for error in &report.errors {
//!             eprintln!("-> {}", error);
//!         }
//!     }
//!
//!     // Read it back for editing
//!     let flag = &document.flags["new-checkout"];
//!     let reopened = decompile(flag, "new-checkout");
//!     assert_eq!(reopened.rules, draft.rules);
//!     Ok(())
//! }
//! ```

pub mod compiler;
pub mod decompiler;
pub mod document;
pub mod draft;
pub mod error;
pub mod prelude;
pub mod validator;
