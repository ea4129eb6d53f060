//! # jsv-cli — jsonschema-validator Command-Line Tool
//!
//! ## Subcommands
//!
//! - `jsonschema-validator validate-schema` — one schema, one verdict.
//! - `jsonschema-validator validate-batch` — every schema in a manifest.
//! - `jsonschema-validator generate-fixtures` — write the reference
//!   fixtures and their manifest.
//!
//! The older positional form is still accepted and rewritten by
//! [`legacy::rewrite_legacy_args`]:
//!
//! ```bash
//! jsonschema-validator schemas/user.json
//! jsonschema-validator schemas/user.json results.json
//! ```
//!
//! Every `run_*` function returns the process exit code on success. An
//! `Err` means the run could not produce a meaningful result and maps to
//! exit code 2.

pub mod batch;
pub mod fixtures;
pub mod legacy;
pub mod validate;
