//! # jsv-schema — Draft-7 Schema Validation Engine
//!
//! Decides whether a JSON document is a usable JSON Schema Draft-7 schema
//! and reports the verdict in one uniform shape, for one schema or for a
//! manifest of many.
//!
//! ## Pipeline
//!
//! ```text
//! load ─► conformance (meta-schema) ─► compilability ─► ValidationResult
//! ```
//!
//! - [`engine`] — the [`SchemaEngine`] seam and the `jsonschema`-backed
//!   [`Draft7Engine`].
//! - [`service`] — [`SchemaValidationService`], which runs the phases in
//!   order and always returns a [`ValidationResult`].
//! - [`batch`] — manifest loading and [`BatchValidator`], which fans the
//!   service out over a manifest into a [`BatchReport`].
//! - [`report`] — JSON sinks, the human [`Console`], and exit codes.
//!
//! ## Crate Policy
//!
//! - Depends only on `jsv-core` internally.
//! - Schema-level failures are data, never `Err`. Only configuration-level
//!   failures (unusable manifest, unwritable sink) are returned as errors.

pub mod batch;
pub mod engine;
pub mod report;
pub mod result;
pub mod service;

pub use batch::{BatchEntry, BatchReport, BatchSummary, BatchValidator, Manifest, ManifestEntry};
pub use engine::{CheckerError, Compilation, Conformance, Draft7Engine, SchemaEngine};
pub use report::{
    codes, exit_code_for_batch, exit_code_for_result, write_json_pretty, Console, SchemaReport,
};
pub use result::{ErrorDescriptor, ValidationResult, ValidationType};
pub use service::SchemaValidationService;
