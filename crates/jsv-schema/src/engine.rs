//! # Draft-7 Checking Engine
//!
//! The two checks behind every verdict:
//!
//! 1. **Conformance**: is the document a structurally legal Draft-7
//!    schema? Answered by validating it *as an instance* against the
//!    Draft-7 meta-schema and collecting every violation.
//! 2. **Compilability**: can the document be turned into an executable
//!    validator? Answered by asking the `jsonschema` crate to build one.
//!    This catches what the meta-schema cannot express, such as a
//!    `pattern` that is a string but not a valid regular expression, or a
//!    `$ref` that points nowhere.
//!
//! ## Permissive policy
//!
//! The Draft-7 meta-schema does not forbid additional keywords, so vendor
//! extensions (`x-*`, `discriminator`, ...) pass conformance. `format`
//! assertions are switched off for the conformance phase: a malformed
//! `pattern` surfaces as a compilation failure with the regex engine's
//! message rather than as a generic format violation.
//!
//! ## Shared state
//!
//! The meta-schema validator is compiled once per process into a
//! `OnceLock` and only read afterwards.

use std::sync::OnceLock;

use jsonschema::{Draft, Retrieve, Uri, Validator};
use serde_json::Value;
use thiserror::Error;

use crate::result::ErrorDescriptor;

/// The Draft-7 meta-schema, served from the crate rather than the network.
const DRAFT7_META_SCHEMA: &str = include_str!("../schemas/draft-07.schema.json");

static META_VALIDATOR: OnceLock<Result<Validator, String>> = OnceLock::new();

/// A checker faulted instead of producing a verdict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckerError {
    /// The embedded meta-schema could not be compiled.
    #[error("Draft-7 meta-schema unavailable: {0}")]
    MetaSchemaUnavailable(String),

    /// A checker panicked while processing the document.
    #[error("{phase} checker panicked: {message}")]
    Panicked {
        /// Phase that was running (`meta-schema` or `compilation`).
        phase: &'static str,
        /// Panic payload, if it was a string.
        message: String,
    },
}

/// Outcome of the meta-schema check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conformance {
    /// The document is a legal Draft-7 schema.
    Conforms,
    /// The document violates the meta-schema.
    Violations(Vec<ErrorDescriptor>),
}

/// Outcome of the compilation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compilation {
    /// A validator was built.
    Compiled,
    /// The engine refused to build a validator; carries its message.
    Failed(String),
}

/// A Draft-7 conformance and compilation engine.
///
/// The service only relies on this contract, so any Draft-7 engine can be
/// substituted as long as it keeps the two phases separate.
pub trait SchemaEngine {
    /// Check `schema` against the Draft-7 meta-schema.
    fn check_conformance(&self, schema: &Value) -> Result<Conformance, CheckerError>;

    /// Try to compile `schema` into a validator. Only called on documents
    /// that passed [`SchemaEngine::check_conformance`].
    fn compile(&self, schema: &Value) -> Result<Compilation, CheckerError>;
}

/// Retriever that keeps `$ref` resolution offline.
///
/// The Draft-7 meta-schema is bundled with `jsonschema` and never reaches
/// this retriever. Any other external reference fails compilation instead
/// of triggering a network request, so a verdict depends only on the
/// document itself.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external reference {} cannot be retrieved offline", uri.as_str()).into())
    }
}

/// The default engine, backed by the `jsonschema` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct Draft7Engine;

impl Draft7Engine {
    /// Create the engine. Cheap: the meta-schema validator is shared.
    pub fn new() -> Self {
        Self
    }
}

impl SchemaEngine for Draft7Engine {
    fn check_conformance(&self, schema: &Value) -> Result<Conformance, CheckerError> {
        let validator = meta_validator()?;
        let violations: Vec<ErrorDescriptor> = validator
            .iter_errors(schema)
            .map(|e| {
                ErrorDescriptor::located(
                    e.to_string(),
                    e.instance_path.to_string(),
                    e.schema_path.to_string(),
                )
            })
            .collect();

        if violations.is_empty() {
            Ok(Conformance::Conforms)
        } else {
            Ok(Conformance::Violations(violations))
        }
    }

    fn compile(&self, schema: &Value) -> Result<Compilation, CheckerError> {
        let built = jsonschema::options()
            .with_draft(Draft::Draft7)
            .with_retriever(OfflineRetriever)
            .build(schema);
        match built {
            Ok(_) => Ok(Compilation::Compiled),
            Err(e) => Ok(Compilation::Failed(e.to_string())),
        }
    }
}

/// The process-wide meta-schema validator, built on first use.
fn meta_validator() -> Result<&'static Validator, CheckerError> {
    META_VALIDATOR
        .get_or_init(build_meta_validator)
        .as_ref()
        .map_err(|reason| CheckerError::MetaSchemaUnavailable(reason.clone()))
}

fn build_meta_validator() -> Result<Validator, String> {
    let meta: Value = serde_json::from_str(DRAFT7_META_SCHEMA)
        .map_err(|e| format!("embedded meta-schema is not JSON: {e}"))?;
    let validator = jsonschema::options()
        .with_draft(Draft::Draft7)
        .should_validate_formats(false)
        .build(&meta)
        .map_err(|e| e.to_string())?;
    tracing::debug!("compiled Draft-7 meta-schema validator");
    Ok(validator)
}
