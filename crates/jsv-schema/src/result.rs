//! # Validation Results
//!
//! The atomic output of the validation pipeline. A [`ValidationResult`]
//! records which phase produced the verdict, the diagnostics that phase
//! emitted, and the schema it was about (echoed back for traceability).
//!
//! ## Invariants
//!
//! - `valid == true` implies `errors` is empty and `validation_type` is
//!   [`ValidationType::Compilation`], the last gate.
//! - `valid == false` implies `errors` has at least one descriptor.
//!
//! Both are enforced by construction: fields are public for reading and
//! deserialization, but the pipeline only builds results through the
//! constructors below.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use jsv_core::LoadError;

/// The phase that produced a terminal verdict.
///
/// Closed enumeration: consumers may `match` on it exhaustively and never
/// need to inspect error messages to learn where a schema failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationType {
    /// The document does not conform to the Draft-7 meta-schema.
    #[serde(rename = "meta-schema")]
    MetaSchema,
    /// The document reached the compilation gate, whether or not it passed.
    #[serde(rename = "compilation")]
    Compilation,
    /// The pipeline could not reach a verdict (load failure, checker fault).
    #[serde(rename = "error")]
    Error,
}

impl ValidationType {
    /// The wire name of this phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MetaSchema => "meta-schema",
            Self::Compilation => "compilation",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for ValidationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diagnostic explaining why a schema was rejected.
///
/// Only `message` is guaranteed. The location fields are filled in by the
/// meta-schema checker and left empty for compilation and internal errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDescriptor {
    /// Human-readable description of the problem.
    pub message: String,
    /// JSON Pointer into the schema document being validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_path: Option<String>,
    /// JSON Pointer into the meta-schema rule that was violated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<String>,
    /// The meta-schema keyword that was violated (e.g. `anyOf`, `minimum`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl ErrorDescriptor {
    /// A descriptor carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            instance_path: None,
            schema_path: None,
            keyword: None,
        }
    }

    /// A descriptor located at `instance_path`, raised by the rule at
    /// `schema_path`. The keyword is the final segment of the schema path.
    pub fn located(
        message: impl Into<String>,
        instance_path: impl Into<String>,
        schema_path: impl Into<String>,
    ) -> Self {
        let schema_path = schema_path.into();
        let keyword = schema_path
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(str::to_string);
        Self {
            message: message.into(),
            instance_path: Some(instance_path.into()),
            schema_path: Some(schema_path),
            keyword,
        }
    }
}

impl std::fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.instance_path.as_deref() {
            Some("") => write!(f, "(root): {}", self.message),
            Some(path) => write!(f, "{path}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// The verdict for one schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True iff both conformance and compilability checks passed.
    pub valid: bool,
    /// Diagnostics; empty iff `valid`.
    pub errors: Vec<ErrorDescriptor>,
    /// Display label: file name or manifest-supplied name.
    pub schema_name: String,
    /// The document as it was validated; `null` when it never loaded.
    pub schema: Value,
    /// The phase that produced the verdict.
    pub validation_type: ValidationType,
    /// Set when the document conformed but could not be compiled.
    #[serde(default, skip_serializing_if = "is_false")]
    pub compilation_error: bool,
    /// Set when a checker faulted instead of returning a verdict.
    #[serde(default, skip_serializing_if = "is_false")]
    pub validation_error: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Fallback message when the meta-schema check fails without diagnostics.
pub const NON_CONFORMING_MESSAGE: &str = "Schema does not conform to JSON Schema Draft-7";

impl ValidationResult {
    /// Both phases passed.
    pub fn valid(schema_name: impl Into<String>, schema: Value) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            schema_name: schema_name.into(),
            schema,
            validation_type: ValidationType::Compilation,
            compilation_error: false,
            validation_error: false,
        }
    }

    /// The meta-schema check rejected the document.
    pub fn meta_schema_failure(
        schema_name: impl Into<String>,
        schema: Value,
        mut errors: Vec<ErrorDescriptor>,
    ) -> Self {
        if errors.is_empty() {
            errors.push(ErrorDescriptor::message(NON_CONFORMING_MESSAGE));
        }
        Self {
            valid: false,
            errors,
            schema_name: schema_name.into(),
            schema,
            validation_type: ValidationType::MetaSchema,
            compilation_error: false,
            validation_error: false,
        }
    }

    /// The document conformed but could not be compiled into a validator.
    pub fn compilation_failure(
        schema_name: impl Into<String>,
        schema: Value,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self {
            valid: false,
            errors: vec![ErrorDescriptor::message(format!(
                "Schema compilation failed: {reason}"
            ))],
            schema_name: schema_name.into(),
            schema,
            validation_type: ValidationType::Compilation,
            compilation_error: true,
            validation_error: false,
        }
    }

    /// A checker faulted; no verdict could be reached.
    pub fn internal_error(
        schema_name: impl Into<String>,
        schema: Value,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self {
            valid: false,
            errors: vec![ErrorDescriptor::message(format!(
                "Schema validation error: {reason}"
            ))],
            schema_name: schema_name.into(),
            schema,
            validation_type: ValidationType::Error,
            compilation_error: false,
            validation_error: true,
        }
    }

    /// The document could not be read or parsed, so neither phase ran.
    pub fn load_failure(schema_name: impl Into<String>, error: &LoadError) -> Self {
        Self {
            valid: false,
            errors: vec![ErrorDescriptor::message(error.to_string())],
            schema_name: schema_name.into(),
            schema: Value::Null,
            validation_type: ValidationType::Error,
            compilation_error: false,
            validation_error: false,
        }
    }

    /// One-word verdict for human output.
    pub fn verdict(&self) -> &'static str {
        if self.valid {
            "VALID"
        } else {
            "INVALID"
        }
    }
}
