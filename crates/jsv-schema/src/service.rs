//! # Single-Schema Validation Service
//!
//! Composes the conformance and compilability checks into one verdict.
//!
//! ```text
//! pending ── meta-schema fails ──────────────────────────► meta-schema (invalid)
//!    │
//!    └── meta-schema passes ── compiles ────────────────► compilation (valid)
//!                          └── does not compile ────────► compilation (invalid)
//!
//! any state ── checker fault / panic / load failure ────► error (invalid)
//! ```
//!
//! The service never returns an error and never unwinds: whatever happens
//! inside a checker, the caller receives a well-formed [`ValidationResult`].

use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use serde_json::Value;

use jsv_core::load_json;

use crate::engine::{CheckerError, Compilation, Conformance, Draft7Engine, SchemaEngine};
use crate::result::{ValidationResult, ValidationType};

/// Runs the two-phase check for one schema at a time.
#[derive(Debug, Default, Clone)]
pub struct SchemaValidationService<E = Draft7Engine> {
    engine: E,
}

impl SchemaValidationService<Draft7Engine> {
    /// A service backed by the `jsonschema` Draft-7 engine.
    pub fn draft7() -> Self {
        Self::new(Draft7Engine::new())
    }
}

impl<E: SchemaEngine> SchemaValidationService<E> {
    /// A service backed by `engine`.
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// The engine this service delegates to.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Validate an already-parsed schema document.
    ///
    /// The document is echoed into the result under `schema_name`.
    pub fn validate(&self, schema: &Value, schema_name: &str) -> ValidationResult {
        let phase = Cell::new(ValidationType::MetaSchema);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_phases(schema, schema_name, &phase)
        }));

        let result = match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(fault)) => ValidationResult::internal_error(schema_name, schema.clone(), fault),
            Err(payload) => {
                let fault = CheckerError::Panicked {
                    phase: phase.get().as_str(),
                    message: panic_message(payload.as_ref()),
                };
                ValidationResult::internal_error(schema_name, schema.clone(), fault)
            }
        };

        tracing::debug!(
            schema = schema_name,
            valid = result.valid,
            validation_type = %result.validation_type,
            errors = result.errors.len(),
            "schema validated"
        );
        result
    }

    /// Load the schema at `path` and validate it.
    ///
    /// A missing or unparseable file yields an `error` result rather than
    /// an `Err`, so a caller iterating over many files can keep going.
    pub fn validate_file(&self, path: &Path, schema_name: &str) -> ValidationResult {
        match load_json(path) {
            Ok(schema) => self.validate(&schema, schema_name),
            Err(e) => {
                tracing::warn!(
                    schema = schema_name,
                    path = %e.path().display(),
                    error = %e,
                    "schema could not be loaded"
                );
                ValidationResult::load_failure(schema_name, &e)
            }
        }
    }

    fn run_phases(
        &self,
        schema: &Value,
        schema_name: &str,
        phase: &Cell<ValidationType>,
    ) -> Result<ValidationResult, CheckerError> {
        match self.engine.check_conformance(schema)? {
            Conformance::Violations(errors) => {
                return Ok(ValidationResult::meta_schema_failure(
                    schema_name,
                    schema.clone(),
                    errors,
                ));
            }
            Conformance::Conforms => {}
        }

        phase.set(ValidationType::Compilation);
        match self.engine.compile(schema)? {
            Compilation::Compiled => Ok(ValidationResult::valid(schema_name, schema.clone())),
            Compilation::Failed(reason) => Ok(ValidationResult::compilation_failure(
                schema_name,
                schema.clone(),
                reason,
            )),
        }
    }
}

/// Extract a printable message from a panic payload.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ErrorDescriptor;
    use serde_json::json;

    /// Engine with scripted answers that counts how often each phase ran.
    struct ScriptedEngine {
        conformance: Result<Conformance, CheckerError>,
        compilation: Result<Compilation, CheckerError>,
        panic_in_compile: bool,
        conformance_calls: Cell<usize>,
        compile_calls: Cell<usize>,
    }

    impl ScriptedEngine {
        fn new(
            conformance: Result<Conformance, CheckerError>,
            compilation: Result<Compilation, CheckerError>,
        ) -> Self {
            Self {
                conformance,
                compilation,
                panic_in_compile: false,
                conformance_calls: Cell::new(0),
                compile_calls: Cell::new(0),
            }
        }
    }

    impl SchemaEngine for ScriptedEngine {
        fn check_conformance(&self, _: &Value) -> Result<Conformance, CheckerError> {
            self.conformance_calls.set(self.conformance_calls.get() + 1);
            self.conformance.clone()
        }

        fn compile(&self, _: &Value) -> Result<Compilation, CheckerError> {
            self.compile_calls.set(self.compile_calls.get() + 1);
            if self.panic_in_compile {
                panic!("engine exploded");
            }
            self.compilation.clone()
        }
    }

    #[test]
    fn meta_schema_failure_short_circuits_compilation() {
        let engine = ScriptedEngine::new(
            Ok(Conformance::Violations(vec![ErrorDescriptor::message("nope")])),
            Ok(Compilation::Compiled),
        );
        let service = SchemaValidationService::new(engine);
        let result = service.validate(&json!({}), "s");

        assert_eq!(result.validation_type, ValidationType::MetaSchema);
        assert_eq!(service.engine().conformance_calls.get(), 1);
        assert_eq!(service.engine().compile_calls.get(), 0);
    }

    #[test]
    fn compile_runs_after_conformance_passes() {
        let engine = ScriptedEngine::new(
            Ok(Conformance::Conforms),
            Ok(Compilation::Failed("bad".into())),
        );
        let service = SchemaValidationService::new(engine);
        let result = service.validate(&json!({}), "s");

        assert!(!result.valid);
        assert!(result.compilation_error);
        assert_eq!(service.engine().compile_calls.get(), 1);
    }

    #[test]
    fn checker_fault_becomes_error_result() {
        let engine = ScriptedEngine::new(
            Err(CheckerError::MetaSchemaUnavailable("missing".into())),
            Ok(Compilation::Compiled),
        );
        let result = SchemaValidationService::new(engine).validate(&json!({"a": 1}), "s");

        assert_eq!(result.validation_type, ValidationType::Error);
        assert!(result.validation_error);
        assert_eq!(result.schema, json!({"a": 1}));
        assert!(result.errors[0].message.contains("missing"));
    }

    #[test]
    fn panicking_engine_becomes_error_result() {
        let mut engine = ScriptedEngine::new(Ok(Conformance::Conforms), Ok(Compilation::Compiled));
        engine.panic_in_compile = true;
        let result = SchemaValidationService::new(engine).validate(&json!({}), "s");

        assert!(!result.valid);
        assert_eq!(result.validation_type, ValidationType::Error);
        assert!(result.errors[0].message.contains("engine exploded"));
        assert!(result.errors[0].message.contains("compilation checker panicked"));
    }

    #[test]
    fn draft7_string_schema_is_valid() {
        let result = SchemaValidationService::draft7().validate(&json!({"type": "string"}), "s");
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert_eq!(result.validation_type, ValidationType::Compilation);
    }

    #[test]
    fn validate_file_reports_missing_file_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SchemaValidationService::draft7()
            .validate_file(&dir.path().join("nope.json"), "nope");

        assert_eq!(result.validation_type, ValidationType::Error);
        assert_eq!(result.schema, Value::Null);
        assert!(result.errors[0].message.contains("nope.json"));
    }

    #[test]
    fn validate_file_reports_bad_json_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = SchemaValidationService::draft7().validate_file(&path, "bad.json");
        assert_eq!(result.validation_type, ValidationType::Error);
        assert!(!result.valid);
    }
}
