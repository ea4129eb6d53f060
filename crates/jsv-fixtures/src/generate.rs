//! Fixture generation.
//!
//! Lowers each [`Fixture`] to a Draft-7 document, gates it through the
//! same [`SchemaValidationService`] the validator uses, and writes the
//! passing ones plus a batch manifest listing them. A fixture that fails
//! the gate is reported and skipped; it never reaches disk or the manifest.

use std::path::{Path, PathBuf};

use jsv_core::JsvError;
use jsv_schema::{write_json_pretty, Manifest, ManifestEntry, SchemaEngine, SchemaValidationService};

use crate::catalog::Fixture;

/// Where generated files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory receiving `<name>.json`.
    pub output_dir: PathBuf,
    /// Path of the batch manifest.
    pub manifest_path: PathBuf,
}

impl GeneratorConfig {
    /// Write fixtures into `output_dir` and the manifest next to it, as
    /// `<output_dir>/../reference-config.json`.
    pub fn in_dir(output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        let manifest_path = output_dir
            .parent()
            .map(|p| p.join("reference-config.json"))
            .unwrap_or_else(|| PathBuf::from("reference-config.json"));
        Self {
            output_dir,
            manifest_path,
        }
    }

    /// Override the manifest location.
    #[must_use]
    pub fn with_manifest_path(mut self, manifest_path: impl Into<PathBuf>) -> Self {
        self.manifest_path = manifest_path.into();
        self
    }

    /// Path recorded in the manifest for `file`: relative to the manifest's
    /// directory when `file` lies beneath it, otherwise `file` as-is.
    fn manifest_path_for(&self, file: &Path) -> String {
        let base = self.manifest_path.parent().unwrap_or_else(|| Path::new(""));
        let relative = if base.as_os_str().is_empty() {
            file
        } else {
            file.strip_prefix(base).unwrap_or(file)
        };
        relative.to_string_lossy().replace('\\', "/")
    }
}

/// A fixture that did not pass the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureFailure {
    /// Fixture name.
    pub name: String,
    /// First reported reason.
    pub reason: String,
}

/// What a generation run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    /// The manifest as written.
    pub manifest: Manifest,
    /// Fixtures rejected by the gate.
    pub failures: Vec<FixtureFailure>,
}

impl GenerationReport {
    /// Number of fixtures written.
    pub fn successful(&self) -> usize {
        self.manifest.len()
    }

    /// Number of fixtures rejected.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// True if no fixture was rejected.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Generate `fixtures` according to `config`.
///
/// # Errors
///
/// Returns [`JsvError::Io`] if the output directory cannot be created and
/// [`JsvError::Output`] if a fixture or the manifest cannot be written.
/// Gate rejections are not errors; they are listed in the report.
pub fn generate<E: SchemaEngine>(
    fixtures: &[Fixture],
    config: &GeneratorConfig,
    service: &SchemaValidationService<E>,
) -> Result<GenerationReport, JsvError> {
    std::fs::create_dir_all(&config.output_dir)?;

    let mut report = GenerationReport::default();
    for fixture in fixtures {
        let document = fixture.shape.to_document();
        let verdict = service.validate(&document, fixture.name);
        if !verdict.valid {
            let reason = verdict
                .errors
                .first()
                .map(ToString::to_string)
                .unwrap_or_else(|| verdict.validation_type.to_string());
            tracing::warn!(fixture = fixture.name, %reason, "fixture rejected");
            report.failures.push(FixtureFailure {
                name: fixture.name.to_string(),
                reason,
            });
            continue;
        }

        let file = config.output_dir.join(format!("{}.json", fixture.name));
        write_json_pretty(&file, &document)?;
        tracing::debug!(fixture = fixture.name, path = %file.display(), "fixture written");

        report.manifest.schemas.push(ManifestEntry {
            name: fixture.name.to_string(),
            path: config.manifest_path_for(&file),
            description: Some(fixture.description()),
        });
    }

    write_json_pretty(&config.manifest_path, &report.manifest)?;
    tracing::info!(
        successful = report.successful(),
        failed = report.failed(),
        manifest = %config.manifest_path.display(),
        "fixture generation finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;
    use jsv_schema::{CheckerError, Compilation, Conformance, ErrorDescriptor};
    use serde_json::Value;

    struct RejectStrings;

    impl SchemaEngine for RejectStrings {
        fn check_conformance(&self, schema: &Value) -> Result<Conformance, CheckerError> {
            if schema["type"] == "string" {
                Ok(Conformance::Violations(vec![ErrorDescriptor::message("no strings")]))
            } else {
                Ok(Conformance::Conforms)
            }
        }

        fn compile(&self, _schema: &Value) -> Result<Compilation, CheckerError> {
            Ok(Compilation::Compiled)
        }
    }

    #[test]
    fn default_manifest_sits_beside_output_dir() {
        let config = GeneratorConfig::in_dir("test-fixtures/reference-schemas");
        assert_eq!(
            config.manifest_path,
            PathBuf::from("test-fixtures/reference-config.json")
        );
        assert_eq!(
            config.manifest_path_for(Path::new("test-fixtures/reference-schemas/a.json")),
            "reference-schemas/a.json"
        );
    }

    #[test]
    fn writes_fixtures_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::in_dir(dir.path().join("reference-schemas"));
        let fixtures = vec![Fixture {
            name: "integer-basic",
            shape: Shape::integer(),
        }];

        let report = generate(&fixtures, &config, &SchemaValidationService::draft7()).unwrap();
        assert!(report.is_success());
        assert_eq!(report.successful(), 1);

        let written: Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("reference-schemas/integer-basic.json"))
                .unwrap(),
        )
        .unwrap();
        assert_eq!(written["type"], "integer");

        let manifest = Manifest::load(&config.manifest_path).unwrap();
        assert_eq!(manifest.schemas[0].path, "reference-schemas/integer-basic.json");
        assert_eq!(
            manifest.schemas[0].description.as_deref(),
            Some("Reference fixture for integer basic")
        );
    }

    #[test]
    fn rejected_fixtures_are_skipped_and_counted() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::in_dir(dir.path().join("out"));
        let fixtures = vec![
            Fixture {
                name: "string-basic",
                shape: Shape::string(),
            },
            Fixture {
                name: "boolean-basic",
                shape: Shape::boolean(),
            },
        ];

        let service = SchemaValidationService::new(RejectStrings);
        let report = generate(&fixtures, &config, &service).unwrap();

        assert!(!report.is_success());
        assert_eq!(report.successful(), 1);
        assert_eq!(report.failures[0].name, "string-basic");
        assert_eq!(report.failures[0].reason, "no strings");
        assert!(!dir.path().join("out/string-basic.json").exists());
        assert_eq!(report.manifest.schemas[0].name, "boolean-basic");
    }
}
