//! # Batch Validation
//!
//! Validates every schema named in a manifest and folds the verdicts into
//! one [`BatchReport`], so a CI job gets a single machine-readable report
//! and a single pass/fail signal.
//!
//! ## Manifest format
//!
//! ```json
//! {
//!   "schemas": [
//!     { "name": "user-schema", "path": "schemas/user.json", "description": "User record" },
//!     { "name": "product-schema", "path": "schemas/product.json" }
//!   ]
//! }
//! ```
//!
//! ## Guarantees
//!
//! - Entries are processed sequentially in manifest order; the report has
//!   exactly one entry per manifest entry, in the same order.
//! - A failing entry (missing file, bad JSON, invalid schema) only affects
//!   its own result. Duplicate names produce independent results.
//! - Only a manifest that cannot be read or parsed aborts the run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use jsv_core::{load_json, JsvError, Timestamp};

use crate::engine::SchemaEngine;
use crate::result::ValidationResult;
use crate::service::SchemaValidationService;

/// One schema reference in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Display name; becomes the result's `schemaName`.
    pub name: String,
    /// Path to the schema file, as written in the manifest.
    pub path: String,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An ordered list of schemas to validate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Entries in processing order.
    pub schemas: Vec<ManifestEntry>,
}

impl Manifest {
    /// Load a manifest from disk.
    ///
    /// # Errors
    ///
    /// Returns [`JsvError::Load`] if the file cannot be read or is not JSON,
    /// and [`JsvError::Manifest`] if it is JSON of the wrong shape.
    pub fn load(path: &Path) -> Result<Self, JsvError> {
        let value = load_json(path)?;
        serde_json::from_value(value).map_err(|e| JsvError::Manifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// True if the manifest lists no schemas.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// The verdict for one manifest entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    /// Manifest name.
    pub name: String,
    /// Manifest description, or `""`.
    pub description: String,
    /// Manifest path, verbatim.
    pub path: String,
    /// The verdict.
    pub result: ValidationResult,
}

/// Aggregate report for one batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// When the run started.
    pub timestamp: Timestamp,
    /// The manifest path the run was driven by.
    pub config_path: String,
    /// One entry per manifest entry, in manifest order.
    pub schemas: Vec<BatchEntry>,
}

impl BatchReport {
    /// Count valid entries against the total.
    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            valid: self.schemas.iter().filter(|s| s.result.valid).count(),
            total: self.schemas.len(),
        }
    }

    /// True iff every entry is valid. An empty report is vacuously valid.
    pub fn all_valid(&self) -> bool {
        self.schemas.iter().all(|s| s.result.valid)
    }
}

/// `valid / total` for a batch run. Derived, never stored in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Entries whose result is valid.
    pub valid: usize,
    /// All entries.
    pub total: usize,
}

impl BatchSummary {
    /// Entries whose result is invalid.
    pub fn invalid(&self) -> usize {
        self.total - self.valid
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} valid", self.valid, self.total)
    }
}

/// Drives a [`SchemaValidationService`] over a manifest.
#[derive(Debug)]
pub struct BatchValidator<'a, E> {
    service: &'a SchemaValidationService<E>,
    base_dir: PathBuf,
}

impl<'a, E: SchemaEngine> BatchValidator<'a, E> {
    /// A batch validator that resolves relative entry paths against
    /// `base_dir` when they do not exist relative to the working directory.
    pub fn new(service: &'a SchemaValidationService<E>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            service,
            base_dir: base_dir.into(),
        }
    }

    /// A batch validator for the manifest at `manifest_path`, resolving
    /// entry paths against the manifest's directory.
    pub fn for_manifest(service: &'a SchemaValidationService<E>, manifest_path: &Path) -> Self {
        let base_dir = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::new(service, base_dir)
    }

    /// Validate every entry of `manifest`.
    pub fn run(&self, manifest: &Manifest, config_path: &str) -> BatchReport {
        self.run_with(manifest, config_path, |_| {})
    }

    /// Validate every entry of `manifest`, calling `on_entry` as each
    /// verdict is produced.
    pub fn run_with(
        &self,
        manifest: &Manifest,
        config_path: &str,
        mut on_entry: impl FnMut(&BatchEntry),
    ) -> BatchReport {
        let timestamp = Timestamp::now();
        tracing::info!(
            config = config_path,
            entries = manifest.len(),
            "starting batch schema validation"
        );

        let mut schemas = Vec::with_capacity(manifest.len());
        for entry in &manifest.schemas {
            let path = resolve_entry_path(Path::new(&entry.path), &self.base_dir);
            tracing::debug!(schema = %entry.name, path = %path.display(), "validating manifest entry");

            let batch_entry = BatchEntry {
                name: entry.name.clone(),
                description: entry.description.clone().unwrap_or_default(),
                path: entry.path.clone(),
                result: self.service.validate_file(&path, &entry.name),
            };
            on_entry(&batch_entry);
            schemas.push(batch_entry);
        }

        let report = BatchReport {
            timestamp,
            config_path: config_path.to_string(),
            schemas,
        };
        let summary = report.summary();
        tracing::info!(
            summary = %summary,
            invalid = summary.invalid(),
            "batch schema validation finished"
        );
        report
    }
}

/// Resolve a manifest entry path.
///
/// Absolute paths and paths that exist relative to the working directory
/// are used as-is. Anything else is taken relative to `base_dir`.
pub fn resolve_entry_path(path: &Path, base_dir: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    base_dir.join(path)
}
