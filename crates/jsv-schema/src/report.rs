//! # Report Writer and Exit-Code Policy
//!
//! Terminal consumers of validation results: pretty-printed JSON sinks,
//! the human-readable console, and the mapping from verdicts to process
//! exit status.
//!
//! ## Exit codes
//!
//! CI jobs gate on exit status alone, so the mapping is fixed:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | schema valid / every batch entry valid |
//! | 1 | schema invalid / at least one batch entry invalid |
//! | 2 | configuration failure: manifest unusable, output unwritable, bad arguments |

use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use jsv_core::{JsvError, Timestamp};

use crate::batch::{BatchEntry, BatchReport, BatchSummary};
use crate::result::ValidationResult;

/// Exit code constants.
pub mod codes {
    /// Every verdict was valid.
    pub const SUCCESS: u8 = 0;

    /// At least one verdict was invalid.
    pub const INVALID: u8 = 1;

    /// The run could not produce a meaningful result.
    pub const CONFIG_ERROR: u8 = 2;
}

/// Exit code for a single-schema run.
pub fn exit_code_for_result(result: &ValidationResult) -> u8 {
    if result.valid {
        codes::SUCCESS
    } else {
        codes::INVALID
    }
}

/// Exit code for a batch run: success only if every entry is valid.
pub fn exit_code_for_batch(report: &BatchReport) -> u8 {
    if report.all_valid() {
        codes::SUCCESS
    } else {
        codes::INVALID
    }
}

/// The file written by a single-schema run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaReport {
    /// When the schema was validated.
    pub timestamp: Timestamp,
    /// The schema path as given on the command line.
    pub schema_path: String,
    /// The verdict.
    pub result: ValidationResult,
}

impl SchemaReport {
    /// Stamp `result` with the current time.
    pub fn new(schema_path: impl Into<String>, result: ValidationResult) -> Self {
        Self {
            timestamp: Timestamp::now(),
            schema_path: schema_path.into(),
            result,
        }
    }
}

/// Serialize `value` as pretty-printed JSON and write it to `path`.
///
/// # Errors
///
/// Returns [`JsvError::Output`] if the file cannot be written.
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<(), JsvError> {
    let rendered = serde_json::to_string_pretty(value)?;
    std::fs::write(path, rendered).map_err(|cause| JsvError::Output {
        path: path.to_path_buf(),
        cause,
    })?;
    tracing::debug!(path = %path.display(), "report written");
    Ok(())
}

/// Human-readable output for validation runs.
///
/// When `silent`, every method is a no-op, so callers can render
/// unconditionally.
#[derive(Debug)]
pub struct Console<W> {
    out: W,
    silent: bool,
}

impl<W: Write> Console<W> {
    /// A console writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out, silent: false }
    }

    /// A console that writes nothing.
    pub fn silent(out: W) -> Self {
        Self { out, silent: true }
    }

    /// Consume the console and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Announce a single-schema run.
    pub fn validating(&mut self, schema_path: &str) -> io::Result<()> {
        self.line(format_args!("Validating JSON Schema specification: {schema_path}"))
    }

    /// Print the verdict for a single schema, with errors if invalid.
    pub fn verdict(&mut self, result: &ValidationResult) -> io::Result<()> {
        let mark = if result.valid { '✓' } else { '✗' };
        self.line(format_args!(
            "{mark} Schema {} JSON Schema Draft-7",
            result.verdict()
        ))?;
        self.errors(result)
    }

    /// Announce a batch run.
    pub fn batch_started(&mut self, config_path: &str) -> io::Result<()> {
        self.line(format_args!(
            "Running batch schema validation from {config_path}"
        ))
    }

    /// Print the verdict for one batch entry, with errors if invalid.
    pub fn batch_entry(&mut self, entry: &BatchEntry) -> io::Result<()> {
        let mark = if entry.result.valid { '✓' } else { '✗' };
        self.line(format_args!(
            "{mark} Schema {}: {}",
            entry.name,
            entry.result.verdict()
        ))?;
        self.errors(&entry.result)
    }

    /// Print the closing summary of a batch run.
    pub fn batch_summary(&mut self, summary: BatchSummary) -> io::Result<()> {
        self.line(format_args!(
            "\nSummary: {}/{} schemas are valid JSON Schema Draft-7",
            summary.valid, summary.total
        ))
    }

    /// Note that a report was written to `path`.
    pub fn written(&mut self, path: &Path) -> io::Result<()> {
        self.line(format_args!("Results written to {}", path.display()))
    }

    fn errors(&mut self, result: &ValidationResult) -> io::Result<()> {
        if result.valid {
            return Ok(());
        }
        let rendered = serde_json::to_string_pretty(&result.errors).map_err(io::Error::from)?;
        self.line(format_args!("Errors: {rendered}"))
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) -> io::Result<()> {
        if self.silent {
            return Ok(());
        }
        writeln!(self.out, "{args}")
    }
}
