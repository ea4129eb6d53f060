//! # validate-schema Subcommand
//!
//! Validates one schema file and exits 0 if it is a usable Draft-7 schema,
//! 1 otherwise. A file that cannot be loaded is still a verdict (type
//! `error`, exit 1), not an operational failure.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use jsv_schema::{
    exit_code_for_result, write_json_pretty, Console, SchemaReport, SchemaValidationService,
};

/// Arguments for the `validate-schema` subcommand.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ValidateSchemaArgs {
    /// Schema file to validate.
    #[arg(short, long, value_name = "PATH")]
    pub schema: PathBuf,

    /// Write the result, with timestamp and schema path, to this file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print only the result as compact JSON.
    #[arg(long)]
    pub json: bool,

    /// Suppress human-readable output.
    #[arg(long)]
    pub silent: bool,
}

/// Execute the validate-schema subcommand, printing to stdout.
pub fn run_validate_schema(args: &ValidateSchemaArgs) -> Result<u8> {
    let stdout = std::io::stdout();
    validate_schema_to(args, &mut stdout.lock())
}

/// Execute the validate-schema subcommand, printing to `out`.
///
/// Returns 0 if the schema is valid and 1 if not. Fails only when output
/// cannot be written.
pub fn validate_schema_to<W: Write>(args: &ValidateSchemaArgs, out: &mut W) -> Result<u8> {
    let schema_path = args.schema.display().to_string();
    let service = SchemaValidationService::draft7();

    let result = {
        let mut console = if args.silent || args.json {
            Console::silent(&mut *out)
        } else {
            Console::new(&mut *out)
        };
        console.validating(&schema_path)?;

        let result = service.validate_file(&args.schema, &display_name(&args.schema));
        console.verdict(&result)?;

        if let Some(output) = &args.output {
            let report = SchemaReport::new(schema_path.as_str(), result.clone());
            write_json_pretty(output, &report)
                .with_context(|| format!("failed to write results to {}", output.display()))?;
            console.written(output)?;
        }
        result
    };

    if args.json {
        writeln!(out, "{}", serde_json::to_string(&result)?)?;
    }

    tracing::info!(
        schema = %schema_path,
        verdict = result.verdict(),
        validation_type = %result.validation_type,
        "validate-schema finished"
    );
    Ok(exit_code_for_result(&result))
}

/// Result name for a schema file: its file name, or the whole path if it
/// has none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn args(schema: PathBuf) -> ValidateSchemaArgs {
        ValidateSchemaArgs {
            schema,
            output: None,
            json: false,
            silent: false,
        }
    }

    #[test]
    fn display_name_is_file_name() {
        assert_eq!(display_name(Path::new("schemas/user.json")), "user.json");
        assert_eq!(display_name(Path::new("..")), "..");
    }

    #[test]
    fn valid_schema_prints_check_and_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("s.json");
        std::fs::write(&schema, r#"{"type": "string"}"#).unwrap();

        let mut out = Vec::new();
        let code = validate_schema_to(&args(schema), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(code, 0);
        assert!(text.starts_with("Validating JSON Schema specification: "));
        assert!(text.contains("✓ Schema VALID JSON Schema Draft-7"));
    }

    #[test]
    fn json_mode_prints_only_the_result() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("bad.json");
        std::fs::write(&schema, r#"{"type": "bogus-type"}"#).unwrap();

        let mut out = Vec::new();
        let mut a = args(schema);
        a.json = true;
        let code = validate_schema_to(&a, &mut out).unwrap();

        assert_eq!(code, 1);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["validationType"], "meta-schema");
        assert_eq!(parsed["schemaName"], "bad.json");
    }

    #[test]
    fn silent_mode_prints_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("s.json");
        std::fs::write(&schema, r#"{"type": "string"}"#).unwrap();

        let mut out = Vec::new();
        let mut a = args(schema);
        a.silent = true;
        assert_eq!(validate_schema_to(&a, &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn missing_schema_is_an_invalid_verdict() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let code = validate_schema_to(&args(dir.path().join("absent.json")), &mut out).unwrap();
        assert_eq!(code, 1);
        assert!(String::from_utf8(out).unwrap().contains("✗ Schema INVALID"));
    }

    #[test]
    fn unwritable_output_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("s.json");
        std::fs::write(&schema, r#"{"type": "string"}"#).unwrap();

        let mut a = args(schema);
        a.output = Some(dir.path().join("missing/dir/out.json"));
        let err = validate_schema_to(&a, &mut Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to write results"));
    }
}
