//! # generate-fixtures Subcommand
//!
//! Writes the reference fixture catalog and a batch manifest listing every
//! fixture that passed the validator.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use jsv_fixtures::{generate, reference_fixtures, GeneratorConfig};
use jsv_schema::{codes, SchemaValidationService};

/// Default fixture directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "test-fixtures/reference-schemas";

/// Arguments for the `generate-fixtures` subcommand.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GenerateFixturesArgs {
    /// Directory receiving `<name>.json` fixtures.
    #[arg(short = 'd', long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Manifest path. Defaults to `reference-config.json` beside the
    /// output directory.
    #[arg(short, long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,
}

/// Execute the generate-fixtures subcommand, printing to stdout.
pub fn run_generate_fixtures(args: &GenerateFixturesArgs) -> Result<u8> {
    let stdout = io::stdout();
    generate_fixtures_to(args, &mut stdout.lock())
}

/// Execute the generate-fixtures subcommand, printing to `out`.
///
/// Returns 0 if every fixture was written and 1 if any was rejected.
pub fn generate_fixtures_to<W: Write>(args: &GenerateFixturesArgs, out: &mut W) -> Result<u8> {
    let mut config = GeneratorConfig::in_dir(&args.output_dir);
    if let Some(manifest) = &args.manifest {
        config = config.with_manifest_path(manifest);
    }

    let fixtures = reference_fixtures().context("reference catalog is malformed")?;
    writeln!(out, "Generating reference JSON Schema fixtures...")?;

    let report = generate(&fixtures, &config, &SchemaValidationService::draft7())
        .context("fixture generation failed")?;

    for entry in &report.manifest.schemas {
        writeln!(out, "✓ Generated: {}.json", entry.name)?;
    }
    for failure in &report.failures {
        writeln!(out, "✗ Failed: {} {}", failure.name, failure.reason)?;
    }
    writeln!(
        out,
        "\nGeneration complete: {} successful, {} failed",
        report.successful(),
        report.failed()
    )?;
    writeln!(out, "Fixtures written to: {}", config.output_dir.display())?;
    writeln!(out, "Batch config written to: {}", config.manifest_path.display())?;

    Ok(if report.is_success() {
        codes::SUCCESS
    } else {
        codes::INVALID
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_catalog_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let args = GenerateFixturesArgs {
            output_dir: dir.path().join("reference-schemas"),
            manifest: None,
        };

        let mut out = Vec::new();
        let code = generate_fixtures_to(&args, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(code, 0);
        assert!(text.contains("✓ Generated: string-basic.json"));
        assert!(text.contains("Generation complete: 78 successful, 0 failed"));
        assert!(dir.path().join("reference-config.json").is_file());
        assert!(dir.path().join("reference-schemas/enum-with-description.json").is_file());
    }

    #[test]
    fn explicit_manifest_path_is_honoured() {
        let dir = tempfile::tempdir().unwrap();
        let args = GenerateFixturesArgs {
            output_dir: dir.path().join("out"),
            manifest: Some(dir.path().join("custom.json")),
        };
        generate_fixtures_to(&args, &mut Vec::new()).unwrap();
        assert!(dir.path().join("custom.json").is_file());
        assert!(!dir.path().join("reference-config.json").exists());
    }
}
