//! # validate-batch Subcommand
//!
//! Validates every schema listed in a manifest. Exit 0 only if all of them
//! are valid. A manifest that cannot be read or parsed is an operational
//! failure and aborts the run.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use jsv_schema::{
    exit_code_for_batch, write_json_pretty, BatchValidator, Console, Manifest,
    SchemaValidationService,
};

/// Arguments for the `validate-batch` subcommand.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ValidateBatchArgs {
    /// Manifest listing the schemas to validate.
    #[arg(short, long, value_name = "MANIFEST")]
    pub input: PathBuf,

    /// Write the batch report to this file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print only the batch report as compact JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the validate-batch subcommand, printing to stdout.
pub fn run_validate_batch(args: &ValidateBatchArgs) -> Result<u8> {
    let stdout = io::stdout();
    validate_batch_to(args, &mut stdout.lock())
}

/// Execute the validate-batch subcommand, printing to `out`.
pub fn validate_batch_to<W: Write>(args: &ValidateBatchArgs, out: &mut W) -> Result<u8> {
    let config_path = args.input.display().to_string();
    let manifest = Manifest::load(&args.input)
        .with_context(|| format!("cannot use manifest {config_path}"))?;

    let service = SchemaValidationService::draft7();
    let validator = BatchValidator::for_manifest(&service, &args.input);

    let report = {
        let mut console = if args.json {
            Console::silent(&mut *out)
        } else {
            Console::new(&mut *out)
        };
        console.batch_started(&config_path)?;

        let mut write_error: Option<io::Error> = None;
        let report = validator.run_with(&manifest, &config_path, |entry| {
            if write_error.is_none() {
                write_error = console.batch_entry(entry).err();
            }
        });
        if let Some(e) = write_error {
            return Err(e).context("failed to print batch progress");
        }

        console.batch_summary(report.summary())?;
        if let Some(output) = &args.output {
            write_json_pretty(output, &report)
                .with_context(|| format!("failed to write results to {}", output.display()))?;
            console.written(output)?;
        }
        report
    };

    if args.json {
        writeln!(out, "{}", serde_json::to_string(&report)?)?;
    }

    Ok(exit_code_for_batch(&report))
}
