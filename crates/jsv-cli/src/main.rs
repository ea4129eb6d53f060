//! # jsonschema-validator CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Positional `<schema> [<output>]` invocations are rewritten into
//! `validate-schema` first.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jsv_cli::batch::{run_validate_batch, ValidateBatchArgs};
use jsv_cli::fixtures::{run_generate_fixtures, GenerateFixturesArgs};
use jsv_cli::legacy::rewrite_legacy_args;
use jsv_cli::validate::{run_validate_schema, ValidateSchemaArgs};
use jsv_schema::codes;

/// JSON Schema Draft-7 validator.
///
/// Checks that schema documents conform to the Draft-7 meta-schema and
/// compile into working validators. Exit status is 0 when every schema is
/// valid, 1 when any is invalid, and 2 when the run itself failed.
#[derive(Parser, Debug)]
#[command(name = "jsonschema-validator", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging. Repeat for more (-v, -vv, -vvv).
    /// RUST_LOG overrides this when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit log lines on stderr as JSON objects.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a single schema file.
    ValidateSchema(ValidateSchemaArgs),

    /// Validate every schema listed in a manifest.
    ValidateBatch(ValidateBatchArgs),

    /// Write the reference fixtures and their manifest.
    GenerateFixtures(GenerateFixturesArgs),
}

fn main() -> ExitCode {
    let argv: Vec<_> = std::env::args_os().collect();
    let args = rewrite_legacy_args(argv.iter().cloned());
    let rewritten = args != argv;
    let cli = Cli::parse_from(args);

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    if rewritten {
        tracing::debug!("positional invocation rewritten to validate-schema");
    }

    let result = match cli.command {
        Commands::ValidateSchema(args) => run_validate_schema(&args),
        Commands::ValidateBatch(args) => run_validate_batch(&args),
        Commands::GenerateFixtures(args) => run_generate_fixtures(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(codes::CONFIG_ERROR)
        }
    }
}
