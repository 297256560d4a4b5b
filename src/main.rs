//! pyupcheck - Python requirement upgrade checker CLI tool
//!
//! Reads pinned requirements and reports which newer releases on the
//! registry support a target Python version.

use anyhow::Context;
use clap::Parser;
use pyupcheck::cli::CliArgs;
use pyupcheck::config::CheckConfig;
use pyupcheck::orchestrator::Orchestrator;
use pyupcheck::output::{append_report, create_formatter, OutputConfig};
use pyupcheck::parser::read_requirements;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default level
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let config = CheckConfig::from_cli(&args)?;

    // Print version info in verbose mode
    if args.verbose {
        eprintln!("pyupcheck v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Requirements: {}", config.requirements.display());
        eprintln!("Mode: {}", config.mode);
        eprintln!("Targets: {} (legacy {})", config.targets.join(", "), config.legacy);
    }

    let requirements = read_requirements(&config.requirements)?;
    let report_path = config.output.clone();

    // Create and run the orchestrator
    let orchestrator = Orchestrator::new(config)?;
    let result = orchestrator.run(&requirements).await;

    // Create output formatter based on CLI options
    let formatter = create_formatter(OutputConfig::from_cli(args.json, args.verbose, args.quiet));

    // Output results
    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    if let Some(path) = report_path {
        append_report(&path, &result)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
    }

    // Skipped requirements are reported even without --verbose
    if result.has_errors() {
        eprintln!();
        eprintln!("Errors encountered:");
        for error in &result.errors {
            eprintln!("  - {}", error);
        }
        // Partial success - some requirements could not be resolved
        return Ok(ExitCode::from(2));
    }

    Ok(ExitCode::SUCCESS)
}
