//! # govuk-components CLI entry point
//!
//! Parses command-line arguments, initializes logging and dispatches to
//! subcommand handlers. Results go to stdout, logs to stderr.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use govuk_cli::check::{run_check, CheckArgs};
use govuk_cli::examples::{run_examples, ExamplesArgs};
use govuk_cli::inspect::{run_normalize, run_schema, NormalizeArgs, SchemaArgs};

/// GOV.UK Frontend component schema tool.
///
/// Compiles component parameter specs into validators and checks request
/// bodies against them.
#[derive(Parser, Debug)]
#[command(name = "govuk-components", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    /// RUST_LOG takes precedence when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a JSON request body against a component.
    Check(CheckArgs),

    /// Print the compiled validator tree as JSON.
    Schema(SchemaArgs),

    /// Print the parameter list after dotted-name grouping.
    Normalize(NormalizeArgs),

    /// Validate the examples embedded in a component spec.
    Examples(ExamplesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "govuk-components starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = match cli.command {
        Commands::Check(args) => run_check(&args, &mut out),
        Commands::Schema(args) => run_schema(&args, &mut out),
        Commands::Normalize(args) => run_normalize(&args, &mut out),
        Commands::Examples(args) => run_examples(&args, &mut out),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8, json: bool) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
