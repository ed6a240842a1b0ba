//! repboard-cli — replay reputation board scenarios.
//!
//! Reads a JSON scenario, runs its steps against an in-memory board, and
//! prints one JSON line per step followed by a summary line.

mod scenario;

use std::io::Write;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use repboard_engine::BoardSettings;
use scenario::Scenario;

/// Reputation board scenario runner.
#[derive(Parser, Debug)]
#[command(name = "repboard-cli", version, about = "Replay reputation board scenarios")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scenario file and print events as JSON lines.
    Replay(ReplayArgs),
    /// Print the effective board settings (defaults plus environment).
    Settings,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// Path to the scenario JSON file.
    scenario: PathBuf,

    /// Continue past failing steps instead of stopping at the first one.
    #[arg(long)]
    keep_going: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    let outcome = match cli.command {
        Commands::Replay(args) => replay(args),
        Commands::Settings => print_settings(),
    };
    match outcome {
        Ok(true) => {}
        Ok(false) => process::exit(2),
        Err(e) => {
            error!("{e:#}");
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when any step failed.
fn replay(args: ReplayArgs) -> Result<bool> {
    let scenario = Scenario::load(&args.scenario)?;
    info!(path = %args.scenario.display(), steps = scenario.steps.len(), "loaded scenario");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = scenario.replay(args.keep_going, |report| {
        serde_json::to_writer(&mut out, report)?;
        writeln!(out)?;
        Ok(())
    })?;

    serde_json::to_writer(&mut out, &summary).context("writing summary")?;
    writeln!(out)?;
    info!(
        members = summary.members,
        failed = summary.failed_steps,
        "replay finished"
    );
    Ok(summary.failed_steps == 0)
}

fn print_settings() -> Result<bool> {
    let settings = BoardSettings::from_env()?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(true)
}

/// Initialize tracing with the given level and output format.
///
/// `RUST_LOG` takes precedence over `level`. Logs go to stderr so stdout
/// carries only replay output.
fn init_logging(level: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
