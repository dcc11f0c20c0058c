//! Lectern diagnostics - report what the platform shims see.
//!
//! Prints the classified display backend and, on Windows, the launch context
//! the console visibility policy would act on. stdout carries only the
//! payload (JSON or a one-line summary); all logging goes to stderr.

use clap::{Parser, ValueEnum};
use lectern_display::DisplayBackend;
use serde::Serialize;
use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Lectern platform diagnostics
#[derive(Parser)]
#[command(name = "lectern-diag")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, short = 'f', default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long)]
    quiet: bool,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum OutputFormat {
    /// Structured JSON (default for machine consumption)
    #[default]
    Json,

    /// One-line summary for quick status checks
    Summary,
}

/// Everything the shims can observe about the current session.
#[derive(Serialize)]
struct DiagReport {
    /// Classified display backend of the ambient session.
    backend: DisplayBackend,

    /// Console policy evaluation (Windows only).
    #[cfg(windows)]
    launch: lectern_console::LaunchContext,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let report = DiagReport {
        backend: DisplayBackend::detect(),
        #[cfg(windows)]
        launch: lectern_console::launch_context(),
    };

    match cli.format {
        OutputFormat::Json => match serde_json::to_string(&report) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                tracing::error!(%err, "failed to serialize report");
                std::process::exit(1);
            }
        },
        OutputFormat::Summary => println!("{}", summary_line(&report)),
    }
}

fn summary_line(report: &DiagReport) -> String {
    #[cfg(windows)]
    {
        format!(
            "backend={} console={} parent={}",
            report.backend,
            report.launch.action,
            report.launch.parent_executable.as_deref().unwrap_or("-"),
        )
    }
    #[cfg(not(windows))]
    {
        format!("backend={}", report.backend)
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let use_ansi = std::io::stderr().is_terminal();
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(use_ansi)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
