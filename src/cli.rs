// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `waitrun`.
///
/// Command-valued flags accept several commands in one string, separated by
/// commas or newlines. Flags override values from the config file.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "waitrun",
    version,
    about = "Build an app, start background servers, wait for readiness, then run commands.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a config file (TOML).
    ///
    /// Default: `Waitrun.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Build command, run to completion before anything else.
    #[arg(long, value_name = "CMD")]
    pub build: Option<String>,

    /// Server command(s) started in the background and left running.
    #[arg(long, value_name = "CMD")]
    pub start: Option<String>,

    /// Windows override for --start.
    #[arg(long = "start-windows", value_name = "CMD")]
    pub start_windows: Option<String>,

    /// Foreground command(s) to run once everything is ready.
    #[arg(long, value_name = "CMD")]
    pub command: Option<String>,

    /// Windows override for --command.
    #[arg(long = "command-windows", value_name = "CMD")]
    pub command_windows: Option<String>,

    /// URL(s) to poll, or a readiness command, before the run phase.
    #[arg(long = "wait-on", value_name = "URL|CMD")]
    pub wait_on: Option<String>,

    /// Readiness timeout in seconds, applied to each URL independently.
    #[arg(long = "wait-on-timeout", value_name = "SECONDS")]
    pub wait_on_timeout: Option<f64>,

    /// Working directory applied to every spawned command.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WAITRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the resolved plan without executing any commands.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
