// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod wait;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::{load_for_args, validate_config, PipelineConfig};
use crate::engine::Pipeline;
use crate::errors::Result;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (optional TOML file, CLI flags win)
/// - validation
/// - the Build → Start → Wait → Run pipeline
pub async fn run(args: CliArgs) -> Result<()> {
    let file = load_for_args(args.config.as_deref())?;
    let cfg = PipelineConfig::merge(file, &args);
    validate_config(&cfg)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    Pipeline::new(cfg).run().await
}

/// Simple dry-run output: print the phases that would execute on this host.
fn print_dry_run(cfg: &PipelineConfig) {
    let is_windows = cfg!(windows);

    println!("waitrun dry-run");

    if let Some(build) = cfg.build.as_deref() {
        println!("  build: {build}");
    }
    if let Some(start) = cfg.effective_start(is_windows) {
        for cmd in exec::split_commands(start) {
            println!("  start (background): {cmd}");
        }
    }
    if let Some(wait_on) = cfg.wait_on.as_deref() {
        if wait::is_url(wait_on) {
            for url in wait::split_urls(wait_on) {
                println!("  wait-on url: {url} (timeout {}s)", cfg.wait_on_timeout);
            }
        } else {
            println!("  wait-on command: {wait_on}");
        }
    }
    if let Some(command) = cfg.effective_command(is_windows) {
        for cmd in exec::split_commands(command) {
            println!("  run (parallel): {cmd}");
        }
    }

    debug!("dry-run complete (no execution)");
}
