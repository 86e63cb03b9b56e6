// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::cli::CliArgs;

/// Default readiness timeout in seconds, matching `wait-on-timeout`.
pub const DEFAULT_WAIT_ON_TIMEOUT_SECS: f64 = 60.0;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// build = "npm run build"
/// start = "npm start, npm run worker"
/// command = "npm test"
/// wait-on = "http://localhost:3000"
/// wait-on-timeout = 60
/// ```
///
/// All keys are optional. CLI flags override file values; see
/// [`PipelineConfig::merge`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    pub build: Option<String>,
    pub start: Option<String>,
    pub start_windows: Option<String>,
    pub command: Option<String>,
    pub command_windows: Option<String>,
    pub wait_on: Option<String>,
    pub wait_on_timeout: Option<f64>,
    pub cwd: Option<String>,
}

/// Fully-merged configuration driving the pipeline.
///
/// Command-valued fields may pack several commands into one string,
/// separated by commas or newlines.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Build command, run to completion before anything else.
    pub build: Option<String>,

    /// Server command(s) started in the background and never awaited.
    pub start: Option<String>,

    /// Windows override for `start`.
    pub start_windows: Option<String>,

    /// Foreground command(s) for the run phase.
    pub command: Option<String>,

    /// Windows override for `command`.
    pub command_windows: Option<String>,

    /// URL(s) to poll, or a readiness command, before the run phase.
    pub wait_on: Option<String>,

    /// Readiness timeout in seconds, applied to each URL independently.
    pub wait_on_timeout: f64,

    /// Working directory applied to every spawned command.
    pub cwd: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            build: None,
            start: None,
            start_windows: None,
            command: None,
            command_windows: None,
            wait_on: None,
            wait_on_timeout: DEFAULT_WAIT_ON_TIMEOUT_SECS,
            cwd: None,
        }
    }
}

impl PipelineConfig {
    /// Merge file values with CLI flags; flags win.
    pub fn merge(file: ConfigFile, args: &CliArgs) -> Self {
        Self {
            build: args.build.clone().or(file.build),
            start: args.start.clone().or(file.start),
            start_windows: args.start_windows.clone().or(file.start_windows),
            command: args.command.clone().or(file.command),
            command_windows: args.command_windows.clone().or(file.command_windows),
            wait_on: args.wait_on.clone().or(file.wait_on),
            wait_on_timeout: args
                .wait_on_timeout
                .or(file.wait_on_timeout)
                .unwrap_or(DEFAULT_WAIT_ON_TIMEOUT_SECS),
            cwd: args.cwd.clone().or(file.cwd).map(PathBuf::from),
        }
    }

    /// Effective start command string for the given platform.
    ///
    /// On Windows the `start-windows` override wins when configured;
    /// otherwise the plain `start` value is used there too.
    pub fn effective_start(&self, is_windows: bool) -> Option<&str> {
        pick_platform(
            self.start.as_deref(),
            self.start_windows.as_deref(),
            is_windows,
        )
    }

    /// Effective run command string for the given platform.
    pub fn effective_command(&self, is_windows: bool) -> Option<&str> {
        pick_platform(
            self.command.as_deref(),
            self.command_windows.as_deref(),
            is_windows,
        )
    }

    /// Readiness timeout as a `Duration`.
    ///
    /// Callers are expected to run `validate_config` first; a value that
    /// cannot be represented falls back to the default.
    pub fn wait_timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.wait_on_timeout)
            .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_WAIT_ON_TIMEOUT_SECS))
    }
}

fn pick_platform<'a>(
    default: Option<&'a str>,
    windows: Option<&'a str>,
    is_windows: bool,
) -> Option<&'a str> {
    if is_windows {
        windows.or(default)
    } else {
        default
    }
}
