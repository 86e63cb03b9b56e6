// src/engine/pipeline.rs

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::errors::{PipelineError, Result};
use crate::exec::launcher;
use crate::exec::spec::{split_commands, CommandSpec};
use crate::wait::poller;

/// Drives the four pipeline phases in order.
///
/// Every phase is optional and skipped when its configuration is absent.
pub struct Pipeline {
    config: PipelineConfig,
    client: reqwest::Client,
    is_windows: bool,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            is_windows: cfg!(windows),
        }
    }

    /// Override host platform detection (used by tests to exercise the
    /// `start-windows` / `command-windows` selection on any host).
    pub fn with_platform(mut self, is_windows: bool) -> Self {
        self.is_windows = is_windows;
        self
    }

    /// Run all phases in order.
    pub async fn run(&self) -> Result<()> {
        self.build_phase().await?;
        self.start_phase()?;
        self.wait_phase().await?;
        self.run_phase().await?;
        Ok(())
    }

    /// Build phase: one command, awaited.
    ///
    /// The whole configured string is a single command; it is not split on
    /// separators.
    async fn build_phase(&self) -> Result<()> {
        let Some(build) = self.config.build.as_deref() else {
            debug!("no build command configured, skipping build phase");
            return Ok(());
        };

        info!(command = build, "building application");
        let spec = CommandSpec::parse(build, self.config.cwd.as_deref())?;
        launcher::run_to_completion(&spec, "build app").await
    }

    /// Start phase: each command spawned in configuration order and left
    /// running.
    ///
    /// A resolve/spawn failure aborts the pipeline, but the started
    /// processes themselves are never monitored afterwards.
    fn start_phase(&self) -> Result<()> {
        let Some(start) = self.config.effective_start(self.is_windows) else {
            debug!("no start command configured, skipping start phase");
            return Ok(());
        };

        let commands = split_commands(start);
        debug!(count = commands.len(), ?commands, "separated start commands");

        for raw in &commands {
            let spec = CommandSpec::parse(raw, self.config.cwd.as_deref())?;
            launcher::spawn(&spec, "start server", false)?;
        }
        Ok(())
    }

    /// Wait phase: URL polling, or an awaited readiness command when the
    /// target is not a URL.
    async fn wait_phase(&self) -> Result<()> {
        let Some(wait_on) = self.config.wait_on.as_deref() else {
            debug!("no wait-on configured, skipping wait phase");
            return Ok(());
        };

        if poller::is_url(wait_on) {
            let urls = poller::split_urls(wait_on);
            let timeout = self.config.wait_timeout();
            info!(
                wait_on,
                timeout_secs = timeout.as_secs_f64(),
                "waiting on urls"
            );
            return poller::poll_all(&self.client, &urls, timeout).await;
        }

        // Custom readiness command: exit 0 means ready. Any retry or timeout
        // behaviour belongs to the command itself.
        info!(command = wait_on, "waiting using command");
        let spec = CommandSpec::parse(wait_on, self.config.cwd.as_deref())?;
        launcher::run_to_completion(&spec, "wait").await
    }

    /// Run phase: all commands launched concurrently, all awaited.
    ///
    /// The phase fails if any command failed, but siblings are never
    /// cancelled: every command is launched up front and every one is
    /// drained before the first failure is reported.
    async fn run_phase(&self) -> Result<()> {
        let Some(command) = self.config.effective_command(self.is_windows) else {
            debug!("no run command configured, skipping run phase");
            return Ok(());
        };

        let commands = split_commands(command);
        debug!(count = commands.len(), ?commands, "separated main commands");

        let mut set = JoinSet::new();
        for raw in commands {
            let spec = CommandSpec::parse(&raw, self.config.cwd.as_deref())?;
            set.spawn(async move { launcher::run_to_completion(&spec, "run command").await });
        }

        let mut first_failure: Option<PipelineError> = None;
        while let Some(joined) = set.join_next().await {
            let result = match joined {
                Ok(res) => res,
                Err(err) => Err(PipelineError::Other(anyhow::Error::new(err))),
            };

            match result {
                Ok(()) => {}
                Err(err) => {
                    warn!(error = %err, "run command failed");
                    if first_failure.is_none() {
                        first_failure = Some(err);
                    }
                }
            }
        }

        match first_failure {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }
}
