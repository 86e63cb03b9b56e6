// src/exec/launcher.rs

//! Process launching: PATH resolution and spawning with wait-to-finish or
//! fire-and-forget semantics.

use std::path::PathBuf;

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{PipelineError, Result};
use crate::exec::spec::CommandSpec;

/// Handle to a spawned process.
///
/// `Detached` children are intentionally leaked: the pipeline never awaits
/// or kills them, relying on the host environment tearing down the process
/// tree when the pipeline exits. Only the pid survives, for logging.
#[derive(Debug)]
pub enum Spawned {
    /// Foreground child the caller waits on.
    Awaited(tokio::process::Child),
    /// Background child left running.
    Detached(Option<u32>),
}

impl Spawned {
    /// Await an `Awaited` child's exit; a non-zero status is an error.
    ///
    /// `Detached` children resolve immediately, since they are never
    /// monitored.
    pub async fn wait(self, spec: &CommandSpec) -> Result<()> {
        match self {
            Spawned::Awaited(mut child) => {
                let status = child
                    .wait()
                    .await
                    .with_context(|| format!("waiting for command \"{spec}\""))?;

                let code = status.code().unwrap_or(-1);
                debug!(
                    command = %spec,
                    exit_code = code,
                    success = status.success(),
                    "command exited"
                );

                if status.success() {
                    Ok(())
                } else {
                    Err(PipelineError::ExitCode {
                        command: spec.to_string(),
                        code,
                    })
                }
            }
            Spawned::Detached(_) => Ok(()),
        }
    }
}

/// Locate `program` on the search path.
///
/// Failing to resolve is fatal for the command; the caller aborts the
/// pipeline.
pub fn resolve(program: &str) -> Result<PathBuf> {
    which::which(program).map_err(|source| PipelineError::Resolve {
        program: program.to_string(),
        source,
    })
}

/// Spawn a command with the requested wait semantics.
///
/// `wait_to_finish = true` is used for build/run/readiness commands,
/// `false` for background servers. Logs the command and the resolved
/// executable path before spawning.
pub fn spawn(spec: &CommandSpec, label: &str, wait_to_finish: bool) -> Result<Spawned> {
    let tool_path = resolve(&spec.program)?;

    info!(label, command = %spec, path = %tool_path.display(), "executing command");
    debug!(args = ?spec.args, cwd = ?spec.cwd, wait_to_finish, "spawn parameters");

    let mut cmd = Command::new(&tool_path);
    cmd.args(&spec.args);
    if let Some(dir) = &spec.cwd {
        cmd.current_dir(dir);
    }

    if wait_to_finish {
        // Awaited children must not linger if the pipeline is torn down
        // mid-wait; detached children must outlive their handle, so no
        // kill_on_drop for them.
        cmd.kill_on_drop(true);
    }

    let child = cmd
        .spawn()
        .with_context(|| format!("spawning command \"{spec}\""))?;

    if wait_to_finish {
        Ok(Spawned::Awaited(child))
    } else {
        let pid = child.id();
        debug!(command = %spec, pid, "server left running in background");
        Ok(Spawned::Detached(pid))
    }
}

/// Run one command to completion.
pub async fn run_to_completion(spec: &CommandSpec, label: &str) -> Result<()> {
    let spawned = spawn(spec, label, true)?;
    spawned.wait(spec).await
}
