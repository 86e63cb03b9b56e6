// src/config/validate.rs

use anyhow::anyhow;

use crate::config::model::PipelineConfig;
use crate::errors::Result;

/// Run basic semantic validation against the merged configuration.
///
/// This checks:
/// - at least one phase is configured
/// - `wait-on-timeout` is a positive, finite number of seconds
/// - `cwd`, when given, names an existing directory
pub fn validate_config(cfg: &PipelineConfig) -> Result<()> {
    ensure_has_work(cfg)?;
    validate_timeout(cfg)?;
    validate_cwd(cfg)?;
    Ok(())
}

fn ensure_has_work(cfg: &PipelineConfig) -> Result<()> {
    if cfg.build.is_none()
        && cfg.start.is_none()
        && cfg.start_windows.is_none()
        && cfg.command.is_none()
        && cfg.command_windows.is_none()
        && cfg.wait_on.is_none()
    {
        return Err(anyhow!(
            "nothing to do: configure at least one of build, start, wait-on or command"
        )
        .into());
    }
    Ok(())
}

fn validate_timeout(cfg: &PipelineConfig) -> Result<()> {
    let t = cfg.wait_on_timeout;
    if !t.is_finite() || t <= 0.0 {
        return Err(anyhow!(
            "wait-on-timeout must be a positive number of seconds (got {t})"
        )
        .into());
    }
    Ok(())
}

fn validate_cwd(cfg: &PipelineConfig) -> Result<()> {
    if let Some(dir) = &cfg.cwd {
        if !dir.is_dir() {
            return Err(anyhow!("cwd {dir:?} is not a directory").into());
        }
    }
    Ok(())
}
