// src/errors.rs

//! Crate-wide error type and result alias.

use std::time::Duration;

use thiserror::Error;

/// Failure modes of the pipeline.
///
/// Every variant is fatal: a failing phase short-circuits all later phases.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to parse command string {raw:?}: {reason}")]
    Parse { raw: String, reason: String },

    #[error("executable '{program}' not found on PATH")]
    Resolve {
        program: String,
        #[source]
        source: which::Error,
    },

    #[error("command \"{command}\" exited with code {code}")]
    ExitCode { command: String, code: i32 },

    #[error("waiting for {url} timed out after {timeout:?}")]
    WaitTimeout { url: String, timeout: Duration },

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
