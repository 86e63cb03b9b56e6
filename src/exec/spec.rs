// src/exec/spec.rs

//! Command-string parsing.
//!
//! Configuration values may pack several commands into one string, separated
//! by commas or newlines. Each individual command is tokenized with
//! shell-style quoting rules, so a quoted argument containing spaces stays a
//! single token. No shell is involved at any point.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{PipelineError, Result};

/// A single parsed command: program, arguments, optional working directory.
///
/// Immutable once constructed; `program` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Tokenize one command string.
    ///
    /// Fails with a parse error on malformed quoting, or when tokenization
    /// yields no tokens at all. The latter should not happen for entries
    /// coming out of [`split_commands`], which drops empty strings; the
    /// check is a defensive contract for direct callers.
    pub fn parse(raw: &str, cwd: Option<&Path>) -> Result<Self> {
        let tokens = shell_words::split(raw).map_err(|e| PipelineError::Parse {
            raw: raw.to_string(),
            reason: e.to_string(),
        })?;

        debug!(raw, ?tokens, "parsed command");

        let mut tokens = tokens.into_iter();
        let Some(program) = tokens.next() else {
            return Err(PipelineError::Parse {
                raw: raw.to_string(),
                reason: "command contains no tokens".to_string(),
            });
        };

        Ok(Self {
            program,
            args: tokens.collect(),
            cwd: cwd.map(Path::to_path_buf),
        })
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = shell_words::join(std::iter::once(&self.program).chain(self.args.iter()));
        write!(f, "{joined}")
    }
}

/// Split a raw configuration value into individual command strings.
///
/// Commands may be separated by commas or newlines; entries are trimmed and
/// empty entries are dropped. Relative order is preserved.
pub fn split_commands(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
