// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`spec`] turns raw configuration strings into [`spec::CommandSpec`]s
//!   (separator splitting + shell-style tokenizing).
//! - [`launcher`] resolves executables on PATH and spawns them, either
//!   awaited to completion or fire-and-forget for background servers.

pub mod launcher;
pub mod spec;

pub use launcher::{resolve, run_to_completion, spawn, Spawned};
pub use spec::{split_commands, CommandSpec};
