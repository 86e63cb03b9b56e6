// src/engine/mod.rs

//! Orchestration engine for waitrun.
//!
//! Sequences the four pipeline phases in strict order:
//! - Build: one awaited command
//! - Start: background servers, fire-and-forget
//! - Wait: URL polling or an awaited readiness command
//! - Run: foreground commands, concurrent, all awaited
//!
//! Any phase failure short-circuits the remaining phases.

pub mod pipeline;

pub use pipeline::Pipeline;
