// src/config/mod.rs

//! Configuration loading and merging for waitrun.
//!
//! Responsibilities:
//! - Define the TOML-backed data model and the merged pipeline configuration
//!   (`model.rs`).
//! - Load an optional config file from disk (`loader.rs`).
//! - Validate basic invariants like a sane timeout (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_for_args, load_from_path, DEFAULT_CONFIG_FILE};
pub use model::{ConfigFile, PipelineConfig, DEFAULT_WAIT_ON_TIMEOUT_SECS};
pub use validate::validate_config;
