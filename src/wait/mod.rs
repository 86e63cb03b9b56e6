// src/wait/mod.rs

//! Readiness waiting.
//!
//! A `wait-on` value is either one or more URLs to poll until they answer,
//! or a custom readiness command (run by the orchestrator through the
//! process launcher). This module owns the URL-polling side and the
//! URL-vs-command classification.

pub mod poller;

pub use poller::{is_url, poll_all, poll_url, split_urls, RETRY_INTERVAL};
