// tests/config.rs

use std::error::Error;
use std::fs;

use clap::Parser;
use tempfile::tempdir;

use waitrun::cli::CliArgs;
use waitrun::config::{
    load_from_path, validate_config, ConfigFile, PipelineConfig, DEFAULT_WAIT_ON_TIMEOUT_SECS,
};

type TestResult = Result<(), Box<dyn Error>>;

fn args(argv: &[&str]) -> CliArgs {
    CliArgs::parse_from(std::iter::once("waitrun").chain(argv.iter().copied()))
}

#[test]
fn toml_file_uses_kebab_case_keys() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("Waitrun.toml");
    fs::write(
        &path,
        r#"
build = "npm run build"
start = "npm start"
start-windows = "npm run start:win"
wait-on = "http://localhost:3000"
wait-on-timeout = 2.5
command = "npm test"
"#,
    )?;

    let file = load_from_path(&path)?;
    assert_eq!(file.build.as_deref(), Some("npm run build"));
    assert_eq!(file.start_windows.as_deref(), Some("npm run start:win"));
    assert_eq!(file.wait_on.as_deref(), Some("http://localhost:3000"));
    assert_eq!(file.wait_on_timeout, Some(2.5));
    Ok(())
}

#[test]
fn unknown_keys_are_rejected() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("Waitrun.toml");
    fs::write(&path, "comand = \"typo\"\n")?;

    assert!(load_from_path(&path).is_err());
    Ok(())
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    assert!(load_from_path("/definitely/not/a/real/Waitrun.toml").is_err());
}

#[test]
fn cli_flags_override_file_values() {
    let file = ConfigFile {
        command: Some("from file".into()),
        build: Some("file build".into()),
        ..ConfigFile::default()
    };

    let cfg = PipelineConfig::merge(file, &args(&["--command", "from flag"]));
    assert_eq!(cfg.command.as_deref(), Some("from flag"));
    assert_eq!(cfg.build.as_deref(), Some("file build"));
}

#[test]
fn wait_on_timeout_defaults_to_sixty_seconds() {
    let cfg = PipelineConfig::merge(ConfigFile::default(), &args(&["--command", "true"]));
    assert_eq!(cfg.wait_on_timeout, DEFAULT_WAIT_ON_TIMEOUT_SECS);
}

#[test]
fn windows_override_wins_only_on_windows() {
    let cfg = PipelineConfig {
        start: Some("A".into()),
        start_windows: Some("B".into()),
        ..PipelineConfig::default()
    };
    assert_eq!(cfg.effective_start(false), Some("A"));
    assert_eq!(cfg.effective_start(true), Some("B"));
}

#[test]
fn windows_falls_back_to_the_plain_command_without_an_override() {
    let cfg = PipelineConfig {
        start: Some("A".into()),
        ..PipelineConfig::default()
    };
    assert_eq!(cfg.effective_start(true), Some("A"));
    assert_eq!(cfg.effective_start(false), Some("A"));
}

#[test]
fn validation_rejects_non_positive_timeouts() {
    let cfg = PipelineConfig {
        command: Some("true".into()),
        wait_on_timeout: 0.0,
        ..PipelineConfig::default()
    };
    assert!(validate_config(&cfg).is_err());
}

#[test]
fn validation_rejects_an_empty_configuration() {
    assert!(validate_config(&PipelineConfig::default()).is_err());
}

#[test]
fn validation_accepts_a_minimal_run_configuration() {
    let cfg = PipelineConfig {
        command: Some("true".into()),
        ..PipelineConfig::default()
    };
    assert!(validate_config(&cfg).is_ok());
}
