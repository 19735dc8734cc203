//! Run command implementation.

use super::{read_records, OutputFormat};
use recordsync_engine::{
    demo_records, CheckMode, FixtureSource, LogNotifier, NotificationStatus,
    SimulatedAutomationEngine, SyncConfig, SyncOrchestrator,
};
use recordsync_protocol::SyncOutcome;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Options for a single sync run.
#[derive(Debug, Default)]
pub struct RunOptions {
    /// JSON configuration file.
    pub config: Option<PathBuf>,
    /// Source endpoint override.
    pub source_url: Option<String>,
    /// Processing endpoint override.
    pub processing_url: Option<String>,
    /// Records the simulated source serves.
    pub records: Option<PathBuf>,
    /// Check mode override.
    pub check_mode: Option<CheckMode>,
    /// Disable the completion notification.
    pub no_notify: bool,
}

/// Loads a configuration file, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<SyncConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(SyncConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config = serde_json::from_str(&json)
        .map_err(|e| format!("Invalid config {}: {e}", path.display()))?;
    Ok(config)
}

/// Builds the effective configuration: file values, then flag overrides.
pub fn resolve_config(options: &RunOptions) -> Result<SyncConfig, Box<dyn std::error::Error>> {
    let mut config = load_config(options.config.as_deref())?;

    if let Some(url) = &options.source_url {
        config.source_endpoint = url.clone();
    }
    if let Some(url) = &options.processing_url {
        config.processing_endpoint = url.clone();
    }
    if let Some(mode) = options.check_mode {
        config.check_mode = mode;
    }
    if options.no_notify {
        config.notify_on_success = false;
    }

    Ok(config)
}

/// Runs the run command.
pub fn run(options: &RunOptions, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(options)?;
    info!(
        source = %config.source_endpoint,
        processing = %config.processing_endpoint,
        check_mode = %config.check_mode,
        notify = config.notify_on_success,
        "Resolved sync configuration"
    );

    let records = match &options.records {
        Some(path) => read_records(path)?,
        None => demo_records(),
    };
    info!(count = records.len(), "Loaded source records");

    let orchestrator = SyncOrchestrator::new(
        config.clone(),
        FixtureSource::with_records(&config.source_endpoint, records),
        SimulatedAutomationEngine::new(&config.processing_endpoint),
        LogNotifier::new(),
    );

    let (outcome, finished) = match orchestrator.run() {
        Ok(report) => {
            info!(elapsed_ms = report.duration.as_millis() as u64, "Sync finished");
            let finished = (report.notification.clone(), report.duration);
            (report.into_outcome(), Some(finished))
        }
        Err(e) => {
            warn!(error = %e, "Sync aborted");
            (SyncOutcome::failure(e.to_string()), None)
        }
    };

    match format {
        OutputFormat::Json => println!("{}", outcome.to_json()?),
        OutputFormat::Text => print_outcome(&outcome, finished.as_ref()),
    }

    if outcome.is_success() {
        Ok(())
    } else {
        Err("Sync failed".into())
    }
}

fn print_outcome(outcome: &SyncOutcome, finished: Option<&(NotificationStatus, Duration)>) {
    match outcome {
        SyncOutcome::Success { message, records } => {
            match finished {
                Some((_, duration)) => println!("✓ {message} ({duration:.2?})"),
                None => println!("✓ {message}"),
            }
            for record in records {
                println!("  {:>8}  {:<24} {}", record.id().value(), record.name, record.status);
            }
            match finished.map(|(notification, _)| notification) {
                Some(NotificationStatus::Delivered(ack)) => {
                    println!("Notification delivered ({})", ack.receipt)
                }
                Some(NotificationStatus::Failed(reason)) => {
                    println!("Notification not delivered: {reason}")
                }
                Some(NotificationStatus::Skipped) | None => println!("Notification skipped"),
            }
        }
        SyncOutcome::Failure { reason } => {
            println!("✗ Sync failed: {reason}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn flags_override_config_file() {
        let file = write_temp(
            r#"{"source_endpoint": "https://erp.internal", "check_mode": "keyed"}"#,
        );
        let options = RunOptions {
            config: Some(file.path().to_path_buf()),
            processing_url: Some("https://engine.internal".into()),
            check_mode: Some(CheckMode::Positional),
            no_notify: true,
            ..RunOptions::default()
        };

        let config = resolve_config(&options).unwrap();
        assert_eq!(config.source_endpoint, "https://erp.internal");
        assert_eq!(config.processing_endpoint, "https://engine.internal");
        assert_eq!(config.check_mode, CheckMode::Positional);
        assert!(!config.notify_on_success);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/recordsync.json"))).is_err());
    }

    #[test]
    fn run_with_demo_records_succeeds() {
        assert!(run(&RunOptions::default(), OutputFormat::Json).is_ok());
    }

    #[test]
    fn run_with_record_file() {
        let file = write_temp(r#"[{"id": 1, "name": "Invoice 1", "status": "Pending"}]"#);
        let options = RunOptions {
            records: Some(file.path().to_path_buf()),
            ..RunOptions::default()
        };

        assert!(run(&options, OutputFormat::Text).is_ok());
    }

    #[test]
    fn malformed_record_file_is_an_error() {
        let file = write_temp("not json");
        let options = RunOptions {
            records: Some(file.path().to_path_buf()),
            ..RunOptions::default()
        };

        assert!(run(&options, OutputFormat::Text).is_err());
    }
}
