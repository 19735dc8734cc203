//! CLI command implementations.

pub mod run;
pub mod verify;

use clap::ValueEnum;
use recordsync_protocol::RecordSet;
use std::path::Path;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Reads a JSON record-set file.
pub fn read_records(path: &Path) -> Result<RecordSet, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let records = RecordSet::from_json(&json)
        .map_err(|e| format!("Invalid record file {}: {e}", path.display()))?;
    Ok(records)
}
