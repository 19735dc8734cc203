//! Verify command implementation.

use super::{read_records, OutputFormat};
use recordsync_engine::{CheckMode, ConsistencyChecker, ConsistencyReport};
use serde::Serialize;
use std::path::Path;

/// Verification result.
#[derive(Debug, Serialize)]
pub struct VerifyResult {
    /// Check mode used.
    pub mode: CheckMode,
    /// Number of submitted records.
    pub original_count: usize,
    /// Number of returned records.
    pub result_count: usize,
    /// Whether the sets are consistent.
    pub consistent: bool,
    /// Violations found.
    pub report: ConsistencyReport,
}

/// Compares two record-set files.
pub fn check_files(
    original: &Path,
    result: &Path,
    mode: CheckMode,
) -> Result<VerifyResult, Box<dyn std::error::Error>> {
    let original = read_records(original)?;
    let result = read_records(result)?;
    let checker = ConsistencyChecker::new(mode);
    let report = checker.check(&original, &result);

    Ok(VerifyResult {
        mode: checker.mode(),
        original_count: original.len(),
        result_count: result.len(),
        consistent: report.is_consistent(),
        report,
    })
}

/// Runs the verify command.
pub fn run(
    original: &Path,
    result: &Path,
    mode: CheckMode,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let verify_result = check_files(original, result, mode)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&verify_result)?),
        OutputFormat::Text => print_result(&verify_result),
    }

    if verify_result.consistent {
        Ok(())
    } else {
        Err("Verification failed".into())
    }
}

fn print_result(result: &VerifyResult) {
    println!(
        "Checked {} submitted / {} returned records ({} mode)",
        result.original_count, result.result_count, result.mode
    );
    for violation in result.report.iter() {
        println!("  ✗ {violation}");
    }
    println!();
    if result.consistent {
        println!("✓ Record sets are consistent");
    } else {
        println!("✗ {} violation(s) found", result.report.len());
    }
}
