//! CLI output: error mapping and failure reporting for stderr.

use crate::error::QueryError;
use crate::query::RunSummary;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &QueryError) -> String {
    format!("Error: {}", e)
}

/// Lines describing hosts skipped under `--keep-going`. Empty when none failed.
pub fn failure_report(summary: &RunSummary) -> Vec<String> {
    if summary.failures.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<String> = summary
        .failures
        .iter()
        .map(|f| format!("Error: {}", f.message))
        .collect();
    lines.push(format!(
        "{} of {} hosts failed",
        summary.failures.len(),
        summary.hosts_queried
    ));
    lines
}
