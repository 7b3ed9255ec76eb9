//! End-of-run summary, workflow annotations, and the final verdict.

use crate::error::Error;
use crate::pipeline::commit::CommitOutcome;
use crate::pipeline::RunReport;

/// Logs a one-line summary of the run.
pub fn summarize(report: &RunReport) {
    let commit = report
        .commit
        .as_ref()
        .map_or_else(|| "not attempted".to_string(), ToString::to_string);
    tracing::info!(
        discovered = report.discovered,
        modified = report.changes.change_set.len(),
        unchanged = report.changes.unchanged,
        failed = report.changes.failures.len(),
        commit = %commit,
        "run complete"
    );
}

/// GitHub Actions `::error` workflow commands for every failure in `report`.
#[must_use]
pub fn annotations(report: &RunReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .changes
        .failures
        .iter()
        .map(|failure| {
            format!(
                "::error file={}::{}",
                escape_property(failure.file.as_str()),
                escape_data(&failure.message)
            )
        })
        .collect();
    if let Some(CommitOutcome::Failed(message)) = &report.commit {
        lines.push(format!("::error::{}", escape_data(&format!("commit failed: {message}"))));
    }
    lines
}

/// Prints [`annotations`] to stdout when running under GitHub Actions.
pub fn emit_annotations(report: &RunReport) {
    if std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true") {
        for line in annotations(report) {
            println!("{line}");
        }
    }
}

/// Converts the report into the process verdict.
///
/// # Errors
///
/// Returns [`Error::Commit`] if the commit stage failed, otherwise
/// [`Error::FormatFailures`] naming every file that failed.
pub fn verdict(report: &RunReport) -> Result<(), Error> {
    if let Some(CommitOutcome::Failed(message)) = &report.commit {
        return Err(Error::Commit(message.clone()));
    }
    if report.changes.has_failures() {
        let files = report.changes.failures.iter().map(|f| f.file.to_string()).collect();
        return Err(Error::FormatFailures { files });
    }
    Ok(())
}

fn escape_data(value: &str) -> String {
    value.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}
