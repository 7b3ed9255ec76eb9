//! Aggregates per-file outcomes into a change set and failure list.

use std::collections::HashSet;

use super::apply::FormatOutcome;
use super::discover::CandidateFile;

/// A file the formatter could not handle, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    /// The file that failed.
    pub file: CandidateFile,
    /// Why it failed.
    pub message: String,
}

/// Files whose content the formatter changed, in discovery order.
///
/// Holds each path at most once and never a failed or unchanged file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    files: Vec<CandidateFile>,
}

impl ChangeSet {
    /// The changed files.
    #[must_use]
    pub fn files(&self) -> &[CandidateFile] {
        &self.files
    }

    /// Number of changed files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// `true` when nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Everything the formatting stage produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeReport {
    /// Files that were reformatted.
    pub change_set: ChangeSet,
    /// Files that failed, in discovery order.
    pub failures: Vec<FailureRecord>,
    /// Count of files that were already formatted.
    pub unchanged: usize,
}

impl ChangeReport {
    /// `true` when any file failed to format.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Partitions outcomes into the change set and the failures.
///
/// Order is preserved. A failure never removes an earlier success.
#[must_use]
pub fn collect(outcomes: Vec<(CandidateFile, FormatOutcome)>) -> ChangeReport {
    let mut report = ChangeReport::default();
    let mut seen = HashSet::new();

    for (file, outcome) in outcomes {
        match outcome {
            FormatOutcome::Modified => {
                if seen.insert(file.clone()) {
                    report.change_set.files.push(file);
                }
            }
            FormatOutcome::Unchanged => report.unchanged += 1,
            FormatOutcome::Failed(message) => report.failures.push(FailureRecord { file, message }),
        }
    }
    report
}
