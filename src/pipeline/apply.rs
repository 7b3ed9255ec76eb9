//! Runs the formatter over candidate files and classifies the result.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinError;

use super::discover::CandidateFile;
use crate::context::ServiceContext;
use crate::ports::Invocation;

/// How the formatter delivers its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatMode {
    /// The formatter prints the formatted file to stdout; fmtsync swaps it in.
    #[default]
    Stdout,
    /// The formatter rewrites the file itself.
    InPlace,
}

/// The external formatter and how to drive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    /// Program and leading arguments; the file path is appended.
    pub command: Invocation,
    /// Where the formatted content ends up.
    pub mode: FormatMode,
}

/// The result of formatting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    /// The formatter succeeded and the content is byte-identical.
    Unchanged,
    /// The formatter succeeded and the content changed.
    Modified,
    /// The formatter or the surrounding I/O failed; the file is untouched.
    Failed(String),
}

/// Formats single files against the ports of a [`ServiceContext`].
pub struct FormatApplicator<'a> {
    ctx: &'a ServiceContext,
    formatter: &'a Formatter,
}

impl<'a> FormatApplicator<'a> {
    /// Creates an applicator for `formatter`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, formatter: &'a Formatter) -> Self {
        Self { ctx, formatter }
    }

    /// Formats `file` and reports whether its content changed.
    ///
    /// On any failure the file keeps its original content.
    #[must_use]
    pub fn apply(&self, file: &CandidateFile) -> FormatOutcome {
        let before = match self.ctx.fs.read_to_string(file.as_path()) {
            Ok(content) => content,
            Err(e) => return FormatOutcome::Failed(format!("failed to read file: {e}")),
        };
        let invocation = self.formatter.command.with_arg(file.as_str());
        tracing::debug!(file = %file, command = %invocation, "running formatter");

        match self.formatter.mode {
            FormatMode::Stdout => self.apply_from_stdout(file, &invocation, &before),
            FormatMode::InPlace => self.apply_in_place(file, &invocation, &before),
        }
    }

    fn apply_from_stdout(
        &self,
        file: &CandidateFile,
        invocation: &Invocation,
        before: &str,
    ) -> FormatOutcome {
        let result = self.ctx.runner.run(invocation);
        if result.failed {
            return FormatOutcome::Failed(result.failure_message());
        }
        warn_on_stderr(file, &result.stderr);
        if result.stdout_not_utf8 {
            return FormatOutcome::Failed("formatter output is not valid UTF-8".to_string());
        }

        let after = result.stdout;
        if after.is_empty() && !before.is_empty() {
            return FormatOutcome::Failed(empty_output_message());
        }
        if after == before {
            return FormatOutcome::Unchanged;
        }
        match self.ctx.fs.replace(file.as_path(), &after) {
            Ok(()) => FormatOutcome::Modified,
            Err(e) => FormatOutcome::Failed(format!("failed to write formatted output: {e}")),
        }
    }

    fn apply_in_place(
        &self,
        file: &CandidateFile,
        invocation: &Invocation,
        before: &str,
    ) -> FormatOutcome {
        let result = self.ctx.runner.run(invocation);
        if result.failed {
            return self.restore(file, before, result.failure_message());
        }
        warn_on_stderr(file, &result.stderr);

        let after = match self.ctx.fs.read_to_string(file.as_path()) {
            Ok(content) => content,
            Err(e) => {
                let message = format!("failed to read formatted file: {e}");
                return self.restore(file, before, message);
            }
        };
        if after.is_empty() && !before.is_empty() {
            return self.restore(file, before, empty_output_message());
        }
        if after == before {
            FormatOutcome::Unchanged
        } else {
            FormatOutcome::Modified
        }
    }

    /// Puts the original content back after a failed in-place run.
    fn restore(&self, file: &CandidateFile, before: &str, message: String) -> FormatOutcome {
        if let Err(e) = self.ctx.fs.replace(file.as_path(), before) {
            return FormatOutcome::Failed(format!(
                "{message} (restoring original content also failed: {e})"
            ));
        }
        FormatOutcome::Failed(message)
    }
}

fn warn_on_stderr(file: &CandidateFile, stderr: &str) {
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        tracing::warn!(file = %file, stderr, "formatter succeeded but wrote to stderr");
    }
}

fn empty_output_message() -> String {
    "formatter produced empty output for a non-empty file".to_string()
}

/// Formats every file on a pool of at most `jobs` concurrent workers.
///
/// Results come back in the order of `files`, whatever order the workers
/// finish in.
pub async fn format_all(
    ctx: Arc<ServiceContext>,
    formatter: Arc<Formatter>,
    files: Vec<CandidateFile>,
    jobs: usize,
) -> Vec<(CandidateFile, FormatOutcome)> {
    let permits = Arc::new(Semaphore::new(jobs.max(1)));
    let mut handles = Vec::with_capacity(files.len());

    for file in files {
        let ctx = Arc::clone(&ctx);
        let formatter = Arc::clone(&formatter);
        let permits = Arc::clone(&permits);
        let task_file = file.clone();
        let handle = tokio::spawn(async move {
            let _permit = match permits.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => return FormatOutcome::Failed(format!("worker pool closed: {e}")),
            };
            let task = tokio::task::spawn_blocking(move || {
                FormatApplicator::new(&ctx, &formatter).apply(&task_file)
            });
            joined(task.await)
        });
        handles.push((file, handle));
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for (file, handle) in handles {
        let outcome = joined(handle.await);
        match &outcome {
            FormatOutcome::Unchanged => tracing::debug!(file = %file, "already formatted"),
            FormatOutcome::Modified => tracing::info!(file = %file, "reformatted"),
            FormatOutcome::Failed(reason) => {
                tracing::warn!(file = %file, reason = %reason, "formatting failed");
            }
        }
        outcomes.push((file, outcome));
    }
    outcomes
}

/// Unwraps a finished task, re-raising a panic on the awaiting thread so its
/// message is not lost.
fn joined(result: Result<FormatOutcome, JoinError>) -> FormatOutcome {
    match result {
        Ok(outcome) => outcome,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => FormatOutcome::Failed(format!("formatting task failed: {e}")),
    }
}
