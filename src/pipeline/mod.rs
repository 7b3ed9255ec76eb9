//! The format-then-commit pipeline.
//!
//! Discovery, concurrent formatting, change tracking, and a single
//! conditional commit, in that order. Every external effect goes through the
//! ports of a [`ServiceContext`].

pub mod apply;
pub mod commit;
pub mod discover;
pub mod tracker;

use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use crate::config::RunConfiguration;
use crate::context::ServiceContext;
use crate::error::Error;

use self::commit::CommitOutcome;
use self::tracker::ChangeReport;

/// What a pipeline run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Number of candidate files discovered.
    pub discovered: usize,
    /// Changed, unchanged, and failed files.
    pub changes: ChangeReport,
    /// Commit stage result; `None` when no files were found.
    pub commit: Option<CommitOutcome>,
}

impl RunReport {
    /// `true` when no file failed and the commit stage did not fail.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        !self.changes.has_failures() && self.commit.as_ref().map_or(true, CommitOutcome::is_success)
    }
}

/// Runs the whole pipeline once.
///
/// Per-file formatting failures do not stop the run: the remaining files are
/// formatted and whatever changed is still committed. Check
/// [`RunReport::succeeded`] for the overall verdict.
///
/// # Errors
///
/// Returns [`Error::Discovery`] if a file pattern is malformed. Nothing is
/// formatted in that case.
pub async fn run(ctx: Arc<ServiceContext>, config: &RunConfiguration) -> Result<RunReport, Error> {
    let span = tracing::info_span!("run", run_id = %Uuid::new_v4());
    async move {
        let files = discover::discover(ctx.fs.as_ref(), &config.file_patterns)?;
        if files.is_empty() {
            tracing::info!(patterns = ?config.file_patterns, "no files found");
            return Ok(RunReport {
                discovered: 0,
                changes: ChangeReport::default(),
                commit: None,
            });
        }
        let discovered = files.len();
        tracing::info!(files = discovered, jobs = config.jobs, "formatting");

        let formatter = Arc::new(config.formatter.clone());
        let outcomes = apply::format_all(Arc::clone(&ctx), formatter, files, config.jobs).await;
        let changes = tracker::collect(outcomes);

        let outcome = commit::commit(ctx.git.as_ref(), &changes.change_set, config);
        Ok::<_, Error>(RunReport {
            discovered,
            changes,
            commit: Some(outcome),
        })
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use crate::pipeline::apply::{FormatMode, Formatter, FormatOutcome};
    use crate::pipeline::commit::SkipReason;
    use crate::pipeline::discover::CandidateFile;
    use crate::pipeline::tracker::FailureRecord;
    use crate::ports::{Identity, Invocation};
    use serde_json::json;

    fn config(commit_enabled: bool) -> RunConfiguration {
        RunConfiguration {
            file_patterns: vec!["**/*.rst".into()],
            commit_enabled,
            identity: Identity {
                name: "github-actions".into(),
                email: "bot@example.com".into(),
            },
            commit_message: "Apply formatting".into(),
            formatter: Formatter {
                command: Invocation::new("rstfmt", Vec::<String>::new()),
                mode: FormatMode::Stdout,
            },
            jobs: 2,
        }
    }

    fn glob(rec: &mut CassetteRecorder, matches: &[&str]) {
        rec.record("fs", "glob", json!({"pattern": "**/*.rst"}), json!({"ok": matches}));
    }

    fn format_file(
        rec: &mut CassetteRecorder,
        path: &str,
        before: &str,
        result: Result<&str, &str>,
    ) {
        rec.record("fs", "read_to_string", json!({"path": path}), json!({"ok": before}));
        let output = match result {
            Ok(stdout) => json!({"failed": false, "exit_code": 0, "stdout": stdout, "stderr": ""}),
            Err(stderr) => json!({"failed": true, "exit_code": 1, "stdout": "", "stderr": stderr}),
        };
        rec.record("runner", "run", json!({"program": "rstfmt", "args": [path]}), output);
        if let Ok(after) = result {
            if after != before {
                rec.record(
                    "fs",
                    "replace",
                    json!({"path": path, "contents": after}),
                    json!({"ok": null}),
                );
            }
        }
    }

    async fn run_cassette(rec: &CassetteRecorder, config: &RunConfiguration) -> RunReport {
        let ctx = Arc::new(ServiceContext::from_cassette(&rec.cassette()));
        run(ctx, config).await.unwrap()
    }

    #[tokio::test]
    async fn dirty_clean_and_failing_files() {
        let mut rec = CassetteRecorder::new("unused.yaml", "test", "abc");
        glob(&mut rec, &["file1.rst", "file2.rst", "file3.rst"]);
        format_file(&mut rec, "file1.rst", "Title  \n", Ok("Title\n"));
        format_file(&mut rec, "file2.rst", "Clean\n", Ok("Clean\n"));
        format_file(&mut rec, "file3.rst", "Broken\n", Err("file3.rst:1: syntax error"));
        rec.record("git", "stage", json!({"path": "file1.rst"}), json!({"ok": null}));
        rec.record(
            "git",
            "has_staged_changes",
            json!({"paths": ["file1.rst"]}),
            json!({"ok": true}),
        );
        rec.record(
            "git",
            "commit",
            json!({
                "message": "Apply formatting",
                "identity": {"name": "github-actions", "email": "bot@example.com"},
                "paths": ["file1.rst"],
            }),
            json!({"ok": null}),
        );
        rec.record("git", "current_commit", json!(null), json!({"ok": "feedface"}));
        rec.record("git", "push", json!(null), json!({"ok": null}));

        let report = run_cassette(&rec, &config(true)).await;

        assert_eq!(report.discovered, 3);
        assert_eq!(report.changes.change_set.files(), &[CandidateFile::new("file1.rst")]);
        assert_eq!(
            report.changes.failures,
            vec![FailureRecord {
                file: CandidateFile::new("file3.rst"),
                message: "file3.rst:1: syntax error".into(),
            }]
        );
        assert_eq!(
            report.commit,
            Some(CommitOutcome::Committed {
                commit: "feedface".into(),
                files: 1,
            })
        );
        assert!(!report.succeeded());
    }

    #[tokio::test]
    async fn second_run_over_formatted_tree_is_a_no_op() {
        let mut rec = CassetteRecorder::new("unused.yaml", "test", "abc");
        glob(&mut rec, &["a.rst", "b.rst"]);
        format_file(&mut rec, "a.rst", "A\n", Ok("A\n"));
        format_file(&mut rec, "b.rst", "B\n", Ok("B\n"));

        let report = run_cassette(&rec, &config(true)).await;

        assert!(report.changes.change_set.is_empty());
        assert_eq!(report.changes.unchanged, 2);
        assert_eq!(report.commit, Some(CommitOutcome::Skipped(SkipReason::NoChanges)));
        assert!(report.succeeded());
    }

    #[tokio::test]
    async fn commit_disabled_leaves_git_alone() {
        let mut rec = CassetteRecorder::new("unused.yaml", "test", "abc");
        glob(&mut rec, &["a.rst"]);
        format_file(&mut rec, "a.rst", "A  \n", Ok("A\n"));

        let report = run_cassette(&rec, &config(false)).await;

        assert_eq!(report.changes.change_set.len(), 1);
        assert_eq!(report.commit, Some(CommitOutcome::Skipped(SkipReason::Disabled)));
        assert!(report.succeeded());
    }

    #[tokio::test]
    async fn no_files_found_skips_formatting_and_commit() {
        let mut rec = CassetteRecorder::new("unused.yaml", "test", "abc");
        glob(&mut rec, &[]);

        let report = run_cassette(&rec, &config(true)).await;

        assert_eq!(report.discovered, 0);
        assert_eq!(report.commit, None);
        assert!(report.succeeded());
    }

    #[tokio::test]
    async fn malformed_pattern_is_fatal() {
        let rec = CassetteRecorder::new("unused.yaml", "test", "abc");
        let mut config = config(true);
        config.file_patterns = vec!["[".into()];

        let ctx = Arc::new(ServiceContext::from_cassette(&rec.cassette()));
        assert!(matches!(run(ctx, &config).await, Err(Error::Discovery { .. })));
    }

    #[test]
    fn format_outcome_failures_fail_the_report() {
        let report = RunReport {
            discovered: 1,
            changes: tracker::collect(vec![(
                CandidateFile::new("a.rst"),
                FormatOutcome::Failed("boom".into()),
            )]),
            commit: Some(CommitOutcome::Skipped(SkipReason::NoChanges)),
        };
        assert!(!report.succeeded());
    }
}
