//! Turns a change set into at most one commit and one push.

use std::fmt;
use std::path::Path;

use super::tracker::ChangeSet;
use crate::config::RunConfiguration;
use crate::ports::GitRepo;

/// Why the orchestrator did not commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Committing is turned off.
    Disabled,
    /// The change set was empty.
    NoChanges,
    /// Git saw nothing staged for the changed files.
    NothingStaged,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Disabled => "commit disabled",
            Self::NoChanges => "no changes",
            Self::NothingStaged => "nothing to commit",
        })
    }
}

/// Terminal result of the commit stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// No commit was made.
    Skipped(SkipReason),
    /// One commit was created and pushed.
    Committed {
        /// Hash of the new commit.
        commit: String,
        /// Number of files it contains.
        files: usize,
    },
    /// Staging, committing, or pushing failed.
    Failed(String),
}

impl CommitOutcome {
    /// `true` unless the outcome is [`CommitOutcome::Failed`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for CommitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped(reason) => write!(f, "skipped ({reason})"),
            Self::Committed { commit, files } => {
                let short = commit.get(..7).unwrap_or(commit);
                write!(f, "committed {short} with {files} file(s) and pushed")
            }
            Self::Failed(message) => write!(f, "failed: {message}"),
        }
    }
}

/// Stages, commits, and pushes the change set.
///
/// Runs once per pipeline, after every formatting task has finished. Never
/// retries. The author identity comes from `config` and applies to this
/// commit only.
pub fn commit(
    git: &dyn GitRepo,
    change_set: &ChangeSet,
    config: &RunConfiguration,
) -> CommitOutcome {
    if !config.commit_enabled {
        return CommitOutcome::Skipped(SkipReason::Disabled);
    }
    if change_set.is_empty() {
        return CommitOutcome::Skipped(SkipReason::NoChanges);
    }

    let paths: Vec<&Path> = change_set.files().iter().map(|f| f.as_path()).collect();
    for path in &paths {
        if let Err(e) = git.stage(path) {
            return CommitOutcome::Failed(format!("could not stage {}: {e}", path.display()));
        }
    }

    match git.has_staged_changes(&paths) {
        Ok(true) => {}
        Ok(false) => return CommitOutcome::Skipped(SkipReason::NothingStaged),
        Err(e) => return CommitOutcome::Failed(format!("could not inspect staged changes: {e}")),
    }

    if let Err(e) = git.commit(&config.commit_message, &config.identity, &paths) {
        return CommitOutcome::Failed(e.to_string());
    }
    let commit = git.current_commit().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not read new commit hash");
        "unknown".to_string()
    });
    tracing::info!(commit = %commit, files = paths.len(), "created formatting commit");

    if let Err(e) = git.push() {
        return CommitOutcome::Failed(e.to_string());
    }
    CommitOutcome::Committed {
        commit,
        files: paths.len(),
    }
}
