//! Replaying adapter for the `GitRepo` port.

use std::path::Path;
use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::adapters::recording::filesystem::PathInput;
use crate::adapters::recording::git::{CommitInput, PathsInput};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::git::{GitRepo, Identity};
use crate::ports::PortError;

/// Replays recorded git operations from a cassette.
pub struct ReplayingGitRepo {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingGitRepo {
    /// Creates a new replaying git repo from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self {
            replayer: Mutex::new(replayer),
        }
    }
}

impl GitRepo for ReplayingGitRepo {
    fn current_commit(&self) -> Result<String, PortError> {
        let output = next_output(&self.replayer, "git", "current_commit", &());
        replay_result(&output, "git::current_commit")
    }

    fn stage(&self, path: &Path) -> Result<(), PortError> {
        let input = PathInput {
            path: &path.display().to_string(),
        };
        let output = next_output(&self.replayer, "git", "stage", &input);
        replay_result(&output, "git::stage")
    }

    fn has_staged_changes(&self, paths: &[&Path]) -> Result<bool, PortError> {
        let output =
            next_output(&self.replayer, "git", "has_staged_changes", &PathsInput::new(paths));
        replay_result(&output, "git::has_staged_changes")
    }

    fn commit(&self, message: &str, identity: &Identity, paths: &[&Path]) -> Result<(), PortError> {
        let input = CommitInput {
            message,
            identity,
            paths: PathsInput::new(paths).paths,
        };
        let output = next_output(&self.replayer, "git", "commit", &input);
        replay_result(&output, "git::commit")
    }

    fn push(&self) -> Result<(), PortError> {
        let output = next_output(&self.replayer, "git", "push", &());
        replay_result(&output, "git::push")
    }
}
