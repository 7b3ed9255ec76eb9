//! Recording adapter for the `GitRepo` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{GitRepo, Identity, PortError};

/// Records git interactions while delegating to an inner implementation.
pub struct RecordingGitRepo {
    inner: Box<dyn GitRepo>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingGitRepo {
    /// Creates a new recording git repo wrapping the given implementation.
    pub fn new(inner: Box<dyn GitRepo>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
pub(crate) struct PathsInput {
    pub(crate) paths: Vec<String>,
}

impl PathsInput {
    pub(crate) fn new(paths: &[&Path]) -> Self {
        Self {
            paths: paths.iter().map(|p| p.display().to_string()).collect(),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct CommitInput<'a> {
    pub(crate) message: &'a str,
    pub(crate) identity: &'a Identity,
    pub(crate) paths: Vec<String>,
}

impl GitRepo for RecordingGitRepo {
    fn current_commit(&self) -> Result<String, PortError> {
        let result = self.inner.current_commit();
        record_result(&self.recorder, "git", "current_commit", &(), &result);
        result
    }

    fn stage(&self, path: &Path) -> Result<(), PortError> {
        let result = self.inner.stage(path);
        let input = super::filesystem::PathInput {
            path: &path.display().to_string(),
        };
        record_result(&self.recorder, "git", "stage", &input, &result);
        result
    }

    fn has_staged_changes(&self, paths: &[&Path]) -> Result<bool, PortError> {
        let result = self.inner.has_staged_changes(paths);
        let input = PathsInput::new(paths);
        record_result(&self.recorder, "git", "has_staged_changes", &input, &result);
        result
    }

    fn commit(&self, message: &str, identity: &Identity, paths: &[&Path]) -> Result<(), PortError> {
        let result = self.inner.commit(message, identity, paths);
        let input = CommitInput {
            message,
            identity,
            paths: PathsInput::new(paths).paths,
        };
        record_result(&self.recorder, "git", "commit", &input, &result);
        result
    }

    fn push(&self) -> Result<(), PortError> {
        let result = self.inner.push();
        record_result(&self.recorder, "git", "push", &(), &result);
        result
    }
}
