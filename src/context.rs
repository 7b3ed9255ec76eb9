//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::adapters::live::{LiveCommandRunner, LiveFileSystem, LiveGitRepo};
use crate::adapters::recording::{RecordingCommandRunner, RecordingFileSystem, RecordingGitRepo};
use crate::adapters::replaying::{ReplayingCommandRunner, ReplayingFileSystem, ReplayingGitRepo};
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::Error;
use crate::ports::{CommandRunner, FileSystem, GitRepo};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, recording, replaying).
pub struct ServiceContext {
    /// Filesystem for reading, replacing, and globbing files.
    pub fs: Box<dyn FileSystem>,
    /// Git repository for staging, committing, and pushing.
    pub git: Box<dyn GitRepo>,
    /// Runner for external programs such as the formatter.
    pub runner: Box<dyn CommandRunner>,
    /// Shared recorder, written to disk on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context with real adapters for every port.
    #[must_use]
    pub fn live() -> Self {
        Self {
            fs: Box::new(LiveFileSystem),
            git: Box::new(LiveGitRepo::new()),
            runner: Box::new(LiveCommandRunner),
            recorder: None,
        }
    }

    /// Creates a recording context that writes a cassette file on drop.
    ///
    /// Uses live adapters for actual work and records every port call into a
    /// single cassette at `path`. This is the developer-only mechanism for
    /// capturing cassettes via the `FMTSYNC_RECORD` env var.
    #[must_use]
    pub fn recording(path: &Path) -> Self {
        let commit = LiveGitRepo::new().current_commit().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read HEAD for cassette header");
            "unknown".to_string()
        });
        let name = format!("fmtsync-{}", Uuid::new_v4());
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, name, commit)));

        Self {
            fs: Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder))),
            git: Box::new(RecordingGitRepo::new(
                Box::new(LiveGitRepo::new()),
                Arc::clone(&recorder),
            )),
            runner: Box::new(RecordingCommandRunner::new(
                Box::new(LiveCommandRunner),
                Arc::clone(&recorder),
            )),
            recorder: Some(recorder),
        }
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, Error> {
        Ok(Self::from_cassette(&Cassette::load(path)?))
    }

    /// Creates a replaying context from an in-memory cassette.
    ///
    /// Each port gets its own replayer so per-port consumption is independent.
    #[must_use]
    pub fn from_cassette(cassette: &Cassette) -> Self {
        Self {
            fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::new(cassette))),
            git: Box::new(ReplayingGitRepo::new(CassetteReplayer::new(cassette))),
            runner: Box::new(ReplayingCommandRunner::new(CassetteReplayer::new(cassette))),
            recorder: None,
        }
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        let Some(recorder) = self.recorder.take() else {
            return;
        };
        let Ok(guard) = recorder.lock() else {
            tracing::warn!("cassette recorder lock poisoned; cassette not written");
            return;
        };
        match guard.save() {
            Ok(path) => tracing::info!(path = %path.display(), "cassette written"),
            Err(e) => tracing::warn!(error = %e, "failed to write cassette"),
        }
    }
}
