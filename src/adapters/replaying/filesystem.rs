//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::adapters::recording::filesystem::{PathInput, PatternInput, ReplaceInput};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;
use crate::ports::PortError;

/// Replays recorded filesystem operations from a cassette.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self {
            replayer: Mutex::new(replayer),
        }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        let input = PathInput {
            path: &path.display().to_string(),
        };
        let output = next_output(&self.replayer, "fs", "read_to_string", &input);
        replay_result(&output, "fs::read_to_string")
    }

    fn replace(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        let input = ReplaceInput {
            path: &path.display().to_string(),
            contents,
        };
        let output = next_output(&self.replayer, "fs", "replace", &input);
        replay_result(&output, "fs::replace")
    }

    fn glob(&self, pattern: &str) -> Result<Vec<String>, PortError> {
        let output = next_output(&self.replayer, "fs", "glob", &PatternInput { pattern });
        replay_result(&output, "fs::glob")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use serde_json::json;

    #[test]
    fn replays_reads_globs_and_errors() {
        let mut rec = CassetteRecorder::new("unused.yaml", "test", "abc");
        rec.record("fs", "glob", json!({"pattern": "*.rst"}), json!({"ok": ["a.rst"]}));
        rec.record("fs", "read_to_string", json!({"path": "a.rst"}), json!({"ok": "A\n"}));
        rec.record(
            "fs",
            "replace",
            json!({"path": "a.rst", "contents": "B\n"}),
            json!({"err": "permission denied"}),
        );
        let fs = ReplayingFileSystem::new(CassetteReplayer::new(&rec.cassette()));

        assert_eq!(fs.glob("*.rst").unwrap(), vec!["a.rst"]);
        assert_eq!(fs.read_to_string(Path::new("a.rst")).unwrap(), "A\n");
        let err = fs.replace(Path::new("a.rst"), "B\n").unwrap_err();
        assert_eq!(err.to_string(), "permission denied");
    }

    #[test]
    #[should_panic(expected = "Cassette exhausted")]
    fn unrecorded_write_panics() {
        let rec = CassetteRecorder::new("unused.yaml", "test", "abc");
        let fs = ReplayingFileSystem::new(CassetteReplayer::new(&rec.cassette()));
        let _ = fs.replace(Path::new("a.rst"), "B\n");
    }
}
