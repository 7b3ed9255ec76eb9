//! Recording adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{FileSystem, PortError};

/// Records filesystem interactions while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
pub(crate) struct PathInput<'a> {
    pub(crate) path: &'a str,
}

#[derive(Serialize)]
pub(crate) struct ReplaceInput<'a> {
    pub(crate) path: &'a str,
    pub(crate) contents: &'a str,
}

#[derive(Serialize)]
pub(crate) struct PatternInput<'a> {
    pub(crate) pattern: &'a str,
}

impl FileSystem for RecordingFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        let result = self.inner.read_to_string(path);
        let input = PathInput {
            path: &path.display().to_string(),
        };
        record_result(&self.recorder, "fs", "read_to_string", &input, &result);
        result
    }

    fn replace(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        let result = self.inner.replace(path, contents);
        let input = ReplaceInput {
            path: &path.display().to_string(),
            contents,
        };
        record_result(&self.recorder, "fs", "replace", &input, &result);
        result
    }

    fn glob(&self, pattern: &str) -> Result<Vec<String>, PortError> {
        let result = self.inner.glob(pattern);
        record_result(&self.recorder, "fs", "glob", &PatternInput { pattern }, &result);
        result
    }
}
