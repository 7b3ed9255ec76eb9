//! Expands glob patterns into candidate files.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::error::Error;
use crate::ports::FileSystem;

/// A path, relative to the working directory, eligible for formatting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateFile(String);

impl CandidateFile {
    /// Wraps a path, dropping any leading `./` so equivalent spellings
    /// compare equal.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let mut trimmed = path.as_str();
        while let Some(rest) = trimmed.strip_prefix("./") {
            trimmed = rest;
        }
        Self(trimmed.to_string())
    }

    /// The path as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The path as a [`Path`].
    #[must_use]
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for CandidateFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Expands every pattern and returns the union of matches.
///
/// Duplicates are dropped by path; the first occurrence keeps its place.
/// A pattern matching nothing contributes nothing.
///
/// # Errors
///
/// Returns [`Error::Discovery`] if any pattern is malformed. All patterns
/// are checked before any is expanded.
pub fn discover(fs: &dyn FileSystem, patterns: &[String]) -> Result<Vec<CandidateFile>, Error> {
    for pattern in patterns {
        glob::Pattern::new(pattern).map_err(|e| Error::Discovery {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
    }

    let mut seen = HashSet::new();
    let mut files = Vec::new();
    for pattern in patterns {
        let matches = fs.glob(pattern).map_err(|e| Error::Discovery {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!(pattern = %pattern, matches = matches.len(), "expanded pattern");
        for path in matches {
            let file = CandidateFile::new(path);
            if seen.insert(file.clone()) {
                files.push(file);
            }
        }
    }
    Ok(files)
}
