//! Filesystem port for file I/O operations.

use std::path::Path;

use super::PortError;

/// Provides filesystem access for reading, replacing, and globbing files.
///
/// Abstracting the filesystem allows deterministic replay and testing
/// without touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Replaces the contents of an existing file.
    ///
    /// The new contents must become visible all at once: readers see either
    /// the old file or the new one, never a partial write.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn replace(&self, path: &Path, contents: &str) -> Result<(), PortError>;

    /// Expands a glob pattern relative to the working directory.
    ///
    /// Returns only regular files, in the order the expansion yields them.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is malformed.
    fn glob(&self, pattern: &str) -> Result<Vec<String>, PortError>;
}
