//! Git repository port for staging, committing, and pushing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::PortError;

/// Author and committer identity for a single commit.
///
/// Applied only to the commit command it is passed to; never written to
/// repository or global configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Author name.
    pub name: String,
    /// Author email.
    pub email: String,
}

/// Version-control operations the commit pipeline needs.
///
/// Abstracting git access allows deterministic replay and testing
/// without requiring a real repository.
pub trait GitRepo: Send + Sync {
    /// Returns the hash of the current HEAD commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository has no commits or is invalid.
    fn current_commit(&self) -> Result<String, PortError>;

    /// Stages a single path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be added to the index.
    fn stage(&self, path: &Path) -> Result<(), PortError>;

    /// Returns `true` if the index differs from HEAD for any of `paths`.
    ///
    /// # Errors
    ///
    /// Returns an error if the comparison cannot be made.
    fn has_staged_changes(&self, paths: &[&Path]) -> Result<bool, PortError>;

    /// Creates one commit containing exactly `paths`.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit command fails.
    fn commit(&self, message: &str, identity: &Identity, paths: &[&Path]) -> Result<(), PortError>;

    /// Pushes the current branch to its upstream.
    ///
    /// # Errors
    ///
    /// Returns an error if the push is rejected or the remote is unreachable.
    fn push(&self) -> Result<(), PortError>;
}
