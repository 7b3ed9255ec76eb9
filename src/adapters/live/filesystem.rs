//! Live filesystem adapter using `std::fs`, `tempfile`, and `glob`.

use std::io::Write;
use std::path::Path;

use glob::MatchOptions;

use crate::ports::filesystem::FileSystem;
use crate::ports::PortError;

/// Hidden path components only match when the pattern spells them out.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn replace(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        // Same directory as the target so the final rename stays on one
        // filesystem. The temp file is removed on drop if anything fails.
        let mut staged = tempfile::Builder::new().prefix(".fmtsync-").tempfile_in(dir)?;
        staged.write_all(contents.as_bytes())?;
        staged.as_file().sync_all()?;
        if let Ok(meta) = std::fs::metadata(path) {
            staged.as_file().set_permissions(meta.permissions())?;
        }
        staged.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    fn glob(&self, pattern: &str) -> Result<Vec<String>, PortError> {
        let mut files = Vec::new();
        for entry in glob::glob_with(pattern, MATCH_OPTIONS)? {
            match entry {
                Ok(path) if path.is_file() => files.push(path.display().to_string()),
                Ok(_) => {}
                Err(e) => tracing::warn!(pattern, error = %e, "skipping unreadable path"),
            }
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_swaps_contents_and_leaves_no_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.rst");
        std::fs::write(&path, "Title\n=====  \n").unwrap();

        LiveFileSystem.replace(&path, "Title\n=====\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Title\n=====\n");
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn glob_returns_files_only_and_skips_hidden_dirs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("docs/api.rst")).unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        std::fs::write(dir.path().join("docs/index.rst"), "x").unwrap();
        std::fs::write(dir.path().join(".git/ignored.rst"), "x").unwrap();

        let pattern = format!("{}/**/*.rst", dir.path().display());
        let files = LiveFileSystem.glob(&pattern).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("index.rst"));
    }

    #[test]
    fn glob_rejects_malformed_pattern() {
        assert!(LiveFileSystem.glob("docs/[*.rst").is_err());
    }

    #[test]
    fn read_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LiveFileSystem.read_to_string(&dir.path().join("nope.rst")).is_err());
    }
}
