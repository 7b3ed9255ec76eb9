//! Live git adapter using `git` CLI commands.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::ports::git::{GitRepo, Identity};
use crate::ports::PortError;

/// Live git adapter that shells out to the `git` CLI.
#[derive(Debug, Default)]
pub struct LiveGitRepo {
    workdir: Option<PathBuf>,
}

impl LiveGitRepo {
    /// Operates on the repository containing the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Operates on the repository containing `dir`.
    #[must_use]
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(dir.into()),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new("git");
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn output<I, S>(&self, args: I) -> Result<Output, PortError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Ok(self.command().args(args).output()?)
    }

    fn checked<I, S>(&self, what: &str, args: I) -> Result<String, PortError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self.output(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("git {what} failed: {}", stderr.trim()).into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn with_paths<'a>(head: &[&'a str], paths: &[&'a Path]) -> Vec<&'a OsStr> {
    let mut args: Vec<&OsStr> = head.iter().map(|s| OsStr::new(*s)).collect();
    args.push(OsStr::new("--"));
    args.extend(paths.iter().map(|p| p.as_os_str()));
    args
}

impl GitRepo for LiveGitRepo {
    fn current_commit(&self) -> Result<String, PortError> {
        Ok(self.checked("rev-parse HEAD", ["rev-parse", "HEAD"])?.trim().to_string())
    }

    fn stage(&self, path: &Path) -> Result<(), PortError> {
        self.checked("add", with_paths(&["add"], &[path]))?;
        Ok(())
    }

    fn has_staged_changes(&self, paths: &[&Path]) -> Result<bool, PortError> {
        let output = self.output(with_paths(&["diff", "--cached", "--quiet"], paths))?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(format!("git diff --cached failed: {}", stderr.trim()).into())
            }
        }
    }

    fn commit(&self, message: &str, identity: &Identity, paths: &[&Path]) -> Result<(), PortError> {
        let name = format!("user.name={}", identity.name);
        let email = format!("user.email={}", identity.email);
        let head = ["-c", name.as_str(), "-c", email.as_str(), "commit", "--quiet", "-m", message];
        self.checked("commit", with_paths(&head, paths))?;
        Ok(())
    }

    fn push(&self) -> Result<(), PortError> {
        self.checked("push", ["push", "--quiet"])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn git_in(dir: &Path, args: &[&str]) {
        let status = Command::new("git").args(args).current_dir(dir).status().unwrap();
        assert!(status.success(), "git {args:?} failed");
    }

    fn init_repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        git_in(dir.path(), &["init", "--quiet"]);
        dir
    }

    fn init_repo_with_commit() -> tempfile::TempDir {
        let dir = init_repo();
        std::fs::write(dir.path().join("README"), "readme\n").unwrap();
        git_in(dir.path(), &["add", "README"]);
        git_in(
            dir.path(),
            &[
                "-c",
                "user.name=seed",
                "-c",
                "user.email=seed@example.com",
                "commit",
                "--quiet",
                "-m",
                "seed",
            ],
        );
        dir
    }

    fn identity() -> Identity {
        Identity {
            name: "fmtsync-test".into(),
            email: "fmtsync@example.com".into(),
        }
    }

    #[test]
    fn stage_then_commit_scopes_identity_to_the_commit() {
        let dir = init_repo_with_commit();
        std::fs::write(dir.path().join("index.rst"), "Title\n").unwrap();
        let git = LiveGitRepo::at(dir.path());
        let path = Path::new("index.rst");

        assert!(!git.has_staged_changes(&[path]).unwrap());
        git.stage(path).unwrap();
        assert!(git.has_staged_changes(&[path]).unwrap());
        git.commit("Apply formatting", &identity(), &[path]).unwrap();
        assert!(!git.has_staged_changes(&[path]).unwrap());
        assert_eq!(git.current_commit().unwrap().len(), 40);

        let author = Command::new("git")
            .args(["log", "-1", "--format=%an <%ae>"])
            .current_dir(dir.path())
            .output()
            .unwrap();
        assert_eq!(
            String::from_utf8_lossy(&author.stdout).trim(),
            "fmtsync-test <fmtsync@example.com>"
        );

        let config = Command::new("git")
            .args(["config", "--local", "--get", "user.name"])
            .current_dir(dir.path())
            .output()
            .unwrap();
        assert!(!config.status.success(), "identity must not be written to repo config");
    }

    #[test]
    fn commit_leaves_unrelated_staged_files_alone() {
        let dir = init_repo_with_commit();
        std::fs::write(dir.path().join("a.rst"), "a\n").unwrap();
        std::fs::write(dir.path().join("b.rst"), "b\n").unwrap();
        let git = LiveGitRepo::at(dir.path());

        git.stage(Path::new("a.rst")).unwrap();
        git.stage(Path::new("b.rst")).unwrap();
        git.commit("only a", &identity(), &[Path::new("a.rst")]).unwrap();

        assert!(git.has_staged_changes(&[Path::new("b.rst")]).unwrap());
    }

    #[test]
    fn current_commit_fails_without_commits() {
        let dir = init_repo();
        assert!(LiveGitRepo::at(dir.path()).current_commit().is_err());
    }
}
