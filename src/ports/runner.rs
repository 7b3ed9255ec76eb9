//! Command runner port for invoking external programs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A program and its arguments, run without a shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Program name or path, resolved through `PATH`.
    pub program: String,
    /// Arguments passed verbatim.
    pub args: Vec<String>,
}

impl Invocation {
    /// Creates an invocation of `program` with `args`.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns a copy with `arg` appended.
    #[must_use]
    pub fn with_arg(&self, arg: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.args.push(arg.into());
        next
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// The outcome of one external command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// `true` when the process could not be spawned or exited unsuccessfully.
    pub failed: bool,
    /// The exit code, if the process exited normally.
    #[serde(default)]
    pub exit_code: Option<i32>,
    /// The captured standard output.
    #[serde(default)]
    pub stdout: String,
    /// `true` when standard output was not valid UTF-8. `stdout` then holds
    /// a lossy decoding that must not be written anywhere.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub stdout_not_utf8: bool,
    /// The captured standard error.
    #[serde(default)]
    pub stderr: String,
}

impl ExecutionResult {
    /// A result for a process that could not be started at all.
    #[must_use]
    pub fn spawn_failure(message: impl Into<String>) -> Self {
        Self {
            failed: true,
            exit_code: None,
            stdout: String::new(),
            stdout_not_utf8: false,
            stderr: message.into(),
        }
    }

    /// A human-readable reason for a failed invocation.
    ///
    /// Prefers the trimmed stderr, falling back to the exit status.
    #[must_use]
    pub fn failure_message(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        match self.exit_code {
            Some(code) => format!("exited with status {code}"),
            None => "terminated without an exit status".to_string(),
        }
    }
}

/// Runs external commands.
///
/// Implementations never return an error: spawn failures and non-zero exits
/// are both reported through [`ExecutionResult::failed`].
pub trait CommandRunner: Send + Sync {
    /// Runs `invocation` to completion and returns its captured output.
    fn run(&self, invocation: &Invocation) -> ExecutionResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let inv = Invocation::new("git", ["commit", "-m", "Apply formatting"]);
        assert_eq!(inv.to_string(), r#"git commit -m "Apply formatting""#);
    }

    #[test]
    fn with_arg_leaves_original_untouched() {
        let base = Invocation::new("rstfmt", Vec::<String>::new());
        let full = base.with_arg("docs/index.rst");
        assert!(base.args.is_empty());
        assert_eq!(full.args, vec!["docs/index.rst"]);
    }

    #[test]
    fn failure_message_prefers_stderr() {
        let result = ExecutionResult {
            failed: true,
            exit_code: Some(2),
            stdout: String::new(),
            stdout_not_utf8: false,
            stderr: "  parse error at line 3\n".into(),
        };
        assert_eq!(result.failure_message(), "parse error at line 3");
    }

    #[test]
    fn failure_message_falls_back_to_exit_code() {
        let result = ExecutionResult {
            failed: true,
            exit_code: Some(1),
            stdout: "x".into(),
            stdout_not_utf8: false,
            stderr: String::new(),
        };
        assert_eq!(result.failure_message(), "exited with status 1");
    }

    #[test]
    fn utf8_flag_is_omitted_when_clear_and_defaults_on_load() {
        let clean = ExecutionResult {
            failed: false,
            exit_code: Some(0),
            stdout: "A\n".into(),
            stdout_not_utf8: false,
            stderr: String::new(),
        };
        let value = serde_json::to_value(&clean).unwrap();
        assert!(value.get("stdout_not_utf8").is_none());

        let loaded: ExecutionResult =
            serde_json::from_value(serde_json::json!({"failed": false, "stdout": "A\n"})).unwrap();
        assert!(!loaded.stdout_not_utf8);
    }
}
