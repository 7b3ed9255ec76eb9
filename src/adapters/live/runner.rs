//! Live command runner using `std::process::Command`.

use std::process::Command;

use crate::ports::runner::{CommandRunner, ExecutionResult, Invocation};

/// Live command runner that spawns real child processes.
///
/// Children inherit the current working directory and environment.
pub struct LiveCommandRunner;

impl CommandRunner for LiveCommandRunner {
    fn run(&self, invocation: &Invocation) -> ExecutionResult {
        match Command::new(&invocation.program).args(&invocation.args).output() {
            Ok(output) => {
                let (stdout, stdout_not_utf8) = match String::from_utf8(output.stdout) {
                    Ok(text) => (text, false),
                    Err(e) => (String::from_utf8_lossy(e.as_bytes()).into_owned(), true),
                };
                ExecutionResult {
                    failed: !output.status.success(),
                    exit_code: output.status.code(),
                    stdout,
                    stdout_not_utf8,
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                }
            }
            Err(e) => ExecutionResult::spawn_failure(format!(
                "failed to start {}: {e}",
                invocation.program
            )),
        }
    }
}
