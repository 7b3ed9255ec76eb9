//! Replaying adapter for the `CommandRunner` port.

use std::sync::Mutex;

use super::next_output;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::runner::{CommandRunner, ExecutionResult, Invocation};

/// Replays recorded command results from a cassette.
pub struct ReplayingCommandRunner {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingCommandRunner {
    /// Creates a new replaying runner from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self {
            replayer: Mutex::new(replayer),
        }
    }
}

impl CommandRunner for ReplayingCommandRunner {
    fn run(&self, invocation: &Invocation) -> ExecutionResult {
        let output = next_output(&self.replayer, "runner", "run", invocation);
        serde_json::from_value(output).unwrap_or_else(|e| {
            ExecutionResult::spawn_failure(format!("runner::run: malformed recorded output: {e}"))
        })
    }
}
