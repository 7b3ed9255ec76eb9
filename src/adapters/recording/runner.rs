//! Recording adapter for the `CommandRunner` port.

use std::sync::{Arc, Mutex};

use super::record_interaction;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{CommandRunner, ExecutionResult, Invocation};

/// Records command invocations while delegating to an inner implementation.
pub struct RecordingCommandRunner {
    inner: Box<dyn CommandRunner>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingCommandRunner {
    /// Creates a new recording runner wrapping the given implementation.
    pub fn new(inner: Box<dyn CommandRunner>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl CommandRunner for RecordingCommandRunner {
    fn run(&self, invocation: &Invocation) -> ExecutionResult {
        let result = self.inner.run(invocation);
        record_interaction(&self.recorder, "runner", "run", invocation, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::LiveCommandRunner;

    #[test]
    fn records_run_interaction() {
        let dir = tempfile::tempdir().unwrap();
        let cassette_path = dir.path().join("runner.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&cassette_path, "test", "abc")));

        {
            let runner =
                RecordingCommandRunner::new(Box::new(LiveCommandRunner), Arc::clone(&recorder));
            let result = runner.run(&Invocation::new("echo", ["hello"]));
            assert!(!result.failed);
        }

        let cassette = recorder.lock().unwrap().cassette();
        assert_eq!(cassette.interactions.len(), 1);
        let recorded = &cassette.interactions[0];
        assert_eq!(recorded.port, "runner");
        assert_eq!(recorded.input["program"], "echo");
        assert_eq!(recorded.output["stdout"], "hello\n");
    }
}
