//! Replaying adapters that replay recorded interactions.

pub mod filesystem;
pub mod git;
pub mod runner;

pub use filesystem::ReplayingFileSystem;
pub use git::ReplayingGitRepo;
pub use runner::ReplayingCommandRunner;

use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::PortError;

/// Fetch the recorded output for a call, matched on its serialized input.
pub(crate) fn next_output<I: Serialize>(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
    input: &I,
) -> serde_json::Value {
    let input = serde_json::to_value(input).expect("failed to serialize replay input");
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    replayer.next_interaction(port, method, &input).output.clone()
}

/// Decode a recorded `Result` using the ok/err JSON convention.
///
/// Expects `{"ok": <value>}` or `{"err": "message"}`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T, PortError> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
