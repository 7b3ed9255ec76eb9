//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Replays interactions from a loaded cassette.
///
/// Each call is answered by the earliest unconsumed interaction with the same
/// port, method, and input. Matching on input rather than position means
/// calls made from concurrent tasks replay the same way regardless of the
/// order they arrive in.
pub struct CassetteReplayer {
    /// Per port+method interactions, in recorded order.
    queues: HashMap<PortMethodKey, Vec<Interaction>>,
    /// Per port+method consumption flags, parallel to `queues`.
    consumed: HashMap<PortMethodKey, Vec<bool>>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push(interaction.clone());
        }
        let consumed = queues.iter().map(|(k, q)| (k.clone(), vec![false; q.len()])).collect();
        Self { queues, consumed }
    }

    /// Return the next interaction matching `port`, `method`, and `input`.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no unconsumed interaction for the call,
    /// printing what was requested and what remains.
    pub fn next_interaction(
        &mut self,
        port: &str,
        method: &str,
        input: &serde_json::Value,
    ) -> &Interaction {
        let key = PortMethodKey {
            port: port.to_string(),
            method: method.to_string(),
        };

        let Some(queue) = self.queues.get(&key) else {
            let available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        };

        let flags = self.consumed.get_mut(&key).expect("consumption flags must exist");
        let position = queue
            .iter()
            .zip(flags.iter())
            .position(|(interaction, used)| !*used && interaction.input == *input);

        let Some(index) = position else {
            let remaining: Vec<String> = queue
                .iter()
                .zip(flags.iter())
                .filter(|(_, used)| !**used)
                .map(|(i, _)| i.input.to_string())
                .collect();
            panic!(
                "Cassette exhausted: no unconsumed interaction for port={port:?} method={method:?} \
                 input={input}. Remaining inputs: [{}]",
                remaining.join(", ")
            );
        };

        flags[index] = true;
        &queue[index]
    }
}
