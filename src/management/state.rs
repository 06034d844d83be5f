use std::{collections::HashSet, sync::Mutex};

use rand::{Rng, distr::Alphanumeric};

/// Anti-forgery `state` values for pending authorization attempts.
///
/// Every attempt gets its own random value, held here until the callback
/// returns it. A value is accepted exactly once; unknown or replayed values
/// are rejected, which is what ties a callback to an attempt this server
/// actually started.
#[derive(Default)]
pub struct AuthStateRegistry {
    pending: Mutex<HashSet<String>>,
}

impl AuthStateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates and registers the state value for a new attempt.
    pub fn issue(&self) -> String {
        let state: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        self.pending.lock().unwrap().insert(state.clone());
        state
    }

    /// Accepts a returned state value, removing it from the registry.
    /// Returns `false` for values that were never issued or already used.
    pub fn consume(&self, state: &str) -> bool {
        self.pending.lock().unwrap().remove(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_state_is_consumed_once() {
        let registry = AuthStateRegistry::new();
        let state = registry.issue();

        assert!(registry.consume(&state));
        assert!(!registry.consume(&state));
    }

    #[test]
    fn unknown_state_is_rejected() {
        let registry = AuthStateRegistry::new();
        registry.issue();

        assert!(!registry.consume("never-issued"));
    }

    #[test]
    fn states_are_unique_per_attempt() {
        let registry = AuthStateRegistry::new();
        let first = registry.issue();
        let second = registry.issue();

        assert_ne!(first, second);
        assert_eq!(first.len(), 32);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
