/// Global gesture action gate
///
/// One switch that allows or suppresses every gesture side effect (slides,
/// sounds, notifications). Recognizers keep counting while it is off.
use std::sync::Arc;

use parking_lot::RwLock;

#[derive(Debug)]
struct GateState {
    enabled: bool,
    initialized: bool,
}

/// Shared handle to the action gate.
///
/// Cloning yields another handle to the same switch; the session hands a
/// clone to every recognizer at construction.
#[derive(Debug, Clone)]
pub struct ActionGate {
    state: Arc<RwLock<GateState>>,
}

impl ActionGate {
    /// Create a gate that will apply `start_enabled` on the first tick
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(GateState {
                enabled: true,
                initialized: false,
            })),
        }
    }

    /// Whether gestures may currently produce side effects
    pub fn is_enabled(&self) -> bool {
        self.state.read().enabled
    }

    /// Flip the gate and return the new value
    pub fn toggle(&self) -> bool {
        let mut state = self.state.write();
        state.enabled = !state.enabled;
        // An explicit toggle wins over a default that has not been applied yet
        state.initialized = true;
        tracing::info!(
            "Gesture actions {}",
            if state.enabled { "enabled" } else { "disabled" }
        );
        state.enabled
    }

    /// Apply the configured startup value. Only the first call has an effect.
    pub fn apply_default(&self, start_enabled: bool) -> bool {
        let mut state = self.state.write();
        if state.initialized {
            return false;
        }
        state.enabled = start_enabled;
        state.initialized = true;
        tracing::debug!("Action gate initialized (enabled: {})", start_enabled);
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.state.read().initialized
    }
}

impl Default for ActionGate {
    fn default() -> Self {
        Self::new()
    }
}
