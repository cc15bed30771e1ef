/// State management module
///
/// Process-wide switches shared by reference between the session and the
/// recognizers.

pub mod action_gate;

// Re-export commonly used types
pub use action_gate::ActionGate;
