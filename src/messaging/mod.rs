/// Session messaging
///
/// Inputs and outputs of the session are kept apart:
/// - **Commands**: Requests from outside the tick loop (imperative)
/// - **Events**: Things a tick or command produced (past tense)
///
/// ## Architecture
///
/// ```text
/// ┌──────────┐   Command    ┌────────────────┐   Vec<Event>   ┌──────────────────┐
/// │ Keyboard │ ───────────> │                │ ─────────────> │ FeedbackExecutor │
/// │ Contacts │              │ GestureSession │                │  (cues, notify)  │
/// └──────────┘   Frame      │                │                └──────────────────┘
///  Tracking  ─────────────> │                │
///                           └────────────────┘
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// let mut session = GestureSession::new(&config, slides);
/// let executor = FeedbackExecutor::new(cues, dispatcher);
///
/// let events = session.tick(dt, &frame);
/// executor.execute(&events);
/// ```

pub mod commands;
pub mod events;
pub mod executor;

// Re-export commonly used types
pub use commands::{Command, ContactAction, ContactStatus, ContactZone};
pub use events::{Event, Gesture, SlideSource};
pub use executor::FeedbackExecutor;
