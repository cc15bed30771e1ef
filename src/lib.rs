//! Gesture-driven slide presentation.
//!
//! Body landmarks stream in once per frame; swipe, clap, hands-up and
//! head-bow recognizers turn them into slide changes, audio cues and
//! outbound notifications.

pub mod audio_system;
pub mod carousel;
pub mod config;
pub mod error;
pub mod feed;
pub mod gesture;
pub mod input;
pub mod landmarks;
pub mod messaging;
pub mod notify;
pub mod session;
pub mod state;
pub mod utils;

pub use carousel::{SlideCarousel, SlideDirection, SlideOutcome};
pub use config::Config;
pub use landmarks::{Frame, Landmark, Pose};
pub use messaging::{Command, Event, FeedbackExecutor};
pub use notify::NotificationDispatcher;
pub use session::GestureSession;
pub use state::ActionGate;
