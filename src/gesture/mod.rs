/// Gesture recognition
///
/// Every recognizer samples the current [`Frame`](crate::landmarks::Frame)
/// once per tick, keeps its own debounce state and pushes events. Side
/// effects are produced only while the shared action gate is enabled.
///
/// ```text
/// Frame ──┬─> SwipeDetector (right) ──> SlideTarget::slide
///         ├─> SwipeDetector (left)  ──> SlideTarget::slide
///         ├─> ClapDetector ─┬─> clap cue / bell notification
///         │                 └─> HandsUpDetector ──> cheer cue
///         └─> HeadBowDetector ──> worship notification
/// ```
pub mod clap;
pub mod hands_up;
pub mod head_bow;
pub mod recognizer;
pub mod swipe;

pub use clap::ClapDetector;
pub use hands_up::HandsUpDetector;
pub use head_bow::HeadBowDetector;
pub use recognizer::{
    AnchorTracker, BandState, EdgeLatch, GestureStatus, Hysteresis, Recognizer,
    RecognizerSnapshot, SlideTarget, StatusTracker, SwipeZone, TickContext,
};
pub use swipe::{Hand, SwipeDetector, SwipeThresholds};
