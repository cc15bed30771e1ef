/// Event types for the session
///
/// Events represent things that have happened (past tense). A tick returns
/// them in the order they occurred; the feedback ones are executed by
/// `FeedbackExecutor`.
use std::fmt;

use super::commands::{ContactStatus, ContactZone};
use crate::audio_system::AudioCue;
use crate::carousel::{SlideDirection, SlideOutcome};
use crate::gesture::Hand;
use crate::notify::NotifyKind;

/// Gesture families, for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    Swipe,
    Clap,
    HandsUp,
    HeadBow,
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gesture::Swipe => write!(f, "swipe"),
            Gesture::Clap => write!(f, "clap"),
            Gesture::HandsUp => write!(f, "hands-up"),
            Gesture::HeadBow => write!(f, "head bow"),
        }
    }
}

/// Where a slide request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideSource {
    Swipe(Hand),
    Keyboard,
    Contact(ContactZone),
}

/// Session events
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The action gate changed
    ActionsToggled { enabled: bool },

    /// A hand swipe satisfied its predicate outside cooldown
    SwipeDetected {
        hand: Hand,
        direction: SlideDirection,
        time: f64,
    },

    /// The carousel was asked to slide
    SlideRequested {
        source: SlideSource,
        direction: SlideDirection,
        outcome: SlideOutcome,
    },

    /// A slide transition finished
    SlideCompleted { index: usize },

    /// A clap edge was counted
    ClapDetected { consecutive: usize, time: f64 },

    /// Both hands went up
    HandsUpDetected { time: f64 },

    /// The head dipped below the bow threshold
    HeadBowDetected { time: f64 },

    /// A gesture fired while the action gate was closed
    FeedbackSuppressed { gesture: Gesture },

    /// Play an audio cue
    CueRequested { cue: AudioCue },

    /// Send a notification
    NotificationRequested {
        kind: NotifyKind,
        url: String,
        time: f64,
    },

    /// Toggle the external laser pointer
    PointerToggleRequested,

    /// A contact command did nothing
    ContactIgnored {
        zone: ContactZone,
        status: ContactStatus,
    },
}

impl Event {
    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            Event::ActionsToggled { enabled } => {
                format!("Gesture actions {}", if *enabled { "enabled" } else { "disabled" })
            }
            Event::SwipeDetected { hand, direction, .. } => {
                format!("{} swipe ({})", hand, direction)
            }
            Event::SlideRequested {
                direction, outcome, ..
            } => format!("Slide {}: {:?}", direction, outcome),
            Event::SlideCompleted { index } => format!("Showing slide {}", index + 1),
            Event::ClapDetected { consecutive, .. } => {
                format!("Clap detected ({} in window)", consecutive)
            }
            Event::HandsUpDetected { .. } => "Hands up detected".to_string(),
            Event::HeadBowDetected { .. } => "Head bow detected".to_string(),
            Event::FeedbackSuppressed { gesture } => {
                format!("Feedback for {} suppressed", gesture)
            }
            Event::CueRequested { cue } => format!("Play cue: {}", cue),
            Event::NotificationRequested { kind, url, .. } => {
                format!("Notify {} -> {}", kind, url)
            }
            Event::PointerToggleRequested => "Toggle pointer".to_string(),
            Event::ContactIgnored { zone, status } => {
                format!("Contact on {} ignored: {:?}", zone, status)
            }
        }
    }

    /// True for events that carry an outward side effect
    pub fn is_feedback(&self) -> bool {
        matches!(
            self,
            Event::CueRequested { .. }
                | Event::NotificationRequested { .. }
                | Event::PointerToggleRequested
        )
    }
}
