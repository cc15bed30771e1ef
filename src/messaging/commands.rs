/// Command types for the session
///
/// Commands represent requests from outside the tick loop (keyboard,
/// trigger volumes). They are applied by `GestureSession::apply`.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::carousel::SlideDirection;
use crate::landmarks::Landmark;

/// Session commands
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Flip the action gate
    ToggleActions,

    /// Move the carousel (keyboard navigation)
    Slide { direction: SlideDirection },

    /// A limb entered a trigger volume; `limb` is `None` when the
    /// collider could not be resolved to a tracked landmark
    LimbContact {
        zone: ContactZone,
        limb: Option<Landmark>,
    },
}

/// Trigger volumes attached to the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactZone {
    LeftWrist,
    RightWrist,
    LeftAnkle,
    RightAnkle,
}

/// What a contact zone does when the expected limb enters it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactAction {
    Slide(SlideDirection),
    TogglePointer,
    /// Logged only
    None,
}

impl ContactZone {
    /// Limb that is allowed to trigger this zone
    pub fn expected_limb(&self) -> Landmark {
        match self {
            ContactZone::LeftWrist => Landmark::LeftHand,
            ContactZone::RightWrist => Landmark::RightHand,
            ContactZone::LeftAnkle => Landmark::LeftFoot,
            ContactZone::RightAnkle => Landmark::RightFoot,
        }
    }

    pub fn action(&self) -> ContactAction {
        match self {
            ContactZone::LeftWrist => ContactAction::TogglePointer,
            ContactZone::RightWrist => ContactAction::None,
            ContactZone::LeftAnkle => ContactAction::Slide(SlideDirection::Next),
            ContactZone::RightAnkle => ContactAction::Slide(SlideDirection::Previous),
        }
    }
}

impl fmt::Display for ContactZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactZone::LeftWrist => write!(f, "left wrist"),
            ContactZone::RightWrist => write!(f, "right wrist"),
            ContactZone::LeftAnkle => write!(f, "left ankle"),
            ContactZone::RightAnkle => write!(f, "right ankle"),
        }
    }
}

/// How a contact command was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactStatus {
    /// No limb attached to the contact
    NoInput,
    /// Tracking not ready yet
    NotReady,
    /// A different limb touched the zone
    Ignored,
    Handled,
}

impl Command {
    /// Get a human-readable description of the command
    pub fn description(&self) -> String {
        match self {
            Command::ToggleActions => "Toggle gesture actions".to_string(),
            Command::Slide { direction } => format!("Slide {}", direction),
            Command::LimbContact { zone, limb } => match limb {
                Some(limb) => format!("{} touched {}", limb, zone),
                None => format!("Unknown contact on {}", zone),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_description() {
        assert_eq!(Command::ToggleActions.description(), "Toggle gesture actions");
        assert_eq!(
            Command::Slide {
                direction: SlideDirection::Next
            }
            .description(),
            "Slide next"
        );
        assert_eq!(
            Command::LimbContact {
                zone: ContactZone::LeftAnkle,
                limb: None
            }
            .description(),
            "Unknown contact on left ankle"
        );
    }

    #[test]
    fn test_contact_mapping() {
        assert_eq!(ContactZone::LeftAnkle.expected_limb(), Landmark::LeftFoot);
        assert_eq!(
            ContactZone::RightAnkle.action(),
            ContactAction::Slide(SlideDirection::Previous)
        );
        assert_eq!(ContactZone::LeftWrist.action(), ContactAction::TogglePointer);
    }
}
