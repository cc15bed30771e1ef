/// Audio cue types
///
/// Short one-shot sounds played as gesture feedback.
use std::fmt;

/// Feedback cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// Played after enough consecutive claps
    Clap,

    /// Cheer and applause for both hands raised
    HandsUpCheer,
}

impl fmt::Display for AudioCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioCue::Clap => write!(f, "Clap"),
            AudioCue::HandsUpCheer => write!(f, "Hands Up Cheer"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_display() {
        assert_eq!(AudioCue::Clap.to_string(), "Clap");
        assert_eq!(AudioCue::HandsUpCheer.to_string(), "Hands Up Cheer");
    }
}
