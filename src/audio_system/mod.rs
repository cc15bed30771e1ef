/// Audio system module
///
/// Plays short feedback cues when gestures fire.
///
/// ## Architecture
///
/// ```text
/// CueManager (OutputStream)
///   ├── CuePlayer (Clap)          ─┐ One-shot,
///   └── CuePlayer (HandsUpCheer)  ─┘ may overlap
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// use audio_system::{AudioCue, CueManager, CueSink};
///
/// let mut manager = CueManager::new()?;
/// manager.load_cue(AudioCue::Clap, Path::new("clap.mp3"), 1.0)?;
/// manager.play(AudioCue::Clap)?;
/// ```
pub mod manager;
pub mod player;
pub mod source;

// Re-export commonly used types
pub use manager::{CueManager, CueSink, SilentCues};
pub use player::CuePlayer;
pub use source::AudioCue;
