/// Audio player for a single preloaded cue
///
/// Keeps the encoded bytes in memory and decodes a fresh source per play so
/// overlapping one-shots do not cut each other off.

use std::io::Cursor;
use std::sync::Arc;

use rodio::{Decoder, OutputStreamHandle, Source};

use super::source::AudioCue;
use crate::error::AudioError;

/// Preloaded one-shot cue
pub struct CuePlayer {
    cue: AudioCue,
    audio_data: Arc<Vec<u8>>,
    volume: f32,
}

impl CuePlayer {
    /// Create a player, verifying the data decodes
    pub fn new(cue: AudioCue, audio_data: Arc<Vec<u8>>, volume: f32) -> Result<Self, AudioError> {
        // Decoder wants owned 'static data
        let cursor = Cursor::new((*audio_data).clone());
        Decoder::new(cursor).map_err(|e| AudioError::DecodeFailed {
            cue: cue.to_string(),
            source: Box::new(e),
        })?;

        tracing::debug!("Created cue player for {} (volume {})", cue, volume);

        Ok(Self {
            cue,
            audio_data,
            volume: volume.clamp(0.0, 1.0),
        })
    }

    /// Play once on the given output (non-blocking)
    pub fn play(&self, handle: &OutputStreamHandle) -> Result<(), AudioError> {
        tracing::info!("Playing cue: {}", self.cue);

        let cursor = Cursor::new((*self.audio_data).clone());
        let source = Decoder::new(cursor).map_err(|e| AudioError::DecodeFailed {
            cue: self.cue.to_string(),
            source: Box::new(e),
        })?;

        handle
            .play_raw(source.amplify(self.volume).convert_samples())
            .map_err(|e| AudioError::PlaybackFailed(Box::new(e)))
    }

    pub fn cue(&self) -> AudioCue {
        self.cue
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}
