/// Audio cue manager
///
/// Owns the output stream and one preloaded player per cue.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use rodio::{OutputStream, OutputStreamHandle};

use super::player::CuePlayer;
use super::source::AudioCue;
use crate::error::AudioError;

/// Anything that can play a feedback cue
pub trait CueSink {
    fn play(&self, cue: AudioCue) -> Result<(), AudioError>;
}

impl<T: CueSink + ?Sized> CueSink for Box<T> {
    fn play(&self, cue: AudioCue) -> Result<(), AudioError> {
        (**self).play(cue)
    }
}

/// Cue sink used when no audio device is available
#[derive(Debug, Default)]
pub struct SilentCues;

impl CueSink for SilentCues {
    fn play(&self, cue: AudioCue) -> Result<(), AudioError> {
        tracing::debug!("Cue {} requested (audio disabled)", cue);
        Ok(())
    }
}

/// Audio cue manager backed by the default output device
pub struct CueManager {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    players: HashMap<AudioCue, CuePlayer>,
}

impl CueManager {
    /// Open the default output device
    pub fn new() -> Result<Self, AudioError> {
        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| AudioError::StreamInitFailed(Box::new(e)))?;

        Ok(Self {
            _stream: stream,
            stream_handle,
            players: HashMap::new(),
        })
    }

    /// Load a cue from a file
    pub fn load_cue(&mut self, cue: AudioCue, path: &Path, volume: f32) -> Result<(), AudioError> {
        let audio_data = std::fs::read(path).map_err(|source| AudioError::LoadFailed {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(
            "Loaded cue {}: {} ({} bytes)",
            cue,
            path.display(),
            audio_data.len()
        );

        self.load_cue_from_memory(cue, Arc::new(audio_data), volume)
    }

    /// Load a cue from memory
    pub fn load_cue_from_memory(
        &mut self,
        cue: AudioCue,
        audio_data: Arc<Vec<u8>>,
        volume: f32,
    ) -> Result<(), AudioError> {
        let player = CuePlayer::new(cue, audio_data, volume)?;
        self.players.insert(cue, player);
        Ok(())
    }

    /// Get number of loaded cues
    pub fn loaded_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_loaded(&self, cue: AudioCue) -> bool {
        self.players.contains_key(&cue)
    }
}

impl CueSink for CueManager {
    fn play(&self, cue: AudioCue) -> Result<(), AudioError> {
        let player = self
            .players
            .get(&cue)
            .ok_or_else(|| AudioError::NotLoaded(cue.to_string()))?;
        player.play(&self.stream_handle)
    }
}
