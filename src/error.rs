use thiserror::Error;

/// Application-level errors using thiserror for structured error handling.
///
/// The gesture core never fails: degenerate input is reported as a status
/// value. These errors cover the edges of the system (configuration files,
/// audio devices, outbound notifications, key bindings).

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to load audio file: {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode audio for cue {cue}")]
    DecodeFailed {
        cue: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to initialize audio output stream")]
    StreamInitFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Audio playback failed")]
    PlaybackFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("No audio loaded for cue {0}")]
    NotLoaded(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to create config directory: {path}")]
    DirectoryCreationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine the executable directory")]
    NoExecutableDir,
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification transport failed: {0}")]
    Transport(String),

    #[error("Notification endpoint returned status {code}")]
    Status { code: u16, message: String },

    #[error("Notification queue is full, request dropped")]
    QueueFull,

    #[error("Notification worker has stopped")]
    Disconnected,

    #[error("Failed to encode notification payload")]
    Encode(#[source] serde_json::Error),
}

impl NotifyError {
    /// HTTP status code carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            NotifyError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Unknown key name: {0}")]
    UnknownKey(String),

    #[error("Keyboard listener failed: {0}")]
    ListenFailed(String),
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;
