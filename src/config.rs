use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::gesture::SwipeZone;

/// Slide list and transition settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Slide image references, in presentation order
    pub slides: Vec<String>,

    /// Directory to list slide images from when `slides` is empty
    pub slides_dir: Option<String>,

    /// File extension picked up from `slides_dir`
    pub slide_extension: String,

    pub start_index: usize,

    /// Distance between neighbouring panels
    pub panel_width: f32,

    /// Length of one slide transition in seconds
    pub transition_seconds: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            slides: Vec::new(),
            slides_dir: None,
            slide_extension: "png".to_string(),
            start_index: 0,
            panel_width: 2000.0,
            transition_seconds: 0.2,
        }
    }
}

/// Swipe thresholds, shared by the right-hand and left-hand detectors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    pub zone: SwipeZone,

    /// Lateral travel needed for a swipe
    pub min_distance: f32,

    /// Longest time the travel may take, in seconds
    pub max_duration: f64,

    /// Lateral speed floor (distance per second)
    pub min_speed: f32,

    /// Seconds between swipes of the same hand
    pub cooldown: f64,

    /// Vertical drift tolerance
    pub max_vertical: f32,

    /// Depth drift tolerance
    pub max_depth: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            zone: SwipeZone::default(),
            min_distance: 0.20,
            max_duration: 0.02,
            min_speed: 0.5,
            cooldown: 0.6,
            max_vertical: 0.15,
            max_depth: 0.2,
        }
    }
}

/// Hands-up cheer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HandsUpConfig {
    /// Both hands at or above this height count as raised
    pub height_threshold: f32,

    pub cooldown: f64,
}

impl Default for HandsUpConfig {
    fn default() -> Self {
        Self {
            height_threshold: 1.5,
            cooldown: 2.0,
        }
    }
}

/// Clap thresholds and notification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClapConfig {
    /// Hands closer than this count as a clap
    pub distance_threshold: f32,

    /// Seconds after a played/suppressed clap cue before another edge counts
    pub cooldown: f64,

    /// Claps within the window needed before the cue plays
    pub required_consecutive: usize,

    /// Rolling window for consecutive claps, in seconds
    pub consecutive_window: f64,

    pub notify_on_clap: bool,
    pub notify_url: String,
    pub notify_cooldown: f64,

    /// Claps within the window needed before a notification is sent
    pub notify_required_consecutive: usize,

    pub hands_up: HandsUpConfig,
}

impl Default for ClapConfig {
    fn default() -> Self {
        Self {
            distance_threshold: 0.18,
            cooldown: 0.4,
            required_consecutive: 3,
            consecutive_window: 2.0,
            notify_on_clap: true,
            notify_url: "http://localhost:3000/api/bell".to_string(),
            notify_cooldown: 0.5,
            notify_required_consecutive: 2,
            hands_up: HandsUpConfig::default(),
        }
    }
}

/// Head bow hysteresis and notification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadBowConfig {
    /// Head at or below this height counts as bowed
    pub height_threshold: f32,

    /// Head must rise back to this height before the next bow counts
    pub reset_height: f32,

    pub notify_on_bow: bool,
    pub notify_url: String,
    pub notify_cooldown: f64,
}

impl Default for HeadBowConfig {
    fn default() -> Self {
        Self {
            height_threshold: 1.25,
            reset_height: 1.35,
            notify_on_bow: true,
            notify_url: "http://localhost:3000/api/worship".to_string(),
            notify_cooldown: 3.0,
        }
    }
}

/// Action gate settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionsConfig {
    /// Gate value applied on the first tick
    pub start_enabled: bool,

    /// Key that flips the gate
    pub toggle_key: String,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            start_enabled: true,
            toggle_key: "Tab".to_string(),
        }
    }
}

/// Outbound notification transport
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// `source` field of every payload
    pub source: String,

    pub timeout_ms: u64,

    /// Pending requests beyond this are dropped
    pub queue_capacity: usize,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            source: "unity".to_string(),
            timeout_ms: 5000,
            queue_capacity: 32,
        }
    }
}

/// Audio cue files, relative to the config directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub clap_cue_path: Option<String>,
    pub hands_up_cue_path: Option<String>,
    pub volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            clap_cue_path: Some("clap.mp3".to_string()),
            hands_up_cue_path: Some("cheer.mp3".to_string()),
            volume: 1.0,
        }
    }
}

/// Keyboard slide navigation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub next_slide_key: String,
    pub previous_slide_key: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            next_slide_key: "RightArrow".to_string(),
            previous_slide_key: "LeftArrow".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub carousel: CarouselConfig,
    pub swipe: SwipeConfig,
    pub clap: ClapConfig,
    pub head_bow: HeadBowConfig,
    pub actions: ActionsConfig,
    pub notify: NotifyConfig,
    pub audio: AudioConfig,
    pub input: InputConfig,
}

impl Config {
    /// Load configuration from the application's config directory.
    /// Creates default config if file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let config = Self::load_from(&config_path)?;
            tracing::info!("Loaded config from: {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(&config_path)?;
            tracing::info!("Created default config at: {}", config_path.display());
            Ok(config)
        }
    }

    /// Load and validate configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |source: Box<dyn std::error::Error + Send + Sync>| ConfigError::LoadFailed {
            path: path.display().to_string(),
            source,
        };

        let content = fs::read_to_string(path).map_err(|e| load_failed(Box::new(e)))?;
        let config: Config = serde_json::from_str(&content).map_err(|e| load_failed(Box::new(e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::DirectoryCreationFailed {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let save_failed = |source: Box<dyn std::error::Error + Send + Sync>| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source,
        };
        let json = serde_json::to_string_pretty(self).map_err(|e| save_failed(Box::new(e)))?;
        fs::write(path, json).map_err(|e| save_failed(Box::new(e)))?;

        Ok(())
    }

    /// Get the config file path (in app's base directory)
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let exe_path = env::current_exe().map_err(|_| ConfigError::NoExecutableDir)?;
        let exe_dir = exe_path.parent().ok_or(ConfigError::NoExecutableDir)?;

        Ok(exe_dir.join("config").join("config.json"))
    }

    /// Get the config directory path (for display purposes)
    pub fn config_dir_display() -> String {
        Self::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "unknown".to_string())
    }

    /// Resolve a path relative to the config directory
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, ConfigError> {
        let config_path = Self::config_path()?;
        let config_dir = config_path.parent().ok_or(ConfigError::NoExecutableDir)?;

        Ok(config_dir.join(relative))
    }

    /// Slide references: the explicit list, or the sorted matching files of
    /// `slides_dir`
    pub fn slide_list(&self) -> Result<Vec<String>, ConfigError> {
        if !self.carousel.slides.is_empty() {
            return Ok(self.carousel.slides.clone());
        }
        let Some(dir) = &self.carousel.slides_dir else {
            return Ok(Vec::new());
        };

        let dir = Path::new(dir);
        if !dir.is_dir() {
            tracing::warn!("Slide directory does not exist: {}", dir.display());
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(dir).map_err(|e| ConfigError::LoadFailed {
            path: dir.display().to_string(),
            source: Box::new(e),
        })?;

        let extension = self.carousel.slide_extension.trim_start_matches('.').to_lowercase();
        let mut slides: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.to_lowercase() == extension)
                    .unwrap_or(false)
            })
            .map(|path| path.display().to_string())
            .collect();
        slides.sort();
        Ok(slides)
    }

    /// Reject values that would make a recognizer meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if self.carousel.panel_width <= 0.0 {
            problems.push("carousel.panel_width must be > 0".to_string());
        }
        if self.carousel.transition_seconds <= 0.0 {
            problems.push("carousel.transition_seconds must be > 0".to_string());
        }

        let swipe = &self.swipe;
        if swipe.min_distance <= 0.0 {
            problems.push("swipe.min_distance must be > 0".to_string());
        }
        if swipe.max_duration <= 0.0 {
            problems.push("swipe.max_duration must be > 0".to_string());
        }
        if swipe.min_speed < 0.0 || swipe.cooldown < 0.0 {
            problems.push("swipe.min_speed and swipe.cooldown must be >= 0".to_string());
        }
        if swipe.max_vertical <= 0.0 || swipe.max_depth <= 0.0 {
            problems.push("swipe drift tolerances must be > 0".to_string());
        }
        if swipe.zone.required && swipe.zone.size.cmple(Vec3::ZERO).any() {
            problems.push("swipe.zone.size must be > 0 on every axis".to_string());
        }

        let clap = &self.clap;
        if clap.distance_threshold <= 0.0 {
            problems.push("clap.distance_threshold must be > 0".to_string());
        }
        if clap.required_consecutive == 0 || clap.notify_required_consecutive == 0 {
            problems.push("clap consecutive counts must be >= 1".to_string());
        }
        if clap.consecutive_window <= 0.0 {
            problems.push("clap.consecutive_window must be > 0".to_string());
        }
        if clap.cooldown < 0.0 || clap.notify_cooldown < 0.0 || clap.hands_up.cooldown < 0.0 {
            problems.push("clap cooldowns must be >= 0".to_string());
        }

        let bow = &self.head_bow;
        if bow.reset_height <= bow.height_threshold {
            problems.push(format!(
                "head_bow.reset_height ({}) must be greater than head_bow.height_threshold ({})",
                bow.reset_height, bow.height_threshold
            ));
        }
        if bow.notify_cooldown < 0.0 {
            problems.push("head_bow.notify_cooldown must be >= 0".to_string());
        }

        if self.notify.queue_capacity == 0 {
            problems.push("notify.queue_capacity must be >= 1".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems.join("; ")))
        }
    }
}
