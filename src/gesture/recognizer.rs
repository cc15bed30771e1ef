/// Recognizer trait and the timing/zone/hysteresis primitives the concrete
/// recognizers are built from.
use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::carousel::{SlideCarousel, SlideDirection, SlideOutcome};
use crate::landmarks::Frame;
use crate::messaging::Event;

/// Per-tick outcome reported by a recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureStatus {
    /// Nothing evaluated yet
    Idle,
    /// Motion source has not delivered its first pose
    NotReady,
    /// A landmark this recognizer needs is absent
    MissingInput,
    /// Landmark outside the recognition zone
    OutOfZone,
    /// Anchored and measuring
    Tracking,
    /// Anchor moved to the current sample (window expired or drift)
    Reanchored,
    /// Hands further apart than the clap distance
    Apart,
    /// Condition still held since the last edge
    Holding,
    /// Edge seen but the recognizer is cooling down
    Cooldown,
    /// Edge counted, action threshold not reached yet
    Detected,
    /// Gesture fired and its action ran
    Triggered,
    /// Gesture fired but the action gate was closed
    Suppressed,
    /// Audio cue requested
    Played,
    /// Notification requested
    Notified,
    /// Above the reset height, re-armed
    Reset,
    /// Between the trigger and reset heights
    AboveThreshold,
}

impl GestureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureStatus::Idle => "Idle",
            GestureStatus::NotReady => "NotReady",
            GestureStatus::MissingInput => "MissingInput",
            GestureStatus::OutOfZone => "OutOfZone",
            GestureStatus::Tracking => "Tracking",
            GestureStatus::Reanchored => "Reanchored",
            GestureStatus::Apart => "Apart",
            GestureStatus::Holding => "Holding",
            GestureStatus::Cooldown => "Cooldown",
            GestureStatus::Detected => "Detected",
            GestureStatus::Triggered => "Triggered",
            GestureStatus::Suppressed => "Suppressed",
            GestureStatus::Played => "Played",
            GestureStatus::Notified => "Notified",
            GestureStatus::Reset => "Reset",
            GestureStatus::AboveThreshold => "AboveThreshold",
        }
    }
}

impl fmt::Display for GestureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time view of a recognizer, for diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizerSnapshot {
    pub name: &'static str,
    pub status: GestureStatus,
    /// Edges / gestures recognized
    pub detected: u64,
    /// Actions that ran (slides, cues)
    pub fired: u64,
    /// Notifications requested
    pub notified: u64,
    /// Seconds before the primary cooldown expires
    pub cooldown_remaining: f64,
}

/// The `CanSlide` / `Slide` contract recognizers drive
pub trait SlideTarget {
    fn can_slide(&self, direction: SlideDirection) -> bool;
    fn slide(&mut self, direction: SlideDirection) -> SlideOutcome;
}

impl SlideTarget for SlideCarousel {
    fn can_slide(&self, direction: SlideDirection) -> bool {
        SlideCarousel::can_slide(self, direction)
    }

    fn slide(&mut self, direction: SlideDirection) -> SlideOutcome {
        SlideCarousel::slide(self, direction)
    }
}

/// Inputs for one recognizer update
pub struct TickContext<'a> {
    /// Session clock in seconds
    pub now: f64,
    pub frame: &'a Frame,
    pub slides: &'a mut dyn SlideTarget,
}

/// Recognizer trait
///
/// Implement this trait for every gesture the session samples each tick.
pub trait Recognizer {
    /// Sample the frame, advance internal state and push any events
    fn update(&mut self, ctx: &mut TickContext<'_>, events: &mut Vec<Event>) -> GestureStatus;

    /// Get recognizer name (for logging)
    fn name(&self) -> &'static str;

    /// Status from the most recent update
    fn status(&self) -> GestureStatus;

    fn snapshot(&self, now: f64) -> RecognizerSnapshot;
}

/// Logs status transitions at debug level and remembers the latest one
#[derive(Debug, Clone)]
pub struct StatusTracker {
    name: &'static str,
    current: GestureStatus,
}

impl StatusTracker {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            current: GestureStatus::Idle,
        }
    }

    pub fn set(&mut self, status: GestureStatus) -> GestureStatus {
        if status != self.current {
            tracing::debug!("{}: {} -> {}", self.name, self.current, status);
            self.current = status;
        }
        status
    }

    pub fn get(&self) -> GestureStatus {
        self.current
    }
}

/// Start position and time of the motion being measured.
///
/// Expiry moves the anchor to the current sample instead of dropping
/// tracking, so a slow start that later speeds up can still qualify.
#[derive(Debug, Clone, Default)]
pub struct AnchorTracker {
    anchor: Option<(Vec3, f64)>,
}

impl AnchorTracker {
    pub fn is_tracking(&self) -> bool {
        self.anchor.is_some()
    }

    /// Anchor at the current sample
    pub fn begin(&mut self, position: Vec3, now: f64) {
        self.anchor = Some((position, now));
    }

    /// Stop tracking entirely
    pub fn reset(&mut self) {
        self.anchor = None;
    }

    pub fn elapsed(&self, now: f64) -> Option<f64> {
        self.anchor.map(|(_, t)| now - t)
    }

    pub fn delta(&self, position: Vec3) -> Option<Vec3> {
        self.anchor.map(|(p, _)| position - p)
    }
}

/// Remembers whether a condition held on the previous tick so only the
/// rising edge counts
#[derive(Debug, Clone, Default)]
pub struct EdgeLatch {
    latched: bool,
}

impl EdgeLatch {
    pub fn is_latched(&self) -> bool {
        self.latched
    }

    pub fn latch(&mut self) {
        self.latched = true;
    }

    pub fn release(&mut self) {
        self.latched = false;
    }
}

/// Result of feeding one value through a [`Hysteresis`] band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandState {
    /// At or above the reset level; re-armed
    Reset,
    /// Between the levels; nothing changes
    Between,
    /// Crossed the trigger level while armed (fires once)
    Triggered,
    /// Still below the trigger level since the last trigger
    Holding,
}

/// Low-side trigger with a strictly higher re-arm level
#[derive(Debug, Clone)]
pub struct Hysteresis {
    trigger_at: f32,
    reset_at: f32,
    holding: bool,
}

impl Hysteresis {
    pub fn new(trigger_at: f32, reset_at: f32) -> Self {
        Self {
            trigger_at,
            reset_at,
            holding: false,
        }
    }

    pub fn update(&mut self, value: f32) -> BandState {
        if value >= self.reset_at {
            self.holding = false;
            return BandState::Reset;
        }
        if value > self.trigger_at {
            return BandState::Between;
        }
        if self.holding {
            return BandState::Holding;
        }
        self.holding = true;
        BandState::Triggered
    }

    pub fn is_holding(&self) -> bool {
        self.holding
    }
}

/// Axis-aligned region, in reference-frame coordinates, where swipes count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwipeZone {
    /// Disable to accept swipes anywhere
    pub required: bool,
    /// Only check the height band, ignore lateral and depth position
    pub height_only: bool,
    pub center: Vec3,
    pub size: Vec3,
}

impl SwipeZone {
    pub fn contains(&self, local: Vec3) -> bool {
        if !self.required {
            return true;
        }
        let half = self.size * 0.5;
        let d = (local - self.center).abs();
        if self.height_only {
            d.y <= half.y
        } else {
            d.x <= half.x && d.y <= half.y && d.z <= half.z
        }
    }
}

impl Default for SwipeZone {
    fn default() -> Self {
        Self {
            required: true,
            height_only: true,
            // Chest height band 1.0..1.35
            center: Vec3::new(0.0, 1.175, 0.25),
            size: Vec3::new(0.6, 0.35, 0.4),
        }
    }
}
