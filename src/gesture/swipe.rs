/// Lateral hand swipe recognizer. One instance per hand.
use std::fmt;

use serde::{Deserialize, Serialize};

use super::recognizer::{
    AnchorTracker, GestureStatus, Recognizer, RecognizerSnapshot, StatusTracker, SwipeZone,
    TickContext,
};
use crate::carousel::{SlideDirection, SlideOutcome};
use crate::config::SwipeConfig;
use crate::landmarks::Landmark;
use crate::messaging::{Event, Gesture, SlideSource};
use crate::state::ActionGate;
use crate::utils::Cooldown;

/// Which hand a swipe detector follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    Right,
    Left,
}

impl Hand {
    pub fn landmark(self) -> Landmark {
        match self {
            Hand::Right => Landmark::RightHand,
            Hand::Left => Landmark::LeftHand,
        }
    }

    /// The right hand sweeps toward -X to advance, the left toward +X to go back
    pub fn direction(self) -> SlideDirection {
        match self {
            Hand::Right => SlideDirection::Next,
            Hand::Left => SlideDirection::Previous,
        }
    }

    fn passes(self, dx: f32, min_distance: f32) -> bool {
        match self {
            Hand::Right => dx <= -min_distance,
            Hand::Left => dx >= min_distance,
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hand::Right => write!(f, "right"),
            Hand::Left => write!(f, "left"),
        }
    }
}

/// Swipe thresholds
#[derive(Debug, Clone)]
pub struct SwipeThresholds {
    pub zone: SwipeZone,
    pub min_distance: f32,
    pub max_duration: f64,
    pub min_speed: f32,
    pub max_vertical: f32,
    pub max_depth: f32,
}

impl From<&SwipeConfig> for SwipeThresholds {
    fn from(config: &SwipeConfig) -> Self {
        Self {
            zone: config.zone,
            min_distance: config.min_distance,
            max_duration: config.max_duration,
            min_speed: config.min_speed,
            max_vertical: config.max_vertical,
            max_depth: config.max_depth,
        }
    }
}

pub struct SwipeDetector {
    hand: Hand,
    thresholds: SwipeThresholds,
    anchor: AnchorTracker,
    cooldown: Cooldown,
    gate: ActionGate,
    status: StatusTracker,
    detected: u64,
    fired: u64,
}

impl SwipeDetector {
    pub fn new(hand: Hand, config: &SwipeConfig, gate: ActionGate) -> Self {
        let name = match hand {
            Hand::Right => "swipe-right",
            Hand::Left => "swipe-left",
        };
        Self {
            hand,
            thresholds: SwipeThresholds::from(config),
            anchor: AnchorTracker::default(),
            cooldown: Cooldown::new(config.cooldown),
            gate,
            status: StatusTracker::new(name),
            detected: 0,
            fired: 0,
        }
    }

    pub fn hand(&self) -> Hand {
        self.hand
    }

    pub fn is_tracking(&self) -> bool {
        self.anchor.is_tracking()
    }

    fn evaluate(&mut self, ctx: &mut TickContext<'_>, events: &mut Vec<Event>) -> GestureStatus {
        if !ctx.frame.ready {
            self.anchor.reset();
            return GestureStatus::NotReady;
        }
        let Some(position) = ctx.frame.local(self.hand.landmark()) else {
            self.anchor.reset();
            return GestureStatus::MissingInput;
        };
        if !self.thresholds.zone.contains(position) {
            self.anchor.reset();
            return GestureStatus::OutOfZone;
        }

        let now = ctx.now;
        let (Some(elapsed), Some(delta)) = (self.anchor.elapsed(now), self.anchor.delta(position))
        else {
            self.anchor.begin(position, now);
            return GestureStatus::Tracking;
        };

        if elapsed > self.thresholds.max_duration {
            self.anchor.begin(position, now);
            return GestureStatus::Reanchored;
        }
        if delta.y.abs() > self.thresholds.max_vertical || delta.z.abs() > self.thresholds.max_depth
        {
            self.anchor.begin(position, now);
            return GestureStatus::Reanchored;
        }

        let speed = if elapsed > 0.0 {
            delta.x.abs() / elapsed as f32
        } else {
            0.0
        };
        let passes = self.hand.passes(delta.x, self.thresholds.min_distance)
            && speed >= self.thresholds.min_speed;
        if !passes {
            return GestureStatus::Tracking;
        }
        if !self.cooldown.is_ready(now) {
            return GestureStatus::Cooldown;
        }

        self.detected += 1;
        let direction = self.hand.direction();
        events.push(Event::SwipeDetected {
            hand: self.hand,
            direction,
            time: now,
        });

        let status = if self.gate.is_enabled() {
            let outcome = if ctx.slides.can_slide(direction) {
                ctx.slides.slide(direction)
            } else {
                SlideOutcome::AtEnd
            };
            if outcome == SlideOutcome::Started {
                self.fired += 1;
            }
            tracing::info!(
                "{} hand swipe ({:.2} m/s) -> slide {}: {:?}",
                self.hand,
                speed,
                direction,
                outcome
            );
            events.push(Event::SlideRequested {
                source: SlideSource::Swipe(self.hand),
                direction,
                outcome,
            });
            GestureStatus::Triggered
        } else {
            events.push(Event::FeedbackSuppressed {
                gesture: Gesture::Swipe,
            });
            GestureStatus::Suppressed
        };

        self.cooldown.mark(now);
        self.anchor.begin(position, now);
        status
    }
}

impl Recognizer for SwipeDetector {
    fn update(&mut self, ctx: &mut TickContext<'_>, events: &mut Vec<Event>) -> GestureStatus {
        let status = self.evaluate(ctx, events);
        self.status.set(status)
    }

    fn name(&self) -> &'static str {
        match self.hand {
            Hand::Right => "swipe-right",
            Hand::Left => "swipe-left",
        }
    }

    fn status(&self) -> GestureStatus {
        self.status.get()
    }

    fn snapshot(&self, now: f64) -> RecognizerSnapshot {
        RecognizerSnapshot {
            name: self.name(),
            status: self.status.get(),
            detected: self.detected,
            fired: self.fired,
            notified: 0,
            cooldown_remaining: self.cooldown.remaining(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::SlideCarousel;
    use crate::landmarks::Frame;
    use glam::Vec3;
    use std::sync::Arc;

    /// Inside the chest-height band
    fn chest(x: f32) -> Vec3 {
        Vec3::new(x, 1.2, 0.25)
    }

    fn carousel(start: usize) -> SlideCarousel {
        let images: Arc<[String]> = (0..5).map(|i| format!("img{}", i)).collect();
        SlideCarousel::new(images, start, 2000.0, 0.2)
    }

    fn step(
        detector: &mut SwipeDetector,
        slides: &mut SlideCarousel,
        now: f64,
        frame: &Frame,
    ) -> (GestureStatus, Vec<Event>) {
        let mut events = Vec::new();
        let mut ctx = TickContext {
            now,
            frame,
            slides,
        };
        let status = detector.update(&mut ctx, &mut events);
        (status, events)
    }

    fn right_hand(x: f32) -> Frame {
        Frame::ready().with(Landmark::RightHand, chest(x))
    }

    #[test]
    fn test_fast_swipe_triggers() {
        let gate = ActionGate::new();
        let mut detector = SwipeDetector::new(Hand::Right, &SwipeConfig::default(), gate);
        let mut slides = carousel(2);

        let (status, _) = step(&mut detector, &mut slides, 0.0, &right_hand(0.1));
        assert_eq!(status, GestureStatus::Tracking);

        let (status, events) = step(&mut detector, &mut slides, 0.01, &right_hand(-0.15));
        assert_eq!(status, GestureStatus::Triggered);
        assert!(slides.is_animating());
        assert!(events.contains(&Event::SlideRequested {
            source: SlideSource::Swipe(Hand::Right),
            direction: SlideDirection::Next,
            outcome: SlideOutcome::Started,
        }));
    }

    #[test]
    fn test_slow_swipe_reanchors() {
        let gate = ActionGate::new();
        let mut detector = SwipeDetector::new(Hand::Right, &SwipeConfig::default(), gate);
        let mut slides = carousel(2);

        step(&mut detector, &mut slides, 0.0, &right_hand(0.1));
        let (status, events) = step(&mut detector, &mut slides, 0.04, &right_hand(-0.1));
        assert_eq!(status, GestureStatus::Reanchored);
        assert!(events.is_empty());
        assert!(!slides.is_animating());
    }

    #[test]
    fn test_wrong_direction_keeps_tracking() {
        let gate = ActionGate::new();
        let mut detector = SwipeDetector::new(Hand::Left, &SwipeConfig::default(), gate);
        let mut slides = carousel(2);
        let frame = |x| Frame::ready().with(Landmark::LeftHand, chest(x));

        step(&mut detector, &mut slides, 0.0, &frame(0.1));
        let (status, _) = step(&mut detector, &mut slides, 0.01, &frame(-0.2));
        assert_eq!(status, GestureStatus::Tracking);

        // Moving the left hand toward +X goes back
        let (status, events) = step(&mut detector, &mut slides, 0.02, &frame(0.35));
        assert_eq!(status, GestureStatus::Triggered);
        assert!(matches!(
            events.last(),
            Some(Event::SlideRequested {
                direction: SlideDirection::Previous,
                ..
            })
        ));
    }

    #[test]
    fn test_vertical_drift_reanchors() {
        let gate = ActionGate::new();
        let mut detector = SwipeDetector::new(Hand::Right, &SwipeConfig::default(), gate);
        let mut slides = carousel(2);

        step(&mut detector, &mut slides, 0.0, &right_hand(0.1));
        let frame = Frame::ready().with(Landmark::RightHand, Vec3::new(-0.2, 1.01, 0.25));
        let (status, _) = step(&mut detector, &mut slides, 0.01, &frame);
        assert_eq!(status, GestureStatus::Reanchored);
    }

    #[test]
    fn test_out_of_zone_resets() {
        let gate = ActionGate::new();
        let mut detector = SwipeDetector::new(Hand::Right, &SwipeConfig::default(), gate);
        let mut slides = carousel(2);

        step(&mut detector, &mut slides, 0.0, &right_hand(0.1));
        assert!(detector.is_tracking());
        let frame = Frame::ready().with(Landmark::RightHand, Vec3::new(0.0, 0.5, 0.25));
        let (status, _) = step(&mut detector, &mut slides, 0.01, &frame);
        assert_eq!(status, GestureStatus::OutOfZone);
        assert!(!detector.is_tracking());
    }

    #[test]
    fn test_missing_and_not_ready() {
        let gate = ActionGate::new();
        let mut detector = SwipeDetector::new(Hand::Right, &SwipeConfig::default(), gate);
        let mut slides = carousel(2);

        let (status, _) = step(&mut detector, &mut slides, 0.0, &Frame::ready());
        assert_eq!(status, GestureStatus::MissingInput);

        let frame = Frame {
            ready: false,
            ..right_hand(0.0)
        };
        let (status, _) = step(&mut detector, &mut slides, 0.0, &frame);
        assert_eq!(status, GestureStatus::NotReady);
    }

    #[test]
    fn test_cooldown_blocks_second_swipe() {
        let gate = ActionGate::new();
        let mut detector = SwipeDetector::new(Hand::Right, &SwipeConfig::default(), gate);
        let mut slides = carousel(0);

        step(&mut detector, &mut slides, 0.0, &right_hand(0.25));
        let (status, _) = step(&mut detector, &mut slides, 0.01, &right_hand(0.0));
        assert_eq!(status, GestureStatus::Triggered);

        let (status, _) = step(&mut detector, &mut slides, 0.02, &right_hand(-0.25));
        assert_eq!(status, GestureStatus::Cooldown);
        assert_eq!(detector.snapshot(0.02).detected, 1);
    }

    #[test]
    fn test_at_end_still_starts_cooldown() {
        let gate = ActionGate::new();
        let mut detector = SwipeDetector::new(Hand::Right, &SwipeConfig::default(), gate);
        let mut slides = carousel(4);

        step(&mut detector, &mut slides, 0.0, &right_hand(0.25));
        let (status, events) = step(&mut detector, &mut slides, 0.01, &right_hand(0.0));
        assert_eq!(status, GestureStatus::Triggered);
        assert!(matches!(
            events.last(),
            Some(Event::SlideRequested {
                outcome: SlideOutcome::AtEnd,
                ..
            })
        ));
        assert!(detector.snapshot(0.01).cooldown_remaining > 0.0);
        assert_eq!(detector.snapshot(0.01).fired, 0);
    }

    #[test]
    fn test_gate_disabled_suppresses_slide() {
        let gate = ActionGate::new();
        gate.apply_default(false);
        let mut detector = SwipeDetector::new(Hand::Right, &SwipeConfig::default(), gate);
        let mut slides = carousel(2);

        step(&mut detector, &mut slides, 0.0, &right_hand(0.25));
        let (status, events) = step(&mut detector, &mut slides, 0.01, &right_hand(0.0));
        assert_eq!(status, GestureStatus::Suppressed);
        assert!(!slides.is_animating());
        assert!(events.contains(&Event::FeedbackSuppressed {
            gesture: Gesture::Swipe
        }));
    }
}
