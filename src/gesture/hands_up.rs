/// Both-hands-raised recognizer. Hosted by the clap detector, but keeps its
/// own latch, cooldown and counters.
use super::recognizer::{EdgeLatch, GestureStatus, RecognizerSnapshot, StatusTracker};
use crate::audio_system::AudioCue;
use crate::config::HandsUpConfig;
use crate::landmarks::{Frame, Landmark};
use crate::messaging::{Event, Gesture};
use crate::state::ActionGate;
use crate::utils::Cooldown;

pub struct HandsUpDetector {
    height_threshold: f32,
    cooldown: Cooldown,
    latch: EdgeLatch,
    gate: ActionGate,
    status: StatusTracker,
    detected: u64,
    played: u64,
}

impl HandsUpDetector {
    pub fn new(config: &HandsUpConfig, gate: ActionGate) -> Self {
        Self {
            height_threshold: config.height_threshold,
            cooldown: Cooldown::new(config.cooldown),
            latch: EdgeLatch::default(),
            gate,
            status: StatusTracker::new("hands-up"),
            detected: 0,
            played: 0,
        }
    }

    /// Sample one frame. The host has already checked readiness.
    pub fn update(&mut self, now: f64, frame: &Frame, events: &mut Vec<Event>) -> GestureStatus {
        let status = self.evaluate(now, frame, events);
        self.status.set(status)
    }

    /// Record a frame the host could not sample
    pub fn skip(&mut self, status: GestureStatus) -> GestureStatus {
        self.status.set(status)
    }

    fn evaluate(&mut self, now: f64, frame: &Frame, events: &mut Vec<Event>) -> GestureStatus {
        let (Some(right), Some(left)) = (
            frame.local(Landmark::RightHand),
            frame.local(Landmark::LeftHand),
        ) else {
            return GestureStatus::MissingInput;
        };

        let raised = right.y >= self.height_threshold && left.y >= self.height_threshold;
        if !raised {
            self.latch.release();
            return GestureStatus::Idle;
        }
        if self.latch.is_latched() {
            return GestureStatus::Holding;
        }
        self.latch.latch();

        self.detected += 1;
        if !self.cooldown.is_ready(now) {
            return GestureStatus::Cooldown;
        }
        self.cooldown.mark(now);
        events.push(Event::HandsUpDetected { time: now });

        if !self.gate.is_enabled() {
            events.push(Event::FeedbackSuppressed {
                gesture: Gesture::HandsUp,
            });
            return GestureStatus::Suppressed;
        }

        self.played += 1;
        tracing::info!("Hands up at {:.2}s", now);
        events.push(Event::CueRequested {
            cue: AudioCue::HandsUpCheer,
        });
        GestureStatus::Played
    }

    pub fn status(&self) -> GestureStatus {
        self.status.get()
    }

    pub fn snapshot(&self, now: f64) -> RecognizerSnapshot {
        RecognizerSnapshot {
            name: "hands-up",
            status: self.status.get(),
            detected: self.detected,
            fired: self.played,
            notified: 0,
            cooldown_remaining: self.cooldown.remaining(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn hands(y: f32) -> Frame {
        Frame::ready()
            .with(Landmark::RightHand, Vec3::new(0.3, y, 0.0))
            .with(Landmark::LeftHand, Vec3::new(-0.3, y, 0.0))
    }

    #[test]
    fn test_raise_plays_once_while_held() {
        let mut detector = HandsUpDetector::new(&HandsUpConfig::default(), ActionGate::new());
        let mut events = Vec::new();

        assert_eq!(detector.update(0.0, &hands(1.0), &mut events), GestureStatus::Idle);
        assert_eq!(detector.update(0.1, &hands(1.6), &mut events), GestureStatus::Played);
        assert_eq!(detector.update(0.2, &hands(1.7), &mut events), GestureStatus::Holding);
        assert_eq!(
            events,
            vec![
                Event::HandsUpDetected { time: 0.1 },
                Event::CueRequested {
                    cue: AudioCue::HandsUpCheer
                },
            ]
        );
    }

    #[test]
    fn test_one_hand_is_not_enough() {
        let mut detector = HandsUpDetector::new(&HandsUpConfig::default(), ActionGate::new());
        let mut events = Vec::new();
        let frame = hands(1.6).with(Landmark::LeftHand, Vec3::new(-0.3, 1.0, 0.0));
        assert_eq!(detector.update(0.0, &frame, &mut events), GestureStatus::Idle);
        assert!(events.is_empty());
    }

    #[test]
    fn test_second_raise_inside_cooldown() {
        let mut detector = HandsUpDetector::new(&HandsUpConfig::default(), ActionGate::new());
        let mut events = Vec::new();

        detector.update(0.0, &hands(1.6), &mut events);
        detector.update(0.5, &hands(1.0), &mut events);
        assert_eq!(detector.update(1.0, &hands(1.6), &mut events), GestureStatus::Cooldown);
        detector.update(1.5, &hands(1.0), &mut events);
        assert_eq!(detector.update(2.5, &hands(1.6), &mut events), GestureStatus::Played);
        assert_eq!(detector.snapshot(2.5).detected, 3);
        assert_eq!(detector.snapshot(2.5).fired, 2);
    }

    #[test]
    fn test_gate_disabled_counts_without_cue() {
        let gate = ActionGate::new();
        gate.apply_default(false);
        let mut detector = HandsUpDetector::new(&HandsUpConfig::default(), gate.clone());
        let mut events = Vec::new();

        assert_eq!(detector.update(0.0, &hands(1.6), &mut events), GestureStatus::Suppressed);
        assert!(!events.iter().any(Event::is_feedback));

        gate.toggle();
        detector.update(1.0, &hands(1.0), &mut events);
        assert_eq!(detector.update(2.5, &hands(1.6), &mut events), GestureStatus::Played);
        assert_eq!(detector.snapshot(2.5).detected, 2);
    }

    #[test]
    fn test_missing_hand() {
        let mut detector = HandsUpDetector::new(&HandsUpConfig::default(), ActionGate::new());
        let mut events = Vec::new();
        let frame = Frame::ready().with(Landmark::RightHand, Vec3::ZERO);
        assert_eq!(detector.update(0.0, &frame, &mut events), GestureStatus::MissingInput);
    }
}
