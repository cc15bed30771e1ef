/// Clap recognizer: both hands closing to within a distance threshold.
///
/// Each apart-to-together edge outside the clap cooldown is stamped into a
/// rolling window. The window count gates two independent actions: the
/// clap cue (`required_consecutive`, clears the window) and the bell
/// notification (`notify_required_consecutive`, its own cooldown).
use super::hands_up::HandsUpDetector;
use super::recognizer::{
    EdgeLatch, GestureStatus, Recognizer, RecognizerSnapshot, StatusTracker, TickContext,
};
use crate::audio_system::AudioCue;
use crate::config::ClapConfig;
use crate::landmarks::Landmark;
use crate::messaging::{Event, Gesture};
use crate::notify::NotifyKind;
use crate::state::ActionGate;
use crate::utils::{Cooldown, RollingWindow};

pub struct ClapDetector {
    distance_threshold: f32,
    required_consecutive: usize,
    notify_on_clap: bool,
    notify_url: String,
    notify_required_consecutive: usize,
    cooldown: Cooldown,
    notify_cooldown: Cooldown,
    window: RollingWindow,
    latch: EdgeLatch,
    hands_up: HandsUpDetector,
    gate: ActionGate,
    status: StatusTracker,
    last_distance: Option<f32>,
    detected: u64,
    played: u64,
    notified: u64,
}

impl ClapDetector {
    pub fn new(config: &ClapConfig, gate: ActionGate) -> Self {
        Self {
            distance_threshold: config.distance_threshold,
            required_consecutive: config.required_consecutive,
            notify_on_clap: config.notify_on_clap,
            notify_url: config.notify_url.trim().to_string(),
            notify_required_consecutive: config.notify_required_consecutive,
            cooldown: Cooldown::new(config.cooldown),
            notify_cooldown: Cooldown::new(config.notify_cooldown),
            window: RollingWindow::new(config.consecutive_window),
            latch: EdgeLatch::default(),
            hands_up: HandsUpDetector::new(&config.hands_up, gate.clone()),
            gate,
            status: StatusTracker::new("clap"),
            last_distance: None,
            detected: 0,
            played: 0,
            notified: 0,
        }
    }

    pub fn hands_up(&self) -> &HandsUpDetector {
        &self.hands_up
    }

    /// Claps currently inside the rolling window
    pub fn consecutive(&self) -> usize {
        self.window.len()
    }

    pub fn last_distance(&self) -> Option<f32> {
        self.last_distance
    }

    fn try_notify(&mut self, now: f64, count: usize, events: &mut Vec<Event>) {
        if !self.notify_on_clap || count < self.notify_required_consecutive {
            return;
        }
        if self.notify_url.is_empty() || !self.notify_cooldown.is_ready(now) {
            return;
        }
        self.notify_cooldown.mark(now);
        if !self.gate.is_enabled() {
            tracing::debug!("Clap notification suppressed by action gate");
            return;
        }
        self.notified += 1;
        events.push(Event::NotificationRequested {
            kind: NotifyKind::Clap,
            url: self.notify_url.clone(),
            time: now,
        });
    }

    fn evaluate(&mut self, ctx: &mut TickContext<'_>, events: &mut Vec<Event>) -> GestureStatus {
        let frame = ctx.frame;
        if !frame.ready {
            return self.hands_up.skip(GestureStatus::NotReady);
        }
        let (Some(right), Some(left)) = (
            frame.local(Landmark::RightHand),
            frame.local(Landmark::LeftHand),
        ) else {
            return self.hands_up.skip(GestureStatus::MissingInput);
        };

        let now = ctx.now;
        let distance = right.distance(left);
        self.last_distance = Some(distance);

        self.hands_up.update(now, frame, events);

        if distance > self.distance_threshold {
            self.latch.release();
            return GestureStatus::Apart;
        }
        if self.latch.is_latched() {
            return GestureStatus::Holding;
        }
        self.latch.latch();
        if !self.cooldown.is_ready(now) {
            return GestureStatus::Cooldown;
        }

        self.detected += 1;
        let count = self.window.push(now);
        events.push(Event::ClapDetected {
            consecutive: count,
            time: now,
        });

        self.try_notify(now, count, events);

        if count < self.required_consecutive {
            return GestureStatus::Detected;
        }

        self.cooldown.mark(now);
        self.window.clear();
        if !self.gate.is_enabled() {
            events.push(Event::FeedbackSuppressed {
                gesture: Gesture::Clap,
            });
            return GestureStatus::Suppressed;
        }

        self.played += 1;
        tracing::info!("Clap x{} at {:.2}s", count, now);
        events.push(Event::CueRequested { cue: AudioCue::Clap });
        GestureStatus::Played
    }
}

impl Recognizer for ClapDetector {
    fn update(&mut self, ctx: &mut TickContext<'_>, events: &mut Vec<Event>) -> GestureStatus {
        let status = self.evaluate(ctx, events);
        self.status.set(status)
    }

    fn name(&self) -> &'static str {
        "clap"
    }

    fn status(&self) -> GestureStatus {
        self.status.get()
    }

    fn snapshot(&self, now: f64) -> RecognizerSnapshot {
        RecognizerSnapshot {
            name: "clap",
            status: self.status.get(),
            detected: self.detected,
            fired: self.played,
            notified: self.notified,
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

    struct Harness {
        detector: ClapDetector,
        slides: SlideCarousel,
        events: Vec<Event>,
    }

    impl Harness {
        fn new(config: ClapConfig, gate: ActionGate) -> Self {
            let images: Arc<[String]> = Arc::from(Vec::<String>::new());
            Self {
                detector: ClapDetector::new(&config, gate),
                slides: SlideCarousel::new(images, 0, 2000.0, 0.2),
                events: Vec::new(),
            }
        }

        fn step(&mut self, now: f64, gap: f32) -> GestureStatus {
            let frame = Frame::ready()
                .with(Landmark::RightHand, Vec3::new(gap / 2.0, 1.2, 0.3))
                .with(Landmark::LeftHand, Vec3::new(-gap / 2.0, 1.2, 0.3));
            let mut ctx = TickContext {
                now,
                frame: &frame,
                slides: &mut self.slides,
            };
            self.detector.update(&mut ctx, &mut self.events)
        }

        fn count<F: Fn(&Event) -> bool>(&self, f: F) -> usize {
            self.events.iter().filter(|e| f(e)).count()
        }
    }

    const APART: f32 = 0.5;
    const TOGETHER: f32 = 0.05;

    #[test]
    fn test_edges_only() {
        let mut h = Harness::new(ClapConfig::default(), ActionGate::new());
        let samples = [APART, APART, TOGETHER, TOGETHER, APART, TOGETHER];
        let statuses: Vec<_> = samples
            .iter()
            .enumerate()
            .map(|(i, gap)| h.step(i as f64 * 0.5, *gap))
            .collect();

        assert_eq!(statuses[2], GestureStatus::Detected);
        assert_eq!(statuses[3], GestureStatus::Holding);
        assert_eq!(h.count(|e| matches!(e, Event::ClapDetected { .. })), 2);
        assert_eq!(h.detector.snapshot(2.5).detected, 2);
    }

    #[test]
    fn test_third_clap_plays_and_clears_window() {
        let mut h = Harness::new(ClapConfig::default(), ActionGate::new());
        h.step(0.0, TOGETHER);
        h.step(0.1, APART);
        h.step(0.2, TOGETHER);
        h.step(0.3, APART);
        assert_eq!(h.step(0.4, TOGETHER), GestureStatus::Played);
        assert_eq!(h.detector.consecutive(), 0);
        assert_eq!(
            h.count(|e| matches!(e, Event::CueRequested { cue: AudioCue::Clap })),
            1
        );
    }

    #[test]
    fn test_notification_before_cue_threshold() {
        let mut h = Harness::new(ClapConfig::default(), ActionGate::new());
        h.step(0.0, TOGETHER);
        h.step(0.1, APART);
        assert_eq!(h.step(0.2, TOGETHER), GestureStatus::Detected);

        let notes: Vec<_> = h
            .events
            .iter()
            .filter_map(|e| match e {
                Event::NotificationRequested { kind, url, .. } => Some((*kind, url.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(
            notes,
            vec![(NotifyKind::Clap, "http://localhost:3000/api/bell".to_string())]
        );
    }

    #[test]
    fn test_window_expiry() {
        let mut h = Harness::new(ClapConfig::default(), ActionGate::new());
        h.step(0.0, TOGETHER);
        h.step(0.5, APART);
        h.step(1.0, TOGETHER);
        h.step(1.5, APART);
        // First clap has left the 2 s window
        h.step(2.5, TOGETHER);
        assert_eq!(h.detector.consecutive(), 2);
        assert_eq!(h.count(|e| matches!(e, Event::CueRequested { .. })), 0);
    }

    #[test]
    fn test_cooldown_edge_is_not_counted() {
        let mut h = Harness::new(ClapConfig::default(), ActionGate::new());
        for (i, now) in [0.0, 0.1, 0.2].iter().enumerate() {
            h.step(*now, TOGETHER);
            h.step(*now + 0.05, APART);
            assert_eq!(h.detector.snapshot(*now).detected, i as u64 + 1);
        }
        // Played at 0.2; 0.4 s cooldown
        assert_eq!(h.step(0.3, TOGETHER), GestureStatus::Cooldown);
        // Held through the end of the cooldown: still no refire
        assert_eq!(h.step(0.7, TOGETHER), GestureStatus::Holding);
        assert_eq!(h.detector.snapshot(0.7).detected, 3);
    }

    #[test]
    fn test_gate_disabled_keeps_counting() {
        let gate = ActionGate::new();
        gate.apply_default(false);
        let mut h = Harness::new(ClapConfig::default(), gate.clone());
        h.step(0.0, TOGETHER);
        h.step(0.1, APART);
        h.step(0.2, TOGETHER);
        h.step(0.3, APART);
        assert_eq!(h.step(0.4, TOGETHER), GestureStatus::Suppressed);
        assert_eq!(h.count(Event::is_feedback), 0);
        assert_eq!(h.detector.snapshot(0.4).detected, 3);

        gate.toggle();
        h.step(1.0, APART);
        h.step(1.1, TOGETHER);
        h.step(1.2, APART);
        h.step(1.3, TOGETHER);
        assert_eq!(
            h.count(|e| matches!(e, Event::NotificationRequested { .. })),
            1
        );
    }

    #[test]
    fn test_notify_disabled() {
        let config = ClapConfig {
            notify_on_clap: false,
            ..ClapConfig::default()
        };
        let mut h = Harness::new(config, ActionGate::new());
        for now in [0.0, 0.1, 0.2] {
            h.step(now, TOGETHER);
            h.step(now + 0.05, APART);
        }
        assert_eq!(
            h.count(|e| matches!(e, Event::NotificationRequested { .. })),
            0
        );
        assert_eq!(h.detector.snapshot(0.3).fired, 1);
    }

    #[test]
    fn test_missing_hand() {
        let mut h = Harness::new(ClapConfig::default(), ActionGate::new());
        let frame = Frame::ready().with(Landmark::RightHand, Vec3::ZERO);
        let mut ctx = TickContext {
            now: 0.0,
            frame: &frame,
            slides: &mut h.slides,
        };
        let status = h.detector.update(&mut ctx, &mut h.events);
        assert_eq!(status, GestureStatus::MissingInput);
        assert_eq!(h.detector.last_distance(), None);
    }

    #[test]
    fn test_hands_up_follows_tracking_loss() {
        let mut h = Harness::new(ClapConfig::default(), ActionGate::new());
        let raised = Frame::ready()
            .with(Landmark::RightHand, Vec3::new(0.3, 1.8, 0.3))
            .with(Landmark::LeftHand, Vec3::new(-0.3, 1.8, 0.3));
        for now in [0.0, 0.1] {
            let mut ctx = TickContext {
                now,
                frame: &raised,
                slides: &mut h.slides,
            };
            h.detector.update(&mut ctx, &mut h.events);
        }
        assert_eq!(h.detector.hands_up().status(), GestureStatus::Holding);

        let lost = Frame::default();
        let mut ctx = TickContext {
            now: 0.2,
            frame: &lost,
            slides: &mut h.slides,
        };
        assert_eq!(h.detector.update(&mut ctx, &mut h.events), GestureStatus::NotReady);
        assert_eq!(h.detector.hands_up().status(), GestureStatus::NotReady);

        let one_hand = Frame::ready().with(Landmark::RightHand, Vec3::new(0.3, 1.8, 0.3));
        let mut ctx = TickContext {
            now: 0.3,
            frame: &one_hand,
            slides: &mut h.slides,
        };
        h.detector.update(&mut ctx, &mut h.events);
        assert_eq!(h.detector.hands_up().status(), GestureStatus::MissingInput);
    }
}
