/// Head bow recognizer.
///
/// The head must drop to `height_threshold` to fire and climb back to the
/// strictly higher `reset_height` before it can fire again.
use super::recognizer::{
    BandState, GestureStatus, Hysteresis, Recognizer, RecognizerSnapshot, StatusTracker,
    TickContext,
};
use crate::config::HeadBowConfig;
use crate::landmarks::Landmark;
use crate::messaging::{Event, Gesture};
use crate::notify::NotifyKind;
use crate::state::ActionGate;
use crate::utils::Cooldown;

pub struct HeadBowDetector {
    band: Hysteresis,
    notify_on_bow: bool,
    notify_url: String,
    notify_cooldown: Cooldown,
    gate: ActionGate,
    status: StatusTracker,
    last_height: Option<f32>,
    detected: u64,
    notified: u64,
}

impl HeadBowDetector {
    pub fn new(config: &HeadBowConfig, gate: ActionGate) -> Self {
        Self {
            band: Hysteresis::new(config.height_threshold, config.reset_height),
            notify_on_bow: config.notify_on_bow,
            notify_url: config.notify_url.trim().to_string(),
            notify_cooldown: Cooldown::new(config.notify_cooldown),
            gate,
            status: StatusTracker::new("head-bow"),
            last_height: None,
            detected: 0,
            notified: 0,
        }
    }

    /// True between a bow and the head returning to the reset height
    pub fn is_holding(&self) -> bool {
        self.band.is_holding()
    }

    pub fn last_height(&self) -> Option<f32> {
        self.last_height
    }

    fn evaluate(&mut self, ctx: &mut TickContext<'_>, events: &mut Vec<Event>) -> GestureStatus {
        if !ctx.frame.ready {
            return GestureStatus::NotReady;
        }
        let Some(head) = ctx.frame.local(Landmark::Head) else {
            return GestureStatus::MissingInput;
        };
        self.last_height = Some(head.y);

        match self.band.update(head.y) {
            BandState::Reset => return GestureStatus::Reset,
            BandState::Between => return GestureStatus::AboveThreshold,
            BandState::Holding => return GestureStatus::Holding,
            BandState::Triggered => {}
        }

        let now = ctx.now;
        self.detected += 1;
        events.push(Event::HeadBowDetected { time: now });

        if !self.notify_cooldown.is_ready(now) {
            return GestureStatus::Cooldown;
        }
        self.notify_cooldown.mark(now);

        if !self.gate.is_enabled() {
            events.push(Event::FeedbackSuppressed {
                gesture: Gesture::HeadBow,
            });
            return GestureStatus::Suppressed;
        }
        if !self.notify_on_bow || self.notify_url.is_empty() {
            return GestureStatus::Triggered;
        }

        self.notified += 1;
        tracing::info!("Head bow at {:.2}s (y={:.3})", now, head.y);
        events.push(Event::NotificationRequested {
            kind: NotifyKind::Bow,
            url: self.notify_url.clone(),
            time: now,
        });
        GestureStatus::Notified
    }
}

impl Recognizer for HeadBowDetector {
    fn update(&mut self, ctx: &mut TickContext<'_>, events: &mut Vec<Event>) -> GestureStatus {
        let status = self.evaluate(ctx, events);
        self.status.set(status)
    }

    fn name(&self) -> &'static str {
        "head-bow"
    }

    fn status(&self) -> GestureStatus {
        self.status.get()
    }

    fn snapshot(&self, now: f64) -> RecognizerSnapshot {
        RecognizerSnapshot {
            name: "head-bow",
            status: self.status.get(),
            detected: self.detected,
            fired: self.notified,
            notified: self.notified,
            cooldown_remaining: self.notify_cooldown.remaining(now),
        }
    }
}
