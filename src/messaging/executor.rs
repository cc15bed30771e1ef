/// Feedback executor
///
/// Carries out the side-effect events a tick produced: audio cues and
/// notifications. Failures are logged and never reach the tick loop.

use super::events::Event;
use crate::audio_system::CueSink;
use crate::notify::{NotificationSink, NotifyRequest};

/// Routes feedback events to their sinks
pub struct FeedbackExecutor<C, N> {
    cues: C,
    notifier: N,
}

impl<C: CueSink, N: NotificationSink> FeedbackExecutor<C, N> {
    pub fn new(cues: C, notifier: N) -> Self {
        Self { cues, notifier }
    }

    /// Execute every feedback event in order; returns how many ran
    pub fn execute(&self, events: &[Event]) -> usize {
        let mut executed = 0;
        for event in events {
            match event {
                Event::CueRequested { cue } => {
                    if let Err(e) = self.cues.play(*cue) {
                        tracing::warn!("Failed to play cue {}: {}", cue, e);
                    }
                    executed += 1;
                }
                Event::NotificationRequested { kind, url, time } => {
                    self.notifier.notify(NotifyRequest {
                        url: url.clone(),
                        kind: *kind,
                        time: *time,
                    });
                    executed += 1;
                }
                Event::PointerToggleRequested => {
                    // The pointer lives in the rendering layer
                    tracing::info!("Pointer toggle requested");
                    executed += 1;
                }
                other => tracing::trace!("{}", other.description()),
            }
        }
        executed
    }

    pub fn cues(&self) -> &C {
        &self.cues
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
