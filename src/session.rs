/// Gesture session
///
/// Owns the carousel, the recognizers and the action gate, and advances
/// them together. The caller supplies the clock: `tick(dt, frame)` once per
/// frame, `apply(command)` whenever an outside input arrives.
use std::sync::Arc;

use crate::carousel::SlideCarousel;
use crate::config::Config;
use crate::gesture::{
    ClapDetector, Hand, HeadBowDetector, Recognizer, RecognizerSnapshot, SwipeDetector,
    TickContext,
};
use crate::landmarks::Frame;
use crate::messaging::{Command, ContactAction, ContactStatus, Event, SlideSource};
use crate::state::ActionGate;

pub struct GestureSession {
    carousel: SlideCarousel,
    swipe_right: SwipeDetector,
    swipe_left: SwipeDetector,
    clap: ClapDetector,
    head_bow: HeadBowDetector,
    gate: ActionGate,
    start_enabled: bool,
    tracking_ready: bool,
    now: f64,
    ticks: u64,
}

impl GestureSession {
    pub fn new(config: &Config, images: Arc<[String]>) -> Self {
        Self::with_gate(config, images, ActionGate::new())
    }

    /// Build a session around an existing gate handle
    pub fn with_gate(config: &Config, images: Arc<[String]>, gate: ActionGate) -> Self {
        let carousel = SlideCarousel::new(
            images,
            config.carousel.start_index,
            config.carousel.panel_width,
            config.carousel.transition_seconds,
        );
        Self {
            carousel,
            swipe_right: SwipeDetector::new(Hand::Right, &config.swipe, gate.clone()),
            swipe_left: SwipeDetector::new(Hand::Left, &config.swipe, gate.clone()),
            clap: ClapDetector::new(&config.clap, gate.clone()),
            head_bow: HeadBowDetector::new(&config.head_bow, gate.clone()),
            gate,
            start_enabled: config.actions.start_enabled,
            tracking_ready: false,
            now: 0.0,
            ticks: 0,
        }
    }

    /// Advance the session clock by `dt` seconds and sample `frame`
    pub fn tick(&mut self, dt: f32, frame: &Frame) -> Vec<Event> {
        let mut events = Vec::new();

        if self.gate.apply_default(self.start_enabled) {
            events.push(Event::ActionsToggled {
                enabled: self.start_enabled,
            });
        }

        self.now += f64::from(dt.max(0.0));
        self.ticks += 1;
        self.tracking_ready = frame.ready;

        if let Some(index) = self.carousel.tick(dt) {
            events.push(Event::SlideCompleted { index });
        }

        let recognizers: [&mut dyn Recognizer; 4] = [
            &mut self.swipe_right,
            &mut self.swipe_left,
            &mut self.clap,
            &mut self.head_bow,
        ];
        let mut ctx = TickContext {
            now: self.now,
            frame,
            slides: &mut self.carousel,
        };
        for recognizer in recognizers {
            recognizer.update(&mut ctx, &mut events);
        }

        events
    }

    /// Apply an outside request
    pub fn apply(&mut self, command: Command) -> Vec<Event> {
        tracing::debug!("Command: {}", command.description());
        let mut events = Vec::new();

        match command {
            Command::ToggleActions => {
                let enabled = self.gate.toggle();
                events.push(Event::ActionsToggled { enabled });
            }
            Command::Slide { direction } => {
                let outcome = self.carousel.slide(direction);
                events.push(Event::SlideRequested {
                    source: SlideSource::Keyboard,
                    direction,
                    outcome,
                });
            }
            Command::LimbContact { zone, limb } => {
                let status = match limb {
                    None => ContactStatus::NoInput,
                    Some(_) if !self.tracking_ready => ContactStatus::NotReady,
                    Some(limb) if limb != zone.expected_limb() => ContactStatus::Ignored,
                    Some(_) => ContactStatus::Handled,
                };
                if status != ContactStatus::Handled {
                    events.push(Event::ContactIgnored { zone, status });
                    return events;
                }

                tracing::info!("Contact on {}", zone);
                match zone.action() {
                    ContactAction::Slide(direction) => {
                        let outcome = self.carousel.slide(direction);
                        events.push(Event::SlideRequested {
                            source: SlideSource::Contact(zone),
                            direction,
                            outcome,
                        });
                    }
                    ContactAction::TogglePointer => events.push(Event::PointerToggleRequested),
                    ContactAction::None => {}
                }
            }
        }

        events
    }

    /// Seconds since the first tick
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn carousel(&self) -> &SlideCarousel {
        &self.carousel
    }

    pub fn gate(&self) -> &ActionGate {
        &self.gate
    }

    pub fn clap(&self) -> &ClapDetector {
        &self.clap
    }

    pub fn head_bow(&self) -> &HeadBowDetector {
        &self.head_bow
    }

    pub fn swipe(&self, hand: Hand) -> &SwipeDetector {
        match hand {
            Hand::Right => &self.swipe_right,
            Hand::Left => &self.swipe_left,
        }
    }

    /// Diagnostics for every recognizer, hands-up included
    pub fn snapshots(&self) -> Vec<RecognizerSnapshot> {
        vec![
            self.swipe_right.snapshot(self.now),
            self.swipe_left.snapshot(self.now),
            self.clap.snapshot(self.now),
            self.clap.hands_up().snapshot(self.now),
            self.head_bow.snapshot(self.now),
        ]
    }
}
