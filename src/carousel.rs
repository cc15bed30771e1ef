//! Three-panel slide carousel.
//!
//! Three physical panels form a ring over the logical window
//! `{current - 1, current, current + 1}` of the slide list. A slide shifts
//! all panels by one panel width over a short transition, then rotates the
//! ring so the panel that scrolled off one edge re-enters at the other edge
//! carrying the next image.

use std::fmt;
use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Direction of a slide request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideDirection {
    /// Towards the end of the list (+1)
    Next,
    /// Towards the start of the list (-1)
    Previous,
}

impl SlideDirection {
    pub fn sign(self) -> i32 {
        match self {
            SlideDirection::Next => 1,
            SlideDirection::Previous => -1,
        }
    }

    pub fn from_sign(sign: i32) -> Option<Self> {
        match sign {
            1 => Some(SlideDirection::Next),
            -1 => Some(SlideDirection::Previous),
            _ => None,
        }
    }
}

impl fmt::Display for SlideDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlideDirection::Next => write!(f, "next"),
            SlideDirection::Previous => write!(f, "previous"),
        }
    }
}

/// Result of a `slide` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideOutcome {
    /// Transition started
    Started,
    /// Dropped because a transition is already in flight
    Busy,
    /// Dropped because the list ends in that direction
    AtEnd,
}

/// One of the three ring positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSlot {
    /// Physical panel occupying this slot
    pub panel: usize,
    /// Index into the slide list, `None` past either end
    pub image: Option<usize>,
}

/// Linear offset interpolation for one slide, advanced by `tick`
#[derive(Debug, Clone)]
pub struct SlideTransition {
    direction: SlideDirection,
    start: [Vec3; 3],
    target: [Vec3; 3],
    duration: f32,
    elapsed: f32,
}

impl SlideTransition {
    pub fn new(direction: SlideDirection, start: [Vec3; 3], target: [Vec3; 3], duration: f32) -> Self {
        Self {
            direction,
            start,
            target,
            duration: duration.max(0.001),
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds and return the interpolated offsets
    pub fn tick(&mut self, dt: f32) -> [Vec3; 3] {
        self.elapsed += dt.max(0.0);
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        let mut out = self.start;
        for (i, offset) in out.iter_mut().enumerate() {
            *offset = self.start[i].lerp(self.target[i], t);
        }
        out
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn direction(&self) -> SlideDirection {
        self.direction
    }

    /// Progress in [0, 1]
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }
}

/// Slide carousel over an externally owned, read-only image list
#[derive(Debug)]
pub struct SlideCarousel {
    images: Arc<[String]>,
    current_index: usize,
    /// Slot order: previous, current, next
    slots: [PanelSlot; 3],
    /// Offsets indexed by physical panel
    offsets: [Vec3; 3],
    panel_width: f32,
    transition_duration: f32,
    transition: Option<SlideTransition>,
}

impl SlideCarousel {
    /// Create a carousel showing `start_index` (clamped into range)
    pub fn new(
        images: Arc<[String]>,
        start_index: usize,
        panel_width: f32,
        transition_duration: f32,
    ) -> Self {
        let current_index = start_index.min(images.len().saturating_sub(1));
        let mut carousel = Self {
            images,
            current_index,
            slots: [
                PanelSlot { panel: 0, image: None },
                PanelSlot { panel: 1, image: None },
                PanelSlot { panel: 2, image: None },
            ],
            offsets: [Vec3::ZERO; 3],
            panel_width,
            transition_duration,
            transition: None,
        };
        carousel.layout();
        tracing::debug!(
            "Carousel ready: {} slides, starting at {}",
            carousel.slide_count(),
            carousel.current_index
        );
        carousel
    }

    pub fn slide_count(&self) -> usize {
        self.images.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// True iff the list does not end in `direction`
    pub fn can_slide(&self, direction: SlideDirection) -> bool {
        let count = self.slide_count();
        if count == 0 {
            return false;
        }
        match direction {
            SlideDirection::Next => self.current_index + 1 < count,
            SlideDirection::Previous => self.current_index > 0,
        }
    }

    /// Begin a transition. Requests while animating or at an end are dropped.
    pub fn slide(&mut self, direction: SlideDirection) -> SlideOutcome {
        if self.is_animating() {
            tracing::debug!("Slide {} ignored: transition in flight", direction);
            return SlideOutcome::Busy;
        }
        if !self.can_slide(direction) {
            tracing::debug!(
                "Slide {} ignored: at slide {} of {}",
                direction,
                self.current_index,
                self.slide_count()
            );
            return SlideOutcome::AtEnd;
        }

        let start = self.offsets;
        let shift = Vec3::X * (-(direction.sign() as f32) * self.panel_width);
        let target = start.map(|offset| offset + shift);
        self.transition = Some(SlideTransition::new(
            direction,
            start,
            target,
            self.transition_duration,
        ));
        tracing::debug!("Slide {} started from {}", direction, self.current_index);
        SlideOutcome::Started
    }

    /// Advance the running transition. Returns the new current index on the
    /// tick the transition completes.
    pub fn tick(&mut self, dt: f32) -> Option<usize> {
        let transition = self.transition.as_mut()?;
        self.offsets = transition.tick(dt);
        if !transition.is_done() {
            return None;
        }

        let direction = transition.direction();
        self.transition = None;
        self.complete(direction);
        Some(self.current_index)
    }

    fn complete(&mut self, direction: SlideDirection) {
        match direction {
            SlideDirection::Next => {
                self.slots.rotate_left(1);
                self.current_index += 1;
            }
            SlideDirection::Previous => {
                self.slots.rotate_right(1);
                self.current_index -= 1;
            }
        }
        self.layout();
        tracing::info!(
            "Slide {} complete: now showing {} of {}",
            direction,
            self.current_index + 1,
            self.slide_count()
        );
    }

    /// Snap panels to their slot positions and assign the window's images
    fn layout(&mut self) {
        let count = self.slide_count();
        for (slot_index, slot) in self.slots.iter_mut().enumerate() {
            let logical = self.current_index as i64 + slot_index as i64 - 1;
            slot.image = if logical >= 0 && (logical as usize) < count {
                Some(logical as usize)
            } else {
                None
            };
            self.offsets[slot.panel] = Vec3::X * ((slot_index as f32 - 1.0) * self.panel_width);
        }
    }

    pub fn slots(&self) -> [PanelSlot; 3] {
        self.slots
    }

    /// Images shown in slot order (previous, current, next)
    pub fn slot_images(&self) -> [Option<&str>; 3] {
        self.slots.map(|slot| slot.image.map(|i| self.images[i].as_str()))
    }

    /// Panel offsets in slot order
    pub fn slot_offsets(&self) -> [Vec3; 3] {
        self.slots.map(|slot| self.offsets[slot.panel])
    }

    /// Panel offsets indexed by physical panel
    pub fn panel_offsets(&self) -> [Vec3; 3] {
        self.offsets
    }

    pub fn current_image(&self) -> Option<&str> {
        self.images.get(self.current_index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(n: usize) -> Arc<[String]> {
        (0..n).map(|i| format!("img{}", i)).collect::<Vec<_>>().into()
    }

    fn finish(carousel: &mut SlideCarousel) -> Option<usize> {
        for _ in 0..100 {
            if let Some(index) = carousel.tick(0.05) {
                return Some(index);
            }
        }
        None
    }

    #[test]
    fn test_initial_window() {
        let carousel = SlideCarousel::new(images(5), 2, 100.0, 0.2);
        assert_eq!(carousel.current_index(), 2);
        assert_eq!(carousel.slot_images(), [Some("img1"), Some("img2"), Some("img3")]);
        assert_eq!(
            carousel.slot_offsets(),
            [Vec3::new(-100.0, 0.0, 0.0), Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0)]
        );
    }

    #[test]
    fn test_slide_next_scenario() {
        let mut carousel = SlideCarousel::new(images(5), 2, 100.0, 0.2);

        assert_eq!(carousel.slide(SlideDirection::Next), SlideOutcome::Started);
        assert_eq!(finish(&mut carousel), Some(3));
        assert_eq!(carousel.slot_images(), [Some("img2"), Some("img3"), Some("img4")]);

        assert_eq!(carousel.slide(SlideDirection::Next), SlideOutcome::Started);
        assert_eq!(finish(&mut carousel), Some(4));
        assert_eq!(carousel.slot_images(), [Some("img3"), Some("img4"), None]);
        assert!(!carousel.can_slide(SlideDirection::Next));
        assert_eq!(carousel.slide(SlideDirection::Next), SlideOutcome::AtEnd);
    }

    #[test]
    fn test_round_trip_restores_slots() {
        let mut carousel = SlideCarousel::new(images(4), 1, 100.0, 0.2);
        let before = carousel.slots();
        let offsets = carousel.slot_offsets();

        carousel.slide(SlideDirection::Next);
        finish(&mut carousel);
        carousel.slide(SlideDirection::Previous);
        finish(&mut carousel);

        assert_eq!(carousel.current_index(), 1);
        assert_eq!(carousel.slots(), before);
        assert_eq!(carousel.slot_offsets(), offsets);
    }

    #[test]
    fn test_slide_while_animating_is_dropped() {
        let mut carousel = SlideCarousel::new(images(5), 0, 100.0, 0.2);
        carousel.slide(SlideDirection::Next);
        carousel.tick(0.05);

        assert!(carousel.is_animating());
        assert_eq!(carousel.slide(SlideDirection::Next), SlideOutcome::Busy);
        assert_eq!(carousel.slide(SlideDirection::Previous), SlideOutcome::Busy);
        assert_eq!(carousel.current_index(), 0);

        assert_eq!(finish(&mut carousel), Some(1));
        assert!(!carousel.is_animating());
    }

    #[test]
    fn test_offsets_interpolate_linearly() {
        let mut carousel = SlideCarousel::new(images(3), 0, 100.0, 0.2);
        carousel.slide(SlideDirection::Next);
        carousel.tick(0.1);

        let offsets = carousel.slot_offsets();
        assert!((offsets[1].x + 50.0).abs() < 1e-3);
        assert!((offsets[2].x - 50.0).abs() < 1e-3);
        // Index only changes when the transition completes
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn test_edges() {
        let carousel = SlideCarousel::new(images(3), 0, 100.0, 0.2);
        assert!(!carousel.can_slide(SlideDirection::Previous));
        assert!(carousel.can_slide(SlideDirection::Next));
        assert_eq!(carousel.slot_images(), [None, Some("img0"), Some("img1")]);
    }

    #[test]
    fn test_empty_list() {
        let mut carousel = SlideCarousel::new(images(0), 3, 100.0, 0.2);
        assert_eq!(carousel.slide_count(), 0);
        assert_eq!(carousel.current_index(), 0);
        assert!(!carousel.can_slide(SlideDirection::Next));
        assert!(!carousel.can_slide(SlideDirection::Previous));
        assert_eq!(carousel.slide(SlideDirection::Next), SlideOutcome::AtEnd);
        assert_eq!(carousel.slot_images(), [None, None, None]);
        assert!(carousel.current_image().is_none());
    }

    #[test]
    fn test_start_index_clamped() {
        let carousel = SlideCarousel::new(images(2), 9, 100.0, 0.2);
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn test_index_stays_in_range_under_random_walk() {
        let mut carousel = SlideCarousel::new(images(4), 0, 100.0, 0.2);
        let pattern = [1, 1, 1, 1, 1, -1, 1, -1, -1, -1, -1, -1, 1];
        for sign in pattern {
            let direction = SlideDirection::from_sign(sign).unwrap();
            carousel.slide(direction);
            finish(&mut carousel);
            let index = carousel.current_index();
            assert!(index < 4);
            assert_eq!(carousel.can_slide(SlideDirection::Next), index != 3);
            assert_eq!(carousel.can_slide(SlideDirection::Previous), index != 0);
        }
    }

    #[test]
    fn test_direction_sign() {
        assert_eq!(SlideDirection::Next.sign(), 1);
        assert_eq!(SlideDirection::from_sign(-1), Some(SlideDirection::Previous));
        assert_eq!(SlideDirection::from_sign(0), None);
    }
}
