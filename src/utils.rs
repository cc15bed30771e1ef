/// Tick-clock timing helpers shared by the recognizers.
///
/// All times are seconds on the session clock, supplied by the caller.

/// Cooldown helper to prevent rapid repeated triggers
#[derive(Debug, Clone)]
pub struct Cooldown {
    last_trigger: Option<f64>,
    duration: f64,
}

impl Cooldown {
    /// Create a new cooldown with the specified duration in seconds
    pub fn new(duration: f64) -> Self {
        Self {
            last_trigger: None,
            duration: duration.max(0.0),
        }
    }

    /// Check if enough time has passed since the last trigger
    pub fn is_ready(&self, now: f64) -> bool {
        match self.last_trigger {
            None => true,
            Some(last) => now - last >= self.duration,
        }
    }

    /// Record a trigger at `now`
    pub fn mark(&mut self, now: f64) {
        self.last_trigger = Some(now);
    }

    /// Check and mark in one step.
    /// Returns true if we should trigger, false if still cooling down.
    pub fn should_trigger(&mut self, now: f64) -> bool {
        if self.is_ready(now) {
            self.mark(now);
            true
        } else {
            false
        }
    }

    /// Seconds left before the next trigger is allowed
    pub fn remaining(&self, now: f64) -> f64 {
        match self.last_trigger {
            None => 0.0,
            Some(last) => (self.duration - (now - last)).max(0.0),
        }
    }

    pub fn last_trigger(&self) -> Option<f64> {
        self.last_trigger
    }

    /// Reset the cooldown
    #[allow(dead_code)]
    pub fn reset(&mut self) {
        self.last_trigger = None;
    }
}

/// Timestamps of recent detections, pruned to a rolling window
#[derive(Debug, Clone)]
pub struct RollingWindow {
    stamps: Vec<f64>,
    window: f64,
}

impl RollingWindow {
    pub fn new(window: f64) -> Self {
        Self {
            stamps: Vec::new(),
            window: window.max(0.0),
        }
    }

    /// Add a timestamp, drop the ones older than the window and return the count
    pub fn push(&mut self, now: f64) -> usize {
        self.stamps.push(now);
        let window = self.window;
        self.stamps.retain(|&t| now - t <= window);
        self.stamps.len()
    }

    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    pub fn clear(&mut self) {
        self.stamps.clear();
    }

    pub fn window(&self) -> f64 {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown() {
        let mut cooldown = Cooldown::new(0.1);

        // First trigger should succeed
        assert!(cooldown.should_trigger(0.0));

        // Immediate second trigger should fail
        assert!(!cooldown.should_trigger(0.05));

        // Should trigger again once the period has elapsed
        assert!(cooldown.should_trigger(0.11));
    }

    #[test]
    fn test_cooldown_reset() {
        let mut cooldown = Cooldown::new(1.0);
        assert!(cooldown.should_trigger(0.0));
        assert!(!cooldown.should_trigger(0.2));

        cooldown.reset();

        assert!(cooldown.should_trigger(0.3));
    }

    #[test]
    fn test_cooldown_remaining() {
        let mut cooldown = Cooldown::new(0.5);
        assert_eq!(cooldown.remaining(3.0), 0.0);

        cooldown.mark(1.0);
        assert!((cooldown.remaining(1.2) - 0.3).abs() < 1e-9);
        assert_eq!(cooldown.remaining(2.0), 0.0);
        assert_eq!(cooldown.last_trigger(), Some(1.0));
    }

    #[test]
    fn test_rolling_window_prunes_old_entries() {
        let mut window = RollingWindow::new(2.0);

        assert_eq!(window.push(0.0), 1);
        assert_eq!(window.push(1.0), 2);
        assert_eq!(window.push(1.5), 3);
        // 0.0 falls out of the window
        assert_eq!(window.push(2.5), 3);
        // 1.0 and 1.5 fall out
        assert_eq!(window.push(4.0), 2);

        window.clear();
        assert!(window.is_empty());
    }
}
