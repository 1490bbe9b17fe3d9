use std::time::Duration;

pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);
pub const ADVANCE_LOCKOUT: Duration = Duration::from_millis(1000);

/// Turns touch taps into at most one advance per lockout window.
#[derive(Debug, Clone)]
pub struct TapDetector {
    window: Duration,
    lockout: Duration,
    previous_tap: Option<Duration>,
    last_advance: Option<Duration>,
}

impl TapDetector {
    pub fn new() -> Self {
        Self::with_timing(DOUBLE_TAP_WINDOW, ADVANCE_LOCKOUT)
    }

    pub fn with_timing(window: Duration, lockout: Duration) -> Self {
        Self {
            window,
            lockout,
            previous_tap: None,
            last_advance: None,
        }
    }

    /// Records a tap at `now` (monotonic) and returns true when it completes a double tap.
    pub fn tap(&mut self, now: Duration) -> bool {
        let double = self.previous_tap.is_some_and(|previous| {
            now > previous && now - previous < self.window
        });
        let locked = self
            .last_advance
            .is_some_and(|last| now.saturating_sub(last) <= self.lockout);
        self.previous_tap = Some(now);

        if double && !locked {
            self.last_advance = Some(now);
            return true;
        }
        false
    }
}

impl Default for TapDetector {
    fn default() -> Self {
        Self::new()
    }
}
