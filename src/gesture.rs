//! Timer-agnostic gesture state machines.
//!
//! The UI owns the actual timer; these types only decide what a sequence of
//! press/release/expire events means, which keeps them testable off-browser.

/// Outcome of releasing a hold gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldRelease {
    /// Released before the hold duration elapsed.
    Tap,
    /// The duration elapsed but the timer had not run yet; the release
    /// fires the hold and the owner must confirm it now.
    Fired,
    /// The hold had already fired; the release only ends the gesture.
    AlreadyFired,
    /// Nothing was pressed.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum HoldState {
    Idle,
    Pressed { started_at: f64 },
    Fired,
}

/// Press-and-hold detector. Times are milliseconds from any monotonic clock.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldGesture {
    duration_ms: u32,
    state: HoldState,
    swallow_click: bool,
}

impl HoldGesture {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            state: HoldState::Idle,
            swallow_click: false,
        }
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self.state, HoldState::Pressed { .. })
    }

    /// Start a press. A press while one is already running is ignored.
    ///
    /// A new press drops any click suppression left by an earlier hold
    /// whose click never arrived.
    pub fn press(&mut self, now: f64) {
        if !self.is_pressed() {
            self.state = HoldState::Pressed { started_at: now };
            self.swallow_click = false;
        }
    }

    /// Timer callback. Returns `true` exactly once per press, when the hold
    /// has lasted at least the configured duration.
    pub fn expire(&mut self, now: f64) -> bool {
        match self.state {
            HoldState::Pressed { started_at } if now - started_at >= self.duration_ms as f64 => {
                self.state = HoldState::Fired;
                self.swallow_click = true;
                true
            }
            _ => false,
        }
    }

    /// The owner's timer ran for the full duration: fire if still pressed.
    pub fn elapse(&mut self) -> bool {
        match self.state {
            HoldState::Pressed { started_at } => self.expire(started_at + self.duration_ms as f64),
            _ => false,
        }
    }

    pub fn release(&mut self, now: f64) -> HoldRelease {
        if self.expire(now) {
            // Timer lagged behind the release; the hold still counts.
            self.state = HoldState::Idle;
            return HoldRelease::Fired;
        }
        let outcome = match self.state {
            HoldState::Pressed { .. } => HoldRelease::Tap,
            HoldState::Fired => HoldRelease::AlreadyFired,
            HoldState::Idle => HoldRelease::Ignored,
        };
        self.state = HoldState::Idle;
        outcome
    }

    /// Pointer left or the press was cancelled: abort without effect.
    /// Returns `true` if a running press was aborted.
    pub fn cancel(&mut self) -> bool {
        let was_pressed = self.is_pressed();
        self.state = HoldState::Idle;
        was_pressed
    }

    /// Whether the click that follows a fired hold must be swallowed.
    /// Consumes the flag, so only one click is suppressed.
    pub fn take_click(&mut self) -> bool {
        std::mem::take(&mut self.swallow_click)
    }
}

/// Treats a second simultaneous touch point as hovering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchHover {
    touches: u32,
}

impl TouchHover {
    pub fn touch_start(&mut self, active_touches: u32) {
        self.touches = active_touches;
    }

    pub fn touch_end(&mut self, remaining_touches: u32) {
        self.touches = remaining_touches;
    }

    pub fn is_hovering(&self) -> bool {
        self.touches >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_release_is_a_tap() {
        let mut hold = HoldGesture::new(550);
        hold.press(0.0);
        assert!(!hold.expire(100.0));
        assert_eq!(hold.release(200.0), HoldRelease::Tap);
        assert!(!hold.take_click());
    }

    #[test]
    fn hold_fires_once_and_swallows_one_click() {
        let mut hold = HoldGesture::new(900);
        hold.press(10.0);
        assert!(hold.expire(910.0));
        assert!(!hold.expire(2000.0));
        assert_eq!(hold.release(2100.0), HoldRelease::AlreadyFired);
        assert!(hold.take_click());
        assert!(!hold.take_click());
    }

    #[test]
    fn cancel_before_expiry_has_no_effect() {
        let mut hold = HoldGesture::new(900);
        hold.press(0.0);
        assert!(hold.cancel());
        assert!(!hold.expire(5000.0));
        assert_eq!(hold.release(5000.0), HoldRelease::Ignored);
        assert!(!hold.take_click());
        assert!(!hold.cancel());
    }

    #[test]
    fn late_timer_still_counts_on_release() {
        let mut hold = HoldGesture::new(550);
        hold.press(0.0);
        assert_eq!(hold.release(600.0), HoldRelease::Fired);
        assert!(hold.take_click());
        assert!(!hold.elapse());
    }

    #[test]
    fn release_distinguishes_timer_fire_from_late_fire() {
        let mut by_timer = HoldGesture::new(900);
        by_timer.press(0.0);
        assert!(by_timer.elapse());
        assert_eq!(by_timer.release(950.0), HoldRelease::AlreadyFired);

        let mut on_release = HoldGesture::new(900);
        on_release.press(0.0);
        assert_eq!(on_release.release(905.0), HoldRelease::Fired);
    }

    #[test]
    fn unclaimed_swallow_does_not_eat_the_next_tap() {
        let mut hold = HoldGesture::new(550);
        hold.press(0.0);
        assert!(hold.elapse());
        assert_eq!(hold.release(700.0), HoldRelease::AlreadyFired);
        // No click followed the hold (touch long-press, or an overlay took it).
        hold.press(5000.0);
        assert_eq!(hold.release(5100.0), HoldRelease::Tap);
        assert!(!hold.take_click());
    }

    #[test]
    fn elapse_fires_only_while_pressed() {
        let mut hold = HoldGesture::new(900);
        assert!(!hold.elapse());
        hold.press(0.0);
        assert!(hold.elapse());
        assert!(!hold.elapse());
        assert!(hold.take_click());
    }

    #[test]
    fn repeated_press_keeps_original_start() {
        let mut hold = HoldGesture::new(500);
        hold.press(0.0);
        hold.press(400.0);
        assert!(hold.expire(500.0));
    }

    #[test]
    fn second_finger_hovers() {
        let mut touch = TouchHover::default();
        touch.touch_start(1);
        assert!(!touch.is_hovering());
        touch.touch_start(2);
        assert!(touch.is_hovering());
        touch.touch_end(1);
        assert!(!touch.is_hovering());
    }
}
