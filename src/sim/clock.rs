//! Virtual timers
//!
//! Timers count down in milliseconds of virtual time handed to them by the
//! controller. Nothing here reads a wall clock.

use serde::{Deserialize, Serialize};

use super::state::Session;
use crate::consts::COUNTDOWN_TICK_MS;

/// A one-shot deadline measured in remaining milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Timer {
    due_in_ms: u64,
}

impl Timer {
    pub fn new(due_in_ms: u64) -> Self {
        Self { due_in_ms }
    }

    #[inline]
    pub fn remaining(&self) -> u64 {
        self.due_in_ms
    }

    #[inline]
    pub fn is_due(&self) -> bool {
        self.due_in_ms == 0
    }

    /// Consume up to `ms`; never underflows
    #[inline]
    pub fn elapse(&mut self, ms: u64) {
        self.due_in_ms = self.due_in_ms.saturating_sub(ms);
    }

    pub fn reset(&mut self, due_in_ms: u64) {
        self.due_in_ms = due_in_ms;
    }
}

/// The countdown: one second off the clock per period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameClock {
    period_ms: u64,
    timer: Timer,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(COUNTDOWN_TICK_MS)
    }
}

impl GameClock {
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            timer: Timer::new(period_ms),
        }
    }

    /// Restart the current period (used when a level starts)
    pub fn restart(&mut self) {
        self.timer.reset(self.period_ms);
    }

    /// Milliseconds until the next countdown tick
    #[inline]
    pub fn until_tick(&self) -> u64 {
        self.timer.remaining()
    }

    #[inline]
    pub fn elapse(&mut self, ms: u64) {
        self.timer.elapse(ms);
    }

    /// Fire if due. Returns true when the clock hit zero on this tick.
    pub fn fire(&mut self, session: &mut Session) -> bool {
        if !self.timer.is_due() {
            return false;
        }
        self.timer.reset(self.period_ms);
        session.time_left = session.time_left.saturating_sub(1);
        session.time_left == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_saturates() {
        let mut timer = Timer::new(100);
        timer.elapse(40);
        assert_eq!(timer.remaining(), 60);
        assert!(!timer.is_due());
        timer.elapse(500);
        assert!(timer.is_due());
    }

    #[test]
    fn test_clock_counts_down_once_per_period() {
        let mut clock = GameClock::default();
        let mut session = Session::new(3);

        clock.elapse(999);
        assert!(!clock.fire(&mut session));
        assert_eq!(session.time_left, 3);

        clock.elapse(1);
        assert!(!clock.fire(&mut session));
        assert_eq!(session.time_left, 2);
        assert_eq!(clock.until_tick(), 1000);

        clock.elapse(1000);
        assert!(!clock.fire(&mut session));
        clock.elapse(1000);
        assert!(clock.fire(&mut session));
        assert_eq!(session.time_left, 0);
    }

    #[test]
    fn test_clock_never_goes_negative() {
        let mut clock = GameClock::new(10);
        let mut session = Session::new(0);
        clock.elapse(10);
        assert!(clock.fire(&mut session));
        assert_eq!(session.time_left, 0);
    }
}
