//! Wall-clock ceiling for the sub-step loop of a single update.

use std::time::Duration;

use instant::Instant;

/// Time source for [`FrameBudget`]. Returns time elapsed since some fixed origin.
pub trait Clock {
    fn elapsed(&mut self) -> Duration;
}

/// The real monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn elapsed(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that advances by a fixed amount every time it is read.
#[derive(Debug, Clone, Copy, Default)]
pub struct SteppingClock {
    now: Duration,
    step: Duration,
}

impl SteppingClock {
    pub fn new(step: Duration) -> Self {
        Self {
            now: Duration::ZERO,
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn elapsed(&mut self) -> Duration {
        let now = self.now;
        self.now += self.step;
        now
    }
}

/// Decides whether another sub-step still fits in the frame.
///
/// A sub-step only starts if the time already spent plus the duration of the previous sub-step
/// stays below the limit, so the check is polled between sub-steps and never inside one.
pub struct FrameBudget<'a, C: Clock> {
    clock: &'a mut C,
    limit: Duration,
    start: Duration,
    step_start: Duration,
    last_step: Duration,
}

impl<'a, C: Clock> FrameBudget<'a, C> {
    pub fn start(clock: &'a mut C, limit: Duration) -> Self {
        let start = clock.elapsed();
        Self {
            clock,
            limit,
            start,
            step_start: start,
            last_step: Duration::ZERO,
        }
    }

    /// Poll before a sub-step. Returns false once the budget is spent.
    pub fn begin_step(&mut self) -> bool {
        let now = self.clock.elapsed();
        let spent = now.saturating_sub(self.start);
        if spent + self.last_step >= self.limit {
            return false;
        }
        self.step_start = now;
        true
    }

    /// Record the end of the sub-step started by the last successful [`Self::begin_step`].
    pub fn end_step(&mut self) {
        let now = self.clock.elapsed();
        self.last_step = now.saturating_sub(self.step_start);
    }
}
