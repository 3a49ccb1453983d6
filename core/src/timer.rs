//! Countdown timers advanced once per tick by their owner.

/// Behaviour of a [`Timer`] once it completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerMode {
    /// Elapsed ticks reset to zero as soon as the timer completes.
    Repeating,
    /// The timer stays finished once triggered.
    Fixed,
}

/// Countdown counter that signals when a target tick count has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timer {
    duration: u32,
    elapsed: u32,
    mode: TimerMode,
}

impl Timer {
    /// Creates a timer that fires every `duration` ticks.
    ///
    /// A zero duration is treated as one tick so the timer fires at most
    /// once per advance.
    #[must_use]
    pub const fn repeating(duration: u32) -> Self {
        let duration = if duration == 0 { 1 } else { duration };
        Self {
            duration,
            elapsed: 0,
            mode: TimerMode::Repeating,
        }
    }

    /// Creates a timer that finishes once after `duration` ticks.
    #[must_use]
    pub const fn fixed(duration: u32) -> Self {
        Self {
            duration,
            elapsed: 0,
            mode: TimerMode::Fixed,
        }
    }

    /// Target tick count.
    #[must_use]
    pub const fn duration(&self) -> u32 {
        self.duration
    }

    /// Ticks accumulated since the timer was created or last reset.
    #[must_use]
    pub const fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Completion behaviour of the timer.
    #[must_use]
    pub const fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Reports whether the elapsed count reached the duration.
    ///
    /// Repeating timers reset on completion, so this only observes `true`
    /// for fixed timers.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advances the timer by one tick.
    ///
    /// Returns `true` on the tick the timer completes. A fixed timer keeps
    /// returning `true` on every later advance.
    pub fn advance(&mut self) -> bool {
        if self.mode == TimerMode::Fixed && self.is_finished() {
            return true;
        }

        self.elapsed = self.elapsed.saturating_add(1);
        if !self.is_finished() {
            return false;
        }

        if self.mode == TimerMode::Repeating {
            self.elapsed = 0;
        }
        true
    }

    /// Clears the elapsed count so the timer starts over.
    pub fn restart(&mut self) {
        self.elapsed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeating_timer_fires_every_interval() {
        let mut timer = Timer::repeating(2);
        let fired: Vec<bool> = (0..6).map(|_| timer.advance()).collect();
        assert_eq!(fired, vec![false, true, false, true, false, true]);
        assert_eq!(timer.elapsed(), 0);
    }

    #[test]
    fn fixed_timer_stays_finished() {
        let mut timer = Timer::fixed(3);
        assert!(!timer.advance());
        assert!(!timer.advance());
        assert!(timer.advance());
        assert!(timer.is_finished());
        assert!(timer.advance(), "fixed timer must remain finished");
        assert_eq!(timer.elapsed(), 3);
    }

    #[test]
    fn zero_duration_repeating_timer_fires_once_per_tick() {
        let mut timer = Timer::repeating(0);
        assert_eq!(timer.duration(), 1);
        assert!(timer.advance());
        assert!(timer.advance());
    }

    #[test]
    fn restart_clears_progress() {
        let mut timer = Timer::fixed(1);
        assert!(timer.advance());
        timer.restart();
        assert!(!timer.is_finished());
        assert!(timer.advance());
    }
}
