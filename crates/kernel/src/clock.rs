use std::time::{Duration, Instant};

pub const DEFAULT_FPS: u32 = 60;

/// Fixed frame budget pacing.
///
/// A frame is due once the budget has elapsed since the previous frame
/// started. The caller sleeps (or waits on its event loop) until
/// [`FrameClock::deadline`] instead of spinning.
#[derive(Debug, Clone)]
pub struct FrameClock {
    budget: Duration,
    start: Instant,
    deadline: Instant,
    frames: u64,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self::starting_at(fps, Instant::now())
    }

    /// Clock whose tick zero is `start`. The first frame is due immediately.
    pub fn starting_at(fps: u32, start: Instant) -> Self {
        Self {
            budget: Self::budget_for(fps),
            start,
            deadline: start,
            frames: 0,
        }
    }

    /// Whole-millisecond budget, as `1000 / fps` (16 ms at 60 FPS).
    pub fn budget_for(fps: u32) -> Duration {
        Duration::from_millis(1000 / u64::from(fps.max(1)))
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// When the next frame may start.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Start a frame at `now` and return the elapsed ticks for it.
    ///
    /// The next deadline is measured from `now`, so an overrunning frame
    /// delays the following one rather than triggering a catch-up burst.
    pub fn begin_frame(&mut self, now: Instant) -> u64 {
        self.deadline = now + self.budget;
        self.frames += 1;
        self.elapsed_ticks(now)
    }

    /// Milliseconds since the clock started.
    pub fn elapsed_ticks(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.start).as_millis() as u64
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn sixty_fps_is_sixteen_ms() {
        assert_eq!(FrameClock::budget_for(60), ms(16));
        assert_eq!(FrameClock::budget_for(30), ms(33));
    }

    #[test]
    fn zero_fps_does_not_divide_by_zero() {
        assert_eq!(FrameClock::budget_for(0), ms(1000));
    }

    #[test]
    fn first_frame_is_due_immediately() {
        let t0 = Instant::now();
        let clock = FrameClock::starting_at(60, t0);
        assert!(clock.is_due(t0));
        assert_eq!(clock.frames(), 0);
    }

    #[test]
    fn next_frame_waits_for_budget() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(60, t0);
        assert_eq!(clock.begin_frame(t0), 0);
        assert!(!clock.is_due(t0 + ms(10)));
        assert!(clock.is_due(t0 + ms(16)));
        assert_eq!(clock.deadline(), t0 + ms(16));
    }

    #[test]
    fn overrun_rebases_deadline() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(60, t0);
        clock.begin_frame(t0);
        let late = t0 + ms(50);
        assert_eq!(clock.begin_frame(late), 50);
        assert_eq!(clock.deadline(), late + ms(16));
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn elapsed_ticks_before_start_is_zero() {
        let t0 = Instant::now() + ms(5);
        let clock = FrameClock::starting_at(60, t0);
        assert_eq!(clock.elapsed_ticks(Instant::now()), 0);
    }
}
