use std::time::Duration;

/// End-of-frame pacer for a max-frame-rate budget.
///
/// When `max_fps` is positive and a frame finishes under its budget, the pacer
/// sleeps the remainder. Frames that overrun are never penalized: there is no
/// catch-up policy and no frame dropping, the next frame simply starts late.
#[derive(Debug, Copy, Clone)]
pub struct FramePacer {
    max_fps: u32,
}

impl FramePacer {
    pub const fn new(max_fps: u32) -> Self {
        Self { max_fps }
    }

    /// Pacer that never sleeps.
    pub const fn uncapped() -> Self {
        Self { max_fps: 0 }
    }

    /// Target duration of one frame, or `None` when uncapped.
    pub fn budget(&self) -> Option<Duration> {
        if self.max_fps == 0 {
            return None;
        }
        Some(Duration::from_secs_f64(1.0 / self.max_fps as f64))
    }

    /// Time left in the current frame's budget; zero if the frame overran or
    /// the pacer is uncapped.
    pub fn remainder(&self, frame_elapsed: Duration) -> Duration {
        match self.budget() {
            Some(budget) => budget.saturating_sub(frame_elapsed),
            None => Duration::ZERO,
        }
    }

    /// Sleeps off the remaining budget for a frame that took `frame_elapsed`.
    pub fn sleep_after_frame(&self, frame_elapsed: Duration) {
        let remainder = self.remainder(frame_elapsed);
        if !remainder.is_zero() {
            std::thread::sleep(remainder);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_at_60_fps() {
        let budget = FramePacer::new(60).budget().unwrap();
        let ms = budget.as_secs_f64() * 1000.0;
        assert!((ms - 16.666).abs() < 0.01, "{ms}");
    }

    #[test]
    fn fast_frame_sleeps_the_difference() {
        let pacer = FramePacer::new(60);
        let rem = pacer.remainder(Duration::from_millis(5));
        let ms = rem.as_secs_f64() * 1000.0;
        assert!((ms - 11.666).abs() < 0.01, "{ms}");
    }

    #[test]
    fn slow_frame_sleeps_zero() {
        let pacer = FramePacer::new(60);
        assert_eq!(pacer.remainder(Duration::from_millis(20)), Duration::ZERO);
    }

    #[test]
    fn uncapped_never_sleeps() {
        let pacer = FramePacer::uncapped();
        assert!(pacer.budget().is_none());
        assert_eq!(pacer.remainder(Duration::ZERO), Duration::ZERO);
    }
}
