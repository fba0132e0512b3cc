use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter. The first frame that produces a snapshot
    /// carries index 0.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// The very first `tick()` has no previous timestamp to measure against and
/// returns `None`; callers skip their per-frame update for that iteration.
///
/// Delta time is clamped to avoid pathological values when the application is
/// paused by a debugger, minimized, or stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps.
    ///
    /// Clamp rationale:
    /// - minimum prevents zero-dt behavior from tight loops on some platforms
    /// - maximum prevents simulation explosions after long stalls
    pub fn new() -> Self {
        Self {
            last: None,
            frame_index: 0,
            dt_min: Duration::from_micros(100), // 0.0001s
            dt_max: Duration::from_millis(250), // 0.25s
        }
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: None,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the clock baseline; the next `tick()` returns `None` again.
    ///
    /// Useful after surface reconfigure events or when resuming from
    /// suspension.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Advances the clock.
    ///
    /// Returns `None` on the first tick after creation or `reset()`.
    pub fn tick(&mut self) -> Option<FrameTime> {
        let now = Instant::now();

        let Some(last) = self.last.replace(now) else {
            return None;
        };

        let mut dt = now.saturating_duration_since(last);
        if dt < self.dt_min {
            dt = self.dt_min;
        } else if dt > self.dt_max {
            dt = self.dt_max;
        }

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        Some(ft)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_skipped() {
        let mut clock = FrameClock::new();
        assert!(clock.tick().is_none());
        assert!(clock.tick().is_some());
    }

    #[test]
    fn reset_skips_the_next_tick_again() {
        let mut clock = FrameClock::new();
        clock.tick();
        clock.tick();
        clock.reset();
        assert!(clock.tick().is_none());
    }

    #[test]
    fn dt_respects_clamps() {
        let mut clock =
            FrameClock::with_clamps(Duration::from_millis(5), Duration::from_millis(10));
        clock.tick();
        // Back-to-back ticks are well below the 5ms minimum.
        let ft = clock.tick().unwrap();
        assert!((ft.dt - 0.005).abs() < 1e-6, "{}", ft.dt);
    }

    #[test]
    fn frame_index_counts_measured_frames() {
        let mut clock = FrameClock::new();
        clock.tick();
        assert_eq!(clock.tick().unwrap().frame_index, 0);
        assert_eq!(clock.tick().unwrap().frame_index, 1);
    }
}
