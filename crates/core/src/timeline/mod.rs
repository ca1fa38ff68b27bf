use std::time::{Duration, Instant};

/// Restart-on-read stopwatch that measures the time between host ticks.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_tick: Instant,
    elapsed: Duration,
    frames: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::start()
    }
}

impl FrameClock {
    pub fn start() -> Self {
        Self {
            last_tick: Instant::now(),
            elapsed: Duration::ZERO,
            frames: 0,
        }
    }

    /// Restarts the measurement without forgetting the totals.
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }

    /// Seconds since the previous tick (or since start/reset).
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        self.elapsed += delta;
        self.frames += 1;
        delta.as_secs_f32()
    }

    /// Time until the next frame is due for a timer with the given period.
    pub fn until_next(&self, interval: Duration) -> Duration {
        interval.saturating_sub(self.last_tick.elapsed())
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
