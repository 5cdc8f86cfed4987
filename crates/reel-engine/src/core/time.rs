/// Default engine tick, matching a 60 Hz presentation frame.
pub const DEFAULT_TICK_DT: f32 = 1.0 / 60.0;

/// Fixed-step accumulator.
/// Folds variable wall-clock frame deltas into a whole number of engine
/// ticks so reel motion advances at a consistent rate.
#[derive(Debug, Clone)]
pub struct FixedTicker {
    dt: f32,
    accumulator: f32,
}

impl FixedTicker {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time and return how many fixed ticks to run.
    /// Capped at 10 ticks per frame so a long stall cannot snowball.
    pub fn steps(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed tick duration.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_DT)
    }
}
