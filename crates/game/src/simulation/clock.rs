/// Simulation ticks per second.
pub const TICK_RATE: u32 = 128;
/// Fixed timestep in seconds.
pub const TIME_STEP: f32 = 1.0 / TICK_RATE as f32;

/// Fixed-timestep accumulator decoupling the tick rate from the render
/// frame rate. The frame loop feeds in wall-clock deltas and drains
/// whole ticks; the fraction left over is exposed for interpolation.
#[derive(Debug)]
pub struct TickClock {
    dt: f32,
    accumulator: f32,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickClock {
    pub fn new() -> Self {
        Self::with_rate(TICK_RATE)
    }

    pub fn with_rate(tick_rate: u32) -> Self {
        Self {
            dt: 1.0 / tick_rate as f32,
            accumulator: 0.0,
        }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Add frame time. Clamped so a long stall cannot queue an
    /// unbounded burst of catch-up ticks.
    pub fn accumulate(&mut self, delta: f32) {
        self.accumulator += delta.min(0.25);
    }

    pub fn consume_tick(&mut self) -> bool {
        if self.accumulator >= self.dt {
            self.accumulator -= self.dt;
            true
        } else {
            false
        }
    }

    /// Fraction of a tick accumulated, for render interpolation.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
