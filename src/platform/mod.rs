//! Platform abstraction layer
//!
//! Turns host time (animation frames on the web, sleeps natively) into a
//! steady tick rate. Each tick runs to completion; the only suspension point
//! is between ticks.

use crate::consts::MAX_SUBSTEPS;

/// Longest frame gap that still counts (a backgrounded tab can report seconds)
const MAX_FRAME_DT: f32 = 0.1;

/// Fixed-rate accumulator
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_substeps: u32,
}

impl FixedTimestep {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            dt: 1.0 / tick_rate.max(1) as f32,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    /// Seconds per tick
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Feed elapsed seconds, get back how many ticks to run now
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= self.dt && ticks < self.max_substeps {
            self.accumulator -= self.dt;
            ticks += 1;
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
