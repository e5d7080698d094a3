//! Fixed-timestep clock.
//!
//! Симуляция не читает `Time<Fixed>`: все системы берут dt из `SimClock`,
//! поэтому N вызовов `FixedUpdate` = ровно N тиков, независимо от wall-clock.

use bevy::prelude::*;

/// Nominal simulation rate.
pub const DEFAULT_TICK_HZ: f32 = 60.0;

/// Simulation clock resource.
///
/// `tick` is the index of the tick being processed (0 before the first tick).
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SimClock {
    pub tick: u64,
    pub hz: f32,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_HZ)
    }
}

impl SimClock {
    pub fn new(hz: f32) -> Self {
        Self { tick: 0, hz: hz.max(1.0) }
    }

    /// Seconds per tick.
    pub fn dt(&self) -> f32 {
        1.0 / self.hz
    }

    /// Smallest whole number of ticks covering `secs` (at least 1).
    ///
    /// 0.1s at 60Hz is exactly 6 ticks: the epsilon absorbs f32 noise so
    /// the interval never rounds up to 7.
    pub fn secs_to_ticks(&self, secs: f32) -> u64 {
        let ticks = (secs * self.hz - 1e-3).ceil();
        if ticks < 1.0 {
            1
        } else {
            ticks as u64
        }
    }
}

/// System: advance the clock (first system of every simulation tick).
pub fn advance_clock(mut clock: ResMut<SimClock>) {
    clock.tick += 1;
}
