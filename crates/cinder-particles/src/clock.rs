//! Frame clock: measures wall-clock time between ticks

use std::time::Instant;

/// Tracks elapsed time between per-frame advances
///
/// The first tick (no previous timestamp) and any tick with a zero measured
/// delta both report the nominal frame interval, so the simulation's frame
/// multiplier comes out as exactly 1 in those cases.
pub struct FrameClock {
    nominal_interval: f64,
    last_instant: Instant,
    first_tick: bool,
}

/// Longest elapsed time honored per tick; avoids a huge catch-up step after
/// the driver stalls (e.g. a backgrounded tab)
const MAX_FRAME_SECS: f64 = 0.25;

impl FrameClock {
    pub fn new(frame_rate: f64) -> Self {
        Self {
            nominal_interval: 1.0 / frame_rate,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }

    /// Seconds since the previous tick, clamped to `MAX_FRAME_SECS`
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            return self.nominal_interval;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        if elapsed <= 0.0 {
            return self.nominal_interval;
        }
        elapsed.min(MAX_FRAME_SECS)
    }

    /// Nominal frame interval in seconds (1 / frame rate)
    pub fn nominal_interval(&self) -> f64 {
        self.nominal_interval
    }
}
