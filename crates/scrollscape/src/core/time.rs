/// Fixed timestep accumulator.
/// Ensures the simulation runs at a consistent rate regardless of frame time.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    /// Maximum steps run for a single frame delta.
    pub const MAX_STEPS: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death after a suspended tab.
        self.accumulator = self.accumulator.min(self.dt * Self::MAX_STEPS as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// A periodic task driven by the same tick as the frame loop.
///
/// Used for work that runs on a wall-clock cadence (aurora evolution)
/// instead of once per frame. Cancelling it is the teardown step.
#[derive(Debug, Clone)]
pub struct Interval {
    period: f32,
    elapsed: f32,
    active: bool,
}

impl Interval {
    pub fn new(period: f32) -> Self {
        Self {
            period: period.max(f32::EPSILON),
            elapsed: 0.0,
            active: true,
        }
    }

    /// Advance by `dt` seconds. Returns how many periods completed.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if !self.active || !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let fired = (self.elapsed / self.period) as u32;
        self.elapsed -= fired as f32 * self.period;
        fired
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.elapsed = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn period(&self) -> f32 {
        self.period
    }
}

/// Frame counter and elapsed simulation time: the sole animation clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    frame: u64,
    time: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: f32) {
        self.frame += 1;
        self.time += dt;
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}
