/// Minimum seconds between two measurements of the scrollable extent.
pub const MEASURE_INTERVAL: f32 = 0.016;

/// Progress in [0, 1] for a scroll offset against a maximum extent.
///
/// The divisor is floored at 1 and a non-positive extent yields exactly 0,
/// so a page shorter than its viewport can never produce NaN or a negative
/// progress.
pub fn progress_for(offset: f32, max_scroll: f32) -> f32 {
    if !offset.is_finite() || !max_scroll.is_finite() || max_scroll <= 0.0 {
        return 0.0;
    }
    (offset / max_scroll.max(1.0)).clamp(0.0, 1.0)
}

/// Scroll position as seen by the backdrop.
///
/// Offset updates are applied immediately. The maximum scroll extent is
/// re-measured lazily, at most once per `MEASURE_INTERVAL`, after the content
/// or viewport height changes.
#[derive(Debug, Clone)]
pub struct ScrollState {
    offset: f32,
    progress: f32,
    max_scroll: f32,
    content_height: f32,
    viewport_height: f32,
    since_measure: f32,
    dirty: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollState {
    pub fn new() -> Self {
        Self {
            offset: 0.0,
            progress: 0.0,
            max_scroll: 0.0,
            content_height: 0.0,
            viewport_height: 0.0,
            // First measurement is never throttled.
            since_measure: MEASURE_INTERVAL,
            dirty: false,
        }
    }

    pub fn set_offset(&mut self, offset: f32) {
        self.offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
    }

    pub fn set_content_height(&mut self, height: f32) {
        self.content_height = height;
        self.dirty = true;
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height;
        self.dirty = true;
    }

    /// Advance the throttle clock, re-measure if allowed, and recompute progress.
    pub fn update(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.since_measure += dt;
        }
        if self.dirty && self.since_measure >= MEASURE_INTERVAL {
            self.max_scroll = (self.content_height - self.viewport_height).max(0.0);
            self.since_measure = 0.0;
            self.dirty = false;
        }
        self.progress = progress_for(self.offset, self.max_scroll);
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn max_scroll(&self) -> f32 {
        self.max_scroll
    }

    /// True when a measurement is waiting on the throttle.
    pub fn is_pending(&self) -> bool {
        self.dirty
    }
}
