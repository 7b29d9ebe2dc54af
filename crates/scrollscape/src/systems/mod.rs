//! Per-zone actor systems and the background compositor.
//!
//! Each system owns its pool, an update rule and a draw routine. The
//! backdrop decides which of them run on a given frame; the systems never
//! look at other systems' state.

pub mod aurora;
pub mod background;
pub mod flight;
pub mod flora;
pub mod sea;
pub mod sky;
pub mod space;
pub mod sunset;
#[cfg(feature = "vectors")]
pub mod vector;
pub mod water;

use glam::Vec2;

use crate::core::zones::ZoneWeights;

/// Snapshot of the backdrop state shared with every system for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneFrame {
    pub frame: u64,
    pub time: f32,
    pub dt: f32,
    pub size: Vec2,
    pub progress: f32,
    pub weights: ZoneWeights,
    /// Animated horizon line in pixels from the top.
    pub horizon: f32,
}

impl SceneFrame {
    pub fn new(size: Vec2) -> Self {
        Self {
            frame: 0,
            time: 0.0,
            dt: 1.0 / 60.0,
            size,
            progress: 0.0,
            weights: ZoneWeights::default(),
            horizon: size.y * 0.62,
        }
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn frame_f32(&self) -> f32 {
        self.frame as f32
    }
}
