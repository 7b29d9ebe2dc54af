use glam::Vec2;

use crate::renderer::surface::Surface;

/// Per-tick information handed to every animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Fixed steps run since the renderer started.
    pub frame: u64,
    /// Simulation time in seconds.
    pub time: f32,
    /// Fixed timestep in seconds.
    pub dt: f32,
    /// Surface size in pixels.
    pub size: Vec2,
    /// Scales speed and opacity. 1 for the backdrop, the hover level for
    /// card decorations.
    pub intensity: f32,
}

impl FrameContext {
    pub fn new(size: Vec2) -> Self {
        Self {
            frame: 0,
            time: 0.0,
            dt: 1.0 / 60.0,
            size,
            intensity: 1.0,
        }
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// `frame` as f32 for phase arithmetic.
    pub fn frame_f32(&self) -> f32 {
        self.frame as f32
    }
}

/// The contract every renderer fulfills, from the full-page backdrop to a
/// single card decoration.
pub trait Animation {
    /// Create pools for the given surface size. Always called before the
    /// first `update`.
    fn initialize(&mut self, size: Vec2);

    /// Advance the simulation by one fixed step.
    fn update(&mut self, ctx: &FrameContext);

    /// Read-only render pass.
    fn draw(&self, surface: &mut dyn Surface, ctx: &FrameContext);

    /// Surface was resized. Width-dependent pools are reseeded.
    fn on_resize(&mut self, size: Vec2) {
        self.initialize(size);
    }
}
