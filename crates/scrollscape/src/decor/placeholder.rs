//! Fallback card decoration.

use glam::Vec2;

use crate::api::animation::{Animation, FrameContext};
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

const RING: Color = Color::rgb(0.7, 0.75, 0.9);

/// A slow breathing ring for cards without a dedicated decoration.
#[derive(Debug, Clone, Default)]
pub struct Placeholder {
    center: Vec2,
    radius: f32,
    phase: f32,
}

impl Placeholder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Animation for Placeholder {
    fn initialize(&mut self, size: Vec2) {
        self.center = size * 0.5;
        self.radius = size.x.min(size.y) * 0.25;
        self.phase = 0.0;
    }

    fn update(&mut self, ctx: &FrameContext) {
        self.phase += 0.03 * ctx.intensity;
    }

    fn draw(&self, surface: &mut dyn Surface, ctx: &FrameContext) {
        let r = self.radius * (1.0 + 0.1 * self.phase.sin());
        surface.stroke_circle(self.center, r, 1.5, RING.with_alpha(0.3 + 0.5 * ctx.intensity));
    }
}
