//! Wind-blown grass card decoration.

use glam::Vec2;

use super::count_for_width;
use crate::api::animation::{Animation, FrameContext};
use crate::core::rng::Rng;
use crate::extensions::noise::Noise;
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

/// One blade per this many pixels of width.
pub const BLADE_SPACING: f32 = 6.0;
const BASE: Color = Color::rgb(0.2, 0.5, 0.25);
const TIP: Color = Color::rgb(0.55, 0.85, 0.4);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blade {
    pub x: f32,
    pub height: f32,
    /// Stiffness in [0.5, 1]; stiffer blades bend less.
    pub stiffness: f32,
}

/// A row of grass bending in a Perlin wind field.
#[derive(Debug, Clone)]
pub struct Grass {
    rng: Rng,
    noise: Noise,
    blades: Vec<Blade>,
    size: Vec2,
    /// Wind clock; advances faster under hover.
    wind_time: f32,
}

impl Grass {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::new(seed),
            noise: Noise::new(seed),
            blades: Vec::new(),
            size: Vec2::ZERO,
            wind_time: 0.0,
        }
    }

    pub fn blades(&self) -> &[Blade] {
        &self.blades
    }

    /// Horizontal tip displacement for a blade, in pixels.
    pub fn bend(&self, blade: &Blade) -> f32 {
        let wind = self.noise.perlin(blade.x * 0.01, self.wind_time);
        wind * blade.height * 0.6 / (1.0 + blade.stiffness)
    }
}

impl Animation for Grass {
    fn initialize(&mut self, size: Vec2) {
        self.size = size;
        let count = count_for_width(size.x, BLADE_SPACING);
        let rng = &mut self.rng;
        self.blades = (0..count)
            .map(|i| Blade {
                x: (i as f32 + 0.5) * BLADE_SPACING + rng.signed() * 1.5,
                height: rng.range(size.y * 0.25, size.y * 0.6),
                stiffness: rng.range(0.5, 1.0),
            })
            .collect();
    }

    fn update(&mut self, ctx: &FrameContext) {
        self.wind_time += 0.01 * (0.5 + ctx.intensity);
    }

    fn draw(&self, surface: &mut dyn Surface, ctx: &FrameContext) {
        let ground = self.size.y;
        for blade in &self.blades {
            let bend = self.bend(blade);
            let base = Vec2::new(blade.x, ground);
            let ctrl = Vec2::new(blade.x + bend * 0.3, ground - blade.height * 0.6);
            let tip = Vec2::new(blade.x + bend, ground - blade.height);
            let color = BASE.lerp(TIP, blade.stiffness).with_alpha(0.5 + 0.5 * ctx.intensity);
            surface.stroke_quadratic(base, ctrl, tip, 1.6, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::DrawList;

    #[test]
    fn blade_count_follows_width() {
        let mut grass = Grass::new(4);
        grass.initialize(Vec2::new(300.0, 80.0));
        assert_eq!(grass.blades().len(), 50);
        grass.on_resize(Vec2::new(60.0, 80.0));
        assert_eq!(grass.blades().len(), 10);
    }

    #[test]
    fn wind_moves_the_tips() {
        let size = Vec2::new(120.0, 80.0);
        let mut grass = Grass::new(4);
        grass.initialize(size);
        let blade = grass.blades()[3];
        let before = grass.bend(&blade);
        for _ in 0..40 {
            grass.update(&FrameContext::new(size));
        }
        assert_ne!(before, grass.bend(&blade));
        assert!(grass.bend(&blade).abs() <= blade.height * 0.6);
    }

    #[test]
    fn one_stroke_per_blade() {
        let size = Vec2::new(120.0, 80.0);
        let mut grass = Grass::new(4);
        grass.initialize(size);
        let mut list = DrawList::new();
        grass.draw(&mut list, &FrameContext::new(size));
        assert_eq!(list.len(), 20);
    }
}
