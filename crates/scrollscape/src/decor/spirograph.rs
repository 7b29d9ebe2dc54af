//! Spirograph card decoration: particles tracing hypotrochoids.

use glam::Vec2;

use crate::api::animation::{Animation, FrameContext};
use crate::components::trail::Trail;
use crate::core::rng::Rng;
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

/// Points kept per particle path.
pub const PATH_CAP: usize = 120;
const PARTICLES: usize = 3;
const COLORS: [Color; PARTICLES] = [
    Color::rgb(0.45, 0.8, 1.0),
    Color::rgb(1.0, 0.55, 0.75),
    Color::rgb(0.7, 1.0, 0.6),
];

/// Hypotrochoid: a point at distance `d` from the center of a circle of
/// radius `r` rolling inside a circle of radius `big_r`.
pub fn hypotrochoid(big_r: f32, r: f32, d: f32, t: f32) -> Vec2 {
    let k = big_r - r;
    let ratio = if r.abs() > f32::EPSILON { k / r } else { 0.0 };
    Vec2::new(k * t.cos() + d * (ratio * t).cos(), k * t.sin() - d * (ratio * t).sin())
}

#[derive(Debug, Clone)]
struct Particle {
    big_r: f32,
    r: f32,
    d: f32,
    t: f32,
    speed: f32,
    path: Trail,
}

#[derive(Debug, Clone)]
pub struct Spirograph {
    rng: Rng,
    particles: Vec<Particle>,
    center: Vec2,
    scale: f32,
}

impl Spirograph {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::new(seed),
            particles: Vec::new(),
            center: Vec2::ZERO,
            scale: 1.0,
        }
    }

    #[cfg(test)]
    pub(crate) fn path_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.particles.iter().map(|p| p.path.len())
    }
}

impl Animation for Spirograph {
    fn initialize(&mut self, size: Vec2) {
        self.center = size * 0.5;
        // Curves are built in a unit box of radius ~1 and scaled to the card.
        self.scale = size.x.min(size.y) * 0.4;
        self.particles.clear();
        for _ in 0..PARTICLES {
            let rng = &mut self.rng;
            let big_r = 1.0;
            let r = rng.range(0.2, 0.45);
            self.particles.push(Particle {
                big_r,
                r,
                d: rng.range(0.15, 0.4),
                t: rng.range(0.0, std::f32::consts::TAU),
                speed: rng.range(0.02, 0.05),
                // Decay zero: only the cap shortens a path.
                path: Trail::new(PATH_CAP, 0.0),
            });
        }
    }

    fn update(&mut self, ctx: &FrameContext) {
        for p in self.particles.iter_mut() {
            p.t += p.speed * ctx.intensity;
            let pos = self.center + hypotrochoid(p.big_r, p.r, p.d, p.t) * (self.scale / 1.4);
            p.path.push(pos);
        }
    }

    fn draw(&self, surface: &mut dyn Surface, ctx: &FrameContext) {
        for (p, color) in self.particles.iter().zip(COLORS) {
            let points: Vec<Vec2> = p.path.iter().map(|s| s.pos).collect();
            surface.stroke_polyline(&points, 1.2, color.with_alpha(0.3 + 0.5 * ctx.intensity));
            if let Some(head) = points.last() {
                surface.fill_circle(*head, 2.5, color.with_alpha(ctx.intensity));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hypotrochoid_at_zero() {
        // t = 0: (R - r + d, 0).
        let p = hypotrochoid(5.0, 3.0, 5.0, 0.0);
        assert!((p - Vec2::new(7.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn hypotrochoid_matches_formula() {
        let (big_r, r, d, t): (f32, f32, f32, f32) = (1.0, 0.3, 0.25, 1.7);
        let k = big_r - r;
        let expected = Vec2::new(
            k * t.cos() + d * (k / r * t).cos(),
            k * t.sin() - d * (k / r * t).sin(),
        );
        assert!((hypotrochoid(big_r, r, d, t) - expected).length() < 1e-6);
    }

    #[test]
    fn paths_are_capped() {
        let size = Vec2::new(300.0, 200.0);
        let mut spiro = Spirograph::new(3);
        spiro.initialize(size);
        let mut ctx = FrameContext::new(size);
        for n in 0..500 {
            ctx.frame = n;
            spiro.update(&ctx);
            assert!(spiro.path_lengths().all(|len| len <= PATH_CAP));
        }
        assert!(spiro.path_lengths().all(|len| len == PATH_CAP));
    }

    #[test]
    fn resize_clears_paths() {
        let size = Vec2::new(300.0, 200.0);
        let mut spiro = Spirograph::new(3);
        spiro.initialize(size);
        spiro.update(&FrameContext::new(size));
        spiro.on_resize(Vec2::new(100.0, 100.0));
        assert!(spiro.path_lengths().all(|len| len == 0));
    }
}
