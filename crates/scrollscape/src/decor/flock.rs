//! Boids card decoration.

use glam::Vec2;

use crate::api::animation::{Animation, FrameContext};
use crate::core::rng::Rng;
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

const BOIDS: usize = 28;
const MAX_SPEED: f32 = 2.2;
const NEIGHBOR_RADIUS: f32 = 40.0;
const SEPARATION_RADIUS: f32 = 14.0;

const SEPARATION: f32 = 0.05;
const ALIGNMENT: f32 = 0.04;
const COHESION: f32 = 0.004;

const COLOR: Color = Color::rgb(0.9, 0.92, 1.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Classic separation / alignment / cohesion flocking with edge wrap.
#[derive(Debug, Clone)]
pub struct Flock {
    rng: Rng,
    boids: Vec<Boid>,
    size: Vec2,
}

impl Flock {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::new(seed),
            boids: Vec::with_capacity(BOIDS),
            size: Vec2::ZERO,
        }
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    /// Steering for boid `i` from its neighbours.
    fn steer(&self, i: usize) -> Vec2 {
        let me = self.boids[i];
        let mut separation = Vec2::ZERO;
        let mut heading = Vec2::ZERO;
        let mut center = Vec2::ZERO;
        let mut neighbours = 0;

        for (j, other) in self.boids.iter().enumerate() {
            if i == j {
                continue;
            }
            let offset = other.pos - me.pos;
            let dist = offset.length();
            if dist > NEIGHBOR_RADIUS {
                continue;
            }
            if dist < SEPARATION_RADIUS && dist > 0.0 {
                separation -= offset / dist;
            }
            heading += other.vel;
            center += other.pos;
            neighbours += 1;
        }

        if neighbours == 0 {
            return Vec2::ZERO;
        }
        let n = neighbours as f32;
        separation * SEPARATION + (heading / n - me.vel) * ALIGNMENT + (center / n - me.pos) * COHESION
    }
}

impl Animation for Flock {
    fn initialize(&mut self, size: Vec2) {
        self.size = size;
        self.boids.clear();
        for _ in 0..BOIDS {
            let rng = &mut self.rng;
            let angle = rng.range(0.0, std::f32::consts::TAU);
            self.boids.push(Boid {
                pos: Vec2::new(rng.range(0.0, size.x), rng.range(0.0, size.y)),
                vel: Vec2::from_angle(angle) * rng.range(0.5, MAX_SPEED),
            });
        }
    }

    fn update(&mut self, ctx: &FrameContext) {
        let steering: Vec<Vec2> = (0..self.boids.len()).map(|i| self.steer(i)).collect();
        let limit = MAX_SPEED * ctx.intensity.max(0.1);
        let size = self.size.max(Vec2::ONE);
        for (b, s) in self.boids.iter_mut().zip(steering) {
            b.vel = (b.vel + s).clamp_length_max(limit);
            b.pos += b.vel;
            b.pos = Vec2::new(b.pos.x.rem_euclid(size.x), b.pos.y.rem_euclid(size.y));
        }
    }

    fn draw(&self, surface: &mut dyn Surface, ctx: &FrameContext) {
        let color = COLOR.with_alpha(0.4 + 0.6 * ctx.intensity);
        for b in &self.boids {
            surface.push();
            surface.translate(b.pos);
            surface.rotate(b.vel.y.atan2(b.vel.x));
            surface.fill_polygon(
                &[Vec2::new(5.0, 0.0), Vec2::new(-3.0, -2.5), Vec2::new(-3.0, 2.5)],
                color,
            );
            surface.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_is_limited_and_boids_wrap() {
        let size = Vec2::new(240.0, 160.0);
        let mut flock = Flock::new(12);
        flock.initialize(size);
        let ctx = FrameContext::new(size);
        for _ in 0..600 {
            flock.update(&ctx);
            for b in flock.boids() {
                assert!(b.vel.length() <= MAX_SPEED + 1e-4);
                assert!((0.0..=size.x).contains(&b.pos.x));
                assert!((0.0..=size.y).contains(&b.pos.y));
            }
        }
    }

    #[test]
    fn lone_boid_keeps_its_velocity() {
        let mut flock = Flock::new(1);
        flock.boids.push(Boid { pos: Vec2::ZERO, vel: Vec2::X });
        assert_eq!(flock.steer(0), Vec2::ZERO);
    }

    #[test]
    fn close_boids_push_apart() {
        let mut flock = Flock::new(1);
        flock.boids.push(Boid { pos: Vec2::new(10.0, 10.0), vel: Vec2::ZERO });
        flock.boids.push(Boid { pos: Vec2::new(15.0, 10.0), vel: Vec2::ZERO });
        // Separation dominates at this range and points away from the neighbour.
        assert!(flock.steer(0).x < 0.0);
    }
}
