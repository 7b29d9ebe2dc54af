//! Daytime sky: drifting clouds and a stateless flock of birds.

use glam::Vec2;

use super::SceneFrame;
use crate::core::rng::Rng;
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

const CLOUD: Color = Color::rgb(0.97, 0.98, 1.0);
const BIRD: Color = Color::rgb(0.12, 0.14, 0.2);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cloud {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    /// 3 or 4 overlapping ellipses.
    pub puffs: u32,
}

impl Cloud {
    /// Horizontal space a cloud needs to leave the screen completely.
    pub fn margin(&self) -> f32 {
        self.size * 2.0
    }
}

/// A bird for one frame. Birds keep no state between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirdPose {
    pub pos: Vec2,
    /// Wing angle in radians.
    pub wing: f32,
}

/// Pose of bird `index` at `frame`.
pub fn bird_pose(frame: f32, index: usize, size: Vec2) -> BirdPose {
    let i = index as f32;
    let span = size.x + 200.0;
    let speed = 0.8 + 0.15 * (i % 3.0);
    let x = (frame * speed + i * 137.0).rem_euclid(span) - 100.0;
    let y = size.y * 0.18 + i * 16.0 + (frame * 0.02 + i * 1.3).sin() * 10.0;
    BirdPose {
        pos: Vec2::new(x, y),
        wing: (frame * 0.2 + i * 0.9).sin() * 0.5,
    }
}

#[derive(Debug, Clone)]
pub struct SkySystem {
    clouds: Vec<Cloud>,
    cloud_count: usize,
    bird_count: usize,
    rng: Rng,
}

impl SkySystem {
    pub fn new(cloud_count: usize, bird_count: usize, rng: Rng) -> Self {
        Self {
            clouds: Vec::with_capacity(cloud_count),
            cloud_count,
            bird_count,
            rng,
        }
    }

    pub fn initialize(&mut self, size: Vec2) {
        self.clouds.clear();
        for _ in 0..self.cloud_count {
            let rng = &mut self.rng;
            self.clouds.push(Cloud {
                pos: Vec2::new(rng.range(0.0, size.x), rng.range(size.y * 0.05, size.y * 0.45)),
                size: rng.range(30.0, 70.0),
                speed: rng.range(0.15, 0.5),
                puffs: 3 + rng.next_int(2),
            });
        }
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }

    pub fn update(&mut self, frame: &SceneFrame) {
        for c in self.clouds.iter_mut() {
            c.pos.x += c.speed;
            if c.pos.x > frame.width() + c.margin() {
                c.pos.x = -c.margin();
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, frame: &SceneFrame, alpha: f32) {
        for c in &self.clouds {
            let color = CLOUD.with_alpha(0.85 * alpha);
            for k in 0..c.puffs {
                let k = k as f32;
                let offset = Vec2::new((k - 1.5) * c.size * 0.5, -(k % 2.0) * c.size * 0.25);
                let radii = Vec2::new(c.size * (0.55 + 0.1 * (k % 2.0)), c.size * 0.35);
                surface.fill_ellipse(c.pos + offset, radii, color);
            }
        }

        let f = frame.frame_f32();
        for i in 0..self.bird_count {
            let pose = bird_pose(f, i, frame.size);
            let wing = Vec2::new(8.0, 0.0);
            surface.push();
            surface.translate(pose.pos);
            surface.push();
            surface.rotate(-pose.wing);
            surface.stroke_line(Vec2::ZERO, -wing, 1.5, BIRD.fade(alpha));
            surface.pop();
            surface.rotate(pose.wing);
            surface.stroke_line(Vec2::ZERO, wing, 1.5, BIRD.fade(alpha));
            surface.pop();
        }
    }
}
