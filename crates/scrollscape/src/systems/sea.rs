//! Deep-sea fauna: bubbles, fish and jellyfish.
//!
//! Everything here lives below the horizon and fades in over a band just
//! under it, so actors never pop into view at the waterline.

use std::f32::consts::TAU;

use glam::Vec2;

use super::SceneFrame;
use crate::core::rng::Rng;
use crate::extensions::noise::Noise;
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

const BUBBLE: Color = Color::rgb(0.75, 0.9, 1.0);
const JELLY: Color = Color::rgb(0.85, 0.55, 0.95);
const FISH_COLORS: [Color; 4] = [
    Color::rgb(1.0, 0.6, 0.25),
    Color::rgb(0.35, 0.8, 0.85),
    Color::rgb(0.95, 0.85, 0.35),
    Color::rgb(0.6, 0.65, 1.0),
];

const TENTACLES: usize = 5;
const TENTACLE_SEGMENTS: usize = 6;
/// Horizontal space a fish needs to leave the screen.
const FISH_MARGIN: f32 = 60.0;

/// Opacity for an actor at `y`: 0 at the horizon, 1 from `band` pixels below.
pub fn surface_fade(y: f32, horizon: f32, band: f32) -> f32 {
    if band <= 0.0 {
        return if y > horizon { 1.0 } else { 0.0 };
    }
    ((y - horizon) / band).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bubble {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub phase: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FishVariant {
    /// Curved body outline.
    Slender,
    /// Triangle body.
    Basic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fish {
    pub pos: Vec2,
    /// Signed horizontal speed; the sign is the facing.
    pub speed: f32,
    pub size: f32,
    pub color: Color,
    pub variant: FishVariant,
    pub phase: f32,
    /// Resting depth the noise drift is applied around.
    pub depth: f32,
}

impl Fish {
    pub fn facing(&self) -> f32 {
        if self.speed < 0.0 { -1.0 } else { 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jellyfish {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub phase: f32,
}

impl Jellyfish {
    /// Ascent this frame: follows a sine pulse, never negative.
    pub fn ascent(&self, frame: f32) -> f32 {
        self.speed * (0.5 + 0.5 * (frame * 0.05 + self.phase).sin())
    }
}

/// Points of one tentacle hanging from `base`, re-evaluated every frame.
pub fn tentacle_points(base: Vec2, length: f32, frame: f32, phase: f32, index: usize) -> Vec<Vec2> {
    let step = length / TENTACLE_SEGMENTS as f32;
    (0..=TENTACLE_SEGMENTS)
        .map(|s| {
            let sf = s as f32;
            let sway = (frame * 0.06 + phase + index as f32 * 0.8 + sf * 0.6).sin() * sf * 1.2;
            base + Vec2::new(sway, sf * step)
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct SeaLife {
    bubbles: Vec<Bubble>,
    fish: Vec<Fish>,
    jellyfish: Vec<Jellyfish>,
    counts: (usize, usize, usize),
    fade_band: f32,
    rng: Rng,
}

impl SeaLife {
    pub fn new(bubbles: usize, fish: usize, jellyfish: usize, fade_band: f32, rng: Rng) -> Self {
        Self {
            bubbles: Vec::with_capacity(bubbles),
            fish: Vec::with_capacity(fish),
            jellyfish: Vec::with_capacity(jellyfish),
            counts: (bubbles, fish, jellyfish),
            fade_band,
            rng,
        }
    }

    pub fn initialize(&mut self, size: Vec2) {
        let (nb, nf, nj) = self.counts;
        let rng = &mut self.rng;

        self.bubbles.clear();
        for _ in 0..nb {
            self.bubbles.push(Bubble {
                pos: Vec2::new(rng.range(0.0, size.x), rng.range(0.0, size.y)),
                radius: rng.range(1.5, 5.0),
                speed: rng.range(0.4, 1.4),
                phase: rng.range(0.0, TAU),
            });
        }

        self.fish.clear();
        for i in 0..nf {
            let depth = rng.range(size.y * 0.25, size.y * 0.95);
            let dir = if rng.chance(0.5) { 1.0 } else { -1.0 };
            self.fish.push(Fish {
                pos: Vec2::new(rng.range(0.0, size.x), depth),
                speed: dir * rng.range(0.5, 1.6),
                size: rng.range(8.0, 18.0),
                color: FISH_COLORS[i % FISH_COLORS.len()],
                variant: if i % 2 == 0 { FishVariant::Slender } else { FishVariant::Basic },
                phase: rng.range(0.0, TAU),
                depth,
            });
        }

        self.jellyfish.clear();
        for _ in 0..nj {
            self.jellyfish.push(Jellyfish {
                pos: Vec2::new(rng.range(0.0, size.x), rng.range(size.y * 0.3, size.y)),
                size: rng.range(12.0, 24.0),
                speed: rng.range(0.3, 0.8),
                phase: rng.range(0.0, TAU),
            });
        }
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn fish(&self) -> &[Fish] {
        &self.fish
    }

    pub fn jellyfish(&self) -> &[Jellyfish] {
        &self.jellyfish
    }

    pub fn update(&mut self, frame: &SceneFrame, noise: &Noise) {
        let (w, h) = (frame.width(), frame.height());
        let f = frame.frame_f32();

        for b in self.bubbles.iter_mut() {
            b.pos.y -= b.speed;
            b.pos.x += (f * 0.05 + b.phase).sin() * 0.3;
            if b.pos.y < frame.horizon {
                b.pos = Vec2::new(self.rng.range(0.0, w), h + self.rng.range(10.0, 60.0));
            }
        }

        for (i, fish) in self.fish.iter_mut().enumerate() {
            fish.pos.x += fish.speed;
            if fish.speed > 0.0 && fish.pos.x > w + FISH_MARGIN {
                fish.pos.x = -FISH_MARGIN;
            } else if fish.speed < 0.0 && fish.pos.x < -FISH_MARGIN {
                fish.pos.x = w + FISH_MARGIN;
            }
            let drift = noise.perlin(frame.time * 0.3, i as f32 * 3.1 + 0.5) * 30.0;
            fish.pos.y = fish.depth + drift;
        }

        for j in self.jellyfish.iter_mut() {
            j.pos.y -= j.ascent(f);
            if j.pos.y + j.size < frame.horizon {
                j.pos = Vec2::new(self.rng.range(0.0, w), h + j.size * 3.0);
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, frame: &SceneFrame, alpha: f32) {
        let f = frame.frame_f32();
        let fade = |y: f32| surface_fade(y, frame.horizon, self.fade_band) * alpha;

        for b in &self.bubbles {
            surface.stroke_circle(b.pos, b.radius, 1.0, BUBBLE.with_alpha(0.6 * fade(b.pos.y)));
        }

        for fish in &self.fish {
            let a = fade(fish.pos.y);
            if a <= 0.0 {
                continue;
            }
            let wiggle = (f * 0.25 + fish.phase).sin() * 0.35;
            let s = fish.size;
            let color = fish.color.fade(a);
            surface.push();
            surface.translate(fish.pos);
            surface.scale(Vec2::new(fish.facing(), 1.0));
            match fish.variant {
                FishVariant::Slender => {
                    let mut body = crate::extensions::bezier::sample_quadratic(
                        Vec2::new(s, 0.0),
                        Vec2::new(0.0, -s * 0.7),
                        Vec2::new(-s, 0.0),
                        8,
                    );
                    body.extend(crate::extensions::bezier::sample_quadratic(
                        Vec2::new(-s, 0.0),
                        Vec2::new(0.0, s * 0.7),
                        Vec2::new(s, 0.0),
                        8,
                    ));
                    surface.fill_polygon(&body, color);
                }
                FishVariant::Basic => {
                    surface.fill_polygon(
                        &[Vec2::new(s, 0.0), Vec2::new(-s * 0.6, -s * 0.5), Vec2::new(-s * 0.6, s * 0.5)],
                        color,
                    );
                }
            }
            // Tail.
            surface.translate(Vec2::new(-s * 0.8, 0.0));
            surface.rotate(wiggle);
            surface.fill_polygon(
                &[Vec2::ZERO, Vec2::new(-s * 0.5, -s * 0.4), Vec2::new(-s * 0.5, s * 0.4)],
                color,
            );
            surface.pop();
        }

        for j in &self.jellyfish {
            let a = fade(j.pos.y);
            if a <= 0.0 {
                continue;
            }
            let pulse = 1.0 + 0.08 * (f * 0.05 + j.phase).sin();
            let r = j.size * pulse;
            surface.fill_arc(j.pos, r, std::f32::consts::PI, TAU, JELLY.with_alpha(0.55 * a));
            for k in 0..TENTACLES {
                let x = j.pos.x - r + 2.0 * r * (k as f32 + 0.5) / TENTACLES as f32;
                let pts = tentacle_points(Vec2::new(x, j.pos.y), j.size * 1.6, f, j.phase, k);
                surface.stroke_polyline(&pts, 1.0, JELLY.with_alpha(0.4 * a));
            }
        }
    }
}
