//! Aurora ribbons driven by a stochastic L-system.
//!
//! The token sequence evolves on its own interval, independent of the frame
//! tick; each ribbon sample reads its stroke weight from the token under it.

use std::f32::consts::TAU;

use glam::Vec2;

use super::SceneFrame;
use crate::core::rng::Rng;
use crate::core::time::Interval;
use crate::extensions::noise::Noise;
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

const GREEN: Color = Color::rgb(0.25, 0.95, 0.55);
const PURPLE: Color = Color::rgb(0.6, 0.3, 0.9);
const STAR: Color = Color::rgb(0.85, 0.95, 1.0);

/// Vertical segments per ribbon curtain.
const CURTAIN_SEGMENTS: usize = 6;
/// Fraction of the curtain drawn at full alpha before the fade.
pub const RIBBON_HOLD: f32 = 0.3;
/// Lower bound of a produced token's weight.
const MIN_WEIGHT: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub symbol: Symbol,
    pub weight: f32,
}

impl Token {
    pub const fn new(symbol: Symbol, weight: f32) -> Self {
        Self { symbol, weight }
    }
}

/// What an evolution step did to the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evolution {
    Grew,
    Reset,
}

/// A → [A, B], B → [A], each production firing with a fixed probability.
#[derive(Debug, Clone)]
pub struct LSystem {
    tokens: Vec<Token>,
    cap: usize,
    fire_chance: f32,
}

impl LSystem {
    pub fn new(cap: usize, fire_chance: f32) -> Self {
        Self {
            tokens: Self::seed(),
            cap: cap.max(1),
            fire_chance: fire_chance.clamp(0.0, 1.0),
        }
    }

    fn seed() -> Vec<Token> {
        vec![Token::new(Symbol::A, 1.0)]
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn reset(&mut self) {
        self.tokens = Self::seed();
    }

    /// Apply one generation. Every production draws fresh weights for its
    /// children. If the result would exceed the cap the sequence is reset to
    /// the seed instead.
    pub fn step(&mut self, rng: &mut Rng) -> Evolution {
        let mut next = Vec::with_capacity(self.tokens.len() * 2);
        for &token in &self.tokens {
            if !rng.chance(self.fire_chance) {
                next.push(token);
            } else {
                match token.symbol {
                    Symbol::A => {
                        next.push(Token::new(Symbol::A, rng.range(MIN_WEIGHT, 1.0)));
                        next.push(Token::new(Symbol::B, rng.range(MIN_WEIGHT, 1.0)));
                    }
                    Symbol::B => next.push(Token::new(Symbol::A, rng.range(MIN_WEIGHT, 1.0))),
                }
            }
            if next.len() > self.cap {
                self.reset();
                return Evolution::Reset;
            }
        }
        self.tokens = next;
        Evolution::Grew
    }

    /// Token under a ribbon sample.
    pub fn token_at(&self, sample: usize, samples: usize) -> Token {
        let n = self.tokens.len();
        if n == 0 || samples == 0 {
            return Token::new(Symbol::A, 1.0);
        }
        self.tokens[(sample * n / samples).min(n - 1)]
    }
}

/// Alpha along a curtain: held for the first 30%, then a linear fade to 0.
pub fn ribbon_alpha(s: f32) -> f32 {
    let s = s.clamp(0.0, 1.0);
    if s <= RIBBON_HOLD {
        1.0
    } else {
        1.0 - (s - RIBBON_HOLD) / (1.0 - RIBBON_HOLD)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuroraStar {
    pub pos: Vec2,
    pub brightness: f32,
    pub phase: f32,
    pub life: u32,
}

impl AuroraStar {
    fn spawn(rng: &mut Rng, size: Vec2) -> Self {
        Self {
            pos: Vec2::new(rng.range(0.0, size.x), rng.range(0.0, size.y * 0.6)),
            brightness: rng.range(0.3, 1.0),
            phase: rng.range(0.0, TAU),
            life: 120 + rng.next_int(480),
        }
    }

    pub fn alpha(&self, frame: f32) -> f32 {
        self.brightness * (0.5 + 0.5 * (frame * 0.08 + self.phase).sin())
    }
}

#[derive(Debug, Clone)]
pub struct AuroraSystem {
    lsystem: LSystem,
    interval: Interval,
    rng: Rng,
    /// Advances every step the aurora is visible; scrolls the noise field.
    noise_time: f32,
    stars: Vec<AuroraStar>,
    star_count: usize,
    samples: usize,
}

impl AuroraSystem {
    pub fn new(
        cap: usize,
        fire_chance: f32,
        interval: f32,
        star_count: usize,
        samples: usize,
        rng: Rng,
    ) -> Self {
        Self {
            lsystem: LSystem::new(cap, fire_chance),
            interval: Interval::new(interval),
            rng,
            noise_time: 0.0,
            stars: Vec::with_capacity(star_count),
            star_count,
            samples: samples.max(2),
        }
    }

    pub fn initialize(&mut self, size: Vec2) {
        self.stars.clear();
        for _ in 0..self.star_count {
            let star = AuroraStar::spawn(&mut self.rng, size);
            self.stars.push(star);
        }
    }

    pub fn lsystem(&self) -> &LSystem {
        &self.lsystem
    }

    pub fn stars(&self) -> &[AuroraStar] {
        &self.stars
    }

    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    /// Run the evolution task. Called every tick, visible or not.
    pub fn advance_clock(&mut self, dt: f32) {
        for _ in 0..self.interval.tick(dt) {
            if self.lsystem.step(&mut self.rng) == Evolution::Reset {
                log::debug!("aurora sequence hit its cap, reset to seed");
            }
        }
    }

    pub fn teardown(&mut self) {
        self.interval.cancel();
    }

    pub fn update(&mut self, frame: &SceneFrame) {
        self.noise_time += 0.004;
        for i in 0..self.stars.len() {
            if self.stars[i].life == 0 {
                self.stars[i] = AuroraStar::spawn(&mut self.rng, frame.size);
            } else {
                self.stars[i].life -= 1;
            }
        }
    }

    /// Top of the curtain at a sample, from two noise octaves and a sine.
    fn ribbon_y(&self, noise: &Noise, x: f32, height: f32, layer: f32, t: f32) -> f32 {
        let sign = if layer > 0.0 { -1.0 } else { 1.0 };
        let n = noise.perlin(x * 0.003 + layer * 7.0, t) * 0.7
            + noise.perlin(x * 0.009 + layer * 3.0, t * 1.8) * 0.3;
        height * (0.22 + layer * 0.06) + sign * n * height * 0.12 + (x * 0.01 + t * 6.0 + layer * 2.0).sin() * 14.0
    }

    fn draw_layer(&self, surface: &mut dyn Surface, noise: &Noise, frame: &SceneFrame, layer: f32, alpha: f32) {
        let (w, h) = (frame.width(), frame.height());
        let length = h * 0.28;
        let t = self.noise_time + layer * 0.5;
        for i in 0..self.samples {
            let x = w * i as f32 / (self.samples - 1) as f32;
            let top = self.ribbon_y(noise, x, h, layer, t);
            let token = self.lsystem.token_at(i, self.samples);
            let width = (w / self.samples as f32) * (0.6 + 0.4 * token.weight)
                * if token.symbol == Symbol::B { 0.6 } else { 1.0 };
            for s in 0..CURTAIN_SEGMENTS {
                let s0 = s as f32 / CURTAIN_SEGMENTS as f32;
                let s1 = (s + 1) as f32 / CURTAIN_SEGMENTS as f32;
                let c = GREEN.lerp(PURPLE, s0).with_alpha(ribbon_alpha(s0) * alpha * 0.35);
                surface.stroke_line(
                    Vec2::new(x, top + length * s0),
                    Vec2::new(x, top + length * s1),
                    width,
                    c,
                );
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, noise: &Noise, frame: &SceneFrame, alpha: f32) {
        let f = frame.frame_f32();
        for star in &self.stars {
            surface.fill_circle(star.pos, 1.1, STAR.with_alpha(star.alpha(f) * alpha));
        }
        self.draw_layer(surface, noise, frame, 0.0, alpha);
        // Fainter second layer with inverted noise.
        self.draw_layer(surface, noise, frame, 1.0, alpha * 0.5);
    }
}
