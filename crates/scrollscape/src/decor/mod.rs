//! Card decorations: small, independent renderers attached to page cards.
//!
//! A card picks its kind once. The kind builds an `Animation`, and
//! `Decoration` drives it with its own clock and an eased hover level.

pub mod fader;
pub mod flock;
pub mod grass;
pub mod matrix_rain;
pub mod placeholder;
pub mod sequencer;
pub mod spirograph;

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::animation::{Animation, FrameContext};
use crate::core::time::FrameClock;
use crate::renderer::surface::Surface;

/// Fraction of the remaining distance the hover level covers per step.
pub const HOVER_EASE: f32 = 0.1;
/// Intensity of a card nobody is hovering.
pub const IDLE_INTENSITY: f32 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecorationKind {
    Spirograph,
    Flock,
    Sequencer,
    MatrixRain,
    Grass,
    Fader,
    Placeholder,
}

impl DecorationKind {
    pub const ALL: [DecorationKind; 7] = [
        DecorationKind::Spirograph,
        DecorationKind::Flock,
        DecorationKind::Sequencer,
        DecorationKind::MatrixRain,
        DecorationKind::Grass,
        DecorationKind::Fader,
        DecorationKind::Placeholder,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DecorationKind::Spirograph => "spirograph",
            DecorationKind::Flock => "flock",
            DecorationKind::Sequencer => "sequencer",
            DecorationKind::MatrixRain => "matrix_rain",
            DecorationKind::Grass => "grass",
            DecorationKind::Fader => "fader",
            DecorationKind::Placeholder => "placeholder",
        }
    }

    /// Build the renderer for this kind. Not yet initialized.
    pub fn build(self, seed: u64) -> Box<dyn Animation> {
        match self {
            DecorationKind::Spirograph => Box::new(spirograph::Spirograph::new(seed)),
            DecorationKind::Flock => Box::new(flock::Flock::new(seed)),
            DecorationKind::Sequencer => Box::new(sequencer::Sequencer::new(seed)),
            DecorationKind::MatrixRain => Box::new(matrix_rain::MatrixRain::new(seed)),
            DecorationKind::Grass => Box::new(grass::Grass::new(seed)),
            DecorationKind::Fader => Box::new(fader::Fader::new(seed)),
            DecorationKind::Placeholder => Box::new(placeholder::Placeholder::new()),
        }
    }
}

impl fmt::Display for DecorationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown decoration kind: {:?}", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for DecorationKind {
    type Err = UnknownKind;

    /// Accepts snake_case, kebab-case and any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|k| k.name() == normalized)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Hover level eased toward a 0/1 target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoverLevel {
    level: f32,
    target: f32,
}

impl HoverLevel {
    pub fn enter(&mut self) {
        self.target = 1.0;
    }

    pub fn leave(&mut self) {
        self.target = 0.0;
    }

    pub fn step(&mut self) {
        self.level += (self.target - self.level) * HOVER_EASE;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn target(&self) -> f32 {
        self.target
    }
}

/// One decorated card.
pub struct Decoration {
    kind: DecorationKind,
    animation: Box<dyn Animation>,
    hover: HoverLevel,
    clock: FrameClock,
    size: Vec2,
}

impl Decoration {
    /// Build and initialize a decoration for a card of the given size.
    pub fn new(kind: DecorationKind, size: Vec2, seed: u64) -> Self {
        let mut animation = kind.build(seed);
        animation.initialize(size);
        log::info!("{kind} decoration created at {}x{}", size.x, size.y);
        Self {
            kind,
            animation,
            hover: HoverLevel::default(),
            clock: FrameClock::new(),
            size,
        }
    }

    pub fn kind(&self) -> DecorationKind {
        self.kind
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn hover(&self) -> &HoverLevel {
        &self.hover
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        if hovered {
            self.hover.enter();
        } else {
            self.hover.leave();
        }
    }

    /// Speed and opacity multiplier for the current hover level.
    pub fn intensity(&self) -> f32 {
        IDLE_INTENSITY + (1.0 - IDLE_INTENSITY) * self.hover.level()
    }

    pub fn context(&self, dt: f32) -> FrameContext {
        FrameContext {
            frame: self.clock.frame(),
            time: self.clock.time(),
            dt,
            size: self.size,
            intensity: self.intensity(),
        }
    }

    /// One fixed step.
    pub fn step(&mut self, dt: f32) {
        self.hover.step();
        self.clock.advance(dt);
        let ctx = self.context(dt);
        self.animation.update(&ctx);
    }

    pub fn draw(&self, surface: &mut dyn Surface, dt: f32) {
        let ctx = self.context(dt);
        self.animation.draw(surface, &ctx);
    }

    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
        self.animation.on_resize(size);
    }
}

/// Number of width-derived elements: one per `spacing` pixels.
pub fn count_for_width(width: f32, spacing: f32) -> usize {
    if width <= 0.0 || spacing <= 0.0 {
        return 0;
    }
    (width / spacing).floor() as usize
}
