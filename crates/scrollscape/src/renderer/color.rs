use serde::{Deserialize, Serialize};

/// RGBA color for drawing operations (components 0.0 - 1.0).
///
/// Blending is plain linear interpolation in RGB space; no perceptual
/// correction is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    /// Create a color from RGBA components (0.0 - 1.0).
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same color with the given alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Multiply the alpha channel, clamped to [0, 1].
    pub fn fade(self, k: f32) -> Self {
        Self { a: (self.a * k).clamp(0.0, 1.0), ..self }
    }

    /// Component-wise linear interpolation, alpha included.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Weighted sum of colors: Σ color_i × weight_i per RGB channel.
    /// The result is opaque.
    pub fn weighted_sum<I>(parts: I) -> Color
    where
        I: IntoIterator<Item = (Color, f32)>,
    {
        let mut out = Color::BLACK;
        for (c, w) in parts {
            out.r += c.r * w;
            out.g += c.g * w;
            out.b += c.b * w;
        }
        out
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
