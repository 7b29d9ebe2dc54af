// extensions/easing.rs
//
// Pure easing functions for zone transitions and hover interpolation.
// No dependencies on actor state, just math.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Half-cosine: `(1 - cos(πt)) / 2`. Exactly 0.5 at t = 0.5.
    SineInOut,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t` in [0, 1].
    /// Every variant maps [0, 1] onto [0, 1] with fixed endpoints.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::SineInOut => {
                // Pin the ends so adjacent segments meet exactly.
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    ((1.0 - (PI * t).cos()) / 2.0).clamp(0.0, 1.0)
                }
            }
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 2] = [Easing::Linear, Easing::SineInOut];

    #[test]
    fn linear_endpoints() {
        assert_eq!(Easing::Linear.apply(0.0), 0.0);
        assert_eq!(Easing::Linear.apply(1.0), 1.0);
        assert_eq!(Easing::Linear.apply(0.5), 0.5);
    }

    #[test]
    fn sine_in_out_is_half_at_midpoint() {
        assert_eq!(Easing::SineInOut.apply(0.5), 0.5);
    }

    #[test]
    fn endpoints_are_fixed_for_every_variant() {
        for e in ALL {
            assert!(e.apply(0.0).abs() < 1e-6, "{e:?} at 0");
            assert!((e.apply(1.0) - 1.0).abs() < 1e-6, "{e:?} at 1");
        }
    }

    #[test]
    fn output_stays_in_unit_range() {
        for e in ALL {
            for i in 0..=100 {
                let v = e.apply(i as f32 / 100.0);
                assert!((0.0..=1.0).contains(&v), "{e:?} produced {v}");
            }
        }
    }

    #[test]
    fn lerp_hits_both_ends() {
        assert_eq!(lerp(100.0, 200.0, 0.0), 100.0);
        assert_eq!(lerp(100.0, 200.0, 1.0), 200.0);
        assert!((lerp(100.0, 200.0, 0.25) - 125.0).abs() < 1e-4);
    }

    #[test]
    fn easing_parses_from_snake_case() {
        let e: Easing = serde_json::from_str("\"sine_in_out\"").unwrap();
        assert_eq!(e, Easing::SineInOut);
    }
}
