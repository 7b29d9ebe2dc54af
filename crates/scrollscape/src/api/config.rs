use std::fmt;

use serde::{Deserialize, Serialize};

/// Scroll-progress breakpoints partitioning [0, 1] into zone segments.
///
/// Must be finite, inside [0, 1] and strictly increasing; `SceneConfig::validate`
/// enforces this so the scheduler never sees a zero-width segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    /// Space starts fading into aurora.
    pub space_end: f32,
    /// Aurora is at full strength and starts fading into sky.
    pub aurora_end: f32,
    /// Sky reaches full strength.
    pub sky_full: f32,
    /// Sky starts fading into sunset.
    pub sunset_start: f32,
    /// Sunset reaches full strength and starts fading into deep sea.
    pub sunset_full: f32,
    /// Deep sea reaches full strength.
    pub sunset_end: f32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            space_end: 0.02,
            aurora_end: 0.25,
            sky_full: 0.45,
            sunset_start: 0.55,
            sunset_full: 0.72,
            sunset_end: 0.82,
        }
    }
}

impl Breakpoints {
    pub fn as_array(&self) -> [f32; 6] {
        [
            self.space_end,
            self.aurora_end,
            self.sky_full,
            self.sunset_start,
            self.sunset_full,
            self.sunset_end,
        ]
    }

    pub fn is_valid(&self) -> bool {
        let values = self.as_array();
        values.iter().all(|v| v.is_finite() && (0.0..=1.0).contains(v))
            && values.windows(2).all(|w| w[0] < w[1])
    }
}

/// Why a configuration was rejected.
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON could not be parsed.
    Parse(serde_json::Error),
    /// Breakpoints are out of range or not strictly increasing.
    Breakpoints(Breakpoints),
    /// A timing field (fixed dt, aurora interval, rocket span) is not positive.
    Timing(&'static str),
    /// The gradient sampling step is not positive.
    GradientStep(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid scene config JSON: {e}"),
            ConfigError::Breakpoints(b) => {
                write!(f, "breakpoints must be strictly increasing in [0, 1]: {:?}", b.as_array())
            }
            ConfigError::Timing(field) => write!(f, "{field} must be positive"),
            ConfigError::GradientStep(step) => {
                write!(f, "gradient step must be positive, got {step}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Tunables for one backdrop instance. Every field has a default, so a JSON
/// document only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Seed for every random pool and the noise field.
    pub seed: u64,
    pub breakpoints: Breakpoints,
    /// Zones with a weight at or below this are neither updated nor drawn.
    pub visibility_threshold: f32,
    /// Scanline step of the gradient background, in pixels.
    pub gradient_step: f32,

    pub star_count: usize,
    /// Fraction of stars that drift and leave a trail.
    pub moving_star_ratio: f32,
    pub star_trail_cap: usize,
    pub meteor_count: usize,
    /// Scroll progress over which the rocket completes its flight.
    pub rocket_span: f32,
    pub rocket_trail_cap: usize,
    /// Frames for one satellite pass.
    pub satellite_period: u32,

    /// Seconds between two L-system evolution steps.
    pub aurora_interval: f32,
    pub aurora_token_cap: usize,
    /// Probability that a production rule fires for a token.
    pub aurora_fire_chance: f32,
    pub aurora_star_count: usize,
    pub ribbon_samples: usize,

    pub cloud_count: usize,
    pub bird_count: usize,

    pub bubble_count: usize,
    pub fish_count: usize,
    pub jellyfish_count: usize,
    pub seaweed_count: usize,
    pub coral_count: usize,
    /// Pixel band below the horizon over which sea actors fade in.
    pub surface_fade_band: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            seed: 42,
            breakpoints: Breakpoints::default(),
            visibility_threshold: 0.01,
            gradient_step: 3.0,

            star_count: 220,
            moving_star_ratio: 0.04,
            star_trail_cap: 240,
            meteor_count: 4,
            rocket_span: 0.12,
            rocket_trail_cap: 60,
            satellite_period: 1500,

            aurora_interval: 2.0,
            aurora_token_cap: 100,
            aurora_fire_chance: 0.7,
            aurora_star_count: 60,
            ribbon_samples: 48,

            cloud_count: 7,
            bird_count: 5,

            bubble_count: 40,
            fish_count: 10,
            jellyfish_count: 4,
            seaweed_count: 8,
            coral_count: 3,
            surface_fade_band: 80.0,
        }
    }
}

impl SceneConfig {
    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the engine relies on without runtime guards.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.breakpoints.is_valid() {
            return Err(ConfigError::Breakpoints(self.breakpoints));
        }
        if !(self.fixed_dt > 0.0) {
            return Err(ConfigError::Timing("fixed_dt"));
        }
        if !(self.aurora_interval > 0.0) {
            return Err(ConfigError::Timing("aurora_interval"));
        }
        if !(self.rocket_span > 0.0) {
            return Err(ConfigError::Timing("rocket_span"));
        }
        if !(self.gradient_step > 0.0) {
            return Err(ConfigError::GradientStep(self.gradient_step));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SceneConfig::default().validate().is_ok());
        assert!(Breakpoints::default().is_valid());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{
            "seed": 7,
            "breakpoints": { "sunset_full": 0.7 },
            "star_count": 50
        }"#;
        let config = SceneConfig::from_json(json).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.star_count, 50);
        assert_eq!(config.breakpoints.sunset_full, 0.7);
        assert_eq!(config.breakpoints.space_end, 0.02);
        assert_eq!(config.meteor_count, SceneConfig::default().meteor_count);
    }

    #[test]
    fn rejects_non_increasing_breakpoints() {
        let json = r#"{ "breakpoints": { "sky_full": 0.6, "sunset_start": 0.6 } }"#;
        match SceneConfig::from_json(json) {
            Err(ConfigError::Breakpoints(_)) => {}
            other => panic!("expected breakpoint error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_json() {
        let err = SceneConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("invalid scene config"));
    }

    #[test]
    fn rejects_zero_timestep() {
        let config = SceneConfig { fixed_dt: 0.0, ..SceneConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Timing("fixed_dt"))));
    }

    #[test]
    fn breakpoints_round_trip_through_json() {
        let b = Breakpoints::default();
        let json = serde_json::to_string(&b).unwrap();
        let back: Breakpoints = serde_json::from_str(&json).unwrap();
        assert_eq!(b, back);
    }
}
