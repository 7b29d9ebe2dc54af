//! Scroll progress → zone intensities.
//!
//! The page is split into five zones, top to bottom. An ordered table of
//! transitions cross-fades adjacent zones; between transitions the last
//! destination zone holds at full weight.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::api::config::Breakpoints;
use crate::extensions::easing::Easing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Space,
    Aurora,
    Sky,
    Sunset,
    DeepSea,
}

impl Zone {
    pub const ALL: [Zone; 5] = [Zone::Space, Zone::Aurora, Zone::Sky, Zone::Sunset, Zone::DeepSea];

    pub const fn index(self) -> usize {
        match self {
            Zone::Space => 0,
            Zone::Aurora => 1,
            Zone::Sky => 2,
            Zone::Sunset => 3,
            Zone::DeepSea => 4,
        }
    }
}

/// One non-negative weight per zone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZoneWeights([f32; 5]);

impl ZoneWeights {
    /// All weight on a single zone.
    pub fn pure(zone: Zone) -> Self {
        let mut w = Self::default();
        w.0[zone.index()] = 1.0;
        w
    }

    pub fn get(&self, zone: Zone) -> f32 {
        self.0[zone.index()]
    }

    pub fn set(&mut self, zone: Zone, weight: f32) {
        self.0[zone.index()] = weight;
    }

    pub fn sum(&self) -> f32 {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Zone, f32)> + '_ {
        Zone::ALL.iter().map(move |&z| (z, self.get(z)))
    }

    /// Whether a zone is strong enough to be updated and drawn.
    pub fn visible(&self, zone: Zone, threshold: f32) -> bool {
        self.get(zone) > threshold
    }

    pub fn as_array(&self) -> [f32; 5] {
        self.0
    }
}

impl Index<Zone> for ZoneWeights {
    type Output = f32;

    fn index(&self, zone: Zone) -> &f32 {
        &self.0[zone.index()]
    }
}

/// A cross-fade from `from` to `to` over the progress range [start, end].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: Zone,
    pub to: Zone,
    pub start: f32,
    pub end: f32,
    pub easing: Easing,
}

impl Transition {
    /// Normalized position inside the segment, clamped to [0, 1].
    fn local(&self, p: f32) -> f32 {
        sub_progress(p, self.start, self.end)
    }
}

/// Normalized position of `p` within [start, end], clamped to [0, 1].
///
/// A zero or negative span yields 0 below `end` and 1 at or past it.
pub fn sub_progress(p: f32, start: f32, end: f32) -> f32 {
    if !p.is_finite() {
        return 0.0;
    }
    let span = end - start;
    if span <= f32::EPSILON {
        return if p >= end { 1.0 } else { 0.0 };
    }
    ((p - start) / span).clamp(0.0, 1.0)
}

/// Ordered transition table evaluated once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneScheduler {
    transitions: Vec<Transition>,
}

impl ZoneScheduler {
    pub fn from_breakpoints(b: &Breakpoints) -> Self {
        let t = |from, to, start, end, easing| Transition { from, to, start, end, easing };
        Self {
            transitions: vec![
                t(Zone::Space, Zone::Aurora, b.space_end, b.aurora_end, Easing::Linear),
                t(Zone::Aurora, Zone::Sky, b.aurora_end, b.sky_full, Easing::Linear),
                t(Zone::Sky, Zone::Sunset, b.sunset_start, b.sunset_full, Easing::SineInOut),
                t(Zone::Sunset, Zone::DeepSea, b.sunset_full, b.sunset_end, Easing::SineInOut),
            ],
        }
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Zone weights at progress `p`. Non-finite input is treated as 0.
    pub fn weights(&self, p: f32) -> ZoneWeights {
        let p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
        let mut holding = match self.transitions.first() {
            Some(first) => first.from,
            None => return ZoneWeights::pure(Zone::Space),
        };

        for t in &self.transitions {
            if p < t.start {
                return ZoneWeights::pure(holding);
            }
            if p <= t.end {
                let k = t.easing.apply(t.local(p));
                let mut w = ZoneWeights::default();
                w.set(t.from, 1.0 - k);
                w.set(t.to, k);
                return w;
            }
            holding = t.to;
        }
        ZoneWeights::pure(holding)
    }
}

impl Default for ZoneScheduler {
    fn default() -> Self {
        Self::from_breakpoints(&Breakpoints::default())
    }
}
