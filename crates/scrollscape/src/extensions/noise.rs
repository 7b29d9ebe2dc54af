// extensions/noise.rs
//
// Seeded 2D Perlin gradient noise.
// `fbm` returns values in [0, 1] so it can drive
// offsets, alphas and weights directly.

use crate::core::rng::Rng;
use crate::extensions::easing::lerp;

#[derive(Debug, Clone)]
pub struct Noise {
    perm: [u8; 512],
}

#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn grad(hash: u8, x: f32, y: f32) -> f32 {
    match hash & 7 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        3 => -x - y,
        4 => x,
        5 => -x,
        6 => y,
        _ => -y,
    }
}

impl Noise {
    /// Build a permutation table shuffled by the given seed.
    pub fn new(seed: u64) -> Self {
        let mut rng = Rng::new(seed ^ 0x9E37_79B9_7F4A_7C15);
        let mut table = [0u8; 256];
        for (i, v) in table.iter_mut().enumerate() {
            *v = i as u8;
        }
        for i in (1..256).rev() {
            let j = rng.next_int(i as u32 + 1) as usize;
            table.swap(i, j);
        }
        let mut perm = [0u8; 512];
        for i in 0..512 {
            perm[i] = table[i & 255];
        }
        Self { perm }
    }

    /// Raw gradient noise, roughly in [-1, 1]. Zero on integer lattice points.
    pub fn perlin(&self, x: f32, y: f32) -> f32 {
        let xf = x - x.floor();
        let yf = y - y.floor();
        let xi = (x.floor() as i32 & 255) as usize;
        let yi = (y.floor() as i32 & 255) as usize;

        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let b = p[xi + 1] as usize + yi;
        let aa = p[a];
        let ab = p[a + 1];
        let ba = p[b];
        let bb = p[b + 1];

        let u = fade(xf);
        let v = fade(yf);
        let x1 = lerp(grad(aa, xf, yf), grad(ba, xf - 1.0, yf), u);
        let x2 = lerp(grad(ab, xf, yf - 1.0), grad(bb, xf - 1.0, yf - 1.0), u);
        lerp(x1, x2, v)
    }

    /// Summed octaves (lacunarity 2, gain 0.5), normalised to [0, 1].
    pub fn fbm(&self, x: f32, y: f32, octaves: u32) -> f32 {
        let mut amp = 0.5;
        let mut freq = 1.0;
        let mut sum = 0.0;
        let mut norm = 0.0;
        for i in 0..octaves.max(1) {
            // Offset each octave so lattice zeros don't line up.
            let o = i as f32 * 17.31;
            sum += self.perlin(x * freq + o, y * freq + o) * amp;
            norm += amp;
            amp *= 0.5;
            freq *= 2.0;
        }
        ((sum / norm) * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_field() {
        let a = Noise::new(7);
        let b = Noise::new(7);
        for i in 0..20 {
            let x = i as f32 * 0.37;
            assert_eq!(a.perlin(x, 1.3), b.perlin(x, 1.3));
            assert_eq!(a.fbm(x, 1.3, 3), b.fbm(x, 1.3, 3));
        }
    }

    #[test]
    fn samples_stay_in_unit_range() {
        let n = Noise::new(3);
        for i in 0..200 {
            let x = i as f32 * 0.173 - 20.0;
            let y = i as f32 * 0.291;
            for octaves in [1, 3] {
                let f = n.fbm(x, y, octaves);
                assert!((0.0..=1.0).contains(&f));
            }
        }
    }

    #[test]
    fn lattice_points_are_neutral() {
        let n = Noise::new(11);
        assert_eq!(n.perlin(4.0, 9.0), 0.0);
    }

    #[test]
    fn field_is_continuous() {
        let n = Noise::new(5);
        let a = n.perlin(2.5, 0.5);
        let b = n.perlin(2.5001, 0.5);
        assert!((a - b).abs() < 0.01);
    }
}
