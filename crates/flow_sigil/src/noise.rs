//! Seeded coherent value noise with octave layering.
//!
//! A fixed table of lattice values is filled once from the noise stream. Samples blend
//! the four surrounding lattice values with a cosine ease, and each octave doubles the
//! frequency while its amplitude shrinks by `falloff`. The sum is divided by the total
//! amplitude so every sample lies in `[0, 1)`.
//!
//! Lattice values are not zero at integer coordinates, so one-dimensional samples at
//! integer positions (used for zig-zag parity) still vary with the seed.
use std::f32::consts::PI;

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::random::{rand01, rand_range};

const TABLE_BITS: u32 = 12;
const TABLE_SIZE: usize = 1 << TABLE_BITS;
const TABLE_MASK: usize = TABLE_SIZE - 1;
const Y_WRAP_BITS: u32 = 4;
const Y_WRAP: usize = 1 << Y_WRAP_BITS;

/// Octave count and per-octave amplitude falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NoiseDetail {
    pub octaves: u32,
    pub falloff: f32,
}

impl NoiseDetail {
    /// Octave cap applied when curves follow the curl of the field.
    pub const CURL_MAX_OCTAVES: u32 = 5;

    /// Draw octaves from `[2, 10)` and falloff from `[0.5, 0.9)`.
    ///
    /// Both values are always drawn so the stream position does not depend on `curl`.
    pub fn select(rng: &mut dyn Rng, curl: bool) -> Self {
        let mut octaves = rand_range(rng, 2.0, 10.0).floor() as u32;
        let falloff = rand_range(rng, 0.5, 0.9);
        if curl {
            octaves = octaves.min(Self::CURL_MAX_OCTAVES);
        }
        Self { octaves, falloff }
    }
}

impl Default for NoiseDetail {
    fn default() -> Self {
        Self {
            octaves: 4,
            falloff: 0.5,
        }
    }
}

/// Coherent 2-D noise over a seeded lattice.
#[derive(Clone, PartialEq)]
pub struct CoherentNoise {
    table: Vec<f32>,
    detail: NoiseDetail,
    norm: f32,
}

impl std::fmt::Debug for CoherentNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoherentNoise")
            .field("detail", &self.detail)
            .finish_non_exhaustive()
    }
}

impl CoherentNoise {
    /// Fill the lattice from `rng` and fix the octave layering.
    pub fn new(rng: &mut dyn Rng, detail: NoiseDetail) -> Self {
        let table = (0..TABLE_SIZE).map(|_| rand01(rng)).collect();
        let octaves = detail.octaves.max(1);
        let mut norm = 0.0;
        let mut amplitude = 0.5;
        for _ in 0..octaves {
            norm += amplitude;
            amplitude *= detail.falloff;
        }
        Self {
            table,
            detail: NoiseDetail { octaves, ..detail },
            norm,
        }
    }

    pub fn detail(&self) -> NoiseDetail {
        self.detail
    }

    /// Sample at `(x, y)`. Negative coordinates are mirrored.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let (x, y) = (x.abs(), y.abs());
        let mut xi = x.floor() as usize;
        let mut yi = y.floor() as usize;
        let mut xf = x - x.floor();
        let mut yf = y - y.floor();

        let mut total = 0.0;
        let mut amplitude = 0.5;

        for _ in 0..self.detail.octaves {
            let offset = xi.wrapping_add(yi << Y_WRAP_BITS);
            let rx = ease(xf);
            let ry = ease(yf);

            let mut top = self.lattice(offset);
            top += rx * (self.lattice(offset.wrapping_add(1)) - top);
            let mut bottom = self.lattice(offset.wrapping_add(Y_WRAP));
            bottom += rx * (self.lattice(offset.wrapping_add(Y_WRAP + 1)) - bottom);
            top += ry * (bottom - top);

            total += top * amplitude;
            amplitude *= self.detail.falloff;

            xi <<= 1;
            xf *= 2.0;
            yi <<= 1;
            yf *= 2.0;
            if xf >= 1.0 {
                xi += 1;
                xf -= 1.0;
            }
            if yf >= 1.0 {
                yi += 1;
                yf -= 1.0;
            }
        }

        (total / self.norm).clamp(0.0, next_below_one())
    }

    /// One-dimensional sample along the x axis.
    #[inline]
    pub fn sample_1d(&self, x: f32) -> f32 {
        self.sample(x, 0.0)
    }

    #[inline]
    fn lattice(&self, offset: usize) -> f32 {
        self.table[offset & TABLE_MASK]
    }
}

#[inline]
fn ease(t: f32) -> f32 {
    0.5 * (1.0 - (t * PI).cos())
}

#[inline]
fn next_below_one() -> f32 {
    f32::from_bits(1.0f32.to_bits() - 1)
}

#[cfg(test)]
mod tests {
    use rand::rngs::ChaCha8Rng;
    use rand::SeedableRng;

    use super::*;

    fn noise(seed: u64, detail: NoiseDetail) -> CoherentNoise {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        CoherentNoise::new(&mut rng, detail)
    }

    #[test]
    fn samples_stay_in_unit_interval() {
        let n = noise(7, NoiseDetail { octaves: 9, falloff: 0.9 });
        for i in 0..200 {
            for j in 0..20 {
                let v = n.sample(i as f32 * 0.37, j as f32 * 1.3);
                assert!((0.0..1.0).contains(&v), "sample {v} out of range");
            }
        }
    }

    #[test]
    fn same_seed_same_samples() {
        let a = noise(99, NoiseDetail::default());
        let b = noise(99, NoiseDetail::default());
        assert_eq!(a, b);
        assert_eq!(a.sample(1.25, 3.5), b.sample(1.25, 3.5));
    }

    #[test]
    fn different_seeds_differ() {
        let a = noise(1, NoiseDetail::default());
        let b = noise(2, NoiseDetail::default());
        let differs = (0..32).any(|i| a.sample_1d(i as f32) != b.sample_1d(i as f32));
        assert!(differs);
    }

    #[test]
    fn neighbouring_samples_are_close() {
        let n = noise(3, NoiseDetail { octaves: 2, falloff: 0.5 });
        for i in 0..100 {
            let x = i as f32 * 0.005;
            let d = (n.sample(x, 0.2) - n.sample(x + 0.005, 0.2)).abs();
            assert!(d < 0.05, "jump of {d} at {x}");
        }
    }

    #[test]
    fn curl_caps_octaves() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..64 {
            let detail = NoiseDetail::select(&mut rng, true);
            assert!(detail.octaves >= 2 && detail.octaves <= NoiseDetail::CURL_MAX_OCTAVES);
            assert!((0.5..0.9).contains(&detail.falloff));
        }
    }
}
