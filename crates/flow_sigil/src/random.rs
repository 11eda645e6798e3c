//! Helpers for drawing uniform values from the deterministic random stream.
//!
//! Every stochastic decision in the crate goes through these functions so that the
//! number of draws per decision is fixed: one `next_u32` per value.
use rand::Rng;

/// Generate a random float in the range [0, 1).
///
/// Uses the top 24 bits so the result is exactly representable and never rounds up to 1.
#[inline]
pub(crate) fn rand01(rng: &mut dyn Rng) -> f32 {
    (rng.next_u32() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
}

/// Uniform value in `[lo, hi)`.
#[inline]
pub(crate) fn rand_range(rng: &mut dyn Rng, lo: f32, hi: f32) -> f32 {
    lo + rand01(rng) * (hi - lo)
}

/// Uniform index in `0..len`. `len` must be non-zero.
#[inline]
pub(crate) fn rand_index(rng: &mut dyn Rng, len: usize) -> usize {
    debug_assert!(len > 0);
    ((rand01(rng) * len as f32) as usize).min(len - 1)
}

/// Bernoulli trial that succeeds with the given probability.
#[inline]
pub(crate) fn coin(rng: &mut dyn Rng, probability: f32) -> bool {
    rand01(rng) < probability
}

/// Linearly re-map `value` from `[in_lo, in_hi]` to `[out_lo, out_hi]` without clamping.
#[inline]
pub(crate) fn remap(value: f32, in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32) -> f32 {
    if in_hi == in_lo {
        return out_lo;
    }
    out_lo + (value - in_lo) / (in_hi - in_lo) * (out_hi - out_lo)
}
