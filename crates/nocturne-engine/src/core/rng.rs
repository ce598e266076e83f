//! Seedable pseudo-random number generator (mulberry32).
//! Deterministic, fast, no-std compatible.

/// Seedable pseudo-random number generator (mulberry32).
///
/// Produces an infinite stream of floats in `[0, 1)`. Two generators built
/// from the same seed yield identical streams.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u32,
}

impl Rng {
    pub fn new(seed: u32) -> Self {
        Rng { state: seed }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next float in [0, 1). Exact: every value is `k / 2^32`.
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }

    /// Next float in [0, 1), single precision.
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits keep the value strictly below 1.0 after the cast.
        (self.next_u32() >> 8) as f32 / 16_777_216.0
    }

    /// Uniform float in [lo, hi).
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f64() as f32
    }

    /// Uniform float in [-amplitude, amplitude).
    pub fn signed(&mut self, amplitude: f32) -> f32 {
        (self.next_f64() as f32 * 2.0 - 1.0) * amplitude
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f32) -> bool {
        (self.next_f64() as f32) < p
    }

    /// Random index in [0, len). Returns 0 for an empty range.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }
}
