//! Deterministic, seedable RNG wrapper.
//!
//! Route sampling is the only randomised step in the engine.  Callers pass a
//! `&mut SimRng` into every operation that samples, so a run is reproducible
//! from its seed: identical canonical graph + incidents + seed ⇒ identical
//! routes.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG.
///
/// Not `Sync`: concurrent requests each hold their own instance, typically
/// derived from a root via [`SimRng::child`].
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset, giving each
    /// request its own stream deterministically from one root.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Index uniformly in `0..len`.
    ///
    /// # Panics
    /// Panics if `len == 0`.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }

    /// A uniformly sampled ordered pair of **distinct** indices in `0..len`.
    ///
    /// Returns `None` when `len < 2`.
    pub fn distinct_pair(&mut self, len: usize) -> Option<(usize, usize)> {
        if len < 2 {
            return None;
        }
        let a = self.0.gen_range(0..len);
        // Draw from the len-1 remaining slots and skip over `a`.
        let mut b = self.0.gen_range(0..len - 1);
        if b >= a {
            b += 1;
        }
        Some((a, b))
    }
}
