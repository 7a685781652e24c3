//! Seedable randomness for the simulated feed.
//!
//! Everything random the simulator does (which contest to grow, by how
//! much, whether to inject, what the injected contest looks like) goes
//! through [`RandomSource`], so tests can script the choices and seeded runs
//! are reproducible.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Source of the random choices made by the simulator.
pub trait RandomSource: Send {
    /// Uniform index in `0..len`, or `None` when `len == 0`.
    fn index(&mut self, len: usize) -> Option<usize>;

    /// Uniform value in `low..=high`. Returns `low` if `high < low`.
    fn range(&mut self, low: u64, high: u64) -> u64;

    /// `true` with the given probability, clamped to `[0, 1]`.
    fn chance(&mut self, probability: f64) -> bool;

    /// Sixteen random bytes, used for generated ids.
    fn bytes(&mut self) -> [u8; 16];
}

/// [`RandomSource`] backed by a [`SmallRng`].
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    /// Deterministic source for a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Seeded when `seed` is set, entropy-backed otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }
}

impl RandomSource for SeededRandom {
    fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.rng.random_range(0..len))
    }

    fn range(&mut self, low: u64, high: u64) -> u64 {
        if high < low {
            return low;
        }
        self.rng.random_range(low..=high)
    }

    fn chance(&mut self, probability: f64) -> bool {
        let p = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self.rng.random_bool(p)
    }

    fn bytes(&mut self) -> [u8; 16] {
        self.rng.random()
    }
}
