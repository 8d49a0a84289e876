//! Deterministic random number generation for power-card draws.
//!
//! The engine never reaches for an ambient random function. Anything that
//! rolls dice (award chance, which type is drawn, which card a STEAL takes,
//! which challenge is presented) goes through a [`RandomSource`], so hosts
//! and tests can inject a seeded or scripted source.
//!
//! ```
//! use trivia_engine::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.gen_index(10), b.gen_index(10));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of randomness consumed by the engine.
pub trait RandomSource {
    /// Return true with the given probability (0.0..=1.0).
    fn gen_bool(&mut self, probability: f64) -> bool;

    /// Return a uniformly chosen index in `0..len`. `len` must be non-zero.
    fn gen_index(&mut self, len: usize) -> usize;
}

/// Seedable RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for GameRng {
    fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    fn gen_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "gen_index needs a non-empty range");
        self.inner.gen_range(0..len)
    }
}
