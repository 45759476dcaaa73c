//! Seeded, forkable randomness.
//!
//! The engine never owns an RNG. Everything random (the initial patch
//! shuffle, rollouts, random players, parallel MCTS workers) gets a
//! [`GameRng`] from its caller, so a whole game or search replays
//! identically from one seed.
//!
//! ```
//! use patchwork::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut worker = rng.fork();
//!
//! let a: usize = rng.gen_range(0..1000);
//! let b: usize = worker.gen_range(0..1000);
//! assert_ne!(a, b);
//! ```

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// ChaCha8 stream plus the seed it started from.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Child RNG seeded from the next value of this stream.
    ///
    /// Forking advances `self`, so consecutive forks differ while two
    /// parents with the same seed fork identical children.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self::new(self.inner.next_u64())
    }

    /// Uniform sample from `range` (`a..b` or `a..=b`).
    ///
    /// # Panics
    ///
    /// Panics on an empty range.
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.inner.gen_range(range)
    }

    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }
}
