//! # Random Engines
//!
//! Deterministic pseudo-random bit generators sharing a single draw contract.
//!
//! Every engine implements [`Engine`]: `draw()` returns an integer in
//! `0..=max_value()` (the L'Ecuyer engine starts at 1), `seed_length()` names the
//! number of 32-bit words a full reseed takes, and `reseed()` replaces the state.
//! Derived distributions (uniform reals, indices, Gaussians, points on spheres)
//! are layered on top of `draw()`/`max_value()` only, in [`distributions`] and
//! the [`Random`] decorator, so any engine can be substituted for any other.
//!
//! Engines are not thread-safe. Wrap one in a [`SharedEngine`] to draw from
//! several threads, or seed one engine per thread from a master engine with
//! [`Seedable::from_engine`].
//!
//! ## Example
//!
//! ```rust
//! use swarmopt::random::{MersenneTwister, Random, Seedable};
//!
//! let mut rng = Random::new(MersenneTwister::with_seed(5489)).unwrap();
//! assert_eq!(rng.draw(), 3_499_211_612);
//!
//! let u = rng.uniform();
//! assert!(u > 0.0 && u < 1.0);
//! ```

pub mod composite;
pub mod distributions;
pub mod entropy;
pub mod kiss;
pub mod lcg;
pub mod lecuyer;
pub mod mersenne;
pub mod mwc;
pub mod shared;
pub mod xorshift;

use crate::error::{Result, SwarmError};

pub use composite::{Sum, Switcher};
pub use distributions::Random;
pub use entropy::SystemEntropy;
pub use kiss::Kiss;
pub use lcg::QuickDirty;
pub use lecuyer::LEcuyer;
pub use mersenne::MersenneTwister;
pub use mwc::{Cmwc4096, Mwc256};
pub use shared::SharedEngine;
pub use xorshift::XorShift;

/// The draw contract shared by every engine.
pub trait Engine {
    /// Short identifier of the algorithm.
    fn name(&self) -> &'static str;

    /// Returns the next raw integer of the stream.
    fn draw(&mut self) -> u32;

    /// Inclusive upper bound of `draw()`.
    fn max_value(&self) -> u32;

    /// Number of 32-bit words consumed by `reseed()`.
    fn seed_length(&self) -> usize;

    /// Replaces the engine state from exactly `seed_length()` words.
    ///
    /// # Errors
    ///
    /// Returns `SeedLength` if `words.len() != seed_length()`; the state is left
    /// untouched in that case.
    fn reseed(&mut self, words: &[u32]) -> Result<()>;

    /// Whether the engine may be drawn from.
    fn is_ready(&self) -> bool {
        true
    }

    /// Reseeds this engine from `seed_length()` draws of another engine.
    fn reseed_from(&mut self, source: &mut dyn Engine) -> Result<()> {
        let words: Vec<u32> = (0..self.seed_length()).map(|_| source.draw()).collect();
        self.reseed(&words)
    }
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn draw(&mut self) -> u32 {
        (**self).draw()
    }

    fn max_value(&self) -> u32 {
        (**self).max_value()
    }

    fn seed_length(&self) -> usize {
        (**self).seed_length()
    }

    fn reseed(&mut self, words: &[u32]) -> Result<()> {
        (**self).reseed(words)
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}

/// Construction of an engine from seed material.
///
/// Engines are only reachable through these constructors, so an engine value
/// always carries a seeded state.
pub trait Seedable: Engine + Sized {
    /// Identifier used in seed errors.
    const NAME: &'static str;

    /// Number of words in a full seed.
    const SEED_LENGTH: usize;

    /// Builds the engine from a seed whose length has already been checked.
    fn from_state(words: &[u32]) -> Self;

    /// Builds the engine from exactly `SEED_LENGTH` words.
    fn from_words(words: &[u32]) -> Result<Self> {
        check_seed_length(Self::NAME, Self::SEED_LENGTH, words.len())?;
        Ok(Self::from_state(words))
    }

    /// Builds the engine from a single 32-bit seed.
    ///
    /// Engines with a longer seed expand it with [`expand_seed`].
    fn with_seed(seed: u32) -> Self {
        Self::from_state(&expand_seed(seed, Self::SEED_LENGTH))
    }

    /// Builds the engine from `SEED_LENGTH` draws of another engine.
    fn from_engine<S: Engine + ?Sized>(source: &mut S) -> Self {
        let words: Vec<u32> = (0..Self::SEED_LENGTH).map(|_| source.draw()).collect();
        Self::from_state(&words)
    }
}

/// Expands one 32-bit seed into `len` words with the quick-and-dirty
/// linear-congruential recurrence, starting from `seed`.
pub fn expand_seed(seed: u32, len: usize) -> Vec<u32> {
    let mut x = seed;
    (0..len)
        .map(|_| {
            x = lcg::step(x);
            x
        })
        .collect()
}

pub(crate) fn check_seed_length(engine: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(SwarmError::SeedLength {
            engine,
            expected,
            actual,
        });
    }
    Ok(())
}
