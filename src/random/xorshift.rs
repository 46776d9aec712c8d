//! Marsaglia's five-word xorshift engine, period 2^160 - 1.
//!
//! The output multiplies the rotated `y` word (forced odd) with the newest
//! state word, which hides the linearity of the raw xorshift sequence.

use super::{Engine, Seedable};
use crate::error::Result;

const DEFAULT_STATE: [u32; 5] = [123_456_789, 362_436_069, 521_288_629, 88_675_123, 886_756_453];

/// Five-word xorshift engine.
#[derive(Debug, Clone)]
pub struct XorShift {
    x: u32,
    y: u32,
    z: u32,
    w: u32,
    v: u32,
}

impl XorShift {
    /// Engine started from the published default state.
    pub fn reference() -> Self {
        Self::from_state(&DEFAULT_STATE)
    }
}

impl Seedable for XorShift {
    const NAME: &'static str = "xorshift";
    const SEED_LENGTH: usize = 5;

    fn from_state(words: &[u32]) -> Self {
        // The all-zero state is a fixed point.
        let words = if words.iter().all(|&w| w == 0) {
            &DEFAULT_STATE[..]
        } else {
            words
        };
        Self {
            x: words[0],
            y: words[1],
            z: words[2],
            w: words[3],
            v: words[4],
        }
    }
}

impl Engine for XorShift {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn draw(&mut self) -> u32 {
        let t = self.x ^ (self.x >> 7);
        self.x = self.y;
        self.y = self.z;
        self.z = self.w;
        self.w = self.v;
        self.v = (self.v ^ (self.v << 6)) ^ (t ^ (t << 13));
        self.y
            .wrapping_add(self.y)
            .wrapping_add(1)
            .wrapping_mul(self.v)
    }

    fn max_value(&self) -> u32 {
        u32::MAX
    }

    fn seed_length(&self) -> usize {
        Self::SEED_LENGTH
    }

    fn reseed(&mut self, words: &[u32]) -> Result<()> {
        *self = Self::from_words(words)?;
        Ok(())
    }
}
