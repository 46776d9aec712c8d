//! Quick-and-dirty linear congruential engine (`x = 1664525x + 1013904223`).
//!
//! Period 2^32. The low-order bits are weak, which is why the derived
//! distributions always use the high bits or a floating-point division.

use super::{Engine, Seedable};
use crate::error::Result;

const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;

#[inline]
pub(crate) fn step(x: u32) -> u32 {
    x.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT)
}

/// Single-word linear congruential engine.
#[derive(Debug, Clone)]
pub struct QuickDirty {
    state: u32,
}

impl Seedable for QuickDirty {
    const NAME: &'static str = "quick-dirty";
    const SEED_LENGTH: usize = 1;

    fn from_state(words: &[u32]) -> Self {
        Self { state: words[0] }
    }

    fn with_seed(seed: u32) -> Self {
        Self { state: seed }
    }
}

impl Engine for QuickDirty {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn draw(&mut self) -> u32 {
        self.state = step(self.state);
        self.state
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
