//! Engine backed by the operating system's entropy source.

use rand::rngs::OsRng;
use rand::RngCore;

use super::{check_seed_length, Engine};
use crate::error::Result;

/// Draws every word from [`OsRng`]. Not reproducible; takes no seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEntropy;

impl SystemEntropy {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for SystemEntropy {
    fn name(&self) -> &'static str {
        "system-entropy"
    }

    fn draw(&mut self) -> u32 {
        OsRng.next_u32()
    }

    fn max_value(&self) -> u32 {
        u32::MAX
    }

    fn seed_length(&self) -> usize {
        0
    }

    fn reseed(&mut self, words: &[u32]) -> Result<()> {
        check_seed_length(self.name(), 0, words.len())
    }
}
