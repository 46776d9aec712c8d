//! KISS: a congruential, a xorshift and a multiply-with-carry stream combined by
//! addition. Period above 2^124.

use super::{Engine, Seedable};
use crate::error::Result;

const MWC_MULTIPLIER: u64 = 698_769_069;
const DEFAULT_Y: u32 = 362_436_000;

/// Four-word combined engine.
#[derive(Debug, Clone)]
pub struct Kiss {
    x: u32,
    y: u32,
    z: u32,
    carry: u32,
}

impl Kiss {
    /// Engine started from the published default state.
    pub fn reference() -> Self {
        Self::from_state(&[7_654_321, 123_456_789, DEFAULT_Y, 521_288_629])
    }
}

impl Seedable for Kiss {
    const NAME: &'static str = "kiss";
    const SEED_LENGTH: usize = 4;

    /// Seed layout: carry, congruential word, xorshift word, multiply-with-carry word.
    fn from_state(words: &[u32]) -> Self {
        Self {
            carry: words[0] % MWC_MULTIPLIER as u32,
            x: words[1],
            // The xorshift stream must not start at zero.
            y: if words[2] == 0 { DEFAULT_Y } else { words[2] },
            z: words[3],
        }
    }
}

impl Engine for Kiss {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn draw(&mut self) -> u32 {
        self.x = self.x.wrapping_mul(69_069).wrapping_add(12_345);

        self.y ^= self.y << 13;
        self.y ^= self.y >> 17;
        self.y ^= self.y << 5;

        let t = MWC_MULTIPLIER * u64::from(self.z) + u64::from(self.carry);
        self.carry = (t >> 32) as u32;
        self.z = t as u32;

        self.x.wrapping_add(self.y).wrapping_add(self.z)
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
