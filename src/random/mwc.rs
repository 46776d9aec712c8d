//! Marsaglia's lag-256 multiply-with-carry and lag-4096 complementary
//! multiply-with-carry engines.
//!
//! Both take the carry from the first seed word (reduced below the multiplier so
//! the carry cannot overflow) and the lag table from the remaining words.

use super::{Engine, Seedable};
use crate::error::Result;

const MWC_MULTIPLIER: u64 = 809_430_660;
const MWC_LAG: usize = 256;

/// Multiply-with-carry engine over a 256-word lag table, period about 2^8222.
#[derive(Debug, Clone)]
pub struct Mwc256 {
    table: Box<[u32; MWC_LAG]>,
    carry: u32,
    index: u8,
}

impl Seedable for Mwc256 {
    const NAME: &'static str = "mwc256";
    const SEED_LENGTH: usize = MWC_LAG + 1;

    fn from_state(words: &[u32]) -> Self {
        let mut table = Box::new([0u32; MWC_LAG]);
        table.copy_from_slice(&words[1..=MWC_LAG]);
        Self {
            table,
            carry: words[0] % MWC_MULTIPLIER as u32,
            index: u8::MAX,
        }
    }
}

impl Engine for Mwc256 {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn draw(&mut self) -> u32 {
        self.index = self.index.wrapping_add(1);
        let slot = &mut self.table[self.index as usize];
        let t = MWC_MULTIPLIER * u64::from(*slot) + u64::from(self.carry);
        self.carry = (t >> 32) as u32;
        *slot = t as u32;
        *slot
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

const CMWC_MULTIPLIER: u64 = 18_782;
const CMWC_CARRY_LIMIT: u32 = 18_781;
const CMWC_LAG: usize = 4096;
const CMWC_BASE: u32 = 0xFFFF_FFFE;

/// Complementary multiply-with-carry engine over a 4096-word lag table,
/// period about 2^131104.
#[derive(Debug, Clone)]
pub struct Cmwc4096 {
    table: Box<[u32]>,
    carry: u32,
    index: usize,
}

impl Seedable for Cmwc4096 {
    const NAME: &'static str = "cmwc4096";
    const SEED_LENGTH: usize = CMWC_LAG + 1;

    fn from_state(words: &[u32]) -> Self {
        Self {
            table: words[1..=CMWC_LAG].to_vec().into_boxed_slice(),
            carry: words[0] % CMWC_CARRY_LIMIT,
            index: CMWC_LAG - 1,
        }
    }
}

impl Engine for Cmwc4096 {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn draw(&mut self) -> u32 {
        self.index = (self.index + 1) & (CMWC_LAG - 1);
        let t = CMWC_MULTIPLIER * u64::from(self.table[self.index]) + u64::from(self.carry);
        self.carry = (t >> 32) as u32;
        let mut x = (t as u32).wrapping_add(self.carry);
        if x < self.carry {
            x = x.wrapping_add(1);
            self.carry += 1;
        }
        let value = CMWC_BASE.wrapping_sub(x);
        self.table[self.index] = value;
        value
    }

    fn max_value(&self) -> u32 {
        CMWC_BASE
    }

    fn seed_length(&self) -> usize {
        Self::SEED_LENGTH
    }

    fn reseed(&mut self, words: &[u32]) -> Result<()> {
        *self = Self::from_words(words)?;
        Ok(())
    }
}
