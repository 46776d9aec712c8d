//! MT19937, the 32-bit Mersenne Twister of Matsumoto and Nishimura.
//!
//! Period 2^19937 - 1. Single-word seeding follows the reference `init_genrand`,
//! array seeding follows `init_by_array`.

use super::{Engine, Seedable};
use crate::error::{Result, SwarmError};

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_B0DF;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7FFF_FFFF;
const ARRAY_SEED: u32 = 19_650_218;

/// The 624-word Mersenne Twister.
#[derive(Clone)]
pub struct MersenneTwister {
    state: Box<[u32; N]>,
    index: usize,
}

impl std::fmt::Debug for MersenneTwister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MersenneTwister")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl MersenneTwister {
    fn init_genrand(seed: u32) -> Self {
        let mut state = Box::new([0u32; N]);
        state[0] = seed;
        for i in 1..N {
            let prev = state[i - 1];
            state[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        Self { state, index: N }
    }

    fn init_by_array(key: &[u32]) -> Self {
        let mut engine = Self::init_genrand(ARRAY_SEED);
        let mt = &mut engine.state;
        let mut i = 1;
        let mut j = 0;

        for _ in 0..N.max(key.len()) {
            let prev = mt[i - 1];
            mt[i] = (mt[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_664_525))
                .wrapping_add(key[j])
                .wrapping_add(j as u32);
            i += 1;
            j += 1;
            if i >= N {
                mt[0] = mt[N - 1];
                i = 1;
            }
            if j >= key.len() {
                j = 0;
            }
        }
        for _ in 0..N - 1 {
            let prev = mt[i - 1];
            mt[i] = (mt[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_566_083_941))
                .wrapping_sub(i as u32);
            i += 1;
            if i >= N {
                mt[0] = mt[N - 1];
                i = 1;
            }
        }
        // Guarantees a non-zero initial state.
        mt[0] = UPPER_MASK;
        engine
    }

    /// Seeds with the reference `init_by_array` routine from a key of any
    /// non-zero length.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `key` is empty.
    pub fn with_key(key: &[u32]) -> Result<Self> {
        if key.is_empty() {
            return Err(SwarmError::InvalidArgument(
                "Mersenne Twister key must not be empty".to_string(),
            ));
        }
        Ok(Self::init_by_array(key))
    }

    fn twist(&mut self) {
        let mt = &mut self.state;
        for k in 0..N {
            let y = (mt[k] & UPPER_MASK) | (mt[(k + 1) % N] & LOWER_MASK);
            let mag = if y & 1 == 1 { MATRIX_A } else { 0 };
            mt[k] = mt[(k + M) % N] ^ (y >> 1) ^ mag;
        }
        self.index = 0;
    }
}

impl Seedable for MersenneTwister {
    const NAME: &'static str = "mt19937";
    const SEED_LENGTH: usize = N;

    fn from_state(words: &[u32]) -> Self {
        Self::init_by_array(words)
    }

    fn with_seed(seed: u32) -> Self {
        Self::init_genrand(seed)
    }
}

impl Engine for MersenneTwister {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn draw(&mut self) -> u32 {
        if self.index >= N {
            self.twist();
        }
        let mut y = self.state[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9D2C_5680;
        y ^= (y << 15) & 0xEFC6_0000;
        y ^ (y >> 18)
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
