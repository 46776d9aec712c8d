//! L'Ecuyer's combined generator with a Bays-Durham shuffle table.
//!
//! Two multiplicative congruential streams (moduli 2147483563 and 2147483399)
//! are combined by subtraction; the first stream also feeds a 32-entry shuffle
//! table. Period is above 2 * 10^18. Output is an integer in `[1, 2147483562]`.

use super::{Engine, Seedable};
use crate::error::Result;

const M1: i32 = 2_147_483_563;
const M2: i32 = 2_147_483_399;
const TABLE_SIZE: usize = 32;
const MAX_OUTPUT: i32 = M1 - 1;
const DIVISOR: i32 = 1 + MAX_OUTPUT / TABLE_SIZE as i32;
const WARMUP: usize = 8;

/// One multiplicative congruential stream, stepped with Schrage's method so
/// that `a * x mod m` never overflows 32-bit arithmetic.
#[derive(Debug, Clone, Copy)]
struct Congruential {
    a: i32,
    m: i32,
    q: i32,
    r: i32,
    x: i32,
}

impl Congruential {
    const fn new(a: i32, m: i32, q: i32, r: i32, x: i32) -> Self {
        Self { a, m, q, r, x }
    }

    fn next(&mut self) -> i32 {
        let k = self.x / self.q;
        self.x = self.a * (self.x - k * self.q) - k * self.r;
        if self.x < 0 {
            self.x += self.m;
        }
        self.x
    }
}

/// Combined two-stream engine with shuffle table.
#[derive(Debug, Clone)]
pub struct LEcuyer {
    first: Congruential,
    second: Congruential,
    table: [i32; TABLE_SIZE],
    last: i32,
}

impl Seedable for LEcuyer {
    const NAME: &'static str = "lecuyer";
    const SEED_LENGTH: usize = 1;

    fn from_state(words: &[u32]) -> Self {
        // Both streams start from a value in [1, M1 - 1].
        let start = (words[0] % (M1 as u32 - 1)) as i32 + 1;
        let mut first = Congruential::new(40014, M1, 53668, 12211, start);
        let second = Congruential::new(40692, M2, 52774, 3791, start);

        let mut table = [0; TABLE_SIZE];
        for j in (0..TABLE_SIZE + WARMUP).rev() {
            let value = first.next();
            if j < TABLE_SIZE {
                table[j] = value;
            }
        }

        Self {
            first,
            second,
            last: table[0],
            table,
        }
    }

    fn with_seed(seed: u32) -> Self {
        Self::from_state(&[seed])
    }
}

impl Engine for LEcuyer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn draw(&mut self) -> u32 {
        let x1 = self.first.next();
        let x2 = self.second.next();
        let j = (self.last / DIVISOR) as usize;
        self.last = self.table[j] - x2;
        self.table[j] = x1;
        if self.last < 1 {
            self.last += MAX_OUTPUT;
        }
        self.last as u32
    }

    fn max_value(&self) -> u32 {
        MAX_OUTPUT as u32
    }

    fn seed_length(&self) -> usize {
        Self::SEED_LENGTH
    }

    fn reseed(&mut self, words: &[u32]) -> Result<()> {
        *self = Self::from_words(words)?;
        Ok(())
    }
}
