//! # Derived Distributions
//!
//! Distributions built only from an engine's `draw()` and `max_value()`.
//!
//! The free functions work on any engine. [`Random`] wraps an engine and adds
//! the one stateful distribution, the Gaussian, which produces values in pairs
//! and keeps the second one for the next call.
//!
//! Several engines have weak low-order bits, so nothing here masks low bits:
//! integers are derived through [`uniform`] and bytes from the high bits.
//!
//! ## Example
//!
//! ```rust
//! use swarmopt::random::{distributions, QuickDirty, Random, Seedable};
//!
//! let mut engine = QuickDirty::with_seed(1);
//! let i = distributions::index(&mut engine, 10).unwrap();
//! assert!(i < 10);
//!
//! let mut rng = Random::new(engine).unwrap();
//! let (a, b) = rng.index2(10).unwrap();
//! assert_ne!(a, b);
//! ```

use rand::RngCore;

use super::Engine;
use crate::error::{Result, SwarmError};

/// Uniform real in the open interval (0, 1).
#[inline]
pub fn uniform<E: Engine + ?Sized>(engine: &mut E) -> f64 {
    let max = f64::from(engine.max_value());
    (f64::from(engine.draw()) + 1.0) / (max + 2.0)
}

/// Uniform real in the open interval (`lower`, `upper`).
#[inline]
pub fn uniform_range<E: Engine + ?Sized>(engine: &mut E, lower: f64, upper: f64) -> f64 {
    lower + uniform(engine) * (upper - lower)
}

/// Fair coin flip: `true` when `draw() < max_value / 2`, compared exactly.
#[inline]
pub fn boolean<E: Engine + ?Sized>(engine: &mut E) -> bool {
    let max = u64::from(engine.max_value());
    u64::from(engine.draw()) * 2 < max
}

/// `true` with probability `p`, i.e. when `draw() < max_value * p`.
#[inline]
pub fn boolean_with<E: Engine + ?Sized>(engine: &mut E, p: f64) -> bool {
    let max = engine.max_value();
    // Smallest integer not below `max * p`; draws under it pass.
    let threshold = (f64::from(max) * p).ceil().clamp(0.0, f64::from(max) + 1.0) as u64;
    u64::from(engine.draw()) < threshold
}

/// The most significant 8 bits of the engine's output width.
#[inline]
pub fn byte<E: Engine + ?Sized>(engine: &mut E) -> u8 {
    let width = 32 - engine.max_value().leading_zeros();
    let shift = width.saturating_sub(8);
    (engine.draw() >> shift) as u8
}

/// Uniform index in `0..n`.
///
/// # Errors
///
/// Returns `InvalidArgument` if `n` is zero.
#[inline]
pub fn index<E: Engine + ?Sized>(engine: &mut E, n: usize) -> Result<usize> {
    if n == 0 {
        return Err(SwarmError::InvalidArgument(
            "cannot draw an index from an empty range".to_string(),
        ));
    }
    let i = (uniform(engine) * n as f64) as usize;
    Ok(i.min(n - 1))
}

/// Two distinct uniform indices in `0..n`; redraws the second on collision.
///
/// # Errors
///
/// Returns `DegeneratePopulation` if `n < 2`, where no distinct pair exists.
pub fn index2<E: Engine + ?Sized>(engine: &mut E, n: usize) -> Result<(usize, usize)> {
    if n < 2 {
        return Err(SwarmError::DegeneratePopulation {
            required: 2,
            actual: n,
        });
    }
    let first = index(engine, n)?;
    loop {
        let second = index(engine, n)?;
        if second != first {
            return Ok((first, second));
        }
    }
}

/// Rejection-samples a point strictly inside the unit disk, excluding the
/// origin. Returns the point and its squared radius.
fn disk_point<E: Engine + ?Sized>(engine: &mut E) -> (f64, f64, f64) {
    loop {
        let x = uniform_range(engine, -1.0, 1.0);
        let y = uniform_range(engine, -1.0, 1.0);
        let s = x * x + y * y;
        if s < 1.0 && s > 0.0 {
            return (x, y, s);
        }
    }
}

/// Uniform point inside the unit disk.
pub fn disk<E: Engine + ?Sized>(engine: &mut E) -> [f64; 2] {
    let (x, y, _) = disk_point(engine);
    [x, y]
}

/// Uniform point on the unit circle (von Neumann's squaring of a disk point).
pub fn circle<E: Engine + ?Sized>(engine: &mut E) -> [f64; 2] {
    let (x, y, s) = disk_point(engine);
    [(x * x - y * y) / s, 2.0 * x * y / s]
}

/// Uniform point on the unit sphere in three dimensions (Marsaglia 1972).
pub fn sphere3<E: Engine + ?Sized>(engine: &mut E) -> [f64; 3] {
    let (x, y, s) = disk_point(engine);
    let scale = 2.0 * (1.0 - s).sqrt();
    [x * scale, y * scale, 1.0 - 2.0 * s]
}

/// Uniform point on the unit sphere in four dimensions (Marsaglia 1972).
pub fn sphere4<E: Engine + ?Sized>(engine: &mut E) -> [f64; 4] {
    let (x1, x2, s1) = disk_point(engine);
    let (x3, x4, s2) = disk_point(engine);
    let scale = ((1.0 - s1) / s2).sqrt();
    [x1, x2, x3 * scale, x4 * scale]
}

/// An engine together with the cached half of the last Gaussian pair.
///
/// `Random` is the handle optimizers draw from. Because the engine is the last
/// field, `&mut Random<MersenneTwister>` coerces to `&mut Random<dyn Engine>`.
#[derive(Debug, Clone)]
pub struct Random<E: Engine + ?Sized = dyn Engine> {
    gaussian: Option<f64>,
    engine: E,
}

impl<E: Engine> Random<E> {
    /// Wraps a ready engine.
    ///
    /// # Errors
    ///
    /// Returns `NotSeeded` if `engine.is_ready()` is false.
    pub fn new(engine: E) -> Result<Self> {
        if !engine.is_ready() {
            return Err(SwarmError::NotSeeded(engine.name().to_string()));
        }
        Ok(Self {
            gaussian: None,
            engine,
        })
    }

    /// Returns the wrapped engine, discarding any cached Gaussian.
    pub fn into_inner(self) -> E {
        self.engine
    }
}

impl<E: Engine + ?Sized> Random<E> {
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Reseeds the engine and drops the cached Gaussian.
    pub fn reseed(&mut self, words: &[u32]) -> Result<()> {
        self.engine.reseed(words)?;
        self.gaussian = None;
        Ok(())
    }

    #[inline]
    pub fn draw(&mut self) -> u32 {
        self.engine.draw()
    }

    #[inline]
    pub fn max_value(&self) -> u32 {
        self.engine.max_value()
    }

    /// See [`uniform`].
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        uniform(&mut self.engine)
    }

    /// See [`uniform_range`].
    #[inline]
    pub fn uniform_range(&mut self, lower: f64, upper: f64) -> f64 {
        uniform_range(&mut self.engine, lower, upper)
    }

    pub fn boolean(&mut self) -> bool {
        boolean(&mut self.engine)
    }

    pub fn boolean_with(&mut self, p: f64) -> bool {
        boolean_with(&mut self.engine, p)
    }

    pub fn byte(&mut self) -> u8 {
        byte(&mut self.engine)
    }

    /// See [`index`].
    #[inline]
    pub fn index(&mut self, n: usize) -> Result<usize> {
        index(&mut self.engine, n)
    }

    /// See [`index2`].
    pub fn index2(&mut self, n: usize) -> Result<(usize, usize)> {
        index2(&mut self.engine, n)
    }

    /// Normal deviate by Marsaglia's polar method.
    ///
    /// Each disk point yields two independent deviates; the second is cached
    /// and returned by the next call.
    pub fn gaussian(&mut self, mean: f64, deviation: f64) -> f64 {
        if let Some(cached) = self.gaussian.take() {
            return mean + deviation * cached;
        }
        let (x, y, s) = disk_point(&mut self.engine);
        let factor = (-2.0 * s.ln() / s).sqrt();
        self.gaussian = Some(x * factor);
        mean + deviation * y * factor
    }

    /// Whether the next `gaussian()` call will be served from the cache.
    pub fn has_cached_gaussian(&self) -> bool {
        self.gaussian.is_some()
    }

    pub fn disk(&mut self) -> [f64; 2] {
        disk(&mut self.engine)
    }

    pub fn circle(&mut self) -> [f64; 2] {
        circle(&mut self.engine)
    }

    pub fn sphere3(&mut self) -> [f64; 3] {
        sphere3(&mut self.engine)
    }

    pub fn sphere4(&mut self) -> [f64; 4] {
        sphere4(&mut self.engine)
    }

    /// Uniform point on the surface of the `n`-dimensional sphere of the given
    /// radius, from normalised Gaussian deviates.
    pub fn sphere(&mut self, n: usize, radius: f64) -> Vec<f64> {
        if n == 0 {
            return Vec::new();
        }
        loop {
            let mut point: Vec<f64> = (0..n).map(|_| self.gaussian(0.0, 1.0)).collect();
            let norm = point.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                point.iter_mut().for_each(|v| *v *= radius / norm);
                return point;
            }
        }
    }
}

/// Lets any engine drive `rand` algorithms. Engines narrower than 32 bits are
/// read a byte at a time so every output bit is uniform.
impl<E: Engine + ?Sized> RngCore for Random<E> {
    fn next_u32(&mut self) -> u32 {
        if self.engine.max_value() == u32::MAX {
            return self.engine.draw();
        }
        u32::from_be_bytes([self.byte(), self.byte(), self.byte(), self.byte()])
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.next_u32());
        let low = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.iter_mut().for_each(|b| *b = self.byte());
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
