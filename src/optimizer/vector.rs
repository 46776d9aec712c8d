//! Element-wise helpers on positions and velocities.
//!
//! Helpers taking several slices check that the lengths agree and return
//! `DimensionMismatch` otherwise.

use crate::error::{ensure_len, Result};
use crate::random::{Engine, Random};

/// Clamps `value` into `[lower, upper]`.
#[inline]
pub fn bound_value(value: f64, lower: f64, upper: f64) -> f64 {
    if value < lower {
        lower
    } else if value > upper {
        upper
    } else {
        value
    }
}

/// Clamps every component of `x` into `[lower[i], upper[i]]`.
pub fn bound(x: &mut [f64], lower: &[f64], upper: &[f64]) -> Result<()> {
    ensure_len(x.len(), lower.len())?;
    ensure_len(x.len(), upper.len())?;
    for ((v, &lo), &hi) in x.iter_mut().zip(lower).zip(upper) {
        *v = bound_value(*v, lo, hi);
    }
    Ok(())
}

/// Clamps every component of `x` into `[-limit[i], limit[i]]`.
pub fn bound_symmetric(x: &mut [f64], limit: &[f64]) -> Result<()> {
    ensure_len(x.len(), limit.len())?;
    for (v, &l) in x.iter_mut().zip(limit) {
        *v = bound_value(*v, -l, l);
    }
    Ok(())
}

/// Flushes subnormal components to zero.
#[inline]
pub fn denormalize(x: &mut [f64]) {
    for v in x.iter_mut().filter(|v| v.is_subnormal()) {
        *v = 0.0;
    }
}

/// `|upper[i] - lower[i]|` for every dimension.
pub fn range(lower: &[f64], upper: &[f64]) -> Result<Vec<f64>> {
    ensure_len(lower.len(), upper.len())?;
    Ok(lower.iter().zip(upper).map(|(lo, hi)| (hi - lo).abs()).collect())
}

/// Uniform point inside the box `[lower, upper]`.
pub fn sample(rng: &mut Random<dyn Engine + '_>, lower: &[f64], upper: &[f64]) -> Result<Vec<f64>> {
    ensure_len(lower.len(), upper.len())?;
    Ok(lower
        .iter()
        .zip(upper)
        .map(|(&lo, &hi)| rng.uniform_range(lo, hi))
        .collect())
}

/// Uniform point inside `[-limit[i], limit[i]]`.
pub fn sample_symmetric(rng: &mut Random<dyn Engine + '_>, limit: &[f64]) -> Vec<f64> {
    limit.iter().map(|&l| rng.uniform_range(-l, l)).collect()
}

/// Euclidean norm.
pub fn norm(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum::<f64>().sqrt()
}
