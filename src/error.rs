//! # Error Types
//!
//! This module defines the error type shared by the random engines, the problem
//! contract and the optimizers. Every precondition violation is reported as an
//! `Err` at the boundary of the call that detected it; nothing is retried.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use swarmopt::error::{Result, SwarmError};
//!
//! fn population_size(requested: f64) -> Result<usize> {
//!     if requested < 1.0 {
//!         return Err(SwarmError::InvalidArgument(
//!             "population size must be at least 1".to_string(),
//!         ));
//!     }
//!     Ok(requested.round() as usize)
//! }
//!
//! assert!(population_size(0.0).is_err());
//! assert_eq!(population_size(20.4).unwrap(), 20);
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use swarmopt::error::{OptionExt, SwarmError};
//!
//! fn lowest(values: &[f64]) -> swarmopt::error::Result<f64> {
//!     values
//!         .iter()
//!         .copied()
//!         .reduce(f64::min)
//!         .ok_or_else_swarm(|| SwarmError::InvalidArgument("no values".to_string()))
//! }
//!
//! assert_eq!(lowest(&[3.0, 1.0, 2.0]).unwrap(), 1.0);
//! ```

use thiserror::Error;

/// Represents errors that can occur while seeding engines or running optimizers.
#[derive(Error, Debug)]
pub enum SwarmError {
    /// A precondition on an argument was violated.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Two slices that must have the same length did not.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A seed vector did not have the length required by the engine.
    #[error("Seed length error: {engine} requires {expected} seed words, got {actual}")]
    SeedLength {
        engine: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An engine was used before it was seeded.
    #[error("Engine not seeded: {0}")]
    NotSeeded(String),

    /// The population is too small for the requested operation.
    #[error("Degenerate population: at least {required} agents required, got {actual}")]
    DegeneratePopulation { required: usize, actual: usize },

    /// The problem does not support the requested operation.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// A fitness evaluation produced an unusable value.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// An invalid configuration was provided.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, SwarmError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T>` using a closure to build the error.
    fn ok_or_else_swarm<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> SwarmError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_swarm<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> SwarmError,
    {
        self.ok_or_else(err_fn)
    }
}

/// Returns `DimensionMismatch` unless `actual == expected`.
pub(crate) fn ensure_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(SwarmError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
