//! # RunOptions
//!
//! The `RunOptions` struct holds the settings of an optimization run that are
//! not control parameters of the algorithm itself: how much is logged, and
//! from which population size the initial fitness evaluations are spread over
//! the rayon thread pool.
//!
//! ## Example
//!
//! ```rust
//! use swarmopt::options::{LogLevel, RunOptions};
//!
//! // Default options: no log promotion, parallel initialisation from 1000 agents.
//! let defaults = RunOptions::default();
//! assert_eq!(defaults.get_parallel_threshold(), 1000);
//!
//! let options = RunOptions::builder()
//!     .log_level(LogLevel::Minimal)
//!     .parallel_threshold(64)
//!     .build();
//! assert_eq!(options.get_parallel_threshold(), 64);
//! ```
//!
//! ### `LogLevel`
//!
//! - `Verbose`: run summaries and every global-best improvement at `info`.
//! - `Minimal`: run start and end summaries at `info`.
//! - `None`: everything stays at `debug`/`trace`.

/// How much of a run is promoted to `info!` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogLevel {
    Verbose,
    Minimal,
    #[default]
    None,
}

const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunOptions {
    log_level: LogLevel,
    /// Minimum population size for parallel initial evaluation
    parallel_threshold: usize,
}

impl RunOptions {
    pub fn new(log_level: LogLevel, parallel_threshold: usize) -> Self {
        Self {
            log_level,
            parallel_threshold,
        }
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Returns the minimum population size evaluated in parallel.
    pub fn get_parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// Sets the parallel threshold. `usize::MAX` keeps every run sequential.
    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    /// Returns a builder for creating a `RunOptions` instance.
    pub fn builder() -> RunOptionsBuilder {
        RunOptionsBuilder::default()
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            log_level: LogLevel::None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Builder for `RunOptions`.
#[derive(Debug, Clone, Default)]
pub struct RunOptionsBuilder {
    log_level: Option<LogLevel>,
    parallel_threshold: Option<usize>,
}

impl RunOptionsBuilder {
    /// Sets the log level.
    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    /// Sets the parallel threshold.
    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds the `RunOptions` instance.
    pub fn build(self) -> RunOptions {
        RunOptions {
            log_level: self.log_level.unwrap_or_default(),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(DEFAULT_PARALLEL_THRESHOLD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_default() {
        assert_eq!(RunOptions::builder().build(), RunOptions::default());
    }

    #[test]
    fn test_setters() {
        let mut options = RunOptions::new(LogLevel::Verbose, 10);
        assert_eq!(options.get_log_level(), LogLevel::Verbose);
        options.set_log_level(LogLevel::None);
        options.set_parallel_threshold(usize::MAX);
        assert_eq!(options.get_log_level(), LogLevel::None);
        assert_eq!(options.get_parallel_threshold(), usize::MAX);
    }
}
