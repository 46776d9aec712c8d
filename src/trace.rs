//! # Fitness Trace
//!
//! Optional observer of a run's progress. The driver reports
//! `(iteration, best_fitness)` once per initial evaluation and once after every
//! later evaluation, so the reported fitness never increases.
//!
//! Any `FnMut(usize, f64)` closure is a [`TraceSink`]; [`FitnessTrace`] keeps
//! every `interval`-th point.
//!
//! ```rust
//! use swarmopt::trace::{FitnessTrace, TraceSink};
//!
//! let mut trace = FitnessTrace::new(2);
//! for (i, f) in [5.0, 4.0, 4.0, 1.0].into_iter().enumerate() {
//!     trace.record(i + 1, f);
//! }
//! assert_eq!(trace.points(), &[(2, 4.0), (4, 1.0)]);
//! ```

/// Receives the best fitness after each evaluation.
pub trait TraceSink {
    fn record(&mut self, iteration: usize, best_fitness: f64);
}

impl<F: FnMut(usize, f64)> TraceSink for F {
    fn record(&mut self, iteration: usize, best_fitness: f64) {
        self(iteration, best_fitness)
    }
}

/// Collects the best fitness at every `interval`-th iteration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessTrace {
    interval: usize,
    points: Vec<(usize, f64)>,
}

impl FitnessTrace {
    /// An interval of zero is treated as one.
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
            points: Vec::new(),
        }
    }

    pub fn points(&self) -> &[(usize, f64)] {
        &self.points
    }

    /// The most recent recorded fitness.
    pub fn last_fitness(&self) -> Option<f64> {
        self.points.last().map(|&(_, f)| f)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl Default for FitnessTrace {
    fn default() -> Self {
        Self::new(1)
    }
}

impl TraceSink for FitnessTrace {
    fn record(&mut self, iteration: usize, best_fitness: f64) {
        if iteration % self.interval == 0 {
            self.points.push((iteration, best_fitness));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |i: usize, f: f64| seen.push((i, f));
            sink.record(1, 2.0);
            sink.record(2, 1.0);
        }
        assert_eq!(seen, vec![(1, 2.0), (2, 1.0)]);
    }

    #[test]
    fn test_zero_interval_keeps_everything() {
        let mut trace = FitnessTrace::new(0);
        trace.record(1, 3.0);
        trace.record(2, 2.0);
        assert_eq!(trace.points().len(), 2);
        assert_eq!(trace.last_fitness(), Some(2.0));
        trace.clear();
        assert!(trace.last_fitness().is_none());
    }
}
