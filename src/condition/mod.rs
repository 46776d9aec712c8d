//! # Run Conditions
//!
//! A run condition decides, after every fitness evaluation, whether the
//! optimization loop continues. Conditions are stateful (they may remember
//! the best fitness seen so far) and are reset by the driver at the start of
//! every run, so one instance can be reused across runs.
//!
//! Ending a run early, for instance on a wall-clock deadline, is done only
//! through a condition; see [`Deadline`] and [`AllOf`].
//!
//! ## Example
//!
//! ```rust
//! use swarmopt::condition::{RunCondition, Stagnation};
//!
//! let mut condition = Stagnation::new(5, 10_000);
//! condition.reset();
//! assert!(condition.should_continue(1, 3.0));
//! assert!(condition.should_continue(3, 1.0));
//! assert!(condition.should_continue(7, 1.0));
//! assert!(!condition.should_continue(8, 1.0));
//! ```

mod deadline;

pub use deadline::{AllOf, Deadline};

/// Stateful predicate consulted by the optimization loop.
pub trait RunCondition {
    /// Clears per-run state. Called once at the start of every run.
    fn reset(&mut self);

    /// Whether the run goes on, given the number of fitness evaluations used
    /// so far and the best fitness found.
    fn should_continue(&mut self, iterations: usize, fitness: f64) -> bool;
}

impl<C: RunCondition + ?Sized> RunCondition for Box<C> {
    fn reset(&mut self) {
        (**self).reset()
    }

    fn should_continue(&mut self, iterations: usize, fitness: f64) -> bool {
        (**self).should_continue(iterations, fitness)
    }
}

/// Stops after a fixed number of fitness evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationBudget {
    max_iterations: usize,
}

impl IterationBudget {
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
}

impl RunCondition for IterationBudget {
    fn reset(&mut self) {}

    fn should_continue(&mut self, iterations: usize, _fitness: f64) -> bool {
        iterations < self.max_iterations
    }
}

/// Stops when the fitness reaches a threshold or the budget runs out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessThreshold {
    below: f64,
    budget: IterationBudget,
}

impl FitnessThreshold {
    /// Continues while `fitness > below` and `iterations < max_iterations`.
    pub fn new(below: f64, max_iterations: usize) -> Self {
        Self {
            below,
            budget: IterationBudget::new(max_iterations),
        }
    }
}

impl RunCondition for FitnessThreshold {
    fn reset(&mut self) {}

    fn should_continue(&mut self, iterations: usize, fitness: f64) -> bool {
        fitness > self.below && self.budget.should_continue(iterations, fitness)
    }
}

/// Stops once the best fitness has not improved for `max_stagnant`
/// iterations, on top of a fitness threshold and an iteration budget.
#[derive(Debug, Clone, PartialEq)]
pub struct Stagnation {
    max_stagnant: usize,
    threshold: FitnessThreshold,
    best: f64,
    last_improved: usize,
}

impl Stagnation {
    /// Stagnation window with no fitness threshold.
    pub fn new(max_stagnant: usize, max_iterations: usize) -> Self {
        Self::with_threshold(max_stagnant, f64::NEG_INFINITY, max_iterations)
    }

    pub fn with_threshold(max_stagnant: usize, below: f64, max_iterations: usize) -> Self {
        Self {
            max_stagnant,
            threshold: FitnessThreshold::new(below, max_iterations),
            best: f64::INFINITY,
            last_improved: 0,
        }
    }

    /// Iteration at which the best fitness last improved.
    pub fn last_improved(&self) -> usize {
        self.last_improved
    }
}

impl RunCondition for Stagnation {
    fn reset(&mut self) {
        self.best = f64::INFINITY;
        self.last_improved = 0;
    }

    fn should_continue(&mut self, iterations: usize, fitness: f64) -> bool {
        if fitness < self.best {
            self.best = fitness;
            self.last_improved = iterations;
        }
        let stagnant = iterations.saturating_sub(self.last_improved);
        stagnant < self.max_stagnant && self.threshold.should_continue(iterations, fitness)
    }
}
