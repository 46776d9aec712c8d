//! # Problem Module
//!
//! The fitness-evaluation contract consumed by every optimizer.
//!
//! A [`Problem`] describes a bounded, real-valued search space and a fitness
//! function to be minimised. Optimizers call [`Problem::fitness_limited`] with
//! the fitness a candidate has to beat; problems may stop computing once the
//! limit is provably out of reach (preemptive evaluation). The default
//! forwards to [`Problem::fitness`], which is always a valid implementation.
//!
//! Constraints are handled with feasibility-first ordering: before a position
//! is evaluated [`Problem::enforce_constraints`] may repair it and reports
//! whether it is feasible. A feasible candidate always beats an infeasible
//! one, otherwise the lower fitness wins (see [`better_feasible`]).
//!
//! ## Example
//!
//! ```rust
//! use swarmopt::problem::{FnProblem, Problem};
//!
//! let sphere = FnProblem::new("sphere", vec![-10.0; 3], vec![10.0; 3], |x: &[f64]| {
//!     x.iter().map(|v| v * v).sum()
//! })
//! .unwrap();
//!
//! assert_eq!(sphere.dimensionality(), 3);
//! assert_eq!(sphere.fitness(&[1.0, 2.0, 2.0]), 9.0);
//! ```

mod function;

pub use function::FnProblem;

use crate::error::{ensure_len, Result, SwarmError};

/// A minimisation problem over a box-bounded real vector space.
///
/// Implementations are shared by reference with the rayon pool during
/// parallel initialisation, hence the `Sync` bound.
pub trait Problem: Sync {
    fn name(&self) -> &str;

    fn dimensionality(&self) -> usize;

    /// Lower search-space bound, one entry per dimension.
    fn lower_bound(&self) -> &[f64];

    /// Upper search-space bound, one entry per dimension.
    fn upper_bound(&self) -> &[f64];

    /// Lower bound for initial positions. Defaults to the search bound.
    fn lower_init(&self) -> &[f64] {
        self.lower_bound()
    }

    /// Upper bound for initial positions. Defaults to the search bound.
    fn upper_init(&self) -> &[f64] {
        self.upper_bound()
    }

    /// Best attainable fitness.
    fn min_fitness(&self) -> f64;

    /// Worst attainable fitness.
    fn max_fitness(&self) -> f64 {
        f64::INFINITY
    }

    /// Fitness regarded as solving the problem.
    fn acceptable_fitness(&self) -> f64 {
        self.min_fitness()
    }

    /// Computes the fitness of `x`. Must not modify the position.
    fn fitness(&self, x: &[f64]) -> f64;

    /// Computes the fitness of `x`, allowing an early return once the result
    /// cannot fall below `limit`. Any value returned early must be `>= limit`.
    fn fitness_limited(&self, x: &[f64], limit: f64) -> f64 {
        let _ = limit;
        self.fitness(x)
    }

    /// Repairs `x` in place if needed and reports whether it is feasible.
    fn enforce_constraints(&self, x: &mut [f64]) -> bool {
        let _ = x;
        true
    }

    fn has_gradient(&self) -> bool {
        false
    }

    /// Writes the gradient at `x` into `v` and returns its cost, in fitness
    /// evaluations.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` unless the problem overrides it.
    fn gradient(&self, x: &[f64], v: &mut [f64]) -> Result<usize> {
        let _ = (x, v);
        Err(SwarmError::Unsupported(format!(
            "{} does not provide a gradient",
            self.name()
        )))
    }
}

/// Outcome of one fitness evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub fitness: f64,
    pub feasible: bool,
}

impl Evaluation {
    pub fn new(fitness: f64, feasible: bool) -> Self {
        Self { fitness, feasible }
    }

    /// The placeholder every first evaluation improves on.
    pub fn worst() -> Self {
        Self {
            fitness: f64::INFINITY,
            feasible: false,
        }
    }

    /// Whether `self` should replace `incumbent`.
    pub fn improves_on(&self, incumbent: &Evaluation) -> bool {
        better_feasible(
            incumbent.feasible,
            self.feasible,
            incumbent.fitness,
            self.fitness,
        )
    }
}

/// Feasibility-first comparison: is the new candidate strictly better than the
/// old one?
///
/// Feasible beats infeasible. Between two candidates of equal feasibility the
/// strictly lower fitness wins, so ties keep the incumbent.
pub fn better_feasible(old_feasible: bool, new_feasible: bool, old_fitness: f64, new_fitness: f64) -> bool {
    match (old_feasible, new_feasible) {
        (false, true) => true,
        (true, false) => false,
        _ => new_fitness < old_fitness,
    }
}

/// Checks that every bound array has the problem's dimensionality and that
/// the bounds are ordered.
pub(crate) fn validate_bounds(problem: &dyn Problem) -> Result<()> {
    let n = problem.dimensionality();
    if n == 0 {
        return Err(SwarmError::InvalidArgument(format!(
            "{} has zero dimensions",
            problem.name()
        )));
    }
    ensure_len(n, problem.lower_bound().len())?;
    ensure_len(n, problem.upper_bound().len())?;
    ensure_len(n, problem.lower_init().len())?;
    ensure_len(n, problem.upper_init().len())?;

    let inverted = problem
        .lower_bound()
        .iter()
        .zip(problem.upper_bound())
        .any(|(lo, hi)| lo > hi);
    if inverted {
        return Err(SwarmError::InvalidArgument(format!(
            "{} has a lower bound above its upper bound",
            problem.name()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl Problem for Plain {
        fn name(&self) -> &str {
            "plain"
        }

        fn dimensionality(&self) -> usize {
            2
        }

        fn lower_bound(&self) -> &[f64] {
            &[-1.0, -1.0]
        }

        fn upper_bound(&self) -> &[f64] {
            &[1.0, 1.0]
        }

        fn min_fitness(&self) -> f64 {
            0.0
        }

        fn fitness(&self, x: &[f64]) -> f64 {
            x.iter().map(|v| v.abs()).sum()
        }
    }

    #[test]
    fn test_defaults() {
        let problem = Plain;
        assert_eq!(problem.lower_init(), problem.lower_bound());
        assert_eq!(problem.upper_init(), problem.upper_bound());
        assert_eq!(problem.acceptable_fitness(), 0.0);
        assert_eq!(problem.max_fitness(), f64::INFINITY);
        assert_eq!(problem.fitness_limited(&[0.5, -0.5], 0.1), 1.0);
        assert!(problem.enforce_constraints(&mut [0.0, 0.0]));
        assert!(!problem.has_gradient());
    }

    #[test]
    fn test_gradient_unsupported() {
        let mut v = [0.0; 2];
        match Plain.gradient(&[0.0, 0.0], &mut v) {
            Err(SwarmError::Unsupported(msg)) => assert!(msg.contains("plain")),
            other => panic!("Expected Unsupported, got {:?}", other),
        }
    }

    #[test]
    fn test_better_feasible_ordering() {
        // Feasibility dominates fitness.
        assert!(better_feasible(false, true, 1.0, 100.0));
        assert!(!better_feasible(true, false, 100.0, 1.0));
        // Same feasibility: strictly lower wins.
        assert!(better_feasible(true, true, 2.0, 1.0));
        assert!(!better_feasible(true, true, 1.0, 1.0));
        assert!(better_feasible(false, false, 2.0, 1.0));
    }

    #[test]
    fn test_worst_is_improved_by_anything() {
        let worst = Evaluation::worst();
        assert!(Evaluation::new(1e300, false).improves_on(&worst));
        assert!(Evaluation::new(f64::MAX, true).improves_on(&worst));
    }

    #[test]
    fn test_validate_bounds() {
        assert!(validate_bounds(&Plain).is_ok());
    }
}
