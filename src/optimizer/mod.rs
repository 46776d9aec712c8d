//! # Optimizers
//!
//! Every optimizer implements [`Optimizer`]: it takes a positional vector of
//! control parameters, validated against its [`ParameterSpace`], and a
//! [`Context`] bundling the problem, the random engine, the run condition and
//! an optional trace sink. It returns an [`OptimizeResult`] holding a copy of
//! the best position found.
//!
//! All optimizers share one driver. The driver evaluates the initial
//! population, then asks the optimizer's strategy to update one agent at a
//! time until the run condition says stop. Iterations count fitness
//! evaluations, including the initial ones.
//!
//! ## Example
//!
//! ```rust
//! use swarmopt::condition::IterationBudget;
//! use swarmopt::optimizer::{Context, Optimizer};
//! use swarmopt::optimizer::local::Lus;
//! use swarmopt::problem::FnProblem;
//! use swarmopt::random::{MersenneTwister, Random, Seedable};
//!
//! let problem = FnProblem::new("sphere", vec![-5.0; 2], vec![5.0; 2], |x: &[f64]| {
//!     x.iter().map(|v| v * v).sum()
//! })
//! .unwrap();
//! let mut rng = Random::new(MersenneTwister::with_seed(1)).unwrap();
//! let mut budget = IterationBudget::new(500);
//!
//! let lus = Lus::new();
//! let mut ctx = Context::new(&problem, &mut rng, &mut budget);
//! let result = lus.optimize(lus.parameter_space().defaults(), &mut ctx).unwrap();
//! assert_eq!(result.iterations, 500);
//! assert!(result.fitness < 1e-2);
//! ```

pub mod de;
mod driver;
pub mod local;
mod population;
pub mod pso;
pub mod vector;

pub use population::{Agent, Population};

pub(crate) use driver::{drive, Run, Strategy};

use crate::condition::RunCondition;
use crate::error::{Result, SwarmError};
use crate::options::RunOptions;
use crate::problem::Problem;
use crate::random::{Engine, Random};
use crate::trace::TraceSink;

/// A population-based (or single-agent) minimiser.
pub trait Optimizer: Send + Sync {
    fn name(&self) -> &str;

    /// Names, defaults and admissible ranges of the control parameters.
    fn parameter_space(&self) -> &ParameterSpace;

    /// Runs the optimizer with the given control parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `parameters` does not match the parameter
    /// space, plus any error raised by the problem or the strategy.
    fn optimize(&self, parameters: &[f64], ctx: &mut Context<'_>) -> Result<OptimizeResult>;

    /// Runs the optimizer, allowing it to give up once its result can no
    /// longer beat `fitness_limit`. The built-in optimizers ignore the limit.
    fn optimize_with_limit(
        &self,
        parameters: &[f64],
        fitness_limit: f64,
        ctx: &mut Context<'_>,
    ) -> Result<OptimizeResult> {
        let _ = fitness_limit;
        self.optimize(parameters, ctx)
    }
}

/// Declared control parameters of an optimizer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterSpace {
    names: Vec<String>,
    defaults: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl ParameterSpace {
    /// Creates a parameter space from parallel slices.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the slices differ in length.
    pub fn new(names: &[&str], defaults: &[f64], lower: &[f64], upper: &[f64]) -> Result<Self> {
        let n = names.len();
        for len in [defaults.len(), lower.len(), upper.len()] {
            crate::error::ensure_len(n, len)?;
        }
        Ok(Self {
            names: names.iter().map(|s| s.to_string()).collect(),
            defaults: defaults.to_vec(),
            lower: lower.to_vec(),
            upper: upper.to_vec(),
        })
    }

    pub(crate) fn fixed<const N: usize>(
        names: [&str; N],
        defaults: [f64; N],
        lower: [f64; N],
        upper: [f64; N],
    ) -> Self {
        Self {
            names: names.iter().map(|s| s.to_string()).collect(),
            defaults: defaults.to_vec(),
            lower: lower.to_vec(),
            upper: upper.to_vec(),
        }
    }

    pub fn dimensionality(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn defaults(&self) -> &[f64] {
        &self.defaults
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Position of the parameter called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Checks that `parameters` has one finite value per declared parameter.
    ///
    /// Values outside `[lower, upper]` are accepted; the bounds describe the
    /// range meaningful for tuning, not a hard limit.
    pub fn validate(&self, parameters: &[f64]) -> Result<()> {
        if parameters.len() != self.dimensionality() {
            return Err(SwarmError::InvalidArgument(format!(
                "expected {} control parameters ({}), got {}",
                self.dimensionality(),
                self.names.join(", "),
                parameters.len()
            )));
        }
        if let Some(i) = parameters.iter().position(|p| !p.is_finite()) {
            return Err(SwarmError::InvalidArgument(format!(
                "control parameter {} is not finite: {}",
                self.names[i], parameters[i]
            )));
        }
        Ok(())
    }
}

/// Outcome of one optimizer run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizeResult {
    /// Copy of the best position found.
    pub parameters: Vec<f64>,
    pub fitness: f64,
    pub feasible: bool,
    /// Fitness evaluations used, including charged gradient costs.
    pub iterations: usize,
}

/// The collaborators of one optimizer run.
pub struct Context<'a> {
    pub(crate) problem: &'a dyn Problem,
    pub(crate) rng: &'a mut Random<dyn Engine + 'a>,
    pub(crate) condition: &'a mut dyn RunCondition,
    pub(crate) trace: Option<&'a mut dyn TraceSink>,
    pub(crate) options: RunOptions,
}

impl<'a> Context<'a> {
    pub fn new(
        problem: &'a dyn Problem,
        rng: &'a mut Random<dyn Engine + 'a>,
        condition: &'a mut dyn RunCondition,
    ) -> Self {
        Self {
            problem,
            rng,
            condition,
            trace: None,
            options: RunOptions::default(),
        }
    }

    pub fn with_trace(mut self, trace: &'a mut dyn TraceSink) -> Self {
        self.trace = Some(trace);
        self
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    pub fn problem(&self) -> &'a dyn Problem {
        self.problem
    }

    pub fn rng(&mut self) -> &mut Random<dyn Engine + 'a> {
        &mut *self.rng
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }
}

/// Reads a population-size parameter, which must round to at least `minimum`.
pub(crate) fn population_size(value: f64, minimum: usize) -> Result<usize> {
    let size = value.round();
    if size < 1.0 {
        return Err(SwarmError::InvalidArgument(format!(
            "population size must be at least 1, got {}",
            value
        )));
    }
    let size = size as usize;
    if size < minimum {
        return Err(SwarmError::DegeneratePopulation {
            required: minimum,
            actual: size,
        });
    }
    Ok(size)
}
