//! # swarmopt
//!
//! Population-based and local metaheuristics for bounded, real-valued
//! minimisation, driven by reproducible pseudo-random engines.
//!
//! - [`random`]: seedable bit generators behind one draw contract, and the
//!   [`Random`](random::Random) decorator for derived distributions.
//! - [`problem`]: the [`Problem`](problem::Problem) contract an optimizer
//!   minimises.
//! - [`condition`]: run conditions deciding when an optimization stops.
//! - [`optimizer`]: particle swarm ([`optimizer::pso`]), differential
//!   evolution ([`optimizer::de`]) and local search ([`optimizer::local`]).
//! - [`trace`]: optional recording of the best fitness during a run.
//!
//! ## Example
//!
//! ```rust
//! use swarmopt::condition::IterationBudget;
//! use swarmopt::optimizer::pso::Pso;
//! use swarmopt::optimizer::{Context, Optimizer};
//! use swarmopt::problem::FnProblem;
//! use swarmopt::random::{MersenneTwister, Random, Seedable};
//! use swarmopt::trace::FitnessTrace;
//!
//! let problem = FnProblem::new("sphere", vec![-10.0; 2], vec![10.0; 2], |x: &[f64]| {
//!     x.iter().map(|v| v * v).sum()
//! })
//! .unwrap();
//! let mut rng = Random::new(MersenneTwister::with_seed(42)).unwrap();
//! let mut budget = IterationBudget::new(1_000);
//! let mut trace = FitnessTrace::new(100);
//!
//! let pso = Pso::default();
//! let mut ctx = Context::new(&problem, &mut rng, &mut budget).with_trace(&mut trace);
//! let result = pso.optimize(pso.parameter_space().defaults(), &mut ctx).unwrap();
//!
//! assert_eq!(result.iterations, 1_000);
//! assert!(!trace.points().is_empty());
//! ```

pub mod condition;
pub mod error;
pub mod optimizer;
pub mod options;
pub mod problem;
pub mod random;
pub mod trace;

// Re-export commonly used types for convenience
pub use condition::RunCondition;
pub use error::{OptionExt, Result, SwarmError};
pub use optimizer::{Context, OptimizeResult, Optimizer};
pub use options::{LogLevel, RunOptions};
pub use problem::{Evaluation, Problem};
pub use random::{Engine, Random, Seedable};
