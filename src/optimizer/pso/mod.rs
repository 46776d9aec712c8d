//! # Particle Swarm Optimization
//!
//! [`Pso`] moves a swarm of agents with velocities. Each agent is pulled
//! towards its own best position and towards a social guide, which is the
//! global best, the best of a ring neighbourhood, or the best of a random
//! set of informants, depending on the [`Topology`]:
//!
//! ```text
//! v = omega*v + phiP*r1*(p - x) + phiG*r2*(g - x) [+ phiC*r3*(c - x)]
//! x = bound(x + bound(v, -range, range), lower, upper)
//! ```
//!
//! The optional centroid term pulls towards the mean of all personal bests,
//! recomputed once per sweep. With a [`VariablePopulation`], agents are
//! added after sustained stagnation and removed after bursts of local
//! improvement.
//!
//! [`Mol`] (Many Optimizing Liaisons) drops the personal-best term.
//!
//! ## Control parameters
//!
//! | Index | Pso | Mol |
//! |---|---|---|
//! | 0 | agents `S` | agents `S` |
//! | 1 | inertia `omega` | inertia `omega` |
//! | 2 | `phiP` | `phiG` |
//! | 3 | `phiG` | |
//! | 4 | `phiC` (centroid only) | |
//!
//! ## Example
//!
//! ```rust
//! use swarmopt::condition::IterationBudget;
//! use swarmopt::optimizer::pso::{Pso, Topology};
//! use swarmopt::optimizer::{Context, Optimizer};
//! use swarmopt::problem::FnProblem;
//! use swarmopt::random::{MersenneTwister, Random, Seedable};
//!
//! let problem = FnProblem::new("sphere", vec![-10.0; 3], vec![10.0; 3], |x: &[f64]| {
//!     x.iter().map(|v| v * v).sum()
//! })
//! .unwrap();
//! let mut rng = Random::new(MersenneTwister::with_seed(7)).unwrap();
//! let mut budget = IterationBudget::new(1_000);
//!
//! let pso = Pso::new().with_topology(Topology::Ring { neighbors: 1 });
//! let mut ctx = Context::new(&problem, &mut rng, &mut budget);
//! let result = pso.optimize(&[20.0, 0.7, 1.5, 1.5], &mut ctx).unwrap();
//! assert_eq!(result.iterations, 1_000);
//! ```

mod mol;
mod swarm;

pub use mol::Mol;

use self::swarm::{Swarm, SwarmSettings};
use super::{drive, population_size, Context, OptimizeResult, Optimizer, ParameterSpace, Population};
use crate::error::Result;

/// Which agents' personal bests an agent's social term attends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    /// Every agent follows the swarm's best.
    Global,
    /// Agent `i` follows the best of `i - neighbors ..= i + neighbors`,
    /// indices taken modulo the swarm size.
    Ring { neighbors: usize },
    /// Every agent informs itself and `k` agents drawn at random. Links are
    /// redrawn after any sweep without a global-best improvement.
    Informants { k: usize },
}

impl Default for Topology {
    fn default() -> Self {
        Topology::Global
    }
}

/// Granularity of the random coefficients `r1`, `r2`, `r3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Coefficients {
    /// One draw per agent update.
    #[default]
    PerAgent,
    /// One draw per dimension.
    PerDimension,
}

/// Rules for growing and shrinking the swarm during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariablePopulation {
    /// Sweeps without a global-best improvement before an agent is added.
    pub stagnant_sweeps: usize,
    /// Personal-best improvements within one sweep that trigger removal of
    /// the worst agent.
    pub improvement_burst: usize,
    /// Number of improving positions remembered for placing new agents.
    pub memory: usize,
}

impl Default for VariablePopulation {
    fn default() -> Self {
        Self {
            stagnant_sweeps: 3,
            improvement_burst: 10,
            memory: 20,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pso {
    topology: Topology,
    coefficients: Coefficients,
    centroid: bool,
    variable: Option<VariablePopulation>,
    space: ParameterSpace,
}

const NAMES: [&str; 4] = ["S", "omega", "phiP", "phiG"];
const DEFAULTS: [f64; 4] = [148.0, -0.046644, 2.882152, 1.857463];
const LOWER: [f64; 4] = [1.0, -2.0, -4.0, -4.0];
const UPPER: [f64; 4] = [200.0, 2.0, 4.0, 4.0];

impl Pso {
    /// Canonical global-best PSO with per-agent coefficients.
    pub fn new() -> Self {
        Self {
            topology: Topology::Global,
            coefficients: Coefficients::PerAgent,
            centroid: false,
            variable: None,
            space: ParameterSpace::fixed(NAMES, DEFAULTS, LOWER, UPPER),
        }
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_coefficients(mut self, coefficients: Coefficients) -> Self {
        self.coefficients = coefficients;
        self
    }

    /// Adds the centroid attraction term and its weight `phiC` as a fifth
    /// control parameter.
    pub fn with_centroid(mut self) -> Self {
        self.centroid = true;
        self.space = ParameterSpace::fixed(
            ["S", "omega", "phiP", "phiG", "phiC"],
            [148.0, -0.046644, 2.882152, 1.857463, 0.5],
            [1.0, -2.0, -4.0, -4.0, -4.0],
            [200.0, 2.0, 4.0, 4.0, 4.0],
        );
        self
    }

    pub fn with_variable_population(mut self, variable: VariablePopulation) -> Self {
        self.variable = Some(variable);
        self
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn coefficients(&self) -> Coefficients {
        self.coefficients
    }
}

impl Default for Pso {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer for Pso {
    fn name(&self) -> &str {
        "pso"
    }

    fn parameter_space(&self) -> &ParameterSpace {
        &self.space
    }

    fn optimize(&self, parameters: &[f64], ctx: &mut Context<'_>) -> Result<OptimizeResult> {
        self.space.validate(parameters)?;
        let size = population_size(parameters[0], 1)?;
        let settings = SwarmSettings {
            omega: parameters[1],
            phi_p: parameters[2],
            phi_g: parameters[3],
            phi_c: if self.centroid { Some(parameters[4]) } else { None },
            topology: self.topology,
            coefficients: self.coefficients,
            variable: self.variable,
        };

        let problem = ctx.problem();
        let population = Population::sample(problem, ctx.rng(), size, true)?;
        let mut swarm = Swarm::new(settings, population, problem)?;
        drive(self.name(), &mut swarm, ctx)
    }
}
