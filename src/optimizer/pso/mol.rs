use super::swarm::{Swarm, SwarmSettings};
use super::{Coefficients, Topology};
use crate::error::Result;
use crate::optimizer::{drive, population_size, Context, OptimizeResult, Optimizer, ParameterSpace, Population};

/// Many Optimizing Liaisons: a swarm whose agents only follow the global
/// best, with no pull towards their own best position.
///
/// Control parameters are `[S, omega, phiG]`.
#[derive(Debug, Clone)]
pub struct Mol {
    space: ParameterSpace,
}

impl Mol {
    pub fn new() -> Self {
        Self {
            space: ParameterSpace::fixed(
                ["S", "omega", "phiG"],
                [153.0, -0.289623, 1.494742],
                [1.0, -2.0, -4.0],
                [200.0, 2.0, 4.0],
            ),
        }
    }
}

impl Default for Mol {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer for Mol {
    fn name(&self) -> &str {
        "mol"
    }

    fn parameter_space(&self) -> &ParameterSpace {
        &self.space
    }

    fn optimize(&self, parameters: &[f64], ctx: &mut Context<'_>) -> Result<OptimizeResult> {
        self.space.validate(parameters)?;
        let size = population_size(parameters[0], 1)?;
        let settings = SwarmSettings {
            omega: parameters[1],
            phi_p: 0.0,
            phi_g: parameters[2],
            phi_c: None,
            topology: Topology::Global,
            coefficients: Coefficients::PerAgent,
            variable: None,
        };

        let problem = ctx.problem();
        let population = Population::sample(problem, ctx.rng(), size, true)?;
        let mut swarm = Swarm::new(settings, population, problem)?;
        drive(self.name(), &mut swarm, ctx)
    }
}
