use super::try_move;
use crate::error::{Result, SwarmError};
use crate::optimizer::{
    drive, vector, Context, OptimizeResult, Optimizer, ParameterSpace, Population, Run, Strategy,
};

/// Local Unimodal Sampling, with control parameter `[gamma]`.
#[derive(Debug, Clone)]
pub struct Lus {
    space: ParameterSpace,
}

impl Lus {
    pub fn new() -> Self {
        Self {
            space: ParameterSpace::fixed(["gamma"], [3.0], [0.5], [20.0]),
        }
    }
}

impl Default for Lus {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer for Lus {
    fn name(&self) -> &str {
        "lus"
    }

    fn parameter_space(&self) -> &ParameterSpace {
        &self.space
    }

    fn optimize(&self, parameters: &[f64], ctx: &mut Context<'_>) -> Result<OptimizeResult> {
        self.space.validate(parameters)?;
        let gamma = parameters[0];
        if gamma <= 0.0 {
            return Err(SwarmError::InvalidArgument(format!(
                "gamma must be positive, got {}",
                gamma
            )));
        }

        let problem = ctx.problem();
        let n = problem.dimensionality() as f64;
        let population = Population::sample(problem, ctx.rng(), 1, false)?;
        let mut sampling = Sampling {
            population,
            range: vector::range(problem.lower_bound(), problem.upper_bound())?,
            decrease: 0.5f64.powf(1.0 / (n * gamma)),
            candidate: vec![0.0; problem.dimensionality()],
        };
        drive(self.name(), &mut sampling, ctx)
    }
}

struct Sampling {
    population: Population,
    range: Vec<f64>,
    decrease: f64,
    candidate: Vec<f64>,
}

impl Strategy for Sampling {
    fn population(&self) -> &Population {
        &self.population
    }

    fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    fn update_agent(&mut self, _index: usize, run: &mut Run<'_, '_>) -> Result<()> {
        let problem = run.problem();
        let rng = run.rng();
        let x = &self.population.agent(0).position;
        for ((y, &xk), &d) in self.candidate.iter_mut().zip(x).zip(&self.range) {
            *y = xk + rng.uniform_range(-d, d);
        }
        vector::bound(&mut self.candidate, problem.lower_bound(), problem.upper_bound())?;

        if !try_move(&mut self.population, &mut self.candidate, run)? {
            self.range.iter_mut().for_each(|d| *d *= self.decrease);
        }
        Ok(())
    }
}
