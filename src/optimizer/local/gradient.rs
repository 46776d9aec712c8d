use crate::error::{Result, SwarmError};
use crate::optimizer::{
    drive, vector, Context, OptimizeResult, Optimizer, ParameterSpace, Population, Run, Strategy,
};

/// Gradient descent with normalised steps: `x <- x - alpha * g / |g|`.
///
/// Control parameters are `[alpha]`. The cost reported by
/// [`Problem::gradient`](crate::problem::Problem::gradient) is added to the
/// iteration count, on top of the evaluation of every step.
#[derive(Debug, Clone)]
pub struct GradientDescent {
    space: ParameterSpace,
}

impl GradientDescent {
    pub fn new() -> Self {
        Self {
            space: ParameterSpace::fixed(["alpha"], [0.05], [1e-5], [1.0]),
        }
    }
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer for GradientDescent {
    fn name(&self) -> &str {
        "gradient-descent"
    }

    fn parameter_space(&self) -> &ParameterSpace {
        &self.space
    }

    fn optimize(&self, parameters: &[f64], ctx: &mut Context<'_>) -> Result<OptimizeResult> {
        self.space.validate(parameters)?;
        let problem = ctx.problem();
        if !problem.has_gradient() {
            return Err(SwarmError::Unsupported(format!(
                "{} requires a gradient, which {} does not provide",
                self.name(),
                problem.name()
            )));
        }

        let population = Population::sample(problem, ctx.rng(), 1, false)?;
        let mut descent = Descent {
            population,
            alpha: parameters[0],
            gradient: vec![0.0; problem.dimensionality()],
        };
        drive(self.name(), &mut descent, ctx)
    }
}

struct Descent {
    population: Population,
    alpha: f64,
    gradient: Vec<f64>,
}

impl Strategy for Descent {
    fn population(&self) -> &Population {
        &self.population
    }

    fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    fn update_agent(&mut self, _index: usize, run: &mut Run<'_, '_>) -> Result<()> {
        let problem = run.problem();
        let agent = self.population.agent_mut(0);

        let cost = problem.gradient(&agent.position, &mut self.gradient)?;
        run.charge(cost);

        let norm = vector::norm(&self.gradient);
        if norm > 0.0 {
            let scale = self.alpha / norm;
            for (x, g) in agent.position.iter_mut().zip(&self.gradient) {
                *x -= scale * g;
            }
        }
        vector::bound(&mut agent.position, problem.lower_bound(), problem.upper_bound())?;

        let evaluation = run.evaluate(&mut agent.position, agent.best)?;
        agent.remember(evaluation);
        Ok(())
    }
}
