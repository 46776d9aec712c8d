use super::try_move;
use crate::error::Result;
use crate::optimizer::{
    drive, vector, Context, OptimizeResult, Optimizer, ParameterSpace, Population, Run, Strategy,
};

/// Pattern Search. Takes no control parameters.
#[derive(Debug, Clone)]
pub struct PatternSearch {
    space: ParameterSpace,
}

impl PatternSearch {
    pub fn new() -> Self {
        Self {
            space: ParameterSpace::fixed([], [], [], []),
        }
    }
}

impl Default for PatternSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl Optimizer for PatternSearch {
    fn name(&self) -> &str {
        "pattern-search"
    }

    fn parameter_space(&self) -> &ParameterSpace {
        &self.space
    }

    fn optimize(&self, parameters: &[f64], ctx: &mut Context<'_>) -> Result<OptimizeResult> {
        self.space.validate(parameters)?;
        let problem = ctx.problem();
        let population = Population::sample(problem, ctx.rng(), 1, false)?;
        let mut search = Pattern {
            population,
            step: vector::range(problem.lower_bound(), problem.upper_bound())?,
            candidate: vec![0.0; problem.dimensionality()],
        };
        drive(self.name(), &mut search, ctx)
    }
}

struct Pattern {
    population: Population,
    step: Vec<f64>,
    candidate: Vec<f64>,
}

impl Strategy for Pattern {
    fn population(&self) -> &Population {
        &self.population
    }

    fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    fn update_agent(&mut self, _index: usize, run: &mut Run<'_, '_>) -> Result<()> {
        let problem = run.problem();
        let r = run.rng().index(self.step.len())?;

        self.candidate.copy_from_slice(&self.population.agent(0).position);
        self.candidate[r] += self.step[r];
        vector::bound(&mut self.candidate, problem.lower_bound(), problem.upper_bound())?;

        if !try_move(&mut self.population, &mut self.candidate, run)? {
            self.step[r] *= -0.5;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::IterationBudget;
    use crate::problem::FnProblem;
    use crate::random::{LEcuyer, Random, Seedable};

    #[test]
    fn test_takes_no_parameters() {
        let problem = FnProblem::new("flat", vec![0.0], vec![1.0], |_: &[f64]| 0.0).unwrap();
        let mut rng = Random::new(LEcuyer::with_seed(1)).unwrap();
        let mut budget = IterationBudget::new(10);
        let mut ctx = Context::new(&problem, &mut rng, &mut budget);
        let search = PatternSearch::new();
        assert!(search.optimize(&[1.0], &mut ctx).is_err());
        assert_eq!(search.optimize(&[], &mut ctx).unwrap().iterations, 10);
    }

    #[test]
    fn test_failed_step_reverses_and_halves() {
        let problem = FnProblem::new("flat", vec![-4.0], vec![4.0], |_: &[f64]| 1.0).unwrap();
        let mut rng = Random::new(LEcuyer::with_seed(1)).unwrap();
        let mut budget = IterationBudget::new(4);
        let mut ctx = Context::new(&problem, &mut rng, &mut budget);

        let population = Population::sample(&problem, ctx.rng(), 1, false).unwrap();
        let mut search = Pattern {
            population,
            step: vec![8.0],
            candidate: vec![0.0],
        };
        drive("pattern-search", &mut search, &mut ctx).unwrap();
        assert_eq!(search.step, vec![-1.0]);
    }

    #[test]
    fn test_converges_on_quadratic() {
        let problem = FnProblem::new("bowl", vec![-8.0; 2], vec![8.0; 2], |x: &[f64]| {
            (x[0] - 1.0).powi(2) + 2.0 * (x[1] + 3.0).powi(2)
        })
        .unwrap();
        let mut rng = Random::new(LEcuyer::with_seed(5)).unwrap();
        let mut budget = IterationBudget::new(600);
        let mut ctx = Context::new(&problem, &mut rng, &mut budget);
        let result = PatternSearch::new().optimize(&[], &mut ctx).unwrap();
        assert!(result.fitness < 1e-3, "fitness = {}", result.fitness);
    }
}
