//! # Differential Evolution
//!
//! Steady-state differential evolution: every step mutates one randomly
//! chosen agent, and the trial vector replaces the agent only if it is
//! strictly better. The trial vector is built by a pluggable [`Crossover`]
//! scheme; the canonical [`Rand1Bin`] uses the global best as base vector.
//!
//! The differential weight `F` may be fixed or dithered ([`Dither`]):
//!
//! | Dither | Parameters | `F` redrawn |
//! |---|---|---|
//! | `None` | `[NP, CR, F]` | never |
//! | `Generation` | `[NP, CR, FMid, FRange]` | once per sweep of `NP` steps |
//! | `Vector` | `[NP, CR, FMid, FRange]` | after every accepted mutation |
//! | `Element` | `[NP, CR, FMid, FRange]` | per dimension, every mutation |
//!
//! Dithered weights are drawn as `F = FMid + FRange * (u - 0.5)`.
//!
//! ## Example
//!
//! ```rust
//! use swarmopt::condition::IterationBudget;
//! use swarmopt::optimizer::de::{De, Dither};
//! use swarmopt::optimizer::{Context, Optimizer};
//! use swarmopt::problem::FnProblem;
//! use swarmopt::random::{Kiss, Random, Seedable};
//!
//! let problem = FnProblem::new("sphere", vec![-10.0; 3], vec![10.0; 3], |x: &[f64]| {
//!     x.iter().map(|v| v * v).sum()
//! })
//! .unwrap();
//! let mut rng = Random::new(Kiss::with_seed(3)).unwrap();
//! let mut budget = IterationBudget::new(2_000);
//!
//! let de = De::new(Dither::Generation);
//! let mut ctx = Context::new(&problem, &mut rng, &mut budget);
//! let result = de.optimize(&[20.0, 0.9, 0.5, 0.4], &mut ctx).unwrap();
//! assert!(result.parameters.iter().all(|v| v.abs() <= 10.0));
//! ```

mod crossover;

pub use crossover::{Crossover, Donors, Rand1Bin, Rand1Exp, RandomBase1Bin};

use super::{
    drive, population_size, vector, Context, OptimizeResult, Optimizer, ParameterSpace, Population, Run,
    Strategy,
};
use crate::error::Result;

/// Minimum population for two distinct donors besides base and target.
const MIN_AGENTS: usize = 4;

/// Granularity at which the differential weight is randomised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dither {
    #[default]
    None,
    Generation,
    Vector,
    Element,
}

#[derive(Debug)]
pub struct De {
    dither: Dither,
    crossover: Box<dyn Crossover>,
    space: ParameterSpace,
}

impl De {
    /// Differential evolution with `Rand1Bin` crossover.
    pub fn new(dither: Dither) -> Self {
        Self::with_crossover(dither, Box::new(Rand1Bin))
    }

    pub fn with_crossover(dither: Dither, crossover: Box<dyn Crossover>) -> Self {
        let space = match dither {
            Dither::None => ParameterSpace::fixed(
                ["NP", "CR", "F"],
                [19.0, 0.9, 0.5],
                [4.0, 0.0, 0.0],
                [200.0, 1.0, 2.0],
            ),
            _ => ParameterSpace::fixed(
                ["NP", "CR", "FMid", "FRange"],
                [19.0, 0.9, 0.5, 0.4],
                [4.0, 0.0, 0.0, 0.0],
                [200.0, 1.0, 2.0, 3.0],
            ),
        };
        Self {
            dither,
            crossover,
            space,
        }
    }

    pub fn dither(&self) -> Dither {
        self.dither
    }

    pub fn crossover(&self) -> &dyn Crossover {
        self.crossover.as_ref()
    }
}

impl Default for De {
    fn default() -> Self {
        Self::new(Dither::None)
    }
}

impl Optimizer for De {
    fn name(&self) -> &str {
        "de"
    }

    fn parameter_space(&self) -> &ParameterSpace {
        &self.space
    }

    fn optimize(&self, parameters: &[f64], ctx: &mut Context<'_>) -> Result<OptimizeResult> {
        self.space.validate(parameters)?;
        let size = population_size(parameters[0], MIN_AGENTS)?;
        let (f_mid, f_range) = match self.dither {
            Dither::None => (parameters[2], 0.0),
            _ => (parameters[2], parameters[3]),
        };

        let problem = ctx.problem();
        let population = Population::sample(problem, ctx.rng(), size, false)?;
        let mut evolution = Evolution {
            population,
            crossover: self.crossover.as_ref(),
            dither: self.dither,
            cr: parameters[1],
            f_mid,
            f_range,
            weights: vec![f_mid; problem.dimensionality()],
            trial: vec![0.0; problem.dimensionality()],
        };
        drive(self.name(), &mut evolution, ctx)
    }
}

struct Evolution<'c> {
    population: Population,
    crossover: &'c dyn Crossover,
    dither: Dither,
    cr: f64,
    f_mid: f64,
    f_range: f64,
    weights: Vec<f64>,
    trial: Vec<f64>,
}

impl Evolution<'_> {
    fn redraw_weight(&mut self, run: &mut Run<'_, '_>) {
        let f = self.f_mid + self.f_range * (run.rng().uniform() - 0.5);
        self.weights.iter_mut().for_each(|w| *w = f);
    }

    fn redraw_elements(&mut self, run: &mut Run<'_, '_>) {
        let rng = run.rng();
        for w in self.weights.iter_mut() {
            *w = self.f_mid + self.f_range * (rng.uniform() - 0.5);
        }
    }
}

impl Strategy for Evolution<'_> {
    fn population(&self) -> &Population {
        &self.population
    }

    fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    fn on_init(&mut self, run: &mut Run<'_, '_>) -> Result<()> {
        if matches!(self.dither, Dither::Generation | Dither::Vector) {
            self.redraw_weight(run);
        }
        Ok(())
    }

    fn update_agent(&mut self, _index: usize, run: &mut Run<'_, '_>) -> Result<()> {
        let problem = run.problem();
        let j = run.rng().index(self.population.len())?;
        if self.dither == Dither::Element {
            self.redraw_elements(run);
        }

        self.trial.copy_from_slice(&self.population.agent(j).position);
        let donors = Donors {
            agents: self.population.agents(),
            best: self.population.best_index(),
            target: j,
        };
        self.crossover
            .apply(&donors, &self.weights, self.cr, run.rng(), &mut self.trial)?;
        vector::bound(&mut self.trial, problem.lower_bound(), problem.upper_bound())?;

        let incumbent = self.population.agent(j).best;
        let evaluation = run.evaluate(&mut self.trial, incumbent)?;
        if evaluation.improves_on(&incumbent) {
            let agent = self.population.agent_mut(j);
            agent.position.copy_from_slice(&self.trial);
            agent.remember(evaluation);
            self.population.promote(j);
            if self.dither == Dither::Vector {
                self.redraw_weight(run);
            }
        }
        Ok(())
    }

    fn on_sweep_end(&mut self, run: &mut Run<'_, '_>) -> Result<()> {
        if self.dither == Dither::Generation {
            self.redraw_weight(run);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::IterationBudget;
    use crate::error::SwarmError;
    use crate::problem::FnProblem;
    use crate::random::{MersenneTwister, Random, Seedable};

    fn sphere() -> FnProblem<impl Fn(&[f64]) -> f64 + Sync> {
        FnProblem::new("sphere", vec![-5.0; 3], vec![5.0; 3], |x: &[f64]| {
            x.iter().map(|v| v * v).sum()
        })
        .unwrap()
    }

    #[test]
    fn test_rejects_small_population() {
        let problem = sphere();
        let mut rng = Random::new(MersenneTwister::with_seed(1)).unwrap();
        let mut budget = IterationBudget::new(100);
        let mut ctx = Context::new(&problem, &mut rng, &mut budget);
        match De::new(Dither::None).optimize(&[3.0, 0.9, 0.5], &mut ctx) {
            Err(SwarmError::DegeneratePopulation { required, actual }) => {
                assert_eq!((required, actual), (4, 3));
            }
            other => panic!("Expected DegeneratePopulation, got {:?}", other),
        }
    }

    #[test]
    fn test_parameter_layout_follows_dither() {
        assert_eq!(De::new(Dither::None).parameter_space().dimensionality(), 3);
        for dither in [Dither::Generation, Dither::Vector, Dither::Element] {
            let de = De::new(dither);
            assert_eq!(de.parameter_space().names()[3], "FRange");
        }
    }

    #[test]
    fn test_population_stays_in_bounds() {
        let problem = sphere();
        for dither in [Dither::None, Dither::Generation, Dither::Vector, Dither::Element] {
            let mut rng = Random::new(MersenneTwister::with_seed(2)).unwrap();
            let mut budget = IterationBudget::new(500);
            let mut ctx = Context::new(&problem, &mut rng, &mut budget);
            let parameters: &[f64] = match dither {
                // A large weight pushes many trial vectors out of bounds.
                Dither::None => &[8.0, 0.9, 1.9],
                _ => &[8.0, 0.9, 1.9, 2.0],
            };
            let crossover = Rand1Bin;
            let size = population_size(parameters[0], MIN_AGENTS).unwrap();
            let population = Population::sample(&problem, ctx.rng(), size, false).unwrap();
            let mut evolution = Evolution {
                population,
                crossover: &crossover,
                dither,
                cr: parameters[1],
                f_mid: parameters[2],
                f_range: parameters.get(3).copied().unwrap_or(0.0),
                weights: vec![parameters[2]; 3],
                trial: vec![0.0; 3],
            };
            drive("de", &mut evolution, &mut ctx).unwrap();
            for agent in evolution.population.agents() {
                assert!(agent.position.iter().all(|v| v.abs() <= 5.0));
                assert_eq!(agent.position, agent.best_position);
            }
        }
    }

    #[test]
    fn test_vector_dither_redraws_on_acceptance() {
        let problem = sphere();
        let mut rng = Random::new(MersenneTwister::with_seed(3)).unwrap();
        let mut budget = IterationBudget::new(0);
        let mut ctx = Context::new(&problem, &mut rng, &mut budget);
        let population = Population::sample(&problem, ctx.rng(), 6, false).unwrap();
        let crossover = Rand1Bin;
        let mut evolution = Evolution {
            population,
            crossover: &crossover,
            dither: Dither::Vector,
            cr: 0.9,
            f_mid: 0.5,
            f_range: 1.0,
            weights: vec![0.5; 3],
            trial: vec![0.0; 3],
        };
        drive("de", &mut evolution, &mut ctx).unwrap();
        // on_init drew a weight shared by every dimension.
        let w = evolution.weights[0];
        assert!(w > 0.0 && w < 1.0);
        assert!(evolution.weights.iter().all(|&x| x == w));
    }
}
