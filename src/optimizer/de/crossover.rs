//! Base-vector and crossover schemes for differential evolution.
//!
//! A scheme writes the mutated components into `trial`, which arrives as a
//! copy of the target agent's position. Components it leaves alone are
//! inherited from the target.

use std::fmt;

use crate::error::{Result, SwarmError};
use crate::optimizer::Agent;
use crate::random::{Engine, Random};

/// The population as seen by a crossover scheme.
#[derive(Debug, Clone, Copy)]
pub struct Donors<'p> {
    pub agents: &'p [Agent],
    /// Index of the global best agent.
    pub best: usize,
    /// Index of the agent being mutated.
    pub target: usize,
}

/// Builds a trial vector from the donor population.
pub trait Crossover: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    /// Writes the mutant components into `trial`.
    ///
    /// `weights` holds the differential weight for each dimension and `cr`
    /// the crossover probability.
    ///
    /// # Errors
    ///
    /// Returns `DegeneratePopulation` if there are too few agents to pick
    /// distinct donors.
    fn apply(
        &self,
        donors: &Donors<'_>,
        weights: &[f64],
        cr: f64,
        rng: &mut Random<dyn Engine + '_>,
        trial: &mut [f64],
    ) -> Result<()>;
}

/// Binomial crossover around the global best: `best + F*(a - b)` in a
/// random subset of dimensions that always contains one drawn dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rand1Bin;

impl Crossover for Rand1Bin {
    fn name(&self) -> &'static str {
        "rand1bin"
    }

    fn apply(
        &self,
        donors: &Donors<'_>,
        weights: &[f64],
        cr: f64,
        rng: &mut Random<dyn Engine + '_>,
        trial: &mut [f64],
    ) -> Result<()> {
        let n = trial.len();
        let forced = rng.index(n)?;
        let (r1, r2) = rng.index2(donors.agents.len())?;
        let base = &donors.agents[donors.best].best_position;
        let a = &donors.agents[r1].best_position;
        let b = &donors.agents[r2].best_position;

        for k in 0..n {
            if k == forced || rng.uniform() < cr {
                trial[k] = base[k] + weights[k] * (a[k] - b[k]);
            }
        }
        Ok(())
    }
}

/// Exponential crossover around the global best: a run of consecutive
/// dimensions, starting at a drawn one and wrapping around, continued while
/// `uniform() < CR`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rand1Exp;

impl Crossover for Rand1Exp {
    fn name(&self) -> &'static str {
        "rand1exp"
    }

    fn apply(
        &self,
        donors: &Donors<'_>,
        weights: &[f64],
        cr: f64,
        rng: &mut Random<dyn Engine + '_>,
        trial: &mut [f64],
    ) -> Result<()> {
        let n = trial.len();
        let mut k = rng.index(n)?;
        let (r1, r2) = rng.index2(donors.agents.len())?;
        let base = &donors.agents[donors.best].best_position;
        let a = &donors.agents[r1].best_position;
        let b = &donors.agents[r2].best_position;

        for _ in 0..n {
            trial[k] = base[k] + weights[k] * (a[k] - b[k]);
            k = (k + 1) % n;
            if rng.uniform() >= cr {
                break;
            }
        }
        Ok(())
    }
}

/// Binomial crossover around a random agent: `r0 + F*(r1 - r2)` with three
/// distinct donors.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomBase1Bin;

impl Crossover for RandomBase1Bin {
    fn name(&self) -> &'static str {
        "randombase1bin"
    }

    fn apply(
        &self,
        donors: &Donors<'_>,
        weights: &[f64],
        cr: f64,
        rng: &mut Random<dyn Engine + '_>,
        trial: &mut [f64],
    ) -> Result<()> {
        let np = donors.agents.len();
        if np < 3 {
            return Err(SwarmError::DegeneratePopulation {
                required: 3,
                actual: np,
            });
        }
        let n = trial.len();
        let forced = rng.index(n)?;
        let (r1, r2) = rng.index2(np)?;
        let r0 = loop {
            let candidate = rng.index(np)?;
            if candidate != r1 && candidate != r2 {
                break candidate;
            }
        };
        let base = &donors.agents[r0].best_position;
        let a = &donors.agents[r1].best_position;
        let b = &donors.agents[r2].best_position;

        for k in 0..n {
            if k == forced || rng.uniform() < cr {
                trial[k] = base[k] + weights[k] * (a[k] - b[k]);
            }
        }
        Ok(())
    }
}
