//! # Local Search
//!
//! Single-agent optimizers that refine one position:
//!
//! - [`Lus`]: Local Unimodal Sampling. Samples around the current position
//!   and shrinks the sampling range by `q = 2^(-1/(n*gamma))` after every
//!   failure.
//! - [`PatternSearch`]: steps along one random dimension; a failed step
//!   reverses and halves that dimension's step size.
//! - [`GradientDescent`]: fixed-length steps against the normalised gradient.

mod gradient;
mod lus;
mod pattern;

pub use gradient::GradientDescent;
pub use lus::Lus;
pub use pattern::PatternSearch;

use super::{Population, Run};
use crate::error::Result;

/// Evaluates `candidate` and moves the single agent there if it is better.
fn try_move(population: &mut Population, candidate: &mut [f64], run: &mut Run<'_, '_>) -> Result<bool> {
    let incumbent = population.agent(0).best;
    let evaluation = run.evaluate(candidate, incumbent)?;
    if !evaluation.improves_on(&incumbent) {
        return Ok(false);
    }
    let agent = population.agent_mut(0);
    agent.position.copy_from_slice(candidate);
    agent.remember(evaluation);
    Ok(true)
}
