use crate::error::{Result, SwarmError};
use crate::problem::{validate_bounds, Evaluation, Problem};
use crate::random::{Engine, Random};

use super::vector;

/// One candidate solution and its memory of the best position it has seen.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub position: Vec<f64>,
    /// Empty for optimizers without velocities.
    pub velocity: Vec<f64>,
    pub best_position: Vec<f64>,
    pub best: Evaluation,
}

impl Agent {
    /// An agent at `position` that has not been evaluated yet.
    pub fn new(position: Vec<f64>, velocity: Vec<f64>) -> Self {
        Self {
            best_position: position.clone(),
            position,
            velocity,
            best: Evaluation::worst(),
        }
    }

    /// Adopts the current position as the personal best if `evaluation`
    /// improves on it.
    pub fn remember(&mut self, evaluation: Evaluation) -> bool {
        if !evaluation.improves_on(&self.best) {
            return false;
        }
        self.best_position.copy_from_slice(&self.position);
        self.best = evaluation;
        true
    }
}

/// Agents of one run plus the index of the agent holding the global best.
///
/// The global best is an index into `agents`, so it always refers to an
/// agent's `best_position` and never to a copy.
#[derive(Debug, Clone, Default)]
pub struct Population {
    agents: Vec<Agent>,
    best: usize,
}

impl Population {
    pub fn new(agents: Vec<Agent>) -> Self {
        Self { agents, best: 0 }
    }

    /// Spawns `size` agents uniformly inside the problem's initialisation
    /// box, clamped to the search bounds. With `with_velocity`, velocities are
    /// drawn from `[-range, range]` where `range = |upper - lower|`.
    ///
    /// # Errors
    ///
    /// Fails if the problem's bound arrays are empty, inverted or do not
    /// match its dimensionality.
    pub fn sample(
        problem: &dyn Problem,
        rng: &mut Random<dyn Engine + '_>,
        size: usize,
        with_velocity: bool,
    ) -> Result<Self> {
        validate_bounds(problem)?;
        let range = vector::range(problem.lower_bound(), problem.upper_bound())?;
        let agents = (0..size)
            .map(|_| {
                let mut position = vector::sample(rng, problem.lower_init(), problem.upper_init())?;
                vector::bound(&mut position, problem.lower_bound(), problem.upper_bound())?;
                let velocity = if with_velocity {
                    vector::sample_symmetric(rng, &range)
                } else {
                    Vec::new()
                };
                Ok(Agent::new(position, velocity))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(agents))
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn agent(&self, index: usize) -> &Agent {
        &self.agents[index]
    }

    pub fn agent_mut(&mut self, index: usize) -> &mut Agent {
        &mut self.agents[index]
    }

    pub fn best_index(&self) -> usize {
        self.best
    }

    pub fn best_agent(&self) -> Option<&Agent> {
        self.agents.get(self.best)
    }

    /// Makes `index` the global best if its personal best improves on the
    /// current one. Returns whether it did.
    pub fn promote(&mut self, index: usize) -> bool {
        if index != self.best && self.agents[index].best.improves_on(&self.agents[self.best].best) {
            self.best = index;
            return true;
        }
        false
    }

    /// Recomputes the global best index from scratch.
    pub fn refresh_best(&mut self) {
        self.best = 0;
        for i in 1..self.agents.len() {
            self.promote(i);
        }
    }

    /// Index of the agent with the worst personal best.
    pub fn worst_index(&self) -> Option<usize> {
        (0..self.agents.len()).reduce(|worst, i| {
            if self.agents[i].best.improves_on(&self.agents[worst].best) {
                worst
            } else {
                i
            }
        })
    }

    pub fn push(&mut self, agent: Agent) -> usize {
        self.agents.push(agent);
        self.agents.len() - 1
    }

    /// Removes the agent at `index`, shifting later agents down by one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for the global-best agent or an index out of
    /// range.
    pub fn remove(&mut self, index: usize) -> Result<Agent> {
        if index >= self.agents.len() || index == self.best {
            return Err(SwarmError::InvalidArgument(format!(
                "cannot remove agent {} of {} (global best is {})",
                index,
                self.agents.len(),
                self.best
            )));
        }
        let agent = self.agents.remove(index);
        if index < self.best {
            self.best -= 1;
        }
        Ok(agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(fitness: f64) -> Agent {
        let mut agent = Agent::new(vec![fitness], Vec::new());
        agent.remember(Evaluation::new(fitness, true));
        agent
    }

    #[test]
    fn test_remember_keeps_strict_improvements() {
        let mut a = Agent::new(vec![1.0, 2.0], Vec::new());
        assert!(a.remember(Evaluation::new(5.0, true)));
        a.position = vec![3.0, 4.0];
        assert!(!a.remember(Evaluation::new(5.0, true)));
        assert_eq!(a.best_position, vec![1.0, 2.0]);
        assert!(a.remember(Evaluation::new(4.0, true)));
        assert_eq!(a.best_position, vec![3.0, 4.0]);
    }

    #[test]
    fn test_refresh_and_worst() {
        let mut population = Population::new(vec![agent(3.0), agent(1.0), agent(7.0), agent(2.0)]);
        population.refresh_best();
        assert_eq!(population.best_index(), 1);
        assert_eq!(population.worst_index(), Some(2));
    }

    #[test]
    fn test_remove_keeps_best_index() {
        let mut population = Population::new(vec![agent(3.0), agent(1.0), agent(7.0)]);
        population.refresh_best();
        assert!(population.remove(1).is_err());

        population.remove(0).unwrap();
        assert_eq!(population.best_index(), 0);
        assert_eq!(population.best_agent().unwrap().best.fitness, 1.0);

        population.remove(1).unwrap();
        assert_eq!(population.len(), 1);
        assert_eq!(population.best_index(), 0);
    }
}
