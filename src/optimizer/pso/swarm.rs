use std::collections::VecDeque;

use tracing::debug;

use super::{Coefficients, Topology, VariablePopulation};
use crate::error::Result;
use crate::optimizer::{vector, Agent, Population, Run, Strategy};
use crate::problem::{Evaluation, Problem};
use crate::random::{Engine, Random};

#[derive(Debug, Clone, Copy)]
pub(super) struct SwarmSettings {
    pub omega: f64,
    pub phi_p: f64,
    pub phi_g: f64,
    pub phi_c: Option<f64>,
    pub topology: Topology,
    pub coefficients: Coefficients,
    pub variable: Option<VariablePopulation>,
}

/// Swarm state shared by [`super::Pso`] and [`super::Mol`].
pub(super) struct Swarm {
    settings: SwarmSettings,
    population: Population,
    /// Velocity limit per dimension, `|upper - lower|`.
    range: Vec<f64>,
    /// `links[j][i]`: agent `j` informs agent `i`. Empty unless the topology
    /// is `Informants`.
    links: Vec<Vec<bool>>,
    centroid: Vec<f64>,
    velocity: Vec<f64>,
    improved_in_sweep: bool,
    local_improvements: usize,
    stagnant_sweeps: usize,
    memory: VecDeque<Vec<f64>>,
    min_agents: usize,
}

impl Swarm {
    pub fn new(settings: SwarmSettings, population: Population, problem: &dyn Problem) -> Result<Self> {
        let n = problem.dimensionality();
        Ok(Self {
            settings,
            population,
            range: vector::range(problem.lower_bound(), problem.upper_bound())?,
            links: Vec::new(),
            centroid: vec![0.0; n],
            velocity: vec![0.0; n],
            improved_in_sweep: false,
            local_improvements: 0,
            stagnant_sweeps: 0,
            memory: VecDeque::new(),
            min_agents: n + 1,
        })
    }

    /// Index of the agent whose personal best guides agent `i`.
    fn guide(&self, i: usize) -> usize {
        let agents = self.population.agents();
        let better = |a: usize, b: usize| agents[a].best.improves_on(&agents[b].best);

        match self.settings.topology {
            Topology::Global => self.population.best_index(),
            Topology::Ring { neighbors } => {
                let s = agents.len();
                let mut guide = i;
                for d in 1..=neighbors.min(s / 2) {
                    for j in [(i + d) % s, (i + s - d) % s] {
                        if better(j, guide) {
                            guide = j;
                        }
                    }
                }
                guide
            }
            Topology::Informants { .. } => (0..agents.len())
                .filter(|&j| self.links[j][i])
                .fold(i, |guide, j| if better(j, guide) { j } else { guide }),
        }
    }

    fn draw_links(&mut self, rng: &mut Random<dyn Engine + '_>) -> Result<()> {
        let Topology::Informants { k } = self.settings.topology else {
            return Ok(());
        };
        let s = self.population.len();
        self.links = vec![vec![false; s]; s];
        for j in 0..s {
            self.links[j][j] = true;
            for _ in 0..k {
                let target = rng.index(s)?;
                self.links[j][target] = true;
            }
        }
        Ok(())
    }

    fn update_centroid(&mut self) {
        if self.settings.phi_c.is_none() {
            return;
        }
        let count = self.population.len() as f64;
        self.centroid.iter_mut().for_each(|c| *c = 0.0);
        for agent in self.population.agents() {
            for (c, p) in self.centroid.iter_mut().zip(&agent.best_position) {
                *c += p / count;
            }
        }
    }

    fn remember_improvement(&mut self, position: &[f64]) {
        let Some(variable) = self.settings.variable else {
            return;
        };
        if variable.memory == 0 {
            return;
        }
        if self.memory.len() >= variable.memory {
            self.memory.pop_front();
        }
        self.memory.push_back(position.to_vec());
    }

    /// Places a new agent in the middle of the widest gap, per dimension,
    /// between remembered improving positions and the search bounds.
    fn add_agent(&mut self, run: &mut Run<'_, '_>) -> Result<()> {
        let problem = run.problem();
        let lower = problem.lower_bound();
        let upper = problem.upper_bound();

        let position = (0..problem.dimensionality())
            .map(|k| {
                let mut coords: Vec<f64> = self.memory.iter().map(|p| p[k]).collect();
                coords.push(lower[k]);
                coords.push(upper[k]);
                coords.sort_by(f64::total_cmp);
                coords
                    .windows(2)
                    .max_by(|a, b| (a[1] - a[0]).total_cmp(&(b[1] - b[0])))
                    .map(|w| 0.5 * (w[0] + w[1]))
                    .unwrap_or(0.5 * (lower[k] + upper[k]))
            })
            .collect();
        let velocity = vector::sample_symmetric(run.rng(), &self.range);

        let mut agent = Agent::new(position, velocity);
        let evaluation = run.evaluate(&mut agent.position, Evaluation::worst())?;
        agent.best_position.copy_from_slice(&agent.position);
        agent.best = evaluation;
        let index = self.population.push(agent);
        self.population.promote(index);

        if let Topology::Informants { k } = self.settings.topology {
            let s = self.population.len();
            self.links.iter_mut().for_each(|row| row.push(false));
            let mut row = vec![false; s];
            row[index] = true;
            for _ in 0..k {
                row[run.rng().index(s)?] = true;
            }
            self.links.push(row);
        }
        debug!(agents = self.population.len(), fitness = evaluation.fitness, "agent added");
        Ok(())
    }

    fn remove_worst(&mut self) -> Result<()> {
        if self.population.len() <= self.min_agents {
            return Ok(());
        }
        let Some(worst) = self.population.worst_index() else {
            return Ok(());
        };
        if worst == self.population.best_index() {
            return Ok(());
        }
        self.population.remove(worst)?;
        if !self.links.is_empty() {
            self.links.remove(worst);
            self.links.iter_mut().for_each(|row| {
                row.remove(worst);
            });
        }
        debug!(agents = self.population.len(), "agent removed");
        Ok(())
    }
}

fn draw_coefficients(rng: &mut Random<dyn Engine + '_>, centroid: bool) -> (f64, f64, f64) {
    let r1 = rng.uniform();
    let r2 = rng.uniform();
    let r3 = if centroid { rng.uniform() } else { 0.0 };
    (r1, r2, r3)
}

impl Strategy for Swarm {
    fn population(&self) -> &Population {
        &self.population
    }

    fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    fn on_init(&mut self, run: &mut Run<'_, '_>) -> Result<()> {
        self.draw_links(run.rng())?;
        self.update_centroid();
        if let Some(best) = self.population.best_agent() {
            let position = best.best_position.clone();
            self.remember_improvement(&position);
        }
        Ok(())
    }

    fn update_agent(&mut self, i: usize, run: &mut Run<'_, '_>) -> Result<()> {
        let SwarmSettings {
            omega,
            phi_p,
            phi_g,
            phi_c,
            coefficients,
            ..
        } = self.settings;
        let guide = self.guide(i);
        let problem = run.problem();
        let rng = run.rng();
        let centroid = phi_c.is_some();
        let per_agent = draw_coefficients(rng, centroid);

        {
            let agents = self.population.agents();
            let agent = &agents[i];
            let social = &agents[guide].best_position;
            let phi_c = phi_c.unwrap_or(0.0);
            for k in 0..self.velocity.len() {
                let (r1, r2, r3) = match coefficients {
                    Coefficients::PerAgent => per_agent,
                    Coefficients::PerDimension if k == 0 => per_agent,
                    Coefficients::PerDimension => draw_coefficients(rng, centroid),
                };
                let x = agent.position[k];
                self.velocity[k] = omega * agent.velocity[k]
                    + phi_p * r1 * (agent.best_position[k] - x)
                    + phi_g * r2 * (social[k] - x)
                    + phi_c * r3 * (self.centroid[k] - x);
            }
        }
        vector::denormalize(&mut self.velocity);
        vector::bound_symmetric(&mut self.velocity, &self.range)?;

        let agent = self.population.agent_mut(i);
        agent.velocity.copy_from_slice(&self.velocity);
        for (x, v) in agent.position.iter_mut().zip(&agent.velocity) {
            *x += v;
        }
        vector::bound(&mut agent.position, problem.lower_bound(), problem.upper_bound())?;

        let evaluation = run.evaluate(&mut agent.position, agent.best)?;
        if agent.remember(evaluation) {
            self.local_improvements += 1;
            let global = i == self.population.best_index() || self.population.promote(i);
            if global {
                self.improved_in_sweep = true;
                let position = self.population.agent(i).best_position.clone();
                self.remember_improvement(&position);
            }
        }
        Ok(())
    }

    fn on_sweep_end(&mut self, run: &mut Run<'_, '_>) -> Result<()> {
        if let Some(variable) = self.settings.variable {
            if self.improved_in_sweep {
                self.stagnant_sweeps = 0;
            } else {
                self.stagnant_sweeps += 1;
            }
            if self.stagnant_sweeps >= variable.stagnant_sweeps {
                self.stagnant_sweeps = 0;
                self.add_agent(run)?;
            } else if self.local_improvements >= variable.improvement_burst {
                self.remove_worst()?;
            }
        }

        if !self.improved_in_sweep {
            self.draw_links(run.rng())?;
        }
        self.update_centroid();
        self.improved_in_sweep = false;
        self.local_improvements = 0;
        Ok(())
    }
}
