use rayon::prelude::*;
use tracing::{debug, debug_span, info, trace};

use super::{Context, OptimizeResult, Population};
use crate::error::{OptionExt, Result, SwarmError};
use crate::options::LogLevel;
use crate::problem::{Evaluation, Problem};
use crate::random::{Engine, Random};

/// The per-algorithm part of a run.
///
/// The driver owns the loop: it evaluates the initial population, then calls
/// `update_agent` with a cursor that walks the population and wraps around,
/// calling `on_sweep_end` at every wrap the run condition lets through.
/// Strategies that pick agents at random are free to ignore the cursor.
pub(crate) trait Strategy {
    fn population(&self) -> &Population;

    fn population_mut(&mut self) -> &mut Population;

    /// Called once after the initial population has been evaluated.
    fn on_init(&mut self, run: &mut Run<'_, '_>) -> Result<()> {
        let _ = run;
        Ok(())
    }

    fn update_agent(&mut self, index: usize, run: &mut Run<'_, '_>) -> Result<()>;

    fn on_sweep_end(&mut self, run: &mut Run<'_, '_>) -> Result<()> {
        let _ = run;
        Ok(())
    }
}

/// Bookkeeping of a run in progress: the evaluation count and the best
/// evaluation seen so far, which feeds the run condition and the trace.
pub(crate) struct Run<'c, 'a> {
    ctx: &'c mut Context<'a>,
    iterations: usize,
    best: Evaluation,
    log_level: LogLevel,
}

impl<'c, 'a> Run<'c, 'a> {
    pub(crate) fn new(ctx: &'c mut Context<'a>) -> Self {
        let log_level = ctx.options.get_log_level();
        Self {
            ctx,
            iterations: 0,
            best: Evaluation::worst(),
            log_level,
        }
    }

    pub fn problem(&self) -> &'a dyn Problem {
        self.ctx.problem
    }

    pub fn rng(&mut self) -> &mut Random<dyn Engine + 'a> {
        &mut *self.ctx.rng
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn best(&self) -> Evaluation {
        self.best
    }

    /// Enforces constraints on `x` and evaluates it against `incumbent`, the
    /// evaluation the candidate competes with.
    pub fn evaluate(&mut self, x: &mut [f64], incumbent: Evaluation) -> Result<Evaluation> {
        let evaluation = assess(self.problem(), x, incumbent)?;
        self.commit(evaluation);
        Ok(evaluation)
    }

    /// Counts `cost` extra evaluations, e.g. for a gradient.
    pub fn charge(&mut self, cost: usize) {
        self.iterations += cost;
    }

    fn commit(&mut self, evaluation: Evaluation) {
        self.iterations += 1;
        if evaluation.improves_on(&self.best) {
            self.best = evaluation;
            if self.log_level == LogLevel::Verbose {
                info!(iteration = self.iterations, fitness = evaluation.fitness, "new best");
            } else {
                trace!(iteration = self.iterations, fitness = evaluation.fitness, "new best");
            }
        }
        let reported = self.reported_fitness();
        if let Some(sink) = self.ctx.trace.as_deref_mut() {
            sink.record(self.iterations, reported);
        }
    }

    /// The fitness shown to the trace and the run condition. An infeasible
    /// best reports `+inf`, so a later feasible best never reads as a rise.
    fn reported_fitness(&self) -> f64 {
        if self.best.feasible {
            self.best.fitness
        } else {
            f64::INFINITY
        }
    }

    fn proceed(&mut self) -> bool {
        let fitness = self.reported_fitness();
        self.ctx.condition.should_continue(self.iterations, fitness)
    }
}

/// Evaluates one position with feasibility-first limits.
///
/// A feasible candidate competing with an infeasible incumbent gets no
/// preemptive limit, since any feasible fitness beats the incumbent.
fn assess(problem: &dyn Problem, x: &mut [f64], incumbent: Evaluation) -> Result<Evaluation> {
    let feasible = problem.enforce_constraints(x);
    let limit = if feasible && !incumbent.feasible {
        f64::INFINITY
    } else {
        incumbent.fitness
    };
    let fitness = problem.fitness_limited(x, limit);
    if fitness.is_nan() {
        return Err(SwarmError::FitnessCalculation(format!(
            "{} returned NaN",
            problem.name()
        )));
    }
    Ok(Evaluation::new(fitness, feasible))
}

/// Evaluates every agent once. Large populations are evaluated on the rayon
/// pool; results are committed in agent order either way, so the count and
/// the trace do not depend on the thread count.
fn initialise(population: &mut Population, run: &mut Run<'_, '_>) -> Result<()> {
    if population.is_empty() {
        return Err(SwarmError::DegeneratePopulation {
            required: 1,
            actual: 0,
        });
    }

    let problem = run.problem();
    let evaluations = if population.len() >= run.ctx.options.get_parallel_threshold() {
        population
            .agents_mut()
            .par_iter_mut()
            .map(|agent| assess(problem, &mut agent.position, Evaluation::worst()))
            .collect::<Result<Vec<_>>>()?
    } else {
        population
            .agents_mut()
            .iter_mut()
            .map(|agent| assess(problem, &mut agent.position, Evaluation::worst()))
            .collect::<Result<Vec<_>>>()?
    };

    for (agent, evaluation) in population.agents_mut().iter_mut().zip(evaluations) {
        agent.best_position.copy_from_slice(&agent.position);
        agent.best = evaluation;
        run.commit(evaluation);
    }
    population.refresh_best();
    Ok(())
}

/// Runs `strategy` to completion: initialisation, then agent updates until the
/// run condition stops the loop.
pub(crate) fn drive<S: Strategy>(
    optimizer: &str,
    strategy: &mut S,
    ctx: &mut Context<'_>,
) -> Result<OptimizeResult> {
    let problem = ctx.problem;
    let _span = debug_span!("optimize", optimizer, problem = problem.name()).entered();

    ctx.condition.reset();
    let mut run = Run::new(ctx);

    initialise(strategy.population_mut(), &mut run)?;
    strategy.on_init(&mut run)?;

    let agents = strategy.population().len();
    if run.log_level == LogLevel::None {
        debug!(agents, fitness = run.best.fitness, "population initialised");
    } else {
        info!(agents, fitness = run.best.fitness, "population initialised");
    }

    // A sweep ends only once the condition allows another step, so sweep-end
    // work that evaluates (such as adding an agent) never overruns a budget.
    let mut cursor = 0;
    while run.proceed() {
        if cursor >= strategy.population().len() {
            cursor = 0;
            strategy.on_sweep_end(&mut run)?;
            continue;
        }
        strategy.update_agent(cursor, &mut run)?;
        cursor += 1;
    }

    let best = strategy.population().best_agent().ok_or_else_swarm(|| {
        SwarmError::DegeneratePopulation {
            required: 1,
            actual: 0,
        }
    })?;
    let result = OptimizeResult {
        parameters: best.best_position.clone(),
        fitness: best.best.fitness,
        feasible: best.best.feasible,
        iterations: run.iterations,
    };

    if run.log_level == LogLevel::None {
        debug!(iterations = result.iterations, fitness = result.fitness, "run finished");
    } else {
        info!(iterations = result.iterations, fitness = result.fitness, "run finished");
    }
    Ok(result)
}
