use swarmopt::{
    condition::{FitnessThreshold, IterationBudget},
    optimizer::{
        pso::{Coefficients, Mol, Pso, Topology, VariablePopulation},
        Context, OptimizeResult, Optimizer,
    },
    options::{LogLevel, RunOptions},
    problem::Problem,
    random::{MersenneTwister, Random, Seedable},
    trace::FitnessTrace,
};

struct Sphere {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Sphere {
    fn new(dimensionality: usize, bound: f64) -> Self {
        Self {
            lower: vec![-bound; dimensionality],
            upper: vec![bound; dimensionality],
        }
    }
}

impl Problem for Sphere {
    fn name(&self) -> &str {
        "sphere"
    }

    fn dimensionality(&self) -> usize {
        self.lower.len()
    }

    fn lower_bound(&self) -> &[f64] {
        &self.lower
    }

    fn upper_bound(&self) -> &[f64] {
        &self.upper
    }

    fn min_fitness(&self) -> f64 {
        0.0
    }

    fn fitness(&self, x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    fn fitness_limited(&self, x: &[f64], limit: f64) -> f64 {
        let mut sum = 0.0;
        for v in x {
            sum += v * v;
            if sum >= limit {
                break;
            }
        }
        sum
    }
}

/// Sphere restricted to the half-plane `x0 + x1 >= 1`.
struct HalfPlane(Sphere);

impl Problem for HalfPlane {
    fn name(&self) -> &str {
        "half-plane sphere"
    }

    fn dimensionality(&self) -> usize {
        2
    }

    fn lower_bound(&self) -> &[f64] {
        self.0.lower_bound()
    }

    fn upper_bound(&self) -> &[f64] {
        self.0.upper_bound()
    }

    fn min_fitness(&self) -> f64 {
        0.5
    }

    fn fitness(&self, x: &[f64]) -> f64 {
        self.0.fitness(x)
    }

    fn enforce_constraints(&self, x: &mut [f64]) -> bool {
        x[0] + x[1] >= 1.0
    }
}

/// Sphere feasible only where `x0 + x1 >= 12`; the best feasible fitness is 72.
struct FarCorner(Sphere);

impl Problem for FarCorner {
    fn name(&self) -> &str {
        "far-corner sphere"
    }

    fn dimensionality(&self) -> usize {
        2
    }

    fn lower_bound(&self) -> &[f64] {
        self.0.lower_bound()
    }

    fn upper_bound(&self) -> &[f64] {
        self.0.upper_bound()
    }

    fn min_fitness(&self) -> f64 {
        72.0
    }

    fn fitness(&self, x: &[f64]) -> f64 {
        self.0.fitness(x)
    }

    fn enforce_constraints(&self, x: &mut [f64]) -> bool {
        x[0] + x[1] >= 12.0
    }
}

fn optimize(
    optimizer: &dyn Optimizer,
    problem: &dyn Problem,
    parameters: &[f64],
    seed: u32,
    budget: usize,
) -> OptimizeResult {
    let mut rng = Random::new(MersenneTwister::with_seed(seed)).unwrap();
    let mut condition = IterationBudget::new(budget);
    let mut ctx = Context::new(problem, &mut rng, &mut condition);
    optimizer.optimize(parameters, &mut ctx).unwrap()
}

#[test]
fn test_pso_sphere_regression() {
    let problem = Sphere::new(5, 10.0);
    let result = optimize(&Pso::new(), &problem, &[20.0, 0.7, 1.5, 1.5], 42, 2_000);

    assert_eq!(result.iterations, 2_000);
    assert!(result.feasible);
    assert!(result.fitness < 1e-3, "fitness = {}", result.fitness);
    assert_eq!(result.fitness, problem.fitness(&result.parameters));
}

#[test]
fn test_result_owns_its_parameters() {
    let problem = Sphere::new(2, 3.0);
    let mut rng = Random::new(MersenneTwister::with_seed(4)).unwrap();
    let mut condition = IterationBudget::new(300);
    let mut parameters = vec![10.0, 0.7, 1.5, 1.5];
    let result = {
        let mut ctx = Context::new(&problem, &mut rng, &mut condition);
        Pso::new().optimize(&parameters, &mut ctx).unwrap()
    };
    let snapshot = result.clone();
    parameters.iter_mut().for_each(|p| *p = f64::NAN);
    assert_eq!(result, snapshot);
    assert_eq!(result.fitness, problem.fitness(&result.parameters));
}

#[test]
fn test_pso_is_reproducible() {
    let problem = Sphere::new(3, 5.0);
    let pso = Pso::new().with_topology(Topology::Ring { neighbors: 1 });
    let a = optimize(&pso, &problem, &[12.0, 0.6, 1.2, 1.8], 7, 700);
    let b = optimize(&pso, &problem, &[12.0, 0.6, 1.2, 1.8], 7, 700);
    let c = optimize(&pso, &problem, &[12.0, 0.6, 1.2, 1.8], 8, 700);
    assert_eq!(a, b);
    assert_ne!(a.parameters, c.parameters);
}

#[test]
fn test_trace_is_monotone() {
    let problem = Sphere::new(4, 10.0);
    let mut rng = Random::new(MersenneTwister::with_seed(3)).unwrap();
    let mut condition = IterationBudget::new(1_000);
    let mut trace = FitnessTrace::new(1);

    let result = {
        let mut ctx = Context::new(&problem, &mut rng, &mut condition).with_trace(&mut trace);
        Pso::new()
            .with_coefficients(Coefficients::PerDimension)
            .optimize(&[20.0, 0.7, 1.5, 1.5], &mut ctx)
            .unwrap()
    };

    let points = trace.points();
    assert_eq!(points.len(), 1_000);
    assert!(points.iter().enumerate().all(|(i, &(iteration, _))| iteration == i + 1));
    assert!(points.windows(2).all(|w| w[1].1 <= w[0].1));
    assert_eq!(trace.last_fitness(), Some(result.fitness));
}

#[test]
fn test_closure_trace_sink() {
    let problem = Sphere::new(2, 1.0);
    let mut rng = Random::new(MersenneTwister::with_seed(1)).unwrap();
    let mut condition = IterationBudget::new(150);
    let mut calls = 0;
    let mut last = f64::INFINITY;
    {
        let mut sink = |_: usize, fitness: f64| {
            calls += 1;
            last = fitness;
        };
        let mut ctx = Context::new(&problem, &mut rng, &mut condition).with_trace(&mut sink);
        Mol::new().optimize(&[10.0, 0.5, 1.5], &mut ctx).unwrap();
    }
    assert_eq!(calls, 150);
    assert!(last.is_finite());
}

#[test]
fn test_parallel_initialisation_matches_sequential() {
    let problem = Sphere::new(6, 10.0);
    let run = |threshold: usize| {
        let mut rng = Random::new(MersenneTwister::with_seed(19)).unwrap();
        let mut condition = IterationBudget::new(400);
        let options = RunOptions::builder().parallel_threshold(threshold).build();
        let mut ctx = Context::new(&problem, &mut rng, &mut condition).with_options(options);
        Pso::new().optimize(&[64.0, 0.7, 1.5, 1.5], &mut ctx).unwrap()
    };
    assert_eq!(run(1), run(10_000));
}

#[test]
fn test_verbose_run_logs() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();

    let problem = Sphere::new(2, 5.0);
    let mut rng = Random::new(MersenneTwister::with_seed(5)).unwrap();
    let mut condition = IterationBudget::new(200);
    let options = RunOptions::builder().log_level(LogLevel::Verbose).build();
    let mut ctx = Context::new(&problem, &mut rng, &mut condition).with_options(options);
    let result = Pso::new()
        .with_variable_population(VariablePopulation::default())
        .optimize(&[10.0, 0.7, 1.5, 1.5], &mut ctx)
        .unwrap();
    assert_eq!(result.iterations, 200);
}

#[test]
fn test_variable_population_stays_in_bounds() {
    let problem = Sphere::new(3, 4.0);
    let pso = Pso::new()
        .with_topology(Topology::Informants { k: 2 })
        .with_variable_population(VariablePopulation {
            stagnant_sweeps: 1,
            improvement_burst: 2,
            memory: 8,
        });
    let result = optimize(&pso, &problem, &[8.0, 0.7, 1.5, 1.5], 13, 3_000);
    assert_eq!(result.iterations, 3_000);
    assert!(result.parameters.iter().all(|v| v.abs() <= 4.0));
}

#[test]
fn test_feasible_result_preferred() {
    let problem = HalfPlane(Sphere::new(2, 10.0));
    let result = optimize(&Pso::new(), &problem, &[20.0, 0.7, 1.5, 1.5], 11, 2_000);
    assert!(result.feasible);
    assert!(result.parameters[0] + result.parameters[1] >= 1.0);
    assert!(result.fitness > 0.5 - 1e-9 && result.fitness < 0.6, "fitness = {}", result.fitness);
}

#[test]
fn test_mol_default_parameters() {
    let problem = Sphere::new(3, 10.0);
    let mol = Mol::new();
    let result = optimize(&mol, &problem, mol.parameter_space().defaults(), 2, 3_000);
    assert_eq!(result.iterations, 3_000);
    assert!(result.fitness.is_finite());
}

#[test]
fn test_constrained_trace_is_monotone() {
    let problem = FarCorner(Sphere::new(2, 10.0));
    for seed in 0..20 {
        let mut rng = Random::new(MersenneTwister::with_seed(seed)).unwrap();
        let mut condition = IterationBudget::new(500);
        let mut trace = FitnessTrace::new(1);
        let result = {
            let mut ctx = Context::new(&problem, &mut rng, &mut condition).with_trace(&mut trace);
            Pso::new().optimize(&[10.0, 0.7, 1.5, 1.5], &mut ctx).unwrap()
        };

        let points = trace.points();
        assert_eq!(points.len(), 500);
        assert!(
            points.windows(2).all(|w| w[1].1 <= w[0].1),
            "seed {}: fitness rose in the trace",
            seed
        );
        if result.feasible {
            assert_eq!(trace.last_fitness(), Some(result.fitness));
        } else {
            assert_eq!(trace.last_fitness(), Some(f64::INFINITY));
        }
    }
}

#[test]
fn test_threshold_ignores_infeasible_fitness() {
    let problem = FarCorner(Sphere::new(2, 10.0));
    for seed in 0..20 {
        let mut rng = Random::new(MersenneTwister::with_seed(seed)).unwrap();
        // No feasible point is below 72, so the threshold can never end the run.
        let mut condition = FitnessThreshold::new(50.0, 1_000);
        let mut ctx = Context::new(&problem, &mut rng, &mut condition);
        let result = Pso::new().optimize(&[10.0, 0.7, 1.5, 1.5], &mut ctx).unwrap();
        assert_eq!(result.iterations, 1_000, "seed {} stopped early", seed);
    }
}
