use swarmopt::{
    condition::{FitnessThreshold, IterationBudget},
    error::SwarmError,
    optimizer::{
        local::{GradientDescent, Lus, PatternSearch},
        Context, Optimizer,
    },
    problem::{FnProblem, Problem},
    random::{LEcuyer, MersenneTwister, Random, Seedable},
    Result,
};

/// Shifted sphere with an analytic gradient.
struct Shifted {
    center: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Shifted {
    fn new(center: Vec<f64>) -> Self {
        let n = center.len();
        Self {
            center,
            lower: vec![-5.0; n],
            upper: vec![5.0; n],
        }
    }
}

impl Problem for Shifted {
    fn name(&self) -> &str {
        "shifted sphere"
    }

    fn dimensionality(&self) -> usize {
        self.center.len()
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
        x.iter().zip(&self.center).map(|(v, c)| (v - c).powi(2)).sum()
    }

    fn has_gradient(&self) -> bool {
        true
    }

    fn gradient(&self, x: &[f64], v: &mut [f64]) -> Result<usize> {
        for ((g, xi), c) in v.iter_mut().zip(x).zip(&self.center) {
            *g = 2.0 * (xi - c);
        }
        Ok(1)
    }
}

#[test]
fn test_lus_converges() {
    let problem = Shifted::new(vec![1.0, -2.0, 0.5]);
    let mut rng = Random::new(MersenneTwister::with_seed(42)).unwrap();
    let mut condition = IterationBudget::new(2_000);
    let mut ctx = Context::new(&problem, &mut rng, &mut condition);

    let lus = Lus::new();
    let result = lus.optimize(lus.parameter_space().defaults(), &mut ctx).unwrap();
    assert_eq!(result.iterations, 2_000);
    assert!(result.fitness < 1e-6, "fitness = {}", result.fitness);
}

#[test]
fn test_lus_stops_at_threshold() {
    let problem = Shifted::new(vec![0.0, 0.0]);
    let mut rng = Random::new(MersenneTwister::with_seed(1)).unwrap();
    let mut condition = FitnessThreshold::new(1e-3, 100_000);
    let mut ctx = Context::new(&problem, &mut rng, &mut condition);

    let result = Lus::new().optimize(&[3.0], &mut ctx).unwrap();
    assert!(result.fitness <= 1e-3);
    assert!(result.iterations < 100_000);
}

#[test]
fn test_pattern_search_converges() {
    let problem = Shifted::new(vec![2.0, -1.0, 3.0]);
    let mut rng = Random::new(LEcuyer::with_seed(9)).unwrap();
    let mut condition = IterationBudget::new(1_500);
    let mut ctx = Context::new(&problem, &mut rng, &mut condition);

    let result = PatternSearch::new().optimize(&[], &mut ctx).unwrap();
    assert!(result.fitness < 1e-4, "fitness = {}", result.fitness);
}

#[test]
fn test_gradient_descent_counts_gradient_cost() {
    let problem = Shifted::new(vec![-1.0, 1.0]);
    let mut rng = Random::new(MersenneTwister::with_seed(2)).unwrap();
    // One initial evaluation, then one gradient and one evaluation per step.
    let mut condition = IterationBudget::new(1 + 2 * 400);
    let mut ctx = Context::new(&problem, &mut rng, &mut condition);

    let result = GradientDescent::new().optimize(&[0.05], &mut ctx).unwrap();
    assert_eq!(result.iterations, 801);
    assert!(result.fitness < 0.05 * 0.05, "fitness = {}", result.fitness);
}

#[test]
fn test_gradient_descent_needs_gradient() {
    let problem = FnProblem::new("flat", vec![0.0; 2], vec![1.0; 2], |_: &[f64]| 1.0).unwrap();
    let mut rng = Random::new(MersenneTwister::with_seed(2)).unwrap();
    let mut condition = IterationBudget::new(100);
    let mut ctx = Context::new(&problem, &mut rng, &mut condition);
    assert!(matches!(
        GradientDescent::new().optimize(&[0.05], &mut ctx),
        Err(SwarmError::Unsupported(_))
    ));
}

#[test]
fn test_fitness_limit_is_advisory() {
    let problem = Shifted::new(vec![0.5]);
    let run = |limited: bool| {
        let mut rng = Random::new(MersenneTwister::with_seed(3)).unwrap();
        let mut condition = IterationBudget::new(200);
        let mut ctx = Context::new(&problem, &mut rng, &mut condition);
        let lus = Lus::new();
        if limited {
            lus.optimize_with_limit(&[3.0], 1e-9, &mut ctx).unwrap()
        } else {
            lus.optimize(&[3.0], &mut ctx).unwrap()
        }
    };
    assert_eq!(run(true), run(false));
}
