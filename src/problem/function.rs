use super::Problem;
use crate::error::{ensure_len, Result, SwarmError};

/// A [`Problem`] built from a closure and a set of bounds.
///
/// ```rust
/// use swarmopt::problem::{FnProblem, Problem};
///
/// let problem = FnProblem::new("shifted", vec![-5.0; 2], vec![5.0; 2], |x: &[f64]| {
///     (x[0] - 1.0).powi(2) + (x[1] + 2.0).powi(2)
/// })
/// .unwrap()
/// .with_init_bounds(vec![0.0; 2], vec![1.0; 2])
/// .unwrap()
/// .with_acceptable_fitness(1e-6);
///
/// assert_eq!(problem.lower_init(), &[0.0, 0.0]);
/// assert_eq!(problem.acceptable_fitness(), 1e-6);
/// ```
pub struct FnProblem<F> {
    name: String,
    lower: Vec<f64>,
    upper: Vec<f64>,
    lower_init: Option<Vec<f64>>,
    upper_init: Option<Vec<f64>>,
    min_fitness: f64,
    acceptable_fitness: Option<f64>,
    function: F,
}

impl<F> std::fmt::Debug for FnProblem<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnProblem")
            .field("name", &self.name)
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .finish_non_exhaustive()
    }
}

impl<F> FnProblem<F>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    /// Creates a problem over the box `[lower, upper]`. The minimum fitness
    /// defaults to zero.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the bounds differ in length and
    /// `InvalidArgument` if they are empty or inverted.
    pub fn new(name: impl Into<String>, lower: Vec<f64>, upper: Vec<f64>, function: F) -> Result<Self> {
        check_box(&lower, &upper)?;
        Ok(Self {
            name: name.into(),
            lower,
            upper,
            lower_init: None,
            upper_init: None,
            min_fitness: 0.0,
            acceptable_fitness: None,
            function,
        })
    }

    /// Restricts initial positions to `[lower, upper]`.
    pub fn with_init_bounds(mut self, lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        check_box(&lower, &upper)?;
        ensure_len(self.lower.len(), lower.len())?;
        self.lower_init = Some(lower);
        self.upper_init = Some(upper);
        Ok(self)
    }

    pub fn with_min_fitness(mut self, value: f64) -> Self {
        self.min_fitness = value;
        self
    }

    pub fn with_acceptable_fitness(mut self, value: f64) -> Self {
        self.acceptable_fitness = Some(value);
        self
    }
}

fn check_box(lower: &[f64], upper: &[f64]) -> Result<()> {
    ensure_len(lower.len(), upper.len())?;
    if lower.is_empty() {
        return Err(SwarmError::InvalidArgument(
            "bounds must have at least one dimension".to_string(),
        ));
    }
    if lower.iter().zip(upper).any(|(lo, hi)| lo > hi) {
        return Err(SwarmError::InvalidArgument(
            "lower bound exceeds upper bound".to_string(),
        ));
    }
    Ok(())
}

impl<F> Problem for FnProblem<F>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    fn name(&self) -> &str {
        &self.name
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

    fn lower_init(&self) -> &[f64] {
        self.lower_init.as_deref().unwrap_or(&self.lower)
    }

    fn upper_init(&self) -> &[f64] {
        self.upper_init.as_deref().unwrap_or(&self.upper)
    }

    fn min_fitness(&self) -> f64 {
        self.min_fitness
    }

    fn acceptable_fitness(&self) -> f64 {
        self.acceptable_fitness.unwrap_or(self.min_fitness)
    }

    fn fitness(&self, x: &[f64]) -> f64 {
        (self.function)(x)
    }
}
