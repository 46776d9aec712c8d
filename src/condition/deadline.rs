use std::time::{Duration, Instant};

use super::RunCondition;

/// Stops once a wall-clock budget has elapsed since the run started.
#[derive(Debug, Clone)]
pub struct Deadline {
    limit: Duration,
    started: Option<Instant>,
}

impl Deadline {
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            started: None,
        }
    }
}

impl RunCondition for Deadline {
    fn reset(&mut self) {
        self.started = Some(Instant::now());
    }

    fn should_continue(&mut self, _iterations: usize, _fitness: f64) -> bool {
        let started = *self.started.get_or_insert_with(Instant::now);
        started.elapsed() < self.limit
    }
}

/// Continues only while every member condition continues.
///
/// Every member is consulted on every call, so stateful members keep their
/// bookkeeping current even after another member has voted to stop.
#[derive(Default)]
pub struct AllOf {
    conditions: Vec<Box<dyn RunCondition>>,
}

impl AllOf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, condition: impl RunCondition + 'static) -> Self {
        self.conditions.push(Box::new(condition));
        self
    }
}

impl RunCondition for AllOf {
    fn reset(&mut self) {
        self.conditions.iter_mut().for_each(|c| c.reset());
    }

    fn should_continue(&mut self, iterations: usize, fitness: f64) -> bool {
        self.conditions
            .iter_mut()
            .fold(true, |all, c| c.should_continue(iterations, fitness) && all)
    }
}
