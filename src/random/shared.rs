//! Thread-safe engine handle.

use std::sync::Arc;

use parking_lot::Mutex;

use super::Engine;
use crate::error::Result;

/// A cloneable handle to one engine behind a single lock.
///
/// Every draw takes the lock, so all clones consume one stream. The order in
/// which threads receive values depends on scheduling; use one seeded engine
/// per thread when runs must be reproducible.
#[derive(Debug)]
pub struct SharedEngine<E> {
    inner: Arc<Mutex<E>>,
}

impl<E> Clone for SharedEngine<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Engine> SharedEngine<E> {
    pub fn new(engine: E) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Runs `f` with exclusive access to the engine, for batches of draws that
    /// must not interleave with other threads.
    pub fn with<R>(&self, f: impl FnOnce(&mut E) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<E: Engine> Engine for SharedEngine<E> {
    fn name(&self) -> &'static str {
        self.inner.lock().name()
    }

    fn draw(&mut self) -> u32 {
        self.inner.lock().draw()
    }

    fn max_value(&self) -> u32 {
        self.inner.lock().max_value()
    }

    fn seed_length(&self) -> usize {
        self.inner.lock().seed_length()
    }

    fn reseed(&mut self, words: &[u32]) -> Result<()> {
        self.inner.lock().reseed(words)
    }

    fn is_ready(&self) -> bool {
        self.inner.lock().is_ready()
    }
}
