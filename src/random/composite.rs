//! Engines built from other engines.
//!
//! [`Sum`] adds the outputs of several sub-engines modulo 2^32, which is only
//! unbiased when each sub-engine covers (nearly) the full 32-bit range.
//! [`Switcher`] forwards each draw to a sub-engine picked by a selector engine.
//! Both split a reseed vector across their parts in order.

use super::{distributions, Engine};
use crate::error::{Result, SwarmError};

fn ensure_ready(engines: &[Box<dyn Engine>]) -> Result<()> {
    match engines.iter().find(|e| !e.is_ready()) {
        Some(engine) => Err(SwarmError::NotSeeded(engine.name().to_string())),
        None => Ok(()),
    }
}

fn reseed_in_order<'e>(
    name: &'static str,
    expected: usize,
    parts: impl Iterator<Item = &'e mut Box<dyn Engine>>,
    words: &[u32],
) -> Result<()> {
    super::check_seed_length(name, expected, words.len())?;

    let mut offset = 0;
    for part in parts {
        let len = part.seed_length();
        part.reseed(&words[offset..offset + len])?;
        offset += len;
    }
    Ok(())
}

/// Adds the outputs of its sub-engines.
pub struct Sum {
    engines: Vec<Box<dyn Engine>>,
}

impl Sum {
    /// Creates the sum of `engines`.
    ///
    /// # Errors
    ///
    /// Returns an error if `engines` is empty, if any engine is not ready, or if
    /// any engine's range falls short of the full 32 bits.
    pub fn new(engines: Vec<Box<dyn Engine>>) -> Result<Self> {
        if engines.is_empty() {
            return Err(SwarmError::Configuration(
                "Sum requires at least one engine".to_string(),
            ));
        }
        ensure_ready(&engines)?;
        if let Some(narrow) = engines.iter().find(|e| e.max_value() < u32::MAX - 1) {
            return Err(SwarmError::Configuration(format!(
                "Sum requires full-range engines, {} only reaches {}",
                narrow.name(),
                narrow.max_value()
            )));
        }
        Ok(Self { engines })
    }
}

impl Engine for Sum {
    fn name(&self) -> &'static str {
        "sum"
    }

    fn draw(&mut self) -> u32 {
        self.engines
            .iter_mut()
            .fold(0u32, |acc, engine| acc.wrapping_add(engine.draw()))
    }

    fn max_value(&self) -> u32 {
        u32::MAX
    }

    fn seed_length(&self) -> usize {
        self.engines.iter().map(|e| e.seed_length()).sum()
    }

    fn reseed(&mut self, words: &[u32]) -> Result<()> {
        let expected = self.seed_length();
        reseed_in_order("sum", expected, self.engines.iter_mut(), words)
    }

    fn is_ready(&self) -> bool {
        self.engines.iter().all(|e| e.is_ready())
    }
}

/// Delegates each draw to a sub-engine chosen by a selector engine.
pub struct Switcher {
    selector: Box<dyn Engine>,
    engines: Vec<Box<dyn Engine>>,
}

impl Switcher {
    /// Creates a switcher over `engines` driven by `selector`.
    ///
    /// # Errors
    ///
    /// Returns an error if `engines` is empty, if any engine is not ready, or if
    /// the sub-engines disagree on `max_value()`.
    pub fn new(selector: Box<dyn Engine>, engines: Vec<Box<dyn Engine>>) -> Result<Self> {
        let first = engines.first().ok_or_else(|| {
            SwarmError::Configuration("Switcher requires at least one engine".to_string())
        })?;
        let max_value = first.max_value();
        if engines.iter().any(|e| e.max_value() != max_value) {
            return Err(SwarmError::Configuration(
                "Switcher engines must share the same range".to_string(),
            ));
        }
        if !selector.is_ready() {
            return Err(SwarmError::NotSeeded(selector.name().to_string()));
        }
        ensure_ready(&engines)?;
        Ok(Self { selector, engines })
    }
}

impl Engine for Switcher {
    fn name(&self) -> &'static str {
        "switcher"
    }

    fn draw(&mut self) -> u32 {
        let n = self.engines.len();
        let choice = distributions::index(&mut self.selector, n).unwrap_or(0);
        self.engines[choice].draw()
    }

    fn max_value(&self) -> u32 {
        self.engines[0].max_value()
    }

    fn seed_length(&self) -> usize {
        self.selector.seed_length() + self.engines.iter().map(|e| e.seed_length()).sum::<usize>()
    }

    fn reseed(&mut self, words: &[u32]) -> Result<()> {
        let expected = self.seed_length();
        let parts = std::iter::once(&mut self.selector).chain(self.engines.iter_mut());
        reseed_in_order("switcher", expected, parts, words)
    }

    fn is_ready(&self) -> bool {
        self.selector.is_ready() && self.engines.iter().all(|e| e.is_ready())
    }
}
