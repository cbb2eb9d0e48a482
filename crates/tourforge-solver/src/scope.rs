//! Search-level scope.
//!
//! Owns the state that persists across rounds: the incumbent, the seeded
//! RNG, the wall clock against the time budget and the round counter. The
//! incumbent is mutated only on strict improvement, so its objective is
//! monotonically non-increasing for the life of the search.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Best objective observed plus the corresponding full variable vector.
#[derive(Debug, Clone)]
pub struct Incumbent {
    pub objective: f64,
    pub selection: Vec<f64>,
}

impl Incumbent {
    pub fn new(objective: f64, selection: Vec<f64>) -> Self {
        Self {
            objective,
            selection,
        }
    }
}

/// Top-level scope for one hard-fixing search.
#[derive(Debug)]
pub struct SearchScope {
    budget: Duration,
    rng: ChaCha8Rng,
    incumbent: Incumbent,
    start_time: Option<Instant>,
    round: u64,
}

impl SearchScope {
    /// Creates a scope seeded explicitly (reproducible) or from the OS.
    pub fn new(budget: Duration, seed: Option<u64>, incumbent: Incumbent) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self {
            budget,
            rng,
            incumbent,
            start_time: None,
            round: 0,
        }
    }

    /// Starts the wall clock. Called once, at the end of INIT.
    pub fn start_solving(&mut self) {
        self.start_time = Some(Instant::now());
        self.round = 0;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or(Duration::ZERO)
    }

    /// Time left in the budget, saturating at zero.
    pub fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.elapsed())
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Completed round count.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Opens a new round and returns its 1-based number.
    pub fn begin_round(&mut self) -> u64 {
        self.round += 1;
        self.round
    }

    pub fn incumbent(&self) -> &Incumbent {
        &self.incumbent
    }

    /// Replaces the incumbent if `objective` strictly improves it.
    /// Returns whether the replacement happened.
    pub fn record_if_better(&mut self, objective: f64, selection: &[f64]) -> bool {
        if objective < self.incumbent.objective {
            self.incumbent.objective = objective;
            self.incumbent.selection.clear();
            self.incumbent.selection.extend_from_slice(selection);
            true
        } else {
            false
        }
    }

    pub fn into_incumbent(self) -> Incumbent {
        self.incumbent
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
