//! The hard-fixing matheuristic controller.
//!
//! Round after round the controller pins a random subset of the incumbent's
//! edges as mandatory, forbids the edges that would close an illegal subtour
//! among the pinned ones, hands the reduced model to the oracle under a time
//! slice, absorbs an improved incumbent if one comes back, and restores the
//! default bounds before the next round. Bounds are shared mutable state in
//! the oracle's model, so rounds are strictly sequential: a round's RESTORE
//! always completes before the next FIX starts.

use std::time::Duration;

use rand::Rng;
use thiserror::Error;
use tracing::{debug, info, warn};

use tourforge_config::{SearchConfig, StrategyConfig};
use tourforge_core::components::{decompose, EPS};
use tourforge_core::index::{num_undirected, undirected};
use tourforge_core::{Instance, Tour, TourForgeError};

use crate::initial::InitialTour;
use crate::oracle::{BoundKind, Oracle};
use crate::schedule::ProbabilitySchedule;
use crate::scope::{Incumbent, SearchScope};

/// Errors that abort the search.
///
/// Oracle-call failures never appear here; they are logged and the round is
/// treated as producing no improvement.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Configuration error: {0}")]
    Config(#[from] tourforge_config::ConfigError),

    #[error("Oracle exposes {got} variables, expected {expected} for {num_nodes} nodes")]
    VariableCount {
        got: usize,
        expected: usize,
        num_nodes: usize,
    },

    #[error("Failed to obtain a starting tour: {0}")]
    InitialTour(#[source] TourForgeError),

    #[error(transparent)]
    Core(#[from] TourForgeError),
}

/// Final output of the search: the incumbent objective and its tour.
#[derive(Debug, Clone)]
pub struct Solution {
    pub objective: f64,
    pub tour: Tour,
}

/// Every variable index whose bounds the current round altered, with which
/// bound was changed. Used solely to restore default bounds at round end;
/// lifetime is exactly one round.
#[derive(Debug, Default)]
pub struct FixingRecord {
    entries: Vec<(usize, BoundKind)>,
}

impl FixingRecord {
    pub fn record(&mut self, index: usize, kind: BoundKind) {
        self.entries.push((index, kind));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, BoundKind)> + '_ {
        self.entries.iter().copied()
    }
}

/// Round-to-round evolution of the fixing probability and the termination
/// condition. The two variants share the FIX/SOLVE/EVALUATE/RESTORE
/// skeleton and differ only here.
#[derive(Debug)]
enum FixingStrategy {
    /// Constant probability, fixed round count, evenly sliced time.
    Fixed { probability: f64, rounds: u32 },
    /// Descending schedule advanced on stagnation; each round may use the
    /// whole remaining budget.
    Adaptive {
        schedule: ProbabilitySchedule,
        min_improvement: f64,
    },
}

impl FixingStrategy {
    fn from_config(config: &StrategyConfig) -> Self {
        match config {
            StrategyConfig::Fixed {
                probability,
                rounds,
            } => FixingStrategy::Fixed {
                probability: *probability,
                rounds: *rounds,
            },
            StrategyConfig::Adaptive {
                probabilities,
                stagnation_limit,
                min_improvement,
            } => FixingStrategy::Adaptive {
                schedule: ProbabilitySchedule::new(probabilities.clone(), *stagnation_limit),
                min_improvement: *min_improvement,
            },
        }
    }

    fn probability(&self) -> f64 {
        match self {
            FixingStrategy::Fixed { probability, .. } => *probability,
            FixingStrategy::Adaptive { schedule, .. } => schedule.current(),
        }
    }

    fn finished(&self, completed_rounds: u64) -> bool {
        match self {
            FixingStrategy::Fixed { rounds, .. } => completed_rounds >= u64::from(*rounds),
            FixingStrategy::Adaptive { schedule, .. } => schedule.is_exhausted(),
        }
    }

    fn time_slice(&self, budget: Duration, remaining: Duration) -> Duration {
        match self {
            FixingStrategy::Fixed { rounds, .. } => (budget / *rounds).min(remaining),
            FixingStrategy::Adaptive { .. } => remaining,
        }
    }

    /// Feeds the round's outcome back into the adaptive schedule.
    ///
    /// The relative-improvement formula `1 - objval/objbest` assumes a
    /// positive minimization objective; for a non-positive previous best the
    /// ratio is skipped and only strict improvement counts.
    fn observe(&mut self, objective: f64, previous_best: f64, improved: bool) {
        let FixingStrategy::Adaptive {
            schedule,
            min_improvement,
        } = self
        else {
            return;
        };
        let sufficient = if previous_best > 0.0 {
            1.0 - objective / previous_best >= *min_improvement
        } else {
            improved
        };
        if sufficient {
            schedule.note_improved();
        } else {
            schedule.note_stagnated();
        }
    }

    /// A failed round produced no improvement.
    fn observe_failure(&mut self) {
        if let FixingStrategy::Adaptive { schedule, .. } = self {
            schedule.note_stagnated();
        }
    }
}

/// The matheuristic driver. Owns the oracle, the incumbent and the overall
/// stopping decision.
#[derive(Debug)]
pub struct HardFixingSolver<O: Oracle> {
    oracle: O,
    num_nodes: usize,
    config: SearchConfig,
}

impl<O: Oracle> HardFixingSolver<O> {
    /// Creates a controller over a model with one binary variable per
    /// unordered node pair.
    ///
    /// # Errors
    ///
    /// Fails fast on an invalid configuration or on an oracle whose
    /// variable count does not match the instance.
    pub fn new(oracle: O, num_nodes: usize, config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let expected = num_undirected(num_nodes);
        if oracle.num_variables() != expected {
            return Err(SearchError::VariableCount {
                got: oracle.num_variables(),
                expected,
                num_nodes,
            });
        }
        Ok(Self {
            oracle,
            num_nodes,
            config,
        })
    }

    /// Constructs the starting tour with `heuristic` and runs the search.
    /// A heuristic failure is fatal: there is no incumbent to improve.
    pub fn solve_with<H: InitialTour>(
        &mut self,
        heuristic: &mut H,
        instance: &Instance,
    ) -> Result<Solution, SearchError> {
        let initial = heuristic
            .construct(instance)
            .map_err(SearchError::InitialTour)?;
        self.solve(initial)
    }

    /// Runs the search from a given feasible tour.
    ///
    /// The incumbent is always returned, even if every round after INIT
    /// failed; worst case it equals the starting tour.
    pub fn solve(&mut self, initial: Tour) -> Result<Solution, SearchError> {
        let n = self.num_nodes;
        let num_vars = num_undirected(n);
        let mut strategy = FixingStrategy::from_config(&self.config.strategy);

        // INIT: translate the tour into the candidate vector, register it
        // as a warm start and record it as the first incumbent.
        let mut xh = initial.to_selection(n)?;
        let warm_indices: Vec<usize> = (0..num_vars).collect();
        if let Err(err) = self.oracle.add_warm_start(&warm_indices, &xh) {
            warn!("warm start rejected, continuing without it: {err}");
        }
        let mut scope = SearchScope::new(
            self.config.time_limit(),
            self.config.random_seed,
            Incumbent::new(initial.cost(), xh.clone()),
        );
        scope.start_solving();
        info!(
            "hard fixing started: {n} nodes, {num_vars} variables, budget {:?}, initial objective {}",
            scope.budget(),
            initial.cost()
        );

        let mut record = FixingRecord::default();
        let mut xfake = vec![0.0; num_vars];
        let mut candidate = vec![0.0; num_vars];

        while !strategy.finished(scope.round()) && !scope.remaining().is_zero() {
            let round = scope.begin_round();
            let probability = strategy.probability();
            debug!("round {round}: fixing probability {probability}");

            self.fix_round(probability, &xh, &mut xfake, &mut record, &mut scope)?;

            // SOLVE: cap the oracle at what is left of the budget.
            let remaining = scope.remaining();
            if remaining.is_zero() {
                self.restore_bounds(&mut record);
                break;
            }
            let slice = strategy.time_slice(scope.budget(), remaining);
            let outcome = self.run_oracle(slice.as_secs_f64(), &mut candidate);

            // EVALUATE
            match outcome {
                Some(objective) => {
                    xh.copy_from_slice(&candidate);
                    let previous_best = scope.incumbent().objective;
                    let improved = scope.record_if_better(objective, &xh);
                    if improved {
                        info!("round {round}: updated incumbent to {objective}");
                    } else {
                        debug!("round {round}: objective {objective}, no improvement");
                    }
                    strategy.observe(objective, previous_best, improved);
                }
                None => strategy.observe_failure(),
            }

            // RESTORE: the model must return to its default bounds before
            // the next subset is chosen.
            self.restore_bounds(&mut record);
        }

        let incumbent = scope.into_incumbent();
        let tour = Tour::from_selection(&incumbent.selection, n, incumbent.objective)?;
        info!("hard fixing finished with objective {}", incumbent.objective);
        Ok(Solution {
            objective: incumbent.objective,
            tour,
        })
    }

    /// FIX: force a random subset of the selected edges, then forbid the
    /// closing edges of any oversized component among the forced ones.
    ///
    /// Two passes, in this order: forbidding closing edges before all
    /// forcings are known would forbid edges that close no real subtour.
    fn fix_round(
        &mut self,
        probability: f64,
        xh: &[f64],
        xfake: &mut [f64],
        record: &mut FixingRecord,
        scope: &mut SearchScope,
    ) -> Result<(), SearchError> {
        record.clear();
        xfake.fill(0.0);

        for (index, value) in xh.iter().enumerate() {
            if value.abs() < EPS {
                continue;
            }
            if scope.rng().random::<f64>() >= probability {
                continue;
            }
            match self.oracle.change_bound(index, BoundKind::Lower, 1.0) {
                Ok(()) => {
                    record.record(index, BoundKind::Lower);
                    xfake[index] = 1.0;
                }
                // The model was not altered, so nothing to restore later.
                Err(err) => warn!("failed to force variable {index}: {err}"),
            }
        }

        let table = decompose(xfake, self.num_nodes)?;
        debug!(
            "fixed {} variables forming {} components",
            record.len(),
            table.num_components
        );
        for edge in &table.closing_edges {
            let index = undirected(edge.i, edge.j, self.num_nodes)?;
            match self.oracle.change_bound(index, BoundKind::Upper, 0.0) {
                Ok(()) => record.record(index, BoundKind::Upper),
                Err(err) => warn!("failed to forbid closing edge {index}: {err}"),
            }
        }
        Ok(())
    }

    /// One oracle invocation. Any failure yields `None`: the round is
    /// logged and treated as producing no improvement, never as fatal.
    fn run_oracle(&mut self, seconds: f64, candidate: &mut [f64]) -> Option<f64> {
        if let Err(err) = self.oracle.set_time_limit(seconds) {
            warn!("oracle rejected time limit {seconds}: {err}");
            return None;
        }
        if let Err(err) = self.oracle.solve() {
            warn!("oracle solve failed, skipping round: {err}");
            return None;
        }
        if let Err(err) = self.oracle.fetch_solution(candidate) {
            warn!("could not retrieve oracle solution: {err}");
            return None;
        }
        match self.oracle.objective_value() {
            Ok(objective) => Some(objective),
            Err(err) => {
                warn!("could not retrieve oracle objective: {err}");
                None
            }
        }
    }

    /// RESTORE: reset every altered bound to its instance default and clear
    /// the record. One pass handles both bound kinds; the record already
    /// carries which one was changed.
    fn restore_bounds(&mut self, record: &mut FixingRecord) {
        for (index, kind) in record.iter() {
            if let Err(err) = self.oracle.change_bound(index, kind, kind.default_value()) {
                warn!("failed to restore bound of variable {index}: {err}");
            }
        }
        record.clear();
    }

    /// The oracle, for inspection after the search.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn into_oracle(self) -> O {
        self.oracle
    }
}

#[cfg(test)]
#[path = "hardfix_tests.rs"]
mod tests;
