//! Test utilities for tourforge-solver
//!
//! Provides a scripted fake oracle so the controller can be exercised
//! without a real MIP solver behind it.

use std::collections::{HashMap, VecDeque};

use crate::oracle::{BoundKind, Oracle, OracleError};

/// What one `solve()` call should produce.
#[derive(Debug, Clone)]
pub struct ScriptedRound {
    pub solution: Vec<f64>,
    pub objective: f64,
    pub fail: bool,
}

impl ScriptedRound {
    /// A successful round returning the given assignment and objective.
    pub fn ok(solution: Vec<f64>, objective: f64) -> Self {
        Self {
            solution,
            objective,
            fail: false,
        }
    }

    /// A round whose solve call fails.
    pub fn failing() -> Self {
        Self {
            solution: Vec::new(),
            objective: f64::INFINITY,
            fail: true,
        }
    }
}

/// Scripted oracle that tracks every bound change and the set of bounds
/// currently deviating from their instance defaults.
#[derive(Debug, Default)]
pub struct FakeOracle {
    num_vars: usize,
    script: VecDeque<ScriptedRound>,
    current: Option<ScriptedRound>,
    /// Every `change_bound` call in order: (index, kind, value).
    pub bound_log: Vec<(usize, BoundKind, f64)>,
    overrides: HashMap<(usize, BoundKind), f64>,
    /// Every time limit set, one per attempted round.
    pub time_limits: Vec<f64>,
    pub warm_starts: usize,
    pub solve_calls: usize,
    /// When set, every bound change is rejected.
    pub reject_bounds: bool,
}

impl FakeOracle {
    pub fn new(num_vars: usize) -> Self {
        Self {
            num_vars,
            ..Default::default()
        }
    }

    pub fn push_round(&mut self, round: ScriptedRound) {
        self.script.push_back(round);
    }

    /// Number of bounds currently away from their instance default. Zero
    /// after a well-formed round: no bound leaks across rounds.
    pub fn live_override_count(&self) -> usize {
        self.overrides.len()
    }
}

impl Oracle for FakeOracle {
    fn num_variables(&self) -> usize {
        self.num_vars
    }

    fn set_time_limit(&mut self, seconds: f64) -> Result<(), OracleError> {
        self.time_limits.push(seconds);
        Ok(())
    }

    fn solve(&mut self) -> Result<(), OracleError> {
        self.solve_calls += 1;
        match self.script.pop_front() {
            None => {
                self.current = None;
                Err(OracleError::Solve("script exhausted".into()))
            }
            Some(round) if round.fail => {
                self.current = None;
                Err(OracleError::Solve("scripted failure".into()))
            }
            Some(round) => {
                self.current = Some(round);
                Ok(())
            }
        }
    }

    fn fetch_solution(&mut self, buffer: &mut [f64]) -> Result<(), OracleError> {
        match &self.current {
            Some(round) => {
                buffer.copy_from_slice(&round.solution);
                Ok(())
            }
            None => Err(OracleError::NoSolution("no solved round".into())),
        }
    }

    fn objective_value(&self) -> Result<f64, OracleError> {
        match &self.current {
            Some(round) => Ok(round.objective),
            None => Err(OracleError::NoSolution("no solved round".into())),
        }
    }

    fn change_bound(
        &mut self,
        index: usize,
        kind: BoundKind,
        value: f64,
    ) -> Result<(), OracleError> {
        if self.reject_bounds {
            return Err(OracleError::BoundChange {
                index,
                reason: "scripted rejection".into(),
            });
        }
        self.bound_log.push((index, kind, value));
        if (value - kind.default_value()).abs() < 1e-12 {
            self.overrides.remove(&(index, kind));
        } else {
            self.overrides.insert((index, kind), value);
        }
        Ok(())
    }

    fn add_warm_start(&mut self, _indices: &[usize], _values: &[f64]) -> Result<(), OracleError> {
        self.warm_starts += 1;
        Ok(())
    }
}
