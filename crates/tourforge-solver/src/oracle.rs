//! The combinatorial-optimization oracle interface.
//!
//! The controller never sees the oracle's native handles; it drives solving
//! purely through this trait, which makes the search testable against a
//! scripted fake. Every operation may fail, and every failure is recoverable
//! for the controller: a failed round is logged and treated as producing no
//! improvement.

use thiserror::Error;

/// Errors reported by an oracle implementation.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The solve call itself failed or found no assignment.
    #[error("Solve failed: {0}")]
    Solve(String),

    /// No candidate assignment is available to retrieve.
    #[error("No solution available: {0}")]
    NoSolution(String),

    /// A bound change was rejected.
    #[error("Bound change rejected for variable {index}: {reason}")]
    BoundChange { index: usize, reason: String },

    /// The time limit was rejected.
    #[error("Time limit {0} rejected")]
    TimeLimit(f64),

    /// A warm start was rejected.
    #[error("Warm start rejected: {0}")]
    WarmStart(String),
}

/// Which bound of a binary decision variable is altered.
///
/// Forcing a variable selects its edge (lower bound to 1); forbidding
/// deselects it (upper bound to 0). [`BoundKind::default_value`] is the
/// bound's problem-default, used to restore the model at round end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundKind {
    Lower,
    Upper,
}

impl BoundKind {
    /// The instance-default value of this bound for a binary variable.
    pub fn default_value(self) -> f64 {
        match self {
            BoundKind::Lower => 0.0,
            BoundKind::Upper => 1.0,
        }
    }
}

/// An external solver capable of optimizing the bounded model and returning
/// an assignment and objective value.
///
/// Implementations wrap a real MIP solver; the model itself (degree
/// constraints, subtour elimination and so on) is built before the oracle is
/// handed to the controller and is not part of this interface.
pub trait Oracle {
    /// Number of decision variables in the model. For the symmetric
    /// formulation over `n` nodes this is `n(n-1)/2`.
    fn num_variables(&self) -> usize;

    /// Caps the next solve at the given wall-clock seconds.
    fn set_time_limit(&mut self, seconds: f64) -> Result<(), OracleError>;

    /// Runs the solver until optimality or the time limit.
    fn solve(&mut self) -> Result<(), OracleError>;

    /// Copies the current assignment into `buffer`, which must be
    /// `num_variables()` long. On error the buffer contents are unspecified.
    fn fetch_solution(&mut self, buffer: &mut [f64]) -> Result<(), OracleError>;

    /// Objective value of the current assignment.
    fn objective_value(&self) -> Result<f64, OracleError>;

    /// Changes one bound of one variable.
    fn change_bound(&mut self, index: usize, kind: BoundKind, value: f64)
        -> Result<(), OracleError>;

    /// Registers a known feasible assignment as a starting point.
    fn add_warm_start(&mut self, indices: &[usize], values: &[f64]) -> Result<(), OracleError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_defaults() {
        assert_eq!(BoundKind::Lower.default_value(), 0.0);
        assert_eq!(BoundKind::Upper.default_value(), 1.0);
    }
}
