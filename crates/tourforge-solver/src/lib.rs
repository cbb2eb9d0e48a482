//! TourForge Solver Engine
//!
//! The hard-fixing matheuristic driver and its collaborators:
//! - Oracle trait for the external MIP solver
//! - Search scope (incumbent, seeded RNG, wall clock)
//! - Probability schedule for the adaptive variant
//! - Initial-tour construction
//! - The hard-fixing controller itself

pub mod hardfix;
pub mod initial;
pub mod oracle;
pub mod schedule;
pub mod scope;

#[cfg(test)]
mod test_utils;

pub use hardfix::{FixingRecord, HardFixingSolver, SearchError, Solution};
pub use initial::{InitialTour, NearestNeighbor};
pub use oracle::{BoundKind, Oracle, OracleError};
pub use schedule::ProbabilitySchedule;
pub use scope::{Incumbent, SearchScope};
