//! Error types for TourForge

use thiserror::Error;

/// Main error type for TourForge operations
#[derive(Debug, Error)]
pub enum TourForgeError {
    /// An edge references the same node twice
    #[error("Invalid edge: node {0} paired with itself")]
    InvalidEdge(usize),

    /// A node index is outside the instance
    #[error("Node index {index} out of range for {num_nodes} nodes")]
    NodeOutOfRange { index: usize, num_nodes: usize },

    /// A candidate vector has the wrong length for the instance
    #[error("Selection vector has length {got}, expected {expected}")]
    SelectionLength { got: usize, expected: usize },

    /// An edge set does not form a single Hamiltonian cycle
    #[error("Edge set is not a Hamiltonian cycle: {0}")]
    NotATour(String),

    /// The instance is too small to build a tour over
    #[error("Instance has {0} nodes, need at least 2")]
    TooFewNodes(usize),

    /// Error in search configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for TourForge operations
pub type Result<T> = std::result::Result<T, TourForgeError>;
