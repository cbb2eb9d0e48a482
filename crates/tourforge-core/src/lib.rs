//! TourForge Core - Core types for the TSP matheuristic
//!
//! This crate provides the building blocks shared by the search engine:
//! - Symmetric (and directed) edge-index codec for the flat variable space
//! - Instance and tour types in successor representation
//! - Cycle decomposition of a candidate 0/1 edge vector

pub mod components;
pub mod error;
pub mod index;
pub mod instance;
pub mod tour;

pub use components::{decompose, ComponentTable, EPS};
pub use error::{Result, TourForgeError};
pub use index::{directed, num_undirected, undirected};
pub use instance::{Instance, Point};
pub use tour::{Edge, Tour};
