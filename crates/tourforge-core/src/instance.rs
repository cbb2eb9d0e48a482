//! Problem-instance carrier.
//!
//! Nodes are identified by their index in `[0, n)` and carry 2-D coordinates.
//! The coordinates are consumed only by initial-tour construction; the search
//! engine itself addresses nodes purely by index.

use crate::error::{Result, TourForgeError};

/// A node's 2-D coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A TSP instance: one point per node.
#[derive(Debug, Clone)]
pub struct Instance {
    points: Vec<Point>,
}

impl Instance {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, node: usize) -> Result<Point> {
        self.points
            .get(node)
            .copied()
            .ok_or(TourForgeError::NodeOutOfRange {
                index: node,
                num_nodes: self.points.len(),
            })
    }

    /// Euclidean cost of the edge between two nodes.
    pub fn edge_cost(&self, i: usize, j: usize) -> Result<f64> {
        let a = self.point(i)?;
        let b = self.point(j)?;
        Ok(((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt())
    }
}
