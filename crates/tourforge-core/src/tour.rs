//! Tours in successor representation.
//!
//! An [`Edge`] is a directed arc `(i, j)` even though the underlying variable
//! space is undirected: the solution of a symmetric formulation is stored as
//! "the successor of node `i` is node `j`", which is what warm starts and
//! incumbent reconstruction consume.

use crate::components::decompose;
use crate::error::{Result, TourForgeError};
use crate::index::{num_undirected, undirected};

/// A selected tour arc in successor representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub i: usize,
    pub j: usize,
}

impl Edge {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
}

/// A feasible tour: a Hamiltonian cycle plus its objective value.
#[derive(Debug, Clone)]
pub struct Tour {
    edges: Vec<Edge>,
    cost: f64,
}

impl Tour {
    /// Builds a tour from successor edges, validating that they form a single
    /// Hamiltonian cycle.
    pub fn new(edges: Vec<Edge>, cost: f64) -> Result<Self> {
        let n = edges.len();
        if n < 2 {
            return Err(TourForgeError::TooFewNodes(n));
        }
        let mut successor = vec![usize::MAX; n];
        for edge in &edges {
            if edge.i >= n || edge.j >= n {
                return Err(TourForgeError::NotATour(format!(
                    "edge ({}, {}) references a node outside [0, {n})",
                    edge.i, edge.j
                )));
            }
            if edge.i == edge.j {
                return Err(TourForgeError::InvalidEdge(edge.i));
            }
            if successor[edge.i] != usize::MAX {
                return Err(TourForgeError::NotATour(format!(
                    "node {} has two successors",
                    edge.i
                )));
            }
            successor[edge.i] = edge.j;
        }
        // Every node has a successor; follow the cycle and require it to
        // visit all n nodes before returning to the start.
        let mut current = 0;
        for _ in 0..n - 1 {
            current = successor[current];
            if current == 0 {
                return Err(TourForgeError::NotATour(
                    "cycle closes before visiting every node".into(),
                ));
            }
        }
        if successor[current] != 0 {
            return Err(TourForgeError::NotATour(
                "successor walk does not close the cycle".into(),
            ));
        }
        Ok(Self { edges, cost })
    }

    /// Builds a tour from a visiting order, e.g. the output of a
    /// construction heuristic.
    pub fn from_order(order: &[usize], cost: f64) -> Result<Self> {
        let n = order.len();
        let edges = (0..n)
            .map(|k| Edge::new(order[k], order[(k + 1) % n]))
            .collect();
        Self::new(edges, cost)
    }

    /// Rebuilds a tour from a candidate vector that encodes a single cycle
    /// over all `n` nodes.
    pub fn from_selection(x: &[f64], n: usize, cost: f64) -> Result<Self> {
        let table = decompose(x, n)?;
        if table.num_components != 1 {
            return Err(TourForgeError::NotATour(format!(
                "selection decomposes into {} components",
                table.num_components
            )));
        }
        let edges = (0..n).map(|i| Edge::new(i, table.successor[i])).collect();
        Self::new(edges, cost)
    }

    /// Translates the tour into a dense 0/1 candidate vector of length
    /// `n(n-1)/2`, marking each tour edge's undirected index as selected.
    pub fn to_selection(&self, n: usize) -> Result<Vec<f64>> {
        if n != self.edges.len() {
            return Err(TourForgeError::SelectionLength {
                got: self.edges.len(),
                expected: n,
            });
        }
        let mut x = vec![0.0; num_undirected(n)];
        for edge in &self.edges {
            x[undirected(edge.i, edge.j, n)?] = 1.0;
        }
        Ok(x)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of nodes (equal to the number of edges in a cycle).
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
#[path = "tour_tests.rs"]
mod tests;
