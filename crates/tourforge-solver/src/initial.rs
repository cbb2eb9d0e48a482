//! Initial-tour construction.
//!
//! The controller cannot start without a feasible incumbent, so any failure
//! here is fatal to the search. Implementations return an ordered sequence
//! of edges covering every node exactly once, together with the tour cost.

use tourforge_core::{Instance, Result, Tour, TourForgeError};

/// Produces a starting Hamiltonian cycle for the search.
pub trait InitialTour {
    fn construct(&mut self, instance: &Instance) -> Result<Tour>;
}

/// Greedy nearest-neighbor construction: from the start node, repeatedly hop
/// to the closest unvisited node, then close the cycle.
#[derive(Debug, Clone, Default)]
pub struct NearestNeighbor {
    start: usize,
}

impl NearestNeighbor {
    pub fn new(start: usize) -> Self {
        Self { start }
    }
}

impl InitialTour for NearestNeighbor {
    fn construct(&mut self, instance: &Instance) -> Result<Tour> {
        let n = instance.len();
        if n < 2 {
            return Err(TourForgeError::TooFewNodes(n));
        }
        if self.start >= n {
            return Err(TourForgeError::NodeOutOfRange {
                index: self.start,
                num_nodes: n,
            });
        }

        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);
        let mut current = self.start;
        let mut cost = 0.0;
        visited[current] = true;
        order.push(current);

        for _ in 1..n {
            let mut nearest = None;
            for candidate in 0..n {
                if visited[candidate] {
                    continue;
                }
                let dist = instance.edge_cost(current, candidate)?;
                match nearest {
                    Some((_, best)) if dist >= best => {}
                    _ => nearest = Some((candidate, dist)),
                }
            }
            // n >= 2 and one unvisited node remains per iteration
            let (next, dist) = nearest.ok_or(TourForgeError::TooFewNodes(n))?;
            visited[next] = true;
            order.push(next);
            cost += dist;
            current = next;
        }

        cost += instance.edge_cost(current, self.start)?;
        Tour::from_order(&order, cost)
    }
}
