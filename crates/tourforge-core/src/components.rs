//! Cycle decomposition of a candidate edge vector.
//!
//! Given a 0/1 (or near-0/1) vector over the symmetric variable space, the
//! decomposer splits the implied graph into disjoint simple cycles
//! ("components"). A valid tour is exactly one component spanning all nodes;
//! anything else is a set of subtours. The controller also uses the
//! decomposer on the sparse vector of *fixed* variables to learn which edges
//! would prematurely close an illegal subtour among them.

use smallvec::SmallVec;

use crate::error::{Result, TourForgeError};
use crate::index::{num_undirected, undirected};
use crate::tour::Edge;

/// Magnitude above which a variable counts as selected. Oracle assignments
/// are only near-integral, so exact comparison against 1.0 is wrong.
pub const EPS: f64 = 1e-5;

/// Result of decomposing a candidate vector into cycles.
#[derive(Debug, Clone)]
pub struct ComponentTable {
    /// Successor of each node in its cycle. An isolated node is its own
    /// successor.
    pub successor: Vec<usize>,
    /// Component id per node; ids start at 1 and are assigned in increasing
    /// order of first-visited node.
    pub component_id: Vec<usize>,
    /// Total number of components found.
    pub num_components: usize,
    /// The closing edge (opening node, final node of the walk) of every
    /// component with more than two members that does not already span all
    /// nodes. Forcing these selected would close an illegal subtour; a
    /// component covering every node is a complete tour, not a subtour.
    pub closing_edges: SmallVec<[Edge; 8]>,
}

/// Decomposes a candidate vector over `n` nodes into disjoint cycles.
///
/// Nodes are scanned in index order. Each unassigned node opens a new
/// component and greedily walks: from the current node, the first unassigned
/// neighbor whose edge is selected (magnitude `>= EPS`) becomes its
/// successor. When no unassigned neighbor remains, the last node's successor
/// is set back to the opener, closing the cycle. Degenerate 1-member
/// components (isolated nodes) and 2-member pair components are expected and
/// never contribute closing edges, and neither does a component spanning
/// every node (a complete tour).
///
/// O(n²): each step scans the remaining unassigned nodes. The decomposer
/// runs once per round, not once per oracle node.
///
/// # Errors
///
/// Returns [`TourForgeError::SelectionLength`] when `x` is not `n(n-1)/2`
/// long.
pub fn decompose(x: &[f64], n: usize) -> Result<ComponentTable> {
    let expected = num_undirected(n);
    if x.len() != expected {
        return Err(TourForgeError::SelectionLength {
            got: x.len(),
            expected,
        });
    }

    // 0 = unassigned; real ids start at 1.
    let mut component_id = vec![0; n];
    let mut successor = vec![0; n];
    let mut num_components = 0;
    let mut closing_edges = SmallVec::new();

    for opener in 0..n {
        if component_id[opener] != 0 {
            continue;
        }
        num_components += 1;
        let mut current = opener;
        let mut members = 1usize;
        component_id[current] = num_components;

        'walk: loop {
            for j in 0..n {
                if j == current || component_id[j] != 0 {
                    continue;
                }
                if x[undirected(current, j, n)?].abs() >= EPS {
                    successor[current] = j;
                    component_id[j] = num_components;
                    current = j;
                    members += 1;
                    continue 'walk;
                }
            }
            break;
        }

        // Last arc closes the cycle back to the opener.
        successor[current] = opener;
        if members > 2 && members < n {
            closing_edges.push(Edge::new(opener, current));
        }
    }

    Ok(ComponentTable {
        successor,
        component_id,
        num_components,
        closing_edges,
    })
}

#[cfg(test)]
#[path = "components_tests.rs"]
mod tests;
