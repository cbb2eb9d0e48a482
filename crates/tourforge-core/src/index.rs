//! Edge-index codec for the flat decision-variable space.
//!
//! The symmetric formulation has one binary variable per unordered node pair,
//! packed into a dense array of length `n(n-1)/2`. [`undirected`] is the
//! bijection every other component relies on for O(1) variable addressing.

use crate::error::{Result, TourForgeError};

/// Number of decision variables in the symmetric formulation: `n(n-1)/2`.
pub fn num_undirected(n: usize) -> usize {
    n * (n - 1) / 2
}

/// Canonical dense index of the unordered pair `(i, j)` over `n` nodes.
///
/// Symmetric: `undirected(i, j, n) == undirected(j, i, n)`. Internally the
/// pair is reduced to `i < j` and the offset accounts for all pairs in rows
/// before `i`, so the image over all valid pairs is exactly
/// `0..n(n-1)/2` with no gaps.
///
/// # Errors
///
/// Returns [`TourForgeError::InvalidEdge`] when `i == j` and
/// [`TourForgeError::NodeOutOfRange`] when either index is `>= n`.
///
/// # Example
///
/// ```
/// use tourforge_core::index::undirected;
///
/// assert_eq!(undirected(0, 1, 5).unwrap(), 0);
/// assert_eq!(undirected(3, 1, 5).unwrap(), undirected(1, 3, 5).unwrap());
/// ```
pub fn undirected(i: usize, j: usize, n: usize) -> Result<usize> {
    if i == j {
        return Err(TourForgeError::InvalidEdge(i));
    }
    check_range(i, n)?;
    check_range(j, n)?;
    let (i, j) = if i < j { (i, j) } else { (j, i) };
    Ok(i * n + j - (i + 1) * (i + 2) / 2)
}

/// Dense index of the ordered pair `(i, j)`: `i*n + j`.
///
/// Used only by asymmetric formulations where `(i, j)` and `(j, i)` are
/// distinct variables. No canonicalization.
pub fn directed(i: usize, j: usize, n: usize) -> Result<usize> {
    check_range(i, n)?;
    check_range(j, n)?;
    Ok(i * n + j)
}

fn check_range(index: usize, num_nodes: usize) -> Result<()> {
    if index >= num_nodes {
        return Err(TourForgeError::NodeOutOfRange { index, num_nodes });
    }
    Ok(())
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod tests;
