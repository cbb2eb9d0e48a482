//! Tests for the edge-index codec.

use std::collections::HashSet;

use super::*;
use crate::error::TourForgeError;

#[test]
fn test_undirected_symmetric() {
    for n in 2..12 {
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                assert_eq!(
                    undirected(i, j, n).unwrap(),
                    undirected(j, i, n).unwrap(),
                    "encode({i},{j},{n}) not symmetric"
                );
            }
        }
    }
}

#[test]
fn test_undirected_bijection() {
    for n in 2..12 {
        let mut seen = HashSet::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let index = undirected(i, j, n).unwrap();
                assert!(index < num_undirected(n));
                assert!(seen.insert(index), "collision at ({i},{j}) for n={n}");
            }
        }
        // Image is exactly {0, .., n(n-1)/2 - 1}
        assert_eq!(seen.len(), num_undirected(n));
    }
}

#[test]
fn test_undirected_first_row_is_contiguous() {
    assert_eq!(undirected(0, 1, 5).unwrap(), 0);
    assert_eq!(undirected(0, 2, 5).unwrap(), 1);
    assert_eq!(undirected(0, 3, 5).unwrap(), 2);
    assert_eq!(undirected(0, 4, 5).unwrap(), 3);
    assert_eq!(undirected(1, 2, 5).unwrap(), 4);
    assert_eq!(undirected(3, 4, 5).unwrap(), 9);
}

#[test]
fn test_undirected_rejects_self_loop() {
    assert!(matches!(
        undirected(3, 3, 5),
        Err(TourForgeError::InvalidEdge(3))
    ));
}

#[test]
fn test_undirected_rejects_out_of_range() {
    assert!(matches!(
        undirected(0, 5, 5),
        Err(TourForgeError::NodeOutOfRange {
            index: 5,
            num_nodes: 5
        })
    ));
    assert!(undirected(7, 0, 5).is_err());
}

#[test]
fn test_directed_is_row_major() {
    assert_eq!(directed(0, 0, 4).unwrap(), 0);
    assert_eq!(directed(1, 2, 4).unwrap(), 6);
    assert_eq!(directed(3, 3, 4).unwrap(), 15);
    // Ordered pairs are distinct variables
    assert_ne!(directed(1, 2, 4).unwrap(), directed(2, 1, 4).unwrap());
}

#[test]
fn test_directed_rejects_out_of_range() {
    assert!(directed(4, 0, 4).is_err());
    assert!(directed(0, 4, 4).is_err());
}
