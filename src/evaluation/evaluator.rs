//! Path length and tour legality checks.

use crate::error::AcoResult;
use crate::graph::WeightedGraph;

/// Sums the distances between consecutive nodes of `path`.
///
/// Works on any node sequence, closed or not. Paths with fewer than two
/// nodes have length zero.
///
/// # Examples
///
/// ```
/// use u_aco::graph::WeightedGraph;
/// use u_aco::evaluation::total_distance;
///
/// let graph = WeightedGraph::build(3, &[(0, 1, 1.0), (0, 2, 2.0), (1, 2, 1.5)]).unwrap();
/// assert!((total_distance(&graph, &[0, 1, 2, 0]).unwrap() - 4.5).abs() < 1e-10);
/// assert_eq!(total_distance(&graph, &[1]).unwrap(), 0.0);
/// ```
pub fn total_distance(graph: &WeightedGraph, path: &[usize]) -> AcoResult<f64> {
    let mut total = 0.0;
    for w in path.windows(2) {
        total += graph.distance(w[0], w[1])?;
    }
    Ok(total)
}

/// A way in which a node sequence fails to be a Hamiltonian cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum TourViolation {
    /// The sequence does not have `|V| + 1` entries.
    WrongLength {
        /// Expected number of entries.
        expected: usize,
        /// Actual number of entries.
        actual: usize,
    },
    /// The last node differs from the first.
    NotClosed {
        /// First node.
        start: usize,
        /// Last node.
        end: usize,
    },
    /// A node outside the graph.
    UnknownNode(usize),
    /// A node visited more than once before the closing step.
    Revisited(usize),
    /// A graph node never visited.
    Missing(usize),
}

/// Checks that `path` is a Hamiltonian cycle of `graph`.
///
/// Returns every violation found; an empty list means the tour is legal.
///
/// # Examples
///
/// ```
/// use u_aco::graph::WeightedGraph;
/// use u_aco::evaluation::{check_tour, TourViolation};
///
/// let graph = WeightedGraph::build(3, &[(0, 1, 1.0), (0, 2, 2.0), (1, 2, 1.5)]).unwrap();
/// assert!(check_tour(&graph, &[0, 2, 1, 0]).is_empty());
/// assert!(check_tour(&graph, &[0, 1, 1, 0]).contains(&TourViolation::Revisited(1)));
/// ```
pub fn check_tour(graph: &WeightedGraph, path: &[usize]) -> Vec<TourViolation> {
    let n = graph.len();
    let mut violations = Vec::new();

    if path.len() != n + 1 {
        violations.push(TourViolation::WrongLength {
            expected: n + 1,
            actual: path.len(),
        });
    }

    if let (Some(&start), Some(&end)) = (path.first(), path.last()) {
        if start != end {
            violations.push(TourViolation::NotClosed { start, end });
        }
    }

    let mut visited = vec![false; n];
    let interior = &path[..path.len().saturating_sub(1)];
    for &node in interior {
        if node >= n {
            violations.push(TourViolation::UnknownNode(node));
        } else if visited[node] {
            violations.push(TourViolation::Revisited(node));
        } else {
            visited[node] = true;
        }
    }

    for node in (0..n).filter(|&i| !visited[i]) {
        violations.push(TourViolation::Missing(node));
    }

    violations
}

/// Returns `true` if `path` is a Hamiltonian cycle of `graph`.
pub fn is_valid_tour(graph: &WeightedGraph, path: &[usize]) -> bool {
    check_tour(graph, path).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AcoError;

    fn triangle() -> WeightedGraph {
        WeightedGraph::build(3, &[(0, 1, 1.0), (0, 2, 2.0), (1, 2, 1.5)]).unwrap()
    }

    #[test]
    fn test_total_distance_closed() {
        let g = triangle();
        let d = total_distance(&g, &[0, 1, 2, 0]).unwrap();
        assert!((d - 4.5).abs() < 1e-10);
        let rev = total_distance(&g, &[0, 2, 1, 0]).unwrap();
        assert!((d - rev).abs() < 1e-10);
    }

    #[test]
    fn test_total_distance_open_and_trivial() {
        let g = triangle();
        assert_eq!(total_distance(&g, &[]).unwrap(), 0.0);
        assert_eq!(total_distance(&g, &[2]).unwrap(), 0.0);
        assert_eq!(total_distance(&g, &[2, 1]).unwrap(), 1.5);
    }

    #[test]
    fn test_total_distance_missing_edge() {
        let g = triangle();
        assert_eq!(
            total_distance(&g, &[0, 0]).unwrap_err(),
            AcoError::EdgeNotFound { from: 0, to: 0 }
        );
    }

    #[test]
    fn test_check_valid() {
        let g = triangle();
        assert!(is_valid_tour(&g, &[1, 0, 2, 1]));
    }

    #[test]
    fn test_check_not_closed() {
        let g = triangle();
        let v = check_tour(&g, &[0, 1, 2, 1]);
        assert!(v.contains(&TourViolation::NotClosed { start: 0, end: 1 }));
    }

    #[test]
    fn test_check_short_path() {
        let g = triangle();
        let v = check_tour(&g, &[0, 1, 0]);
        assert!(v.contains(&TourViolation::WrongLength {
            expected: 4,
            actual: 3
        }));
        assert!(v.contains(&TourViolation::Missing(2)));
    }

    #[test]
    fn test_check_unknown_node() {
        let g = triangle();
        let v = check_tour(&g, &[0, 7, 1, 0]);
        assert!(v.contains(&TourViolation::UnknownNode(7)));
        assert!(v.contains(&TourViolation::Missing(2)));
    }
}
