//! Closed tour type.

use serde::{Deserialize, Serialize};

use crate::error::AcoResult;
use crate::evaluation::total_distance;
use crate::graph::WeightedGraph;

/// A closed tour: a node sequence that starts and ends at the same node,
/// together with its total length.
///
/// # Examples
///
/// ```
/// use u_aco::graph::WeightedGraph;
/// use u_aco::models::Tour;
///
/// let graph = WeightedGraph::build(3, &[(0, 1, 1.0), (0, 2, 2.0), (1, 2, 1.5)]).unwrap();
/// let tour = Tour::from_path(&graph, vec![0, 1, 2, 0]).unwrap();
/// assert_eq!(tour.start(), Some(0));
/// assert!((tour.length() - 4.5).abs() < 1e-10);
/// assert_eq!(tour.edges().count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    nodes: Vec<usize>,
    length: f64,
}

impl Tour {
    /// Creates a tour from a node sequence and a precomputed length.
    pub fn new(nodes: Vec<usize>, length: f64) -> Self {
        Self { nodes, length }
    }

    /// Creates a tour, computing its length from the graph.
    pub fn from_path(graph: &WeightedGraph, nodes: Vec<usize>) -> AcoResult<Self> {
        let length = total_distance(graph, &nodes)?;
        Ok(Self { nodes, length })
    }

    /// Node sequence, including the closing return to the start.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Total length of all traversed edges.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// First node of the tour.
    pub fn start(&self) -> Option<usize> {
        self.nodes.first().copied()
    }

    /// Number of entries in the node sequence (`|V| + 1` for a full tour).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Consecutive node pairs along the tour.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }

    /// Consumes the tour, returning its node sequence.
    pub fn into_nodes(self) -> Vec<usize> {
        self.nodes
    }
}
