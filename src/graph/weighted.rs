//! Complete weighted graph with per-edge pheromone trails.

use std::ops::Range;

use rand::Rng;

use super::{DistanceMatrix, Point};
use crate::error::{AcoError, AcoResult};

/// Pheromone level every edge starts with.
pub const DEFAULT_PHEROMONE: f64 = 1.0;

/// A complete undirected graph over nodes `0..n`.
///
/// Every unordered pair `{u, v}` of distinct nodes carries a fixed positive
/// `distance` and a mutable positive `pheromone` level. Distances are stored
/// in a dense [`DistanceMatrix`]; pheromone is stored once per edge so that
/// both directions always observe the same trail.
///
/// # Examples
///
/// ```
/// use u_aco::graph::WeightedGraph;
///
/// let graph = WeightedGraph::build(3, &[(0, 1, 1.0), (0, 2, 2.0), (1, 2, 1.5)]).unwrap();
/// assert_eq!(graph.len(), 3);
/// assert_eq!(graph.distance(2, 0).unwrap(), 2.0);
/// assert_eq!(graph.pheromone(1, 2).unwrap(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    distances: DistanceMatrix,
    pheromone: Vec<f64>,
    size: usize,
}

impl WeightedGraph {
    /// Builds a complete graph over `n` nodes from an undirected edge list.
    ///
    /// Each entry is `(u, v, distance)`. A pair may appear in either
    /// orientation, and more than once if the distances agree.
    ///
    /// # Errors
    ///
    /// - [`AcoError::NodeNotFound`] for an endpoint outside `0..n`
    /// - [`AcoError::DegenerateEdge`] for self loops, non-positive or
    ///   non-finite distances, or conflicting duplicates
    /// - [`AcoError::IncompleteGraph`] if any pair of distinct nodes is missing
    pub fn build(n: usize, edges: &[(usize, usize, f64)]) -> AcoResult<Self> {
        let mut dm = DistanceMatrix::new(n);
        for &(u, v, d) in edges {
            for node in [u, v] {
                if node >= n {
                    return Err(AcoError::NodeNotFound { node, size: n });
                }
            }
            check_distance(u, v, d)?;
            let existing = dm.get(u, v);
            if existing != 0.0 && existing != d {
                return Err(AcoError::DegenerateEdge {
                    from: u,
                    to: v,
                    distance: d,
                });
            }
            dm.set_symmetric(u, v, d);
        }

        for u in 0..n {
            for v in (u + 1)..n {
                if dm.get(u, v) == 0.0 {
                    return Err(AcoError::IncompleteGraph { from: u, to: v });
                }
            }
        }

        Ok(Self::with_distances(dm))
    }

    /// Builds a graph from a symmetric distance matrix.
    ///
    /// The diagonal is ignored. Every off-diagonal entry must be positive and
    /// finite, and `d(u, v)` must equal `d(v, u)`.
    pub fn from_matrix(distances: DistanceMatrix) -> AcoResult<Self> {
        let n = distances.size();
        for u in 0..n {
            for v in (u + 1)..n {
                let d = distances.get(u, v);
                check_distance(u, v, d)?;
                if distances.get(v, u) != d {
                    return Err(AcoError::DegenerateEdge {
                        from: v,
                        to: u,
                        distance: distances.get(v, u),
                    });
                }
            }
        }
        Ok(Self::with_distances(distances))
    }

    /// Builds a complete Euclidean graph from point coordinates.
    ///
    /// Coincident points produce a zero-length edge and are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_aco::graph::{Point, WeightedGraph};
    ///
    /// let points = [Point::new(0.0, 0.0), Point::new(3.0, 4.0)];
    /// let graph = WeightedGraph::from_points(&points).unwrap();
    /// assert!((graph.distance(0, 1).unwrap() - 5.0).abs() < 1e-10);
    /// ```
    pub fn from_points(points: &[Point]) -> AcoResult<Self> {
        Self::from_matrix(DistanceMatrix::from_points(points))
    }

    /// Generates a random Euclidean instance of `n` points in a
    /// `width × height` box.
    ///
    /// Points that coincide with an earlier one are redrawn.
    pub fn random_euclidean<R: Rng>(
        n: usize,
        width: f64,
        height: f64,
        rng: &mut R,
    ) -> AcoResult<Self> {
        for (name, value) in [("width", width), ("height", height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(AcoError::InvalidParameter {
                    name,
                    value,
                    reason: "must be finite and > 0",
                });
            }
        }

        let mut points: Vec<Point> = Vec::with_capacity(n);
        while points.len() < n {
            let p = Point::random(width, height, rng);
            if points.iter().all(|q| *q != p) {
                points.push(p);
            }
        }
        Self::from_points(&points)
    }

    fn with_distances(distances: DistanceMatrix) -> Self {
        let size = distances.size();
        Self {
            distances,
            pheromone: vec![DEFAULT_PHEROMONE; size * size.saturating_sub(1) / 2],
            size,
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// All nodes, in ascending order.
    pub fn nodes(&self) -> Range<usize> {
        0..self.size
    }

    /// Number of undirected edges.
    pub fn num_edges(&self) -> usize {
        self.pheromone.len()
    }

    /// Every unordered pair `(u, v)` with `u < v`, once.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size;
        (0..n).flat_map(move |u| ((u + 1)..n).map(move |v| (u, v)))
    }

    /// Distance between `u` and `v`.
    ///
    /// Fails with [`AcoError::EdgeNotFound`] if `u == v` or either node is
    /// out of range.
    pub fn distance(&self, u: usize, v: usize) -> AcoResult<f64> {
        self.edge_index(u, v)?;
        Ok(self.distances.get(u, v))
    }

    /// Current pheromone level on `{u, v}`.
    pub fn pheromone(&self, u: usize, v: usize) -> AcoResult<f64> {
        Ok(self.pheromone[self.edge_index(u, v)?])
    }

    /// Overwrites the pheromone level on `{u, v}`.
    ///
    /// Fails with [`AcoError::InvalidPheromone`] unless `value` is positive
    /// and finite.
    pub fn set_pheromone(&mut self, u: usize, v: usize, value: f64) -> AcoResult<()> {
        let idx = self.edge_index(u, v)?;
        if !(value.is_finite() && value > 0.0) {
            return Err(AcoError::InvalidPheromone {
                from: u,
                to: v,
                value,
            });
        }
        self.pheromone[idx] = value;
        Ok(())
    }

    /// Adds `amount` to the pheromone level on `{u, v}`.
    ///
    /// The sum saturates at `f64::MAX`, so large deposits on short tours
    /// keep the trail finite.
    pub fn deposit(&mut self, u: usize, v: usize, amount: f64) -> AcoResult<()> {
        let current = self.pheromone(u, v)?;
        self.set_pheromone(u, v, (current + amount).min(f64::MAX))
    }

    /// Resets every edge to the same pheromone level.
    pub fn reset_pheromone(&mut self, value: f64) -> AcoResult<()> {
        if !(value.is_finite() && value > 0.0) {
            return Err(AcoError::InvalidPheromone {
                from: 0,
                to: 0,
                value,
            });
        }
        self.pheromone.fill(value);
        Ok(())
    }

    /// Multiplies every edge's pheromone by `factor`, never going below
    /// `floor`.
    pub fn scale_pheromone(&mut self, factor: f64, floor: f64) {
        for tau in &mut self.pheromone {
            *tau = (*tau * factor).max(floor);
        }
    }

    /// Multiplies the pheromone on `{u, v}` by `factor`, never going below
    /// `floor`.
    pub fn scale_edge_pheromone(
        &mut self,
        u: usize,
        v: usize,
        factor: f64,
        floor: f64,
    ) -> AcoResult<()> {
        let idx = self.edge_index(u, v)?;
        self.pheromone[idx] = (self.pheromone[idx] * factor).max(floor);
        Ok(())
    }

    /// Smallest pheromone level over all edges, or `None` for graphs with
    /// fewer than two nodes.
    pub fn min_pheromone(&self) -> Option<f64> {
        self.pheromone.iter().copied().reduce(f64::min)
    }

    /// Underlying distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Position of `{u, v}` in the upper-triangular pheromone storage.
    fn edge_index(&self, u: usize, v: usize) -> AcoResult<usize> {
        if u == v || u >= self.size || v >= self.size {
            return Err(AcoError::EdgeNotFound { from: u, to: v });
        }
        let (a, b) = if u < v { (u, v) } else { (v, u) };
        Ok(a * (2 * self.size - a - 1) / 2 + (b - a - 1))
    }
}

fn check_distance(u: usize, v: usize, d: f64) -> AcoResult<()> {
    if u == v || !(d.is_finite() && d > 0.0) {
        return Err(AcoError::DegenerateEdge {
            from: u,
            to: v,
            distance: d,
        });
    }
    Ok(())
}

/// Builds a complete graph over `n` nodes from an undirected edge list.
///
/// Shorthand for [`WeightedGraph::build`].
pub fn build_graph(n: usize, edges: &[(usize, usize, f64)]) -> AcoResult<WeightedGraph> {
    WeightedGraph::build(n, edges)
}
