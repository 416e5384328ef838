//! Single-ant tour construction.
//!
//! # Transition rule
//!
//! From the current node `i`, each unvisited node `j` is weighted by
//!
//! ```text
//! w(j) = τ(i, j)^α · (1 / d(i, j))^β
//! ```
//!
//! and chosen with probability `w(j) / Σ w`. Weights are evaluated in log
//! space and shifted by their maximum before exponentiation, which yields the
//! same distribution without underflow for large exponents.
//!
//! # Reference
//!
//! Dorigo, M., Maniezzo, V. & Colorni, A. (1996). "Ant system: optimization
//! by a colony of cooperating agents", *IEEE Transactions on Systems, Man,
//! and Cybernetics, Part B* 26(1), 29-41.

use rand::Rng;

use crate::error::{AcoError, AcoResult};
use crate::graph::WeightedGraph;
use crate::models::Tour;
use crate::sampling;

/// Outcome of one selection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Advance to this node.
    Next(usize),
    /// Every node has been visited; only the closing edge remains.
    NoMoreNodes,
}

/// Construction state of an ant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntState {
    /// Unvisited nodes remain.
    Extending,
    /// The tour has returned to its start node.
    Closed,
}

/// An agent that builds one tour over a shared, read-only graph.
///
/// The path is kept as an ordered sequence plus a visited mask, so each
/// membership test is O(1).
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_aco::colony::Ant;
/// use u_aco::graph::WeightedGraph;
///
/// let graph = WeightedGraph::build(3, &[(0, 1, 1.0), (0, 2, 2.0), (1, 2, 1.5)]).unwrap();
/// let mut ant = Ant::new(0, &graph, 0).unwrap();
/// let mut rng = StdRng::seed_from_u64(42);
/// let tour = ant.construct_tour(&mut rng, 1.0, 1.0).unwrap();
/// assert_eq!(tour.len(), 4);
/// assert!((tour.length() - 4.5).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Ant<'g> {
    id: usize,
    graph: &'g WeightedGraph,
    start: usize,
    current: usize,
    path: Vec<usize>,
    visited: Vec<bool>,
    cost: f64,
    state: AntState,
}

impl<'g> Ant<'g> {
    /// Places a new ant on `start`.
    pub fn new(id: usize, graph: &'g WeightedGraph, start: usize) -> AcoResult<Self> {
        let n = graph.len();
        if start >= n {
            return Err(AcoError::NodeNotFound { node: start, size: n });
        }
        let mut visited = vec![false; n];
        visited[start] = true;
        let mut path = Vec::with_capacity(n + 1);
        path.push(start);
        Ok(Self {
            id,
            graph,
            start,
            current: start,
            path,
            visited,
            cost: 0.0,
            state: AntState::Extending,
        })
    }

    /// Identifier within the iteration.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Node the tour starts and ends at.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Node the ant is standing on.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Nodes visited so far, in order.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Sum of traversed edge distances so far.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Current construction state.
    pub fn state(&self) -> AntState {
        self.state
    }

    /// Nodes not yet on the path, in ascending order.
    pub fn available_nodes(&self) -> Vec<usize> {
        self.graph.nodes().filter(|&n| !self.visited[n]).collect()
    }

    /// Probability of moving from the current node to each of `available`.
    ///
    /// The result is aligned with `available` and sums to one. An empty
    /// candidate list yields an empty distribution.
    pub fn transition_probabilities(
        &self,
        available: &[usize],
        alpha: f64,
        beta: f64,
    ) -> AcoResult<Vec<f64>> {
        if available.is_empty() {
            return Ok(Vec::new());
        }

        let mut log_weights = Vec::with_capacity(available.len());
        for &node in available {
            let tau = self.graph.pheromone(self.current, node)?;
            let d = self.graph.distance(self.current, node)?;
            let trail = finite_term("alpha", alpha, alpha * tau.ln())?;
            let visibility = finite_term("beta", beta, beta * d.ln())?;
            log_weights.push(trail - visibility);
        }

        let max = log_weights
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let weights: Vec<f64> = log_weights.iter().map(|lw| (lw - max).exp()).collect();

        sampling::normalize(&weights).ok_or(AcoError::InvalidParameter {
            name: "transition_weights",
            value: weights.iter().sum(),
            reason: "must carry positive finite mass",
        })
    }

    /// Draws the next node according to [`transition_probabilities`].
    ///
    /// Returns [`Selection::NoMoreNodes`] once every node is on the path.
    ///
    /// [`transition_probabilities`]: Ant::transition_probabilities
    pub fn select_move<R: Rng>(&self, rng: &mut R, alpha: f64, beta: f64) -> AcoResult<Selection> {
        let available = self.available_nodes();
        if available.is_empty() {
            return Ok(Selection::NoMoreNodes);
        }

        let probabilities = self.transition_probabilities(&available, alpha, beta)?;
        let idx = sampling::sample(&probabilities, rng).ok_or(AcoError::InvalidParameter {
            name: "transition_weights",
            value: probabilities.iter().sum(),
            reason: "must carry positive finite mass",
        })?;
        Ok(Selection::Next(available[idx]))
    }

    /// Moves to `node`, adding the edge distance to the running cost.
    pub fn move_to(&mut self, node: usize) -> AcoResult<()> {
        self.cost += self.graph.distance(self.current, node)?;
        self.path.push(node);
        self.visited[node] = true;
        self.current = node;
        Ok(())
    }

    /// Builds a complete tour from the start node.
    ///
    /// Extends the path one probabilistic step at a time until no node
    /// remains, then returns to the start. The cost includes the closing
    /// edge. Calling this on a closed ant returns its finished tour.
    pub fn construct_tour<R: Rng>(
        &mut self,
        rng: &mut R,
        alpha: f64,
        beta: f64,
    ) -> AcoResult<Tour> {
        while self.state == AntState::Extending {
            match self.select_move(rng, alpha, beta)? {
                Selection::Next(node) => self.move_to(node)?,
                Selection::NoMoreNodes => {
                    self.move_to(self.start)?;
                    self.state = AntState::Closed;
                }
            }
        }
        Ok(Tour::new(self.path.clone(), self.cost))
    }

    /// Pheromone this ant deposits on each edge of its tour: `Q / cost`.
    pub fn pheromone_contribution(&self, q: f64) -> f64 {
        pheromone_contribution(q, self.cost)
    }
}

/// Deposit for a tour of the given length: `Q / length`, saturating at
/// `f64::MAX`.
///
/// Returns zero for non-positive lengths, which only arise for tours without
/// edges.
pub fn pheromone_contribution(q: f64, length: f64) -> f64 {
    if length > 0.0 {
        (q / length).min(f64::MAX)
    } else {
        0.0
    }
}

/// Log-space term of one exponent; overflow is attributed to that exponent.
fn finite_term(name: &'static str, exponent: f64, term: f64) -> AcoResult<f64> {
    if term.is_finite() {
        Ok(term)
    } else {
        Err(AcoError::InvalidParameter {
            name,
            value: exponent,
            reason: "overflows the transition weight",
        })
    }
}
