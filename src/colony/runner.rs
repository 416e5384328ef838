//! Iterated colony simulation.
//!
//! Each iteration runs four phases in order:
//!
//! 1. **Construction**: every ant builds a tour against the same pheromone
//!    snapshot. The graph is only borrowed immutably here, so ants may run in
//!    parallel (feature `parallel`).
//! 2. **Evaporation**: trails decay by `(1 - ρ)`, once, after every ant has
//!    reported.
//! 3. **Deposit**: tours selected by the [`DepositStrategy`] add `Q / length`
//!    to each of their edges. Overlapping contributions sum.
//! 4. **Bookkeeping**: the iteration's shortest tour is recorded and
//!    replaces the best-so-far tour if strictly shorter.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::ant::{pheromone_contribution, Ant};
use super::config::{AcoParams, ColonyConfig, DepositStrategy, EvaporationScope, StartNode};
use crate::error::{AcoError, AcoResult};
use crate::graph::WeightedGraph;
use crate::models::Tour;

/// Outcome of a colony run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Shortest tour found across all iterations.
    pub best_tour: Tour,
    /// Length of `best_tour`.
    pub best_length: f64,
    /// Shortest tour length of each iteration (the convergence trace).
    pub iteration_best: Vec<f64>,
    /// Best length found up to and including each iteration.
    pub best_so_far: Vec<f64>,
    /// Node every ant started from.
    pub start_node: usize,
    /// Seed of the run's master generator.
    pub seed: u64,
}

impl SimulationResult {
    /// Per-iteration best lengths.
    pub fn convergence_trace(&self) -> &[f64] {
        &self.iteration_best
    }

    /// Splits the result into `(best_tour, best_length, convergence_trace)`.
    pub fn into_parts(self) -> (Tour, f64, Vec<f64>) {
        (self.best_tour, self.best_length, self.iteration_best)
    }
}

/// A population of ants iterating over a shared pheromone graph.
///
/// The colony owns the graph. Ants borrow it read-only during construction;
/// only the colony mutates pheromone, between iterations.
///
/// # Examples
///
/// ```
/// use u_aco::colony::{Colony, ColonyConfig};
/// use u_aco::graph::WeightedGraph;
///
/// let graph = WeightedGraph::build(
///     4,
///     &[(0, 1, 1.0), (0, 2, 2.0), (0, 3, 2.0), (1, 2, 2.0), (1, 3, 2.0), (2, 3, 1.0)],
/// )
/// .unwrap();
/// let config = ColonyConfig::default()
///     .with_population_size(10)
///     .with_iterations(50)
///     .with_seed(42);
/// let mut colony = Colony::with_config(graph, config).unwrap();
///
/// let result = colony.simulate(1.0, 1.0, 0.5, 1.0).unwrap();
/// assert!((result.best_length - 6.0).abs() < 1e-10);
/// assert_eq!(result.convergence_trace().len(), 50);
/// ```
#[derive(Debug, Clone)]
pub struct Colony {
    graph: WeightedGraph,
    config: ColonyConfig,
}

impl Colony {
    /// Creates a colony with default settings apart from population size
    /// and iteration count.
    pub fn new(graph: WeightedGraph, population_size: usize, iterations: usize) -> AcoResult<Self> {
        let config = ColonyConfig::default()
            .with_population_size(population_size)
            .with_iterations(iterations);
        Self::with_config(graph, config)
    }

    /// Creates a colony from a full configuration.
    ///
    /// Rejects empty and single-node graphs and out-of-range settings.
    pub fn with_config(mut graph: WeightedGraph, config: ColonyConfig) -> AcoResult<Self> {
        config.validate(&graph)?;
        graph.reset_pheromone(config.initial_pheromone)?;
        Ok(Self { graph, config })
    }

    /// The graph, including its current pheromone levels.
    pub fn graph(&self) -> &WeightedGraph {
        &self.graph
    }

    /// The colony configuration.
    pub fn config(&self) -> &ColonyConfig {
        &self.config
    }

    /// Consumes the colony, returning the graph with its final trails.
    pub fn into_graph(self) -> WeightedGraph {
        self.graph
    }

    /// Runs the configured number of iterations with the given
    /// hyperparameters.
    pub fn simulate(
        &mut self,
        alpha: f64,
        beta: f64,
        rho: f64,
        q: f64,
    ) -> AcoResult<SimulationResult> {
        self.simulate_with(&AcoParams::new(alpha, beta, rho, q))
    }

    /// Runs the configured number of iterations.
    ///
    /// Pheromone is reset to the configured initial level first, so repeated
    /// runs with the same seed are identical.
    pub fn simulate_with(&mut self, params: &AcoParams) -> AcoResult<SimulationResult> {
        params.validate()?;
        self.graph.reset_pheromone(self.config.initial_pheromone)?;

        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);
        let start = match self.config.start_node {
            StartNode::Fixed(node) => node,
            StartNode::Random => rng.random_range(0..self.graph.len()),
        };

        info!(
            nodes = self.graph.len(),
            population = self.config.population_size,
            iterations = self.config.iterations,
            start,
            seed,
            "colony simulation started"
        );

        let iterations = self.config.iterations;
        let mut best: Option<Tour> = None;
        let mut iteration_best = Vec::with_capacity(iterations);
        let mut best_so_far = Vec::with_capacity(iterations);

        for iteration in 0..iterations {
            let ant_seeds: Vec<u64> = (0..self.config.population_size)
                .map(|_| rng.random())
                .collect();
            let tours = construct_tours(&self.graph, start, &ant_seeds, params)?;

            let winner = &tours[shortest(&tours)];
            let improved = best
                .as_ref()
                .is_none_or(|b| winner.length() < b.length());
            if improved {
                best = Some(winner.clone());
            }

            self.evaporate(&tours, params.rho)?;
            self.deposit(&tours, winner, best.as_ref(), params.q)?;

            let best_length = best.as_ref().map_or(winner.length(), Tour::length);
            iteration_best.push(winner.length());
            best_so_far.push(best_length);

            debug!(
                iteration,
                iteration_best = winner.length(),
                best = best_length,
                improved,
                "iteration finished"
            );
        }

        let best_tour = best.ok_or(AcoError::InvalidParameter {
            name: "iterations",
            value: 0.0,
            reason: "must be >= 1",
        })?;

        info!(best = best_tour.length(), "colony simulation finished");

        Ok(SimulationResult {
            best_length: best_tour.length(),
            best_tour,
            iteration_best,
            best_so_far,
            start_node: start,
            seed,
        })
    }

    fn evaporate(&mut self, tours: &[Tour], rho: f64) -> AcoResult<()> {
        let factor = 1.0 - rho;
        let floor = self.config.pheromone_floor;
        match self.config.evaporation {
            EvaporationScope::AllEdges => self.graph.scale_pheromone(factor, floor),
            EvaporationScope::TraversedEdges => {
                let traversed: BTreeSet<(usize, usize)> = tours
                    .iter()
                    .flat_map(|tour| tour.edges())
                    .map(|(u, v)| if u < v { (u, v) } else { (v, u) })
                    .collect();
                for (u, v) in traversed {
                    self.graph.scale_edge_pheromone(u, v, factor, floor)?;
                }
            }
        }
        Ok(())
    }

    fn deposit(
        &mut self,
        tours: &[Tour],
        iteration_best: &Tour,
        best: Option<&Tour>,
        q: f64,
    ) -> AcoResult<()> {
        match self.config.deposit {
            DepositStrategy::AllAnts => {
                for tour in tours {
                    self.reinforce(tour, q)?;
                }
            }
            DepositStrategy::IterationBest => self.reinforce(iteration_best, q)?,
            DepositStrategy::BestSoFar => {
                if let Some(tour) = best {
                    self.reinforce(tour, q)?;
                }
            }
        }
        Ok(())
    }

    fn reinforce(&mut self, tour: &Tour, q: f64) -> AcoResult<()> {
        let amount = pheromone_contribution(q, tour.length());
        for (u, v) in tour.edges() {
            self.graph.deposit(u, v, amount)?;
        }
        Ok(())
    }
}

/// Construction phase: one tour per seed, in seed order.
///
/// Returns only once every ant has finished.
fn construct_tours(
    graph: &WeightedGraph,
    start: usize,
    seeds: &[u64],
    params: &AcoParams,
) -> AcoResult<Vec<Tour>> {
    #[cfg(feature = "parallel")]
    let tours: AcoResult<Vec<Tour>> = seeds
        .par_iter()
        .enumerate()
        .map(|(id, &seed)| run_ant(graph, id, start, seed, params))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let tours: AcoResult<Vec<Tour>> = seeds
        .iter()
        .enumerate()
        .map(|(id, &seed)| run_ant(graph, id, start, seed, params))
        .collect();

    tours
}

fn run_ant(
    graph: &WeightedGraph,
    id: usize,
    start: usize,
    seed: u64,
    params: &AcoParams,
) -> AcoResult<Tour> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ant = Ant::new(id, graph, start)?;
    let tour = ant.construct_tour(&mut rng, params.alpha, params.beta)?;
    trace!(ant = id, length = tour.length(), "ant closed tour");
    Ok(tour)
}

/// Index of the shortest tour; the lowest index wins ties.
fn shortest(tours: &[Tour]) -> usize {
    let mut best = 0;
    for (i, tour) in tours.iter().enumerate().skip(1) {
        if tour.length() < tours[best].length() {
            best = i;
        }
    }
    best
}
