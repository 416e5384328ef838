//! Colony configuration and hyperparameters.

use serde::{Deserialize, Serialize};

use crate::error::{AcoError, AcoResult};
use crate::graph::{WeightedGraph, DEFAULT_PHEROMONE};

/// Hyperparameters of the transition rule and pheromone update.
///
/// # Examples
///
/// ```
/// use u_aco::colony::AcoParams;
///
/// let params = AcoParams::default().with_alpha(1.2).with_beta(1.2).with_rho(0.4).with_q(1.5);
/// assert!(params.validate().is_ok());
/// assert!(AcoParams::default().with_rho(1.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcoParams {
    /// Pheromone exponent α: strength of trail following.
    pub alpha: f64,
    /// Distance exponent β: strength of greedy distance preference.
    pub beta: f64,
    /// Evaporation rate ρ in `(0, 1)`.
    pub rho: f64,
    /// Deposit constant Q. Zero disables reinforcement.
    pub q: f64,
}

impl Default for AcoParams {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
            rho: 0.5,
            q: 1.0,
        }
    }
}

impl AcoParams {
    /// Creates a parameter set.
    pub fn new(alpha: f64, beta: f64, rho: f64, q: f64) -> Self {
        Self {
            alpha,
            beta,
            rho,
            q,
        }
    }

    /// Sets the pheromone exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the distance exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate.
    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    /// Sets the deposit constant.
    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    /// Checks every parameter against its valid range.
    ///
    /// α, β and Q must be finite and non-negative; ρ must lie strictly
    /// between 0 and 1 so that evaporation keeps every trail positive.
    pub fn validate(&self) -> AcoResult<()> {
        non_negative("alpha", self.alpha)?;
        non_negative("beta", self.beta)?;
        non_negative("q", self.q)?;
        if !(self.rho > 0.0 && self.rho < 1.0) {
            return Err(AcoError::InvalidParameter {
                name: "rho",
                value: self.rho,
                reason: "must lie in (0, 1)",
            });
        }
        Ok(())
    }
}

fn non_negative(name: &'static str, value: f64) -> AcoResult<()> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(AcoError::InvalidParameter {
            name,
            value,
            reason: "must be finite and >= 0",
        });
    }
    Ok(())
}

/// Where every ant of a run starts its tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartNode {
    /// Always start from this node.
    Fixed(usize),
    /// Draw one node at the start of the run and keep it for every iteration.
    #[default]
    Random,
}

/// Which tours reinforce the trail after each iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositStrategy {
    /// Every ant deposits `Q / length` on its own tour.
    #[default]
    AllAnts,
    /// Only the shortest tour of the iteration deposits.
    IterationBest,
    /// Only the shortest tour found so far deposits.
    BestSoFar,
}

/// Which edges evaporate after each iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaporationScope {
    /// Every edge of the graph decays.
    #[default]
    AllEdges,
    /// Only edges traversed by some ant in the iteration decay.
    TraversedEdges,
}

/// Configuration of a colony run.
///
/// Uses the builder pattern; unspecified fields keep their defaults
/// (25 ants, 40 iterations, random start, all ants deposit, all edges
/// evaporate, initial pheromone 1.0).
///
/// # Examples
///
/// ```
/// use u_aco::colony::{ColonyConfig, DepositStrategy, StartNode};
///
/// let config = ColonyConfig::default()
///     .with_population_size(10)
///     .with_iterations(50)
///     .with_start_node(StartNode::Fixed(0))
///     .with_deposit(DepositStrategy::IterationBest)
///     .with_seed(42);
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonyConfig {
    /// Ants per iteration.
    pub population_size: usize,
    /// Number of iterations.
    pub iterations: usize,
    /// Start node policy.
    pub start_node: StartNode,
    /// Seed of the run's master generator; `None` draws one from entropy.
    pub seed: Option<u64>,
    /// Deposit policy.
    pub deposit: DepositStrategy,
    /// Evaporation policy.
    pub evaporation: EvaporationScope,
    /// Pheromone level every edge is reset to at the start of a run.
    pub initial_pheromone: f64,
    /// Lower bound no trail may decay below.
    pub pheromone_floor: f64,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            population_size: 25,
            iterations: 40,
            start_node: StartNode::default(),
            seed: None,
            deposit: DepositStrategy::default(),
            evaporation: EvaporationScope::default(),
            initial_pheromone: DEFAULT_PHEROMONE,
            pheromone_floor: f64::MIN_POSITIVE,
        }
    }
}

impl ColonyConfig {
    /// Sets the number of ants per iteration.
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    /// Sets the number of iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the start node policy.
    pub fn with_start_node(mut self, start_node: StartNode) -> Self {
        self.start_node = start_node;
        self
    }

    /// Fixes the random seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the deposit policy.
    pub fn with_deposit(mut self, deposit: DepositStrategy) -> Self {
        self.deposit = deposit;
        self
    }

    /// Sets the evaporation policy.
    pub fn with_evaporation(mut self, evaporation: EvaporationScope) -> Self {
        self.evaporation = evaporation;
        self
    }

    /// Sets the initial pheromone level.
    pub fn with_initial_pheromone(mut self, initial_pheromone: f64) -> Self {
        self.initial_pheromone = initial_pheromone;
        self
    }

    /// Sets the pheromone floor.
    pub fn with_pheromone_floor(mut self, pheromone_floor: f64) -> Self {
        self.pheromone_floor = pheromone_floor;
        self
    }

    /// Checks the configuration against the graph it will run on.
    pub fn validate(&self, graph: &WeightedGraph) -> AcoResult<()> {
        match graph.len() {
            0 => return Err(AcoError::EmptyGraph),
            1 => return Err(AcoError::SingleNodeGraph),
            _ => {}
        }
        if self.population_size == 0 {
            return Err(AcoError::InvalidParameter {
                name: "population_size",
                value: 0.0,
                reason: "must be >= 1",
            });
        }
        if self.iterations == 0 {
            return Err(AcoError::InvalidParameter {
                name: "iterations",
                value: 0.0,
                reason: "must be >= 1",
            });
        }
        if let StartNode::Fixed(node) = self.start_node {
            if node >= graph.len() {
                return Err(AcoError::NodeNotFound {
                    node,
                    size: graph.len(),
                });
            }
        }
        if !(self.pheromone_floor.is_finite() && self.pheromone_floor > 0.0) {
            return Err(AcoError::InvalidParameter {
                name: "pheromone_floor",
                value: self.pheromone_floor,
                reason: "must be finite and > 0",
            });
        }
        if !(self.initial_pheromone.is_finite()
            && self.initial_pheromone >= self.pheromone_floor)
        {
            return Err(AcoError::InvalidParameter {
                name: "initial_pheromone",
                value: self.initial_pheromone,
                reason: "must be finite and >= pheromone_floor",
            });
        }
        Ok(())
    }
}
