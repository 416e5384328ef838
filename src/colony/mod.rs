//! Ant colony optimization.
//!
//! - [`Ant`] — builds one tour with the probabilistic transition rule
//! - [`Colony`] — iterates construction, evaporation, and deposit
//! - [`ColonyConfig`] / [`AcoParams`] — run settings and hyperparameters

mod ant;
mod config;
mod runner;

pub use ant::{pheromone_contribution, Ant, AntState, Selection};
pub use config::{AcoParams, ColonyConfig, DepositStrategy, EvaporationScope, StartNode};
pub use runner::{Colony, SimulationResult};
