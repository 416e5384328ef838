//! # u-aco
//!
//! Ant colony optimization for the symmetric travelling salesman problem.
//!
//! ## Modules
//!
//! - [`graph`] — Complete weighted graph with per-edge pheromone trails
//! - [`colony`] — Ants, colony configuration, and the iteration loop
//! - [`models`] — Tour type shared with external heuristics
//! - [`evaluation`] — Path length and tour legality checks
//! - [`sampling`] — Cumulative-distribution weighted sampling
//! - [`error`] — Error taxonomy
//!
//! ## Parallelism
//!
//! With the `parallel` feature, ants of one iteration construct their tours
//! on the rayon thread pool. Results are identical to the sequential build
//! for the same seed.

pub mod colony;
pub mod error;
pub mod evaluation;
pub mod graph;
pub mod models;
pub mod sampling;

pub use colony::{AcoParams, Colony, ColonyConfig, SimulationResult};
pub use error::{AcoError, AcoResult};
pub use evaluation::total_distance;
pub use graph::{build_graph, WeightedGraph};
pub use models::Tour;
