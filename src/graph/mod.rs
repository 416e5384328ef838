//! Weighted graphs for tour construction.
//!
//! Provides a dense distance matrix, planar points for Euclidean instances,
//! and the complete graph that carries a pheromone trail on every edge.

mod matrix;
mod point;
mod weighted;

pub use matrix::DistanceMatrix;
pub use point::Point;
pub use weighted::{build_graph, WeightedGraph, DEFAULT_PHEROMONE};
