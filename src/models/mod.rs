//! Domain model types.
//!
//! A [`Tour`] is the unit of exchange between the colony, external
//! heuristics, and the evaluation utilities.

mod tour;

pub use tour::Tour;
