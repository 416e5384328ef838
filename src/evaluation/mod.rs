//! Tour evaluation.
//!
//! Independent length recomputation and legality checks, usable by the
//! colony and by any external heuristic producing node sequences.

mod evaluator;

pub use evaluator::{check_tour, is_valid_tour, total_distance, TourViolation};
