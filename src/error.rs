//! Error types for graph construction, configuration, and simulation.

use thiserror::Error;

/// Errors raised by graph construction, colony configuration, and tour
/// construction.
///
/// Configuration-level variants are reported before a simulation starts.
/// Once a colony has been validated, none of these are expected mid-run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcoError {
    /// Distance or pheromone lookup for a pair that is not an edge.
    #[error("no edge between nodes {from} and {to}")]
    EdgeNotFound {
        /// First endpoint.
        from: usize,
        /// Second endpoint.
        to: usize,
    },

    /// Zero, negative, non-finite, self-loop, or conflicting edge distance.
    #[error("degenerate edge {from}-{to} with distance {distance}")]
    DegenerateEdge {
        /// First endpoint.
        from: usize,
        /// Second endpoint.
        to: usize,
        /// Offending distance.
        distance: f64,
    },

    /// Attempted pheromone write that is not strictly positive.
    #[error("invalid pheromone {value} on edge {from}-{to}")]
    InvalidPheromone {
        /// First endpoint.
        from: usize,
        /// Second endpoint.
        to: usize,
        /// Rejected value.
        value: f64,
    },

    /// The graph has no nodes.
    #[error("graph has no nodes")]
    EmptyGraph,

    /// The graph has a single node, so no tour has an edge.
    #[error("graph has a single node")]
    SingleNodeGraph,

    /// A node index outside `0..size`.
    #[error("node {node} out of range for graph of {size} nodes")]
    NodeNotFound {
        /// Requested node.
        node: usize,
        /// Number of nodes in the graph.
        size: usize,
    },

    /// A pair of distinct nodes has no distance defined.
    #[error("graph is incomplete: missing edge {from}-{to}")]
    IncompleteGraph {
        /// First endpoint.
        from: usize,
        /// Second endpoint.
        to: usize,
    },

    /// A hyperparameter or configuration value outside its valid range.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
        /// Expected range.
        reason: &'static str,
    },
}

/// Result type for colony operations.
pub type AcoResult<T> = Result<T, AcoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = AcoError::EdgeNotFound { from: 1, to: 2 };
        assert_eq!(err.to_string(), "no edge between nodes 1 and 2");

        let err = AcoError::DegenerateEdge {
            from: 0,
            to: 3,
            distance: 0.0,
        };
        assert_eq!(err.to_string(), "degenerate edge 0-3 with distance 0");

        let err = AcoError::InvalidParameter {
            name: "rho",
            value: 1.5,
            reason: "must lie in (0, 1)",
        };
        assert_eq!(
            err.to_string(),
            "invalid parameter `rho` = 1.5: must lie in (0, 1)"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AcoError>();
    }

    #[test]
    fn test_all_variants_display() {
        let variants = vec![
            AcoError::EdgeNotFound { from: 0, to: 1 },
            AcoError::DegenerateEdge {
                from: 0,
                to: 1,
                distance: -1.0,
            },
            AcoError::InvalidPheromone {
                from: 0,
                to: 1,
                value: 0.0,
            },
            AcoError::EmptyGraph,
            AcoError::SingleNodeGraph,
            AcoError::NodeNotFound { node: 9, size: 3 },
            AcoError::IncompleteGraph { from: 1, to: 2 },
            AcoError::InvalidParameter {
                name: "q",
                value: -1.0,
                reason: "must be finite and >= 0",
            },
        ];
        for v in &variants {
            assert!(!v.to_string().is_empty());
        }
    }
}
