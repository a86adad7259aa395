//! Error types for graph construction and expression reduction.

use num_bigint::BigInt;
use thiserror::Error;

/// Errors raised by the [`Graph`](crate::graph::Graph) API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// No vertex holds the requested value.
    #[error("no node exists with the value {0}")]
    NodeNotFound(BigInt),

    /// A vertex with this value is already present.
    #[error("node {0} already exists")]
    NodeExists(BigInt),

    /// One or both endpoints of an edge are not vertices of the graph.
    #[error("nodes {from} and {to} are not both present in the graph")]
    DanglingEdge {
        /// Value of the gate's first input, the edge origin.
        from: BigInt,
        /// Value of the gate's second input, the edge target.
        to: BigInt,
    },
}

/// Errors raised while reducing an expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReduceError {
    /// The text left after all NAND groups were reduced is not one or two integers.
    #[error("input is not in the expected format (left with {residual:?})")]
    InvalidInputFormat {
        /// The unreducible buffer contents.
        residual: String,
    },

    /// The graph rejected an insertion the reduction protocol should never produce.
    #[error(transparent)]
    Graph(#[from] GraphError),
}
