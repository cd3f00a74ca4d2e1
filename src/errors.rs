use std::error::Error;

use thiserror::Error;

use crate::{
    graph::{Edge, EdgeId, Node, NumNodes},
    tsp::TspBackend,
};

/// Trait for checking invariants of a result against the input it was computed for
pub trait InvariantCheck<Ctx: ?Sized, E: Error> {
    fn is_correct(&self, context: &Ctx) -> Result<(), E>;
}

/// The caller passed structurally invalid input. No partial result is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("got {weights} weights for a graph with {nodes} nodes")]
    WeightCardinality { weights: usize, nodes: NumNodes },

    #[error("node {node} is out of range for {nodes} nodes")]
    NodeOutOfRange { node: Node, nodes: NumNodes },

    #[error("edge id {edge} is out of range for {edges} edges")]
    EdgeOutOfRange { edge: EdgeId, edges: u64 },

    #[error("node {node} is not an endpoint of {edge:?}")]
    NotAnEndpoint { node: Node, edge: Edge },

    #[error("node {node} occurs more than once")]
    DuplicateNode { node: Node },

    #[error("coordinates of node {node} are not finite")]
    NonFiniteCoordinate { node: Node },

    #[error("cannot enumerate all subsets of {elements} elements")]
    TooManyElements { elements: u32 },
}

/// A computed result violates a property it is guaranteed to have
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("nodes {0} and {1} are both selected but adjacent")]
    NotIndependent(Node, Node),

    #[error("selected nodes are not strictly increasing at {0}")]
    NotAscending(Node),

    #[error("cached weight {cached} differs from recomputed weight {actual}")]
    WeightMismatch { cached: u64, actual: u64 },

    #[error("node {0} is visited more than once")]
    RevisitedNode(Node),

    #[error("node {0} is visited but was not requested")]
    UnexpectedNode(Node),

    #[error("node {0} is requested but not visited")]
    MissingNode(Node),

    #[error("requested node {node} is out of range for {nodes} nodes")]
    RequestedOutOfRange { node: Node, nodes: NumNodes },

    #[error("cached cost {cached} differs from recomputed cost {actual}")]
    CostMismatch { cached: f64, actual: f64 },
}

#[derive(Debug, Error)]
pub enum TspError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error("{backend} backend requires at least {minimum} vertices, got {vertices}")]
    DegenerateInstance {
        backend: TspBackend,
        vertices: NumNodes,
        minimum: NumNodes,
    },

    #[error("{backend} backend failed: {reason}")]
    SolverFailure { backend: TspBackend, reason: String },

    #[error("backends disagree: {0}")]
    BackendDisagreement(String),

    #[error("invalid tour: {0}")]
    InvalidTour(#[from] InvariantViolation),
}
