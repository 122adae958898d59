//! Bounded multi-source shortest paths.
//!
//! This library implements the O(m log^(2/3) n) single-source shortest path
//! algorithm of Duan, Mao, Mao, Yin and Zhang (2025) for directed graphs with
//! real non-negative edge weights, together with the two data structures that
//! make the bound attainable: the bounded block list (a batch-pull priority
//! structure) and the constant-degree graph rewrite required by the
//! recursion's preconditions.
//!
//! A classic binary-heap Dijkstra is included as the correctness oracle used
//! by the test corpus.

pub mod algorithm;
pub mod data_structures;
pub mod graph;

pub use algorithm::{
    bmssp::{compute_sssp, Bmssp},
    dijkstra::Dijkstra,
    path::{unreachable_distance, Path, NO_VERTEX},
    ShortestPathAlgorithm, ShortestPathResult,
};
pub use graph::{constant_degree::ConstantDegree, DirectedGraph};

/// Concrete weight type used throughout the tests: a totally ordered `f64`.
pub type Weight = ordered_float::OrderedFloat<f64>;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid vertex id: {0}")]
    InvalidVertex(usize),

    #[error("source vertex not found in graph")]
    SourceNotFound,

    #[error("negative edge weight on edge {0} -> {1}")]
    NegativeWeight(usize, usize),

    #[error("precondition violated: {0}")]
    Precondition(&'static str),

    #[error("structure invariant violated: {0}")]
    Invariant(&'static str),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
