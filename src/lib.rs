//! `rwr`: random walk with restart over dense weighted graphs.
//!
//! A walker moves along weighted edges and, with probability `r` at every step, teleports back
//! to a fixed seed distribution. The stationary visit distribution ranks every node by its
//! proximity to the seeds.
//!
//! ```
//! use rwr::{walk, AdjacencyMatrix};
//!
//! let adj = AdjacencyMatrix::from_rows(&[
//!     vec![0.0, 1.0, 1.0],
//!     vec![1.0, 0.0, 1.0],
//!     vec![1.0, 1.0, 0.0],
//! ])?;
//! let (p, steps) = walk(0.5, &[1.0, 0.0, 0.0], &adj, 1e-9)?;
//! assert!(p[0] > p[1]);
//! assert!(steps < 50);
//! # Ok::<(), rwr::Error>(())
//! ```
//!
//! Public invariants:
//! - **Orientation**: matrix entry `(i, j)` is the weight of edge `j -> i`; column `j` holds the
//!   outgoing weights of node `j`.
//! - **Node order**: output index `i` is node `i` of the input matrix.
//! - **Simplex**: returned probabilities are non-negative and sum to 1 up to rounding.
//! - **Determinism**: identical inputs give bit-identical outputs and step counts.
//! - **No silent repair**: zero columns, zero seed mass and non-finite iterates are errors,
//!   never NaN-filled results.

pub mod graph;
pub mod restart;
pub mod topk;

pub use graph::{AdjacencyMatrix, TransitionMatrix, WeightedGraph};
pub use restart::{
    random_walk_with_restart, walk, walk_default, RestartWalk, RwrConfig, RwrRun, WalkState,
    DEFAULT_STOP_THRESHOLD,
};
pub use topk::{normalize, top_k};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Seed vector has negative or non-finite entries, or no positive mass.
    #[error("invalid seeds: {0}")]
    InvalidSeeds(String),
    /// Adjacency matrix has a zero column, or negative or non-finite weights.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// The iteration cap was reached before the change fell below the threshold.
    #[error(
        "random walk did not converge after {steps} steps (change={change:.2e}, threshold={threshold:.2e})"
    )]
    NonConvergence {
        steps: usize,
        change: f64,
        threshold: f64,
    },
    /// An iterate went non-finite. Validated inputs keep every iterate in `[0, 1]`, so this
    /// only guards the arithmetic.
    #[error("non-finite probability at step {step}")]
    NumericalInstability { step: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
