//! Dense adjacency matrices and the graph adapter seam.
//!
//! Matrices are stored row-major, but read column-wise: entry `(i, j)` is the weight of the
//! edge `j -> i`, so column `j` holds node `j`'s outgoing weights.

use crate::{Error, Result};

/// `n * n`, or an error when the entry count does not fit in `usize`.
fn entry_count(n: usize) -> Result<usize> {
    n.checked_mul(n).ok_or_else(|| {
        Error::DimensionMismatch(format!("a {n}x{n} matrix has more entries than fit in memory"))
    })
}

/// A weighted graph view that can be densified into an [`AdjacencyMatrix`].
pub trait WeightedGraph {
    fn node_count(&self) -> usize;

    /// Distinct outgoing neighbors of `node`.
    fn neighbors(&self, node: usize) -> Vec<usize>;

    fn edge_weight(&self, source: usize, target: usize) -> f64;
}

/// Square, dense, non-negative weight matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    n: usize,
    data: Vec<f64>,
}

impl AdjacencyMatrix {
    /// Wrap `n * n` row-major weights.
    ///
    /// Only the shape is checked here; weights are checked by [`AdjacencyMatrix::validate`].
    pub fn new(n: usize, data: Vec<f64>) -> Result<Self> {
        let entries = entry_count(n)?;
        if data.len() != entries {
            return Err(Error::DimensionMismatch(format!(
                "expected {entries} entries for a {n}x{n} matrix, got {}",
                data.len()
            )));
        }
        Ok(Self { n, data })
    }

    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(entry_count(n)?);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(Error::DimensionMismatch(format!(
                    "row {i} has {} entries (matrix has {n} rows)",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self { n, data })
    }

    /// Densify a graph view. Edge `u -> v` with weight `w` lands at entry `(v, u)`.
    ///
    /// Neighbor ids outside `0..node_count` are ignored.
    pub fn from_weighted_graph<G: WeightedGraph>(graph: &G) -> Result<Self> {
        let n = graph.node_count();
        let mut data = vec![0.0; entry_count(n)?];
        for u in 0..n {
            for v in graph.neighbors(u) {
                if v < n {
                    data[v * n + u] = graph.edge_weight(u, v);
                }
            }
        }
        Ok(Self { n, data })
    }

    /// Number of nodes.
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n + col]
    }

    fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().skip(col).step_by(self.n).copied()
    }

    /// Plain column sums. A column of huge finite weights can sum to `inf`.
    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.n];
        for row in self.data.chunks_exact(self.n.max(1)) {
            for (s, &w) in sums.iter_mut().zip(row) {
                *s += w;
            }
        }
        sums
    }

    /// Check that the matrix can be column-normalized.
    ///
    /// Rejects an empty matrix, negative or non-finite weights, and any all-zero column (a node
    /// with no outgoing weight). Columns whose sum overflows `f64` are valid.
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(Error::InvalidGraph("graph has no nodes".to_string()));
        }
        for (idx, &w) in self.data.iter().enumerate() {
            if !w.is_finite() || w < 0.0 {
                return Err(Error::InvalidGraph(format!(
                    "weight at ({}, {}) must be finite and non-negative, got {w}",
                    idx / self.n,
                    idx % self.n
                )));
            }
        }
        // Weights are finite and non-negative here, so a sum is either positive or zero.
        for (col, s) in self.column_sums().into_iter().enumerate() {
            if s <= 0.0 {
                return Err(Error::InvalidGraph(format!(
                    "column {col} has no positive weight; every node needs outgoing weight"
                )));
            }
        }
        Ok(())
    }

    /// Divide every column by its sum, producing a column-stochastic matrix.
    ///
    /// A column whose sum overflows is first scaled by its largest weight.
    pub fn column_normalized(&self) -> Result<TransitionMatrix> {
        self.validate()?;
        let normalizers: Vec<(f64, f64)> = self
            .column_sums()
            .into_iter()
            .enumerate()
            .map(|(col, s)| {
                if s.is_finite() {
                    (1.0, s)
                } else {
                    let scale = self.column(col).fold(0.0, f64::max);
                    (scale, self.column(col).map(|w| w / scale).sum())
                }
            })
            .collect();
        let mut data = self.data.clone();
        for row in data.chunks_exact_mut(self.n) {
            for (w, &(scale, s)) in row.iter_mut().zip(&normalizers) {
                *w = *w / scale / s;
            }
        }
        Ok(TransitionMatrix { n: self.n, data })
    }
}

/// Column-stochastic transition matrix `W`: `W[i][j]` is the probability of stepping `j -> i`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    n: usize,
    data: Vec<f64>,
}

impl TransitionMatrix {
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n + col]
    }

    /// `out = W x`.
    ///
    /// Both slices must have length `n`.
    pub fn mul_vec_into(&self, x: &[f64], out: &mut [f64]) {
        debug_assert_eq!(x.len(), self.n);
        debug_assert_eq!(out.len(), self.n);
        for (o, row) in out.iter_mut().zip(self.data.chunks_exact(self.n)) {
            *o = row.iter().zip(x).map(|(w, xi)| w * xi).sum();
        }
    }
}

#[cfg(feature = "petgraph")]
impl<N, Ty, Ix> WeightedGraph for petgraph::Graph<N, f64, Ty, Ix>
where
    Ty: petgraph::EdgeType,
    Ix: petgraph::graph::IndexType,
{
    fn node_count(&self) -> usize {
        self.node_count()
    }

    fn neighbors(&self, node: usize) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .neighbors(petgraph::graph::NodeIndex::new(node))
            .map(|idx| idx.index())
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Parallel edges are summed.
    fn edge_weight(&self, source: usize, target: usize) -> f64 {
        self.edges_connecting(
            petgraph::graph::NodeIndex::new(source),
            petgraph::graph::NodeIndex::new(target),
        )
        .map(|e| *e.weight())
        .sum()
    }
}
