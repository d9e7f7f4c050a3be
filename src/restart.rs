//! Random walk with restart (RWR).
//!
//! With `W` the column-normalized adjacency matrix and `p0` the normalized seed vector, the
//! walker's distribution evolves as
//! \[
//!   p_{t+1} = (1 - r) W p_t + r p_0
//! \]
//! starting from `p_0`. Iteration stops at the first step whose L∞ change
//! \(\max_i |p_{t+1,i} - p_{t,i}|\) is strictly below the threshold.
//!
//! Reference: Köhler et al., "Walking the interactome for prioritization of candidate disease
//! genes", AJHG 2008 (<https://doi.org/10.1016/j.ajhg.2008.02.013>).

use crate::graph::{AdjacencyMatrix, TransitionMatrix};
use crate::topk::top_k;
use crate::{Error, Result};
use tracing::{debug, trace, warn};

/// Default convergence threshold on the L∞ change between iterates.
pub const DEFAULT_STOP_THRESHOLD: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RwrConfig {
    /// Probability of teleporting back to the seeds at each step, in `[0, 1]`.
    pub restart: f64,
    /// Stop once the L∞ change drops below this (must be > 0).
    pub tolerance: f64,
    /// Hard cap on iterations; reaching it is [`Error::NonConvergence`].
    pub max_iterations: usize,
}

impl Default for RwrConfig {
    fn default() -> Self {
        Self { restart: 0.7, tolerance: DEFAULT_STOP_THRESHOLD, max_iterations: 100_000 }
    }
}

impl RwrConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.restart) {
            return Err(Error::InvalidParameter(format!(
                "restart probability must be in [0, 1], got {}",
                self.restart
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "stop threshold must be finite and > 0, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidParameter("max_iterations must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Outcome of a converged walk.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RwrRun {
    /// Stationary visit probability per node.
    pub probabilities: Vec<f64>,
    /// Iterations performed.
    pub steps: usize,
    /// L∞ change of the final iteration.
    pub change: f64,
}

impl RwrRun {
    /// The `k` nodes closest to the seeds, highest probability first.
    pub fn top_k(&self, k: usize) -> Vec<(usize, f64)> {
        top_k(&self.probabilities, k)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WalkState {
    Iterating,
    /// Terminal: further calls to [`RestartWalk::step`] do nothing.
    Converged,
}

/// Step-wise RWR driver.
///
/// Owns its transition matrix and state buffers; the caller's matrix and seeds are only read.
#[derive(Debug, Clone)]
pub struct RestartWalk {
    transition: TransitionMatrix,
    config: RwrConfig,
    restart_vector: Vec<f64>,
    current: Vec<f64>,
    next: Vec<f64>,
    steps: usize,
    change: f64,
    state: WalkState,
}

impl RestartWalk {
    /// Validate inputs, normalize the matrix and seeds, and position the walker at `p0`.
    pub fn new(adjacency: &AdjacencyMatrix, seeds: &[f64], config: RwrConfig) -> Result<Self> {
        config.validate()?;
        let transition = adjacency.column_normalized()?;
        let restart_vector = normalized_seeds(seeds, adjacency.n())?;
        debug!(
            n = adjacency.n(),
            restart = config.restart,
            tolerance = config.tolerance,
            max_iterations = config.max_iterations,
            "starting random walk with restart"
        );
        Ok(Self {
            transition,
            config,
            current: restart_vector.clone(),
            next: vec![0.0; restart_vector.len()],
            restart_vector,
            steps: 0,
            change: f64::INFINITY,
            state: WalkState::Iterating,
        })
    }

    /// Perform one update and return its L∞ change.
    ///
    /// Once converged this returns the last change without iterating.
    pub fn step(&mut self) -> Result<f64> {
        if self.state == WalkState::Converged {
            return Ok(self.change);
        }

        let r = self.config.restart;
        self.transition.mul_vec_into(&self.current, &mut self.next);
        let mut change = 0.0f64;
        let mut finite = true;
        let pairs = self.next.iter_mut().zip(&self.current).zip(&self.restart_vector);
        for ((next, &cur), &p0) in pairs {
            *next = (1.0 - r) * *next + r * p0;
            finite &= next.is_finite();
            change = change.max((*next - cur).abs());
        }
        self.steps += 1;
        if !finite {
            warn!(step = self.steps, "non-finite probability in random walk iterate");
            return Err(Error::NumericalInstability { step: self.steps });
        }

        std::mem::swap(&mut self.current, &mut self.next);
        self.change = change;
        trace!(step = self.steps, change, "rwr step");
        if change < self.config.tolerance {
            self.state = WalkState::Converged;
            debug!(steps = self.steps, change, "random walk with restart converged");
        }
        Ok(change)
    }

    /// Iterate until converged or the iteration cap is reached.
    pub fn run(mut self) -> Result<RwrRun> {
        while self.state == WalkState::Iterating {
            if self.steps >= self.config.max_iterations {
                warn!(
                    steps = self.steps,
                    change = self.change,
                    tolerance = self.config.tolerance,
                    "random walk with restart hit the iteration cap"
                );
                return Err(Error::NonConvergence {
                    steps: self.steps,
                    change: self.change,
                    threshold: self.config.tolerance,
                });
            }
            self.step()?;
        }
        Ok(RwrRun { probabilities: self.current, steps: self.steps, change: self.change })
    }

    pub fn state(&self) -> WalkState {
        self.state
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// L∞ change of the last step (`inf` before the first one).
    pub fn change(&self) -> f64 {
        self.change
    }

    /// Current visit distribution.
    pub fn probabilities(&self) -> &[f64] {
        &self.current
    }

    /// Normalized seeds `p0`, the teleport target.
    pub fn restart_vector(&self) -> &[f64] {
        &self.restart_vector
    }

    pub fn into_probabilities(self) -> Vec<f64> {
        self.current
    }
}

fn normalized_seeds(seeds: &[f64], n: usize) -> Result<Vec<f64>> {
    if seeds.len() != n {
        return Err(Error::DimensionMismatch(format!(
            "seed vector length must equal node count (len={} node_count={n})",
            seeds.len()
        )));
    }
    if let Some((i, &s)) = seeds.iter().enumerate().find(|(_, s)| !s.is_finite() || **s < 0.0) {
        return Err(Error::InvalidSeeds(format!(
            "seed {i} must be finite and non-negative, got {s}"
        )));
    }
    let sum: f64 = seeds.iter().sum();
    if sum <= 0.0 {
        return Err(Error::InvalidSeeds("seed weights must have positive total mass".to_string()));
    }
    if sum.is_finite() {
        return Ok(seeds.iter().map(|&s| s / sum).collect());
    }
    // Finite seeds whose total overflows: scale by the largest first.
    let scale = seeds.iter().copied().fold(0.0, f64::max);
    let scaled_sum: f64 = seeds.iter().map(|&s| s / scale).sum();
    Ok(seeds.iter().map(|&s| s / scale / scaled_sum).collect())
}

/// Run RWR to convergence.
pub fn random_walk_with_restart(
    adjacency: &AdjacencyMatrix,
    seeds: &[f64],
    config: RwrConfig,
) -> Result<RwrRun> {
    RestartWalk::new(adjacency, seeds, config)?.run()
}

/// Random walk with restart from `seeds`, returning `(probabilities, steps)`.
///
/// - `r`: restart probability.
/// - `seeds`: initial walker weights, one per node; normalized internally.
/// - `adjacency`: entry `(i, j)` is the weight of edge `j -> i`.
/// - `stop_threshold`: walking is complete once no probability changes by this much between
///   two iterations.
pub fn walk(
    r: f64,
    seeds: &[f64],
    adjacency: &AdjacencyMatrix,
    stop_threshold: f64,
) -> Result<(Vec<f64>, usize)> {
    let config = RwrConfig { restart: r, tolerance: stop_threshold, ..RwrConfig::default() };
    let run = random_walk_with_restart(adjacency, seeds, config)?;
    Ok((run.probabilities, run.steps))
}

/// [`walk`] with [`DEFAULT_STOP_THRESHOLD`].
pub fn walk_default(
    r: f64,
    seeds: &[f64],
    adjacency: &AdjacencyMatrix,
) -> Result<(Vec<f64>, usize)> {
    walk(r, seeds, adjacency, DEFAULT_STOP_THRESHOLD)
}
