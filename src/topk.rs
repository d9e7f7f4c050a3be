//! Ranking nodes by proximity score.

use ordered_float::NotNan;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// The `k` highest scores as `(node, score)`, best first.
///
/// Non-finite and non-positive scores are skipped. Equal scores rank the lower node id first.
pub fn top_k(scores: &[f64], k: usize) -> Vec<(usize, f64)> {
    if k == 0 || scores.is_empty() {
        return Vec::new();
    }
    // Min-heap of the best k so far; `Reverse(i)` makes the larger id the one to evict on ties.
    let mut heap: BinaryHeap<Reverse<(NotNan<f64>, Reverse<usize>)>> =
        BinaryHeap::with_capacity(k + 1);
    for (i, &score) in scores.iter().enumerate() {
        if !score.is_finite() || score <= 0.0 {
            continue;
        }
        let Ok(s) = NotNan::new(score) else { continue };
        let entry = Reverse((s, Reverse(i)));
        if heap.len() < k {
            heap.push(entry);
        } else if heap.peek().is_some_and(|min| entry < *min) {
            heap.pop();
            heap.push(entry);
        }
    }
    let mut ranked: Vec<(NotNan<f64>, Reverse<usize>)> =
        heap.into_iter().map(|Reverse(e)| e).collect();
    ranked.sort_unstable_by(|a, b| b.cmp(a));
    ranked.into_iter().map(|(s, Reverse(i))| (i, s.into_inner())).collect()
}

/// Rescale `scores` in place to sum to 1. Returns the original sum.
///
/// Scores are left unchanged when the sum is not positive.
pub fn normalize(scores: &mut [f64]) -> f64 {
    let sum: f64 = scores.iter().sum();
    if sum > 0.0 {
        for s in scores.iter_mut() {
            *s /= sum;
        }
    }
    sum
}
