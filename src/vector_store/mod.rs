//! Vector index for chunk embeddings.
//!
//! Only an exact, in-memory index is provided. Meeting transcripts produce tens
//! of chunks, so exhaustive search is both cheap and reproducible.

mod flat;

pub use flat::FlatIndex;

use serde::{Deserialize, Serialize};

/// A stored vector close to a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// Row of the stored vector, in build order.
    pub position: usize,
    /// Squared Euclidean distance to the query (lower is closer).
    pub distance: f32,
}

/// Compute the squared Euclidean distance between two vectors.
///
/// Vectors of different lengths are compared over their common prefix; callers
/// validate dimensions before getting here.
pub fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_euclidean() {
        let a = vec![1.0, 0.0, 0.0];
        assert!(squared_euclidean(&a, &a).abs() < 1e-6);

        let b = vec![0.0, 1.0, 0.0];
        assert!((squared_euclidean(&a, &b) - 2.0).abs() < 1e-6);

        let c = vec![4.0, 4.0, 0.0];
        assert!((squared_euclidean(&a, &c) - 25.0).abs() < 1e-6);
    }
}
