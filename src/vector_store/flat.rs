//! Exhaustive squared-L2 index.

use super::{squared_euclidean, Neighbor};
use crate::error::{DebriefError, Result};
use tracing::debug;

/// Flat (brute-force) nearest-neighbor index.
///
/// Vectors are stored row-major in build order; a row's position is its index
/// in the slice passed to [`FlatIndex::build`].
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dimensions: usize,
    data: Vec<f32>,
    len: usize,
}

impl FlatIndex {
    /// Build an index over `embeddings`, all of which must share one dimension.
    ///
    /// The dimension is taken from the first vector. An empty input builds an
    /// empty index with dimension zero.
    pub fn build(embeddings: &[Vec<f32>]) -> Result<Self> {
        let dimensions = embeddings.first().map(|e| e.len()).unwrap_or(0);

        if !embeddings.is_empty() && dimensions == 0 {
            return Err(DebriefError::DimensionMismatch {
                expected: 1,
                found: 0,
                position: 0,
            });
        }

        let mut data = Vec::with_capacity(dimensions * embeddings.len());
        for (position, embedding) in embeddings.iter().enumerate() {
            if embedding.len() != dimensions {
                return Err(DebriefError::DimensionMismatch {
                    expected: dimensions,
                    found: embedding.len(),
                    position,
                });
            }
            data.extend_from_slice(embedding);
        }

        debug!("Built flat index with {} vectors of dimension {}", embeddings.len(), dimensions);

        Ok(Self {
            dimensions,
            data,
            len: embeddings.len(),
        })
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Dimension shared by all stored vectors.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Return the `k` nearest stored vectors, closest first.
    ///
    /// `k` is clamped to the number of stored vectors. Equal distances keep
    /// build order.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        let k = k.min(self.len);
        if k == 0 {
            return Ok(Vec::new());
        }

        if query.len() != self.dimensions {
            return Err(DebriefError::DimensionMismatch {
                expected: self.dimensions,
                found: query.len(),
                position: 0,
            });
        }

        let mut neighbors: Vec<Neighbor> = self
            .data
            .chunks_exact(self.dimensions)
            .enumerate()
            .map(|(position, row)| Neighbor {
                position,
                distance: squared_euclidean(query, row),
            })
            .collect();

        neighbors.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        neighbors.truncate(k);

        Ok(neighbors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> FlatIndex {
        FlatIndex::build(&[
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 3.0],
            vec![5.0, 5.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_search_orders_by_distance() {
        let index = sample_index();
        let results = index.search(&[0.9, 0.1], 3).unwrap();

        let positions: Vec<usize> = results.iter().map(|n| n.position).collect();
        assert_eq!(positions, vec![1, 0, 2]);
        assert!((results[0].distance - 0.02).abs() < 1e-5);
        assert!(results.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn test_search_clamps_k_to_stored_count() {
        let index = sample_index();
        for k in 0..8 {
            let results = index.search(&[1.0, 1.0], k).unwrap();
            assert_eq!(results.len(), k.min(index.len()));
        }
    }

    #[test]
    fn test_ties_keep_build_order() {
        let index = FlatIndex::build(&[vec![1.0], vec![-1.0], vec![1.0]]).unwrap();
        let results = index.search(&[0.0], 3).unwrap();
        let positions: Vec<usize> = results.iter().map(|n| n.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_build_rejects_mismatched_dimensions() {
        let err = FlatIndex::build(&[vec![1.0, 2.0], vec![1.0, 2.0], vec![1.0]]).unwrap_err();
        match err {
            DebriefError::DimensionMismatch { expected, found, position } => {
                assert_eq!((expected, found, position), (2, 1, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_query_dimension_checked() {
        let index = sample_index();
        assert!(matches!(
            index.search(&[1.0, 2.0, 3.0], 2),
            Err(DebriefError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_index() {
        let index = FlatIndex::build(&[]).unwrap();
        assert!(index.is_empty());
        assert!(index.search(&[1.0], 3).unwrap().is_empty());
    }
}
