use std::sync::RwLock;

use crate::domain::{ports::VectorIndex, DomainError, Embedding, SearchHit};

/// Brute-force L2 index. `None` until the first `build`.
pub struct InMemoryVectorIndex {
    vectors: RwLock<Option<Vec<Embedding>>>,
}

impl InMemoryVectorIndex {
    pub fn new() -> Self {
        Self {
            vectors: RwLock::new(None),
        }
    }
}

impl Default for InMemoryVectorIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorIndex for InMemoryVectorIndex {
    fn build(&self, embeddings: Vec<Embedding>) -> Result<(), DomainError> {
        if let Some(first) = embeddings.first() {
            let expected = first.dimension();
            if let Some(bad) = embeddings.iter().find(|e| e.dimension() != expected) {
                return Err(DomainError::DimensionMismatch {
                    expected,
                    actual: bad.dimension(),
                });
            }
        }

        let mut store = self
            .vectors
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        *store = Some(embeddings);
        Ok(())
    }

    fn search(&self, query: &Embedding, top_k: usize) -> Result<Vec<SearchHit>, DomainError> {
        let store = self
            .vectors
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;
        let vectors = store.as_ref().ok_or(DomainError::IndexNotBuilt)?;

        if let Some(first) = vectors.first() {
            if first.dimension() != query.dimension() {
                return Err(DomainError::DimensionMismatch {
                    expected: first.dimension(),
                    actual: query.dimension(),
                });
            }
        }

        let mut hits: Vec<SearchHit> = vectors
            .iter()
            .enumerate()
            .map(|(id, embedding)| SearchHit {
                id,
                distance: query.euclidean_distance(embedding),
            })
            .collect();

        // Stable sort keeps insertion order among equal distances.
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(top_k);
        Ok(hits)
    }

    fn len(&self) -> usize {
        self.vectors
            .read()
            .map(|store| store.as_ref().map_or(0, Vec::len))
            .unwrap_or(0)
    }

    fn dimension(&self) -> Option<usize> {
        self.vectors
            .read()
            .ok()
            .and_then(|store| store.as_ref()?.first().map(Embedding::dimension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with(vectors: Vec<Vec<f32>>) -> InMemoryVectorIndex {
        let index = InMemoryVectorIndex::new();
        index
            .build(vectors.into_iter().map(Embedding::new).collect())
            .unwrap();
        index
    }

    #[test]
    fn test_search_before_build() {
        let index = InMemoryVectorIndex::new();
        let err = index.search(&Embedding::new(vec![1.0]), 1).unwrap_err();
        assert!(matches!(err, DomainError::IndexNotBuilt));
    }

    #[test]
    fn test_single_vector_self_distance() {
        let index = index_with(vec![vec![0.3, 0.4, 0.5]]);
        let hits = index.search(&Embedding::new(vec![0.3, 0.4, 0.5]), 1).unwrap();

        assert_eq!(hits, vec![SearchHit { id: 0, distance: 0.0 }]);
    }

    #[test]
    fn test_search_orders_by_distance() {
        let index = index_with(vec![vec![10.0, 0.0], vec![1.0, 0.0], vec![5.0, 0.0]]);
        let hits = index.search(&Embedding::new(vec![0.0, 0.0]), 2).unwrap();

        assert_eq!(hits.iter().map(|h| h.id).collect::<Vec<_>>(), vec![1, 2]);
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn test_search_k_larger_than_index() {
        let index = index_with(vec![vec![1.0], vec![2.0], vec![3.0]]);
        let hits = index.search(&Embedding::new(vec![0.0]), 10).unwrap();
        assert_eq!(hits.len(), 3);
        assert!(index.search(&Embedding::new(vec![0.0]), 0).unwrap().is_empty());
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let index = index_with(vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![-1.0, 0.0]]);
        let hits = index.search(&Embedding::new(vec![0.0, 0.0]), 3).unwrap();
        assert_eq!(hits.iter().map(|h| h.id).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_build_replaces_contents() {
        let index = index_with(vec![vec![1.0], vec![2.0]]);
        index.build(vec![Embedding::new(vec![7.0])]).unwrap();

        assert_eq!(index.len(), 1);
        let hits = index.search(&Embedding::new(vec![7.0]), 5).unwrap();
        assert_eq!(hits, vec![SearchHit { id: 0, distance: 0.0 }]);
    }

    #[test]
    fn test_empty_build_is_searchable() {
        let index = index_with(vec![]);
        assert!(index.is_empty());
        assert_eq!(index.dimension(), None);
        assert!(index.search(&Embedding::new(vec![1.0]), 3).unwrap().is_empty());
    }

    #[test]
    fn test_dimension_mismatch() {
        let index = InMemoryVectorIndex::new();
        let err = index
            .build(vec![Embedding::new(vec![1.0, 2.0]), Embedding::new(vec![1.0])])
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        ));

        let index = index_with(vec![vec![1.0, 2.0]]);
        assert_eq!(index.dimension(), Some(2));
        let err = index.search(&Embedding::new(vec![1.0]), 1).unwrap_err();
        assert!(matches!(err, DomainError::DimensionMismatch { .. }));
    }
}
