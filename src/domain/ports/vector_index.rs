use crate::domain::{errors::DomainError, Embedding, SearchHit};

/// Exact nearest-neighbour index over chunk embeddings.
///
/// Identifiers are positions in the slice passed to [`VectorIndex::build`].
/// `search` may run concurrently; `build` is exclusive.
pub trait VectorIndex: Send + Sync {
    fn build(&self, embeddings: Vec<Embedding>) -> Result<(), DomainError>;
    fn search(&self, query: &Embedding, top_k: usize) -> Result<Vec<SearchHit>, DomainError>;
    fn len(&self) -> usize;
    fn dimension(&self) -> Option<usize>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Creates empty indexes, one per knowledge base.
pub trait VectorIndexFactory: Send + Sync {
    fn create(&self) -> Box<dyn VectorIndex>;
}

impl<F> VectorIndexFactory for F
where
    F: Fn() -> Box<dyn VectorIndex> + Send + Sync,
{
    fn create(&self) -> Box<dyn VectorIndex> {
        self()
    }
}
