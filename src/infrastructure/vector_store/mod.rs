mod in_memory;

pub use in_memory::InMemoryVectorIndex;

use crate::domain::ports::VectorIndex;

pub fn in_memory_factory() -> Box<dyn VectorIndex> {
    Box::new(InMemoryVectorIndex::new())
}
