//! The single live knowledge base and the lock discipline around it.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::application::services::AnswerGenerator;
use crate::domain::{ports::VectorIndex, Document, DocumentChunk, DomainError};

/// Everything built from one uploaded document. Immutable once stored.
pub struct KnowledgeBase {
    pub document: Document,
    pub text: String,
    pub chunks: Vec<DocumentChunk>,
    pub embedding_model: String,
    pub built_at: DateTime<Utc>,
    index: Box<dyn VectorIndex>,
    generator: AnswerGenerator,
}

impl KnowledgeBase {
    pub fn new(
        document: Document,
        text: String,
        chunks: Vec<DocumentChunk>,
        index: Box<dyn VectorIndex>,
        generator: AnswerGenerator,
        embedding_model: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if index.len() != chunks.len() {
            return Err(DomainError::internal(format!(
                "index holds {} vectors for {} chunks",
                index.len(),
                chunks.len()
            )));
        }

        Ok(Self {
            document,
            text,
            chunks,
            embedding_model: embedding_model.into(),
            built_at: Utc::now(),
            index,
            generator,
        })
    }

    pub fn index(&self) -> &dyn VectorIndex {
        self.index.as_ref()
    }

    pub fn generator(&self) -> &AnswerGenerator {
        &self.generator
    }

    pub fn chunk(&self, id: usize) -> Result<&DocumentChunk, DomainError> {
        self.chunks
            .get(id)
            .ok_or_else(|| DomainError::internal(format!("index returned unknown chunk id {id}")))
    }
}

/// Holds at most one [`KnowledgeBase`].
///
/// Readers clone the `Arc` and drop the lock before doing model work. Writers
/// build a complete base first, holding [`SessionStore::rebuild_lock`], and
/// then swap it in under the write lock.
pub struct SessionStore {
    current: RwLock<Option<Arc<KnowledgeBase>>>,
    rebuild: Mutex<()>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
            rebuild: Mutex::new(()),
        }
    }

    pub async fn current(&self) -> Result<Arc<KnowledgeBase>, DomainError> {
        self.snapshot().await.ok_or(DomainError::NoKnowledgeBase)
    }

    pub async fn snapshot(&self) -> Option<Arc<KnowledgeBase>> {
        self.current.read().await.clone()
    }

    pub async fn is_loaded(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Serializes rebuilds. Hold the guard from the start of a build until
    /// after [`SessionStore::replace`].
    pub async fn rebuild_lock(&self) -> MutexGuard<'_, ()> {
        self.rebuild.lock().await
    }

    /// Stores `kb` and returns the one it displaced.
    pub async fn replace(&self, kb: KnowledgeBase) -> Option<Arc<KnowledgeBase>> {
        self.current.write().await.replace(Arc::new(kb))
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
