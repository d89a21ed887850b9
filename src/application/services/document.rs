use std::sync::Arc;
use tracing::instrument;

use crate::domain::{chunk_content, ports::TextExtractor, Document, DocumentChunk, DomainError};

pub struct DocumentService {
    extractor: Arc<dyn TextExtractor>,
}

impl DocumentService {
    pub fn new(extractor: Arc<dyn TextExtractor>) -> Self {
        Self { extractor }
    }

    pub fn validate_media_type(&self, content_type: &str) -> Result<(), DomainError> {
        if self.extractor.supports(content_type) {
            Ok(())
        } else {
            Err(DomainError::invalid_media_type(content_type))
        }
    }

    /// Runs extraction on the blocking pool. A panic inside the parser is
    /// reported as an extraction failure.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn extract(&self, bytes: Vec<u8>) -> Result<String, DomainError> {
        let extractor = self.extractor.clone();
        tokio::task::spawn_blocking(move || extractor.extract(&bytes))
            .await
            .map_err(|e| DomainError::extraction(format!("extractor aborted: {e}")))?
    }

    /// Extracts and chunks one uploaded file.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn ingest(
        &self,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(Document, String, Vec<DocumentChunk>), DomainError> {
        let doc = Document::new(name)
            .with_content_type(content_type)
            .with_size(bytes.len());
        let text = self.extract(bytes).await?;
        let chunks = chunk_content(doc.id, &text);

        if chunks.is_empty() {
            tracing::warn!(document_id = %doc.id, "document contains no extractable text");
        }

        Ok((doc, text, chunks))
    }
}
