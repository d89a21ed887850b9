use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIME_PDF: &str = "application/pdf";

const PARAGRAPH_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    pub content_type: String,
    pub size_bytes: usize,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            content_type: MIME_PDF.to_string(),
            size_bytes: 0,
            created_at: Utc::now(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_size(mut self, size_bytes: usize) -> Self {
        self.size_bytes = size_bytes;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub document_id: Uuid,
    pub content: String,
    pub chunk_index: usize,
}

impl DocumentChunk {
    pub fn new(document_id: Uuid, content: impl Into<String>, chunk_index: usize) -> Self {
        Self {
            document_id,
            content: content.into(),
            chunk_index,
        }
    }
}

/// A single nearest-neighbour hit: the position of the stored vector and its
/// Euclidean distance to the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: usize,
    pub distance: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub chunk: DocumentChunk,
    pub distance: f32,
}

/// Splits text into trimmed, non-empty paragraphs separated by blank lines.
pub fn split_paragraphs(content: &str) -> Vec<String> {
    content
        .split(PARAGRAPH_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits content into paragraph chunks owned by `document_id`.
///
/// Each chunk is assigned a sequential index starting from 0, which is also
/// its identifier in the vector index.
pub fn chunk_content(document_id: Uuid, content: &str) -> Vec<DocumentChunk> {
    split_paragraphs(content)
        .into_iter()
        .enumerate()
        .map(|(index, paragraph)| DocumentChunk::new(document_id, paragraph, index))
        .collect()
}
