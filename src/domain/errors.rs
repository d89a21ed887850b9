use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unsupported media type: {0}")]
    InvalidMediaType(String),

    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("No knowledge base available. Please upload a PDF first.")]
    NoKnowledgeBase,

    #[error("Vector index has not been built")]
    IndexNotBuilt,

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl DomainError {
    pub fn invalid_media_type(content_type: impl Into<String>) -> Self {
        Self::InvalidMediaType(content_type.into())
    }

    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn external(msg: impl Into<String>) -> Self {
        Self::ExternalService(msg.into())
    }

    /// Errors caused by the caller rather than by the service or its models.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidMediaType(_) | Self::Validation(_) | Self::NoKnowledgeBase
        )
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
