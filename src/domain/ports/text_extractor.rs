use crate::domain::errors::DomainError;

/// Turns raw document bytes into plain text. Implementations are CPU-bound
/// and are called from the blocking thread pool.
pub trait TextExtractor: Send + Sync {
    fn supports(&self, content_type: &str) -> bool;
    fn extract(&self, bytes: &[u8]) -> Result<String, DomainError>;
}
