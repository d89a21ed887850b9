use crate::domain::{ports::TextExtractor, DomainError, MIME_PDF};

/// Extracts the text of every page, concatenated in page order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    fn supports(&self, content_type: &str) -> bool {
        content_type == MIME_PDF
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, DomainError> {
        if !bytes.starts_with(b"%PDF") {
            return Err(DomainError::extraction("missing %PDF header"));
        }
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| DomainError::extraction(e.to_string()))
    }
}
