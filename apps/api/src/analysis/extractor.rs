//! PDF text extraction.
//!
//! Extraction failure is an explicit, typed error surfaced to the caller —
//! the pipeline never substitutes placeholder content for an unreadable
//! file, so a returned score always describes the uploaded document.

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF parsing failed: {0}")]
    Parse(String),

    #[error("no text content found in PDF")]
    Empty,
}

/// Extracts plain text from an in-memory PDF buffer.
///
/// Output is deterministic for the same input bytes. Page breaks arrive as
/// newlines from the underlying decomposition. An unparsable buffer yields
/// `Parse`; a structurally valid PDF with no extractable text (scanned or
/// image-only) yields `Empty`.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let text =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Parse(e.to_string()))?;

    let text = text.trim();
    if text.is_empty() {
        return Err(ExtractError::Empty);
    }

    debug!("PDF extraction succeeded: {} chars", text.len());
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_fail_with_parse_error() {
        let err = extract_pdf_text(b"this is not a pdf").unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }

    #[test]
    fn test_empty_buffer_fails_with_parse_error() {
        let err = extract_pdf_text(b"").unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }

    #[test]
    fn test_truncated_header_fails_with_parse_error() {
        // A correct magic number with no document body behind it.
        let err = extract_pdf_text(b"%PDF-1.7\n").unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }

    #[test]
    fn test_parse_error_message_carries_reason() {
        let err = extract_pdf_text(b"junk").unwrap_err();
        assert!(err.to_string().starts_with("PDF parsing failed:"));
    }

    #[test]
    fn test_empty_error_message() {
        assert_eq!(ExtractError::Empty.to_string(), "no text content found in PDF");
    }
}
