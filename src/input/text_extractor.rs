//! Per-page text extraction from supported file formats

use crate::error::{Result, ActExtractorError};
use std::path::Path;
use tokio::fs;

/// Page separator emitted by `pdftotext` and friends
const FORM_FEED: char = '\x0c';

pub trait TextExtractor {
    /// Extract one string per page, in page order
    fn extract_pages(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let bytes = fs::read(path).await.map_err(|e| {
            ActExtractorError::Io(e)
        })?;

        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| {
            ActExtractorError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;
        Ok(pages)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            ActExtractorError::Io(e)
        })?;
        Ok(split_pages(&content))
    }
}

/// Split pre-extracted text into pages on form feeds; a single trailing one is dropped
pub fn split_pages(content: &str) -> Vec<String> {
    let content = content.strip_suffix(FORM_FEED).unwrap_or(content);
    content.split(FORM_FEED).map(|page| page.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages_on_form_feed() {
        let pages = split_pages("Page one\n\x0cPage two\n\x0c");
        assert_eq!(pages, vec!["Page one\n".to_string(), "Page two\n".to_string()]);
    }

    #[test]
    fn test_text_without_form_feed_is_one_page() {
        let pages = split_pages("Only page");
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_blank_pages_are_preserved() {
        let pages = split_pages("First\x0c\x0cThird");
        assert_eq!(pages.len(), 3);
        assert!(pages[1].is_empty());
    }
}
