//! Document structures shared by the analysis stages

use crate::input::ExtractedDocument;
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub raw: String,
    pub cleaned: String,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub source: PathBuf,
    pub raw_chars: usize,
    pub cleaned_chars: usize,
    pub word_count: usize,
}

impl Document {
    pub fn new(raw: String, cleaned: String, source: PathBuf) -> Self {
        let metadata = DocumentMetadata {
            source,
            raw_chars: raw.chars().count(),
            cleaned_chars: cleaned.chars().count(),
            word_count: cleaned.split_whitespace().count(),
        };

        Self {
            raw,
            cleaned,
            metadata,
        }
    }

    /// Join the extracted pages and normalize them
    pub fn from_extracted(extracted: &ExtractedDocument, processor: &TextProcessor) -> Self {
        let raw = extracted.raw_text();
        let cleaned = processor.clean_text(&raw);
        Self::new(raw, cleaned, extracted.source.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.cleaned.is_empty()
    }
}
