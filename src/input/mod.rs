//! Input processing module
//! Handles file detection, per-page text extraction, and OCR fallback

pub mod file_detector;
pub mod text_extractor;
pub mod ocr;
pub mod manager;

pub use manager::{ExtractedDocument, ExtractionStats, InputManager};
