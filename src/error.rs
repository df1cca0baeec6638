//! Error handling for the act extractor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActExtractorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("OCR failed for page {page}: {message}")]
    Ocr { page: usize, message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Rule cannot be mapped to an extraction category: {0}")]
    UnknownRule(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, ActExtractorError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ActExtractorError {
    fn from(err: anyhow::Error) -> Self {
        ActExtractorError::Processing(format!("{:#}", err))
    }
}
