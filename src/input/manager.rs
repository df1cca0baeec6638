//! Input manager: routes a document to its extractor and fills blank pages with OCR

use crate::config::InputConfig;
use crate::error::{Result, ActExtractorError};
use crate::input::file_detector::FileType;
use crate::input::ocr::{OcrEngine, TesseractOcr};
use crate::input::text_extractor::{PdfExtractor, PlainTextExtractor, TextExtractor};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub total_pages: usize,
    pub pages_with_text: usize,
    pub pages_with_ocr: usize,
    pub ocr_failures: usize,
}

/// Raw per-page text of one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub source: PathBuf,
    pub pages: Vec<String>,
    pub stats: ExtractionStats,
}

impl ExtractedDocument {
    pub fn raw_text(&self) -> String {
        self.pages.join("\n")
    }
}

pub struct InputManager<O: OcrEngine = TesseractOcr> {
    ocr: Option<O>,
    show_progress: bool,
}

impl InputManager<TesseractOcr> {
    pub fn from_config(config: &InputConfig) -> Self {
        let ocr = config.ocr.enabled.then(|| TesseractOcr::from_config(&config.ocr));
        Self::new(ocr)
    }
}

impl<O: OcrEngine> InputManager<O> {
    pub fn new(ocr: Option<O>) -> Self {
        Self {
            ocr,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, enable: bool) -> Self {
        self.show_progress = enable;
        self
    }

    pub async fn extract_document(&self, path: &Path) -> Result<ExtractedDocument> {
        if !path.exists() {
            return Err(ActExtractorError::InvalidInput(
                format!("File does not exist: {}", path.display())
            ));
        }

        let file_type = self.detect_file_type(path)?;

        let raw_pages = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract_pages(path).await?
            },
            FileType::Text => {
                info!("Reading pre-extracted text: {}", path.display());
                PlainTextExtractor.extract_pages(path).await?
            },
            FileType::Unknown => {
                return Err(ActExtractorError::UnsupportedFormat(
                    format!("Unsupported file type for: {}", path.display())
                ));
            }
        };

        let ocr_allowed = match (&self.ocr, file_type) {
            (Some(engine), FileType::Pdf) => {
                let available = engine.is_available();
                if !available {
                    warn!("OCR tools not found; pages without a text layer will be left empty");
                }
                available
            }
            _ => false,
        };

        Ok(self.resolve_pages(path, raw_pages, ocr_allowed).await)
    }

    /// Keep pages that carry text and try OCR on the blank ones.
    ///
    /// An OCR failure degrades that page to an empty string.
    pub async fn resolve_pages(&self, source: &Path, raw_pages: Vec<String>, ocr_allowed: bool) -> ExtractedDocument {
        let mut stats = ExtractionStats {
            total_pages: raw_pages.len(),
            ..Default::default()
        };
        info!("Total pages: {}", stats.total_pages);

        let progress = self.progress_bar(raw_pages.len());
        let mut pages = Vec::with_capacity(raw_pages.len());

        for (index, text) in raw_pages.into_iter().enumerate() {
            let page_number = index + 1;
            progress.inc(1);

            if !text.trim().is_empty() {
                stats.pages_with_text += 1;
                pages.push(text);
                continue;
            }

            let engine = match (&self.ocr, ocr_allowed) {
                (Some(engine), true) => engine,
                _ => {
                    pages.push(String::new());
                    continue;
                }
            };

            progress.set_message(format!("OCR page {}", page_number));
            info!("Page {} has no text, attempting OCR...", page_number);

            match engine.recognize_page(source, page_number).await {
                Ok(ocr_text) if !ocr_text.trim().is_empty() => {
                    stats.pages_with_ocr += 1;
                    pages.push(ocr_text);
                }
                Ok(_) => pages.push(String::new()),
                Err(e) => {
                    warn!("{}", e);
                    stats.ocr_failures += 1;
                    pages.push(String::new());
                }
            }
        }

        progress.finish_and_clear();

        ExtractedDocument {
            source: source.to_path_buf(),
            pages,
            stats,
        }
    }

    fn progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} pages {msg}") {
            bar.set_style(style.progress_chars("=> "));
        }
        bar
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ActExtractorError::InvalidInput(
                format!("File has no extension: {}", path.display())
            ))?;

        Ok(FileType::from_extension(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fails on page 2, recognizes everything else
    struct FlakyOcr;

    impl OcrEngine for FlakyOcr {
        fn is_available(&self) -> bool {
            true
        }

        async fn recognize_page(&self, _pdf_path: &Path, page_number: usize) -> Result<String> {
            if page_number == 2 {
                Err(ActExtractorError::Ocr {
                    page: page_number,
                    message: "tesseract crashed".to_string(),
                })
            } else {
                Ok(format!("scanned page {}", page_number))
            }
        }
    }

    fn pages(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn test_blank_pages_fall_back_to_ocr() {
        let manager = InputManager::new(Some(FlakyOcr));
        let doc = manager
            .resolve_pages(Path::new("act.pdf"), pages(&["text", "", "  \n", "more"]), true)
            .await;

        assert_eq!(doc.stats.total_pages, 4);
        assert_eq!(doc.stats.pages_with_text, 2);
        assert_eq!(doc.stats.pages_with_ocr, 1);
        assert_eq!(doc.stats.ocr_failures, 1);
        assert_eq!(doc.pages[1], "");
        assert_eq!(doc.pages[2], "scanned page 3");
        assert_eq!(doc.raw_text(), "text\n\nscanned page 3\nmore");
    }

    #[tokio::test]
    async fn test_ocr_not_attempted_when_disallowed() {
        let manager = InputManager::new(Some(FlakyOcr));
        let doc = manager
            .resolve_pages(Path::new("act.txt"), pages(&["", "text"]), false)
            .await;

        assert_eq!(doc.stats.pages_with_ocr, 0);
        assert_eq!(doc.stats.ocr_failures, 0);
        assert_eq!(doc.pages, pages(&["", "text"]));
    }

    #[tokio::test]
    async fn test_missing_file_is_fatal() {
        let manager: InputManager<FlakyOcr> = InputManager::new(None);
        let result = manager.extract_document(Path::new("no/such/act.pdf")).await;
        assert!(matches!(result, Err(ActExtractorError::InvalidInput(_))));
    }
}
