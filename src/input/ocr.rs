//! OCR fallback for pages without a text layer
//!
//! Pages are rasterized with `pdftoppm` (poppler-utils) and recognized with
//! `tesseract`. Both run as external processes.

use crate::config::OcrConfig;
use crate::error::{Result, ActExtractorError};
use anyhow::{bail, Context};
use log::debug;
use std::path::{Path, PathBuf};
use tokio::process::Command;

pub trait OcrEngine {
    fn is_available(&self) -> bool;

    /// Recognize the text of one page (1-based) of a PDF
    fn recognize_page(&self, pdf_path: &Path, page_number: usize) -> impl std::future::Future<Output = Result<String>> + Send;
}

#[derive(Debug, Clone)]
pub struct TesseractOcr {
    dpi: u32,
    language: String,
}

impl TesseractOcr {
    pub fn new(dpi: u32, language: impl Into<String>) -> Self {
        Self {
            dpi,
            language: language.into(),
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(config.dpi, config.language.clone())
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    async fn render_page(&self, pdf_path: &Path, page_number: usize, prefix: &Path) -> anyhow::Result<PathBuf> {
        let page = page_number.to_string();
        let output = Command::new("pdftoppm")
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-f")
            .arg(&page)
            .arg("-l")
            .arg(&page)
            .arg("-singlefile")
            .arg(pdf_path)
            .arg(prefix)
            .output()
            .await
            .context("failed to run pdftoppm")?;

        if !output.status.success() {
            bail!(
                "pdftoppm exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let image = prefix.with_extension("png");
        if !image.exists() {
            bail!("pdftoppm produced no image for page {}", page_number);
        }
        Ok(image)
    }

    async fn run_tesseract(&self, image: &Path) -> anyhow::Result<String> {
        let output = Command::new("tesseract")
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .await
            .context("failed to run tesseract")?;

        if !output.status.success() {
            bail!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn recognize(&self, pdf_path: &Path, page_number: usize) -> anyhow::Result<String> {
        let temp_dir = tempfile::tempdir().context("failed to create directory for page image")?;
        let prefix = temp_dir.path().join("page");

        let image = self.render_page(pdf_path, page_number, &prefix).await?;
        debug!("Rendered page {} at {} dpi to {}", page_number, self.dpi, image.display());

        self.run_tesseract(&image).await
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new(300, "eng")
    }
}

impl OcrEngine for TesseractOcr {
    fn is_available(&self) -> bool {
        let pdftoppm = std::process::Command::new("pdftoppm")
            .arg("-v")
            .output()
            .is_ok();

        let tesseract = std::process::Command::new("tesseract")
            .arg("--version")
            .output()
            .is_ok();

        if !pdftoppm {
            debug!("pdftoppm not found - install poppler-utils for OCR support");
        }
        if !tesseract {
            debug!("tesseract not found - install tesseract-ocr for OCR support");
        }

        pdftoppm && tesseract
    }

    async fn recognize_page(&self, pdf_path: &Path, page_number: usize) -> Result<String> {
        self.recognize(pdf_path, page_number)
            .await
            .map_err(|e| ActExtractorError::Ocr {
                page: page_number,
                message: format!("{:#}", e),
            })
    }
}
