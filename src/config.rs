//! Configuration management for the act extractor

use crate::error::{Result, ActExtractorError};
use crate::processing::rules::DEFAULT_RULES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub input: InputConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub pdf_path: PathBuf,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    pub enabled: bool,
    pub dpi: u32,
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Keywords listed in the run report
    pub keyword_count: usize,
    pub summary_sentences: usize,
    /// Keywords used to score summary sentences
    pub summary_keywords: usize,
    /// Rules scoring below this confidence are flagged in the report
    pub confidence_floor: u8,
    pub rules: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub format: OutputFormat,
    pub color_output: bool,
    pub show_progress: bool,
    pub files: ArtifactNames,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactNames {
    pub raw_text: String,
    pub cleaned_text: String,
    pub summary: String,
    pub fields: String,
    pub rule_checks: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputConfig {
                pdf_path: PathBuf::from("act.pdf"),
                ocr: OcrConfig {
                    enabled: true,
                    dpi: 300,
                    language: "eng".to_string(),
                },
            },
            analysis: AnalysisConfig::default(),
            output: OutputConfig {
                dir: PathBuf::from("output"),
                format: OutputFormat::Console,
                color_output: true,
                show_progress: true,
                files: ArtifactNames::default(),
            },
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            keyword_count: 20,
            summary_sentences: 10,
            summary_keywords: 30,
            confidence_floor: 40,
            rules: DEFAULT_RULES.iter().map(|(statement, _)| statement.to_string()).collect(),
        }
    }
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            raw_text: "extracted_text_raw.txt".to_string(),
            cleaned_text: "extracted_text.txt".to_string(),
            summary: "summary.json".to_string(),
            fields: "fields.json".to_string(),
            rule_checks: "rule_checks.json".to_string(),
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the user config dir (creating it with defaults)
    pub fn load(custom_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(ActExtractorError::Configuration(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            return Self::from_file(path);
        }

        let config_path = Self::config_path();

        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ActExtractorError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ActExtractorError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("act-extractor")
            .join("config.toml")
    }
}
