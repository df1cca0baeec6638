//! Run report: the data behind the final summary of a run

use crate::input::ExtractionStats;
use crate::output::artifacts::ArtifactInfo;
use crate::processing::category::Category;
use crate::processing::rules::RuleCheckResult;
use crate::processing::ActAnalysis;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;

/// Keywords listed in the report
const REPORT_KEYWORDS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub source: PathBuf,
    pub stats: ExtractionStats,
    pub text: TextStats,
    pub artifacts: Vec<ArtifactInfo>,
    pub top_keywords: Vec<String>,
    pub summary_bullets: usize,
    pub categories: Vec<CategoryReport>,
    pub rule_checks: Vec<RuleCheckResult>,
    pub confidence_floor: u8,
    /// Statements of the rules scoring below the floor
    pub low_confidence: Vec<String>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStats {
    pub raw_chars: usize,
    pub cleaned_chars: usize,
    pub word_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: Category,
    pub snippets: usize,
    /// Length of the persisted text, fallback message included
    pub chars: usize,
    pub empty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: SystemTime,
    pub extractor_version: String,
    pub processing_time_ms: u64,
}

impl RunReport {
    pub fn build(analysis: &ActAnalysis, artifacts: Vec<ArtifactInfo>, confidence_floor: u8) -> Self {
        let categories = analysis
            .fields
            .iter()
            .map(|matches| CategoryReport {
                category: matches.category,
                snippets: matches.len(),
                chars: matches.rendered().chars().count(),
                empty: matches.is_empty(),
            })
            .collect();

        let low_confidence = analysis
            .low_confidence_checks(confidence_floor)
            .into_iter()
            .map(|check| check.rule.clone())
            .collect();

        Self {
            source: analysis.document.metadata.source.clone(),
            stats: analysis.stats.clone(),
            text: TextStats {
                raw_chars: analysis.document.metadata.raw_chars,
                cleaned_chars: analysis.document.metadata.cleaned_chars,
                word_count: analysis.document.metadata.word_count,
            },
            artifacts,
            top_keywords: analysis.keywords.iter().take(REPORT_KEYWORDS).cloned().collect(),
            summary_bullets: analysis.summary.bullets.len(),
            categories,
            rule_checks: analysis.rule_checks.clone(),
            confidence_floor,
            low_confidence,
            metadata: ReportMetadata {
                generated_at: SystemTime::now(),
                extractor_version: env!("CARGO_PKG_VERSION").to_string(),
                processing_time_ms: analysis.processing_time_ms,
            },
        }
    }

    pub fn passed(&self) -> usize {
        self.rule_checks.iter().filter(|check| check.passed()).count()
    }

    pub fn missing_artifacts(&self) -> Vec<&ArtifactInfo> {
        self.artifacts.iter().filter(|info| !info.exists).collect()
    }
}
