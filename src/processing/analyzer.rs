//! Analysis engine composing the extractive stages over one document

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::input::{ExtractedDocument, ExtractionStats};
use crate::processing::document::Document;
use crate::processing::fields::{FieldExtraction, FieldExtractor};
use crate::processing::keywords::KeywordRanker;
use crate::processing::rules::{Rule, RuleCheckResult, RuleEvaluator};
use crate::processing::summarizer::{ExtractiveSummarizer, Summary};
use crate::processing::text_processor::TextProcessor;
use log::{debug, info, warn};
use std::time::Instant;

/// Main analysis engine that coordinates all pipeline stages
pub struct AnalysisEngine {
    text_processor: TextProcessor,
    keyword_ranker: KeywordRanker,
    summarizer: ExtractiveSummarizer,
    field_extractor: FieldExtractor,
    rule_evaluator: RuleEvaluator,
    rules: Vec<Rule>,
    config: AnalysisConfig,
}

/// Everything produced for one run
#[derive(Debug, Clone)]
pub struct ActAnalysis {
    pub document: Document,
    pub stats: ExtractionStats,
    pub keywords: Vec<String>,
    pub summary: Summary,
    pub fields: FieldExtraction,
    pub rule_checks: Vec<RuleCheckResult>,
    pub processing_time_ms: u64,
}

impl ActAnalysis {
    pub fn low_confidence_checks(&self, floor: u8) -> Vec<&RuleCheckResult> {
        self.rule_checks
            .iter()
            .filter(|check| check.confidence < floor)
            .collect()
    }
}

impl AnalysisEngine {
    /// Compile every stage; fails on an unclassifiable rule statement
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        let rules = Rule::parse_all(&config.rules)?;
        debug!("Loaded {} rules", rules.len());

        Ok(Self {
            text_processor: TextProcessor::new(),
            keyword_ranker: KeywordRanker::new(),
            summarizer: ExtractiveSummarizer::new()?,
            field_extractor: FieldExtractor::new()?,
            rule_evaluator: RuleEvaluator::new()?,
            rules,
            config: config.clone(),
        })
    }

    pub fn analyze(&self, extracted: ExtractedDocument) -> Result<ActAnalysis> {
        let start_time = Instant::now();

        info!("Cleaning extracted text");
        let document = Document::from_extracted(&extracted, &self.text_processor);
        debug!(
            "Cleaned {} raw chars down to {}",
            document.metadata.raw_chars, document.metadata.cleaned_chars
        );
        if document.is_empty() {
            warn!("No text recovered from {}", extracted.source.display());
        }

        info!("Ranking keywords");
        let keywords = self
            .keyword_ranker
            .top_keywords(&document.cleaned, self.config.keyword_count);

        info!("Generating extractive summary");
        let summary = self.summarizer.summarize(
            &document.cleaned,
            self.config.summary_sentences,
            self.config.summary_keywords,
        )?;
        debug!("Summary has {} bullets", summary.bullets.len());

        info!("Extracting compliance fields");
        let fields = self.field_extractor.extract(&document.cleaned);
        for category in fields.empty_categories() {
            warn!("No {} found in the extracted text", category);
        }

        info!("Evaluating {} compliance rules", self.rules.len());
        let rule_checks = self
            .rule_evaluator
            .evaluate(&self.rules, &fields, &document.cleaned);

        let processing_time_ms = start_time.elapsed().as_millis() as u64;
        info!("Analysis completed in {}ms", processing_time_ms);

        Ok(ActAnalysis {
            document,
            stats: extracted.stats,
            keywords,
            summary,
            fields,
            rule_checks,
            processing_time_ms,
        })
    }
}
