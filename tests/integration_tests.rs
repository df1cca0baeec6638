//! Integration tests for the act extractor

use act_extractor::config::{AnalysisConfig, ArtifactNames};
use act_extractor::error::ActExtractorError;
use act_extractor::input::ocr::TesseractOcr;
use act_extractor::input::InputManager;
use act_extractor::output::{ArtifactWriter, FieldsArtifact, RunReport};
use act_extractor::processing::rules::{RuleCheckResult, RuleStatus};
use act_extractor::processing::summarizer::Summary;
use act_extractor::processing::AnalysisEngine;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SAMPLE_ACT: &str = "tests/fixtures/sample_act.txt";

fn manager() -> InputManager<TesseractOcr> {
    InputManager::new(None)
}

#[tokio::test]
async fn test_text_extraction_keeps_page_breaks() {
    let doc = manager().extract_document(Path::new(SAMPLE_ACT)).await.unwrap();

    assert_eq!(doc.stats.total_pages, 4);
    assert_eq!(doc.stats.pages_with_text, 4);
    assert_eq!(doc.stats.pages_with_ocr, 0);
    assert!(doc.pages[0].starts_with("WELFARE SUPPORT ACT 2025"));
    assert!(doc.pages[3].starts_with("PART 4"));
}

#[tokio::test]
async fn test_full_run_writes_every_artifact() {
    let output = TempDir::new().unwrap();
    let out_dir = output.path().join("nested/output");

    let extracted = manager().extract_document(Path::new(SAMPLE_ACT)).await.unwrap();
    let engine = AnalysisEngine::new(&AnalysisConfig::default()).unwrap();
    let analysis = engine.analyze(extracted).unwrap();

    let writer = ArtifactWriter::new(&out_dir, ArtifactNames::default());
    let written = writer.write_all(&analysis).unwrap();
    assert_eq!(written.len(), 5);

    let cleaned = fs::read_to_string(out_dir.join("extracted_text.txt")).unwrap();
    assert_eq!(cleaned, analysis.document.cleaned);
    assert!(cleaned.contains("a period of one month beginning with the first day of entitlement."));

    let raw = fs::read_to_string(out_dir.join("extracted_text_raw.txt")).unwrap();
    assert!(raw.contains("a period of one month\nbeginning"));

    let summary: Summary =
        serde_json::from_str(&fs::read_to_string(out_dir.join("summary.json")).unwrap()).unwrap();
    assert!(!summary.bullets.is_empty());
    assert!(summary.bullets.len() <= 10);

    let fields: FieldsArtifact =
        serde_json::from_str(&fs::read_to_string(out_dir.join("fields.json")).unwrap()).unwrap();
    assert!(fields.definitions.contains("assessment period"));
    assert!(fields.payments.contains("393.45") || fields.payments.contains("standard allowance"));
    assert!(fields.penalties.contains("penalty of £50"));
    assert!(!fields.record_keeping.starts_with("No explicit"));

    let checks: Vec<RuleCheckResult> =
        serde_json::from_str(&fs::read_to_string(out_dir.join("rule_checks.json")).unwrap()).unwrap();
    assert_eq!(checks.len(), 6);
    assert_eq!(checks[0].rule, "Act must define key terms");
    assert_eq!(checks[0].status, RuleStatus::Pass);
    assert!(checks.iter().all(|check| check.confidence <= 100));
    assert!(checks
        .iter()
        .all(|check| check.evidence.chars().count() <= 203));

    let report = RunReport::build(&analysis, writer.inventory(), 40);
    assert!(report.missing_artifacts().is_empty());
    assert!(report.artifacts.iter().all(|artifact| artifact.size_bytes > 0));
    assert_eq!(report.stats.total_pages, 4);
}

#[tokio::test]
async fn test_configured_rule_subset() {
    let config = AnalysisConfig {
        rules: vec![
            "Act must include enforcement or penalties".to_string(),
            "Act must keep a public record".to_string(),
        ],
        ..Default::default()
    };

    let extracted = manager().extract_document(Path::new(SAMPLE_ACT)).await.unwrap();
    let analysis = AnalysisEngine::new(&config).unwrap().analyze(extracted).unwrap();

    assert_eq!(analysis.rule_checks.len(), 2);
    assert_eq!(analysis.rule_checks[1].rule, "Act must keep a public record");
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let result = manager()
        .extract_document(Path::new("tests/fixtures/unsupported.xyz"))
        .await;
    assert!(matches!(result, Err(ActExtractorError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let result = manager()
        .extract_document(Path::new("tests/fixtures/nonexistent.pdf"))
        .await;
    assert!(matches!(result, Err(ActExtractorError::InvalidInput(_))));
}
