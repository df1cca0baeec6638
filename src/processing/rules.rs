//! Compliance rule checks scored from extracted evidence

use crate::error::{Result, ActExtractorError};
use crate::processing::category::Category;
use crate::processing::fields::FieldExtraction;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The built-in checklist, in report order
pub const DEFAULT_RULES: [(&str, Category); 6] = [
    ("Act must define key terms", Category::Definitions),
    ("Act must specify eligibility criteria", Category::Eligibility),
    ("Act must specify responsibilities of the administering authority", Category::Responsibilities),
    ("Act must include enforcement or penalties", Category::Penalties),
    ("Act must include payment/entitlement structure", Category::Payments),
    ("Act must include record-keeping or reporting requirements", Category::RecordKeeping),
];

/// Characters of cleaned text searched when a category renders to nothing
const FALLBACK_CORPUS_CHARS: usize = 5000;
/// Context kept on each side of a term match
const CONTEXT_RADIUS: usize = 100;
const MAX_EVIDENCE_CHARS: usize = 200;
const NO_EVIDENCE: &str = "No relevant text found matching this rule.";

/// Match count assumed for the key-terms rule when the definitions contain "means"
const DEFINITIONS_MIN_MATCHES: usize = 3;
const KEY_TERMS_RULE: &str = "define key terms";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub statement: String,
    pub category: Category,
}

impl Rule {
    pub fn new(statement: impl Into<String>, category: Category) -> Self {
        Self {
            statement: statement.into(),
            category,
        }
    }

    /// Build a rule from its statement alone; the statement must name a category
    pub fn from_statement(statement: &str) -> Result<Self> {
        Category::classify_rule(statement)
            .map(|category| Self::new(statement, category))
            .ok_or_else(|| ActExtractorError::UnknownRule(statement.to_string()))
    }

    pub fn parse_all(statements: &[String]) -> Result<Vec<Rule>> {
        statements.iter().map(|s| Self::from_statement(s)).collect()
    }
}

pub fn default_rules() -> Vec<Rule> {
    DEFAULT_RULES
        .iter()
        .map(|(statement, category)| Rule::new(*statement, *category))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    Pass,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCheckResult {
    pub rule: String,
    pub status: RuleStatus,
    pub evidence: String,
    pub confidence: u8,
}

impl RuleCheckResult {
    pub fn passed(&self) -> bool {
        self.status == RuleStatus::Pass
    }
}

/// Step function from evidence count to status and confidence
pub fn score_matches(count: usize) -> (RuleStatus, u8) {
    match count {
        c if c > 10 => (RuleStatus::Pass, (60 + 2 * c).min(95) as u8),
        c if c > 5 => (RuleStatus::Pass, 70),
        c if c > 2 => (RuleStatus::Pass, 50),
        c if c > 0 => (RuleStatus::Fail, 30),
        _ => (RuleStatus::Fail, 10),
    }
}

pub struct RuleEvaluator {
    term_patterns: HashMap<Category, Vec<Regex>>,
    means_regex: Regex,
}

impl RuleEvaluator {
    pub fn new() -> Result<Self> {
        let mut term_patterns = HashMap::new();
        for category in Category::ALL {
            let patterns = category
                .search_terms()
                .iter()
                .map(|term| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term))))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            term_patterns.insert(category, patterns);
        }

        Ok(Self {
            term_patterns,
            means_regex: Regex::new(r"(?i)\bmeans\b")?,
        })
    }

    pub fn evaluate(&self, rules: &[Rule], fields: &FieldExtraction, text: &str) -> Vec<RuleCheckResult> {
        rules
            .iter()
            .map(|rule| self.evaluate_rule(rule, fields, text))
            .collect()
    }

    pub fn evaluate_rule(&self, rule: &Rule, fields: &FieldExtraction, text: &str) -> RuleCheckResult {
        // Empty penalties and record_keeping render their "none found" message,
        // which is searched like any other section text
        let section = fields.get(rule.category).rendered();
        let corpus = if section.is_empty() {
            prefix_chars(text, FALLBACK_CORPUS_CHARS)
        } else {
            section.as_str()
        };

        let (mut matches, snippets) = self.collect_evidence(rule.category, corpus);

        if rule.statement.to_lowercase().contains(KEY_TERMS_RULE)
            && matches < DEFINITIONS_MIN_MATCHES
            && self.means_regex.is_match(&fields.get(Category::Definitions).joined())
        {
            matches = DEFINITIONS_MIN_MATCHES;
        }

        let (status, confidence) = score_matches(matches);
        debug!("{}: {} matches, confidence {}", rule.statement, matches, confidence);

        let evidence = snippets
            .first()
            .map(|snippet| truncate_evidence(snippet))
            .unwrap_or_else(|| NO_EVIDENCE.to_string());

        RuleCheckResult {
            rule: rule.statement.clone(),
            status,
            evidence,
            confidence,
        }
    }

    /// Count whole-word term matches and collect the distinct context around each
    fn collect_evidence(&self, category: Category, corpus: &str) -> (usize, Vec<String>) {
        let mut matches = 0;
        let mut snippets: Vec<String> = Vec::new();

        for pattern in self.term_patterns.get(&category).into_iter().flatten() {
            for found in pattern.find_iter(corpus) {
                matches += 1;
                let snippet = context_window(corpus, found.start(), found.end(), CONTEXT_RADIUS).trim();
                if !snippet.is_empty() && !snippets.iter().any(|s| s == snippet) {
                    snippets.push(snippet.to_string());
                }
            }
        }

        (matches, snippets)
    }
}

/// The first `max_chars` characters of `text`
fn prefix_chars(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(index, _)| &text[..index])
}

/// `radius` characters either side of the byte range `start..end`
fn context_window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let window_start = text[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map_or(start, |(index, _)| index);

    let window_end = text[end..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(index, _)| end + index);

    &text[window_start..window_end]
}

fn truncate_evidence(snippet: &str) -> String {
    if snippet.chars().count() > MAX_EVIDENCE_CHARS {
        format!("{}...", prefix_chars(snippet, MAX_EVIDENCE_CHARS))
    } else {
        snippet.to_string()
    }
}
