//! Extractive summarization: score sentences, keep the best, restore document order

use crate::error::{Result, ActExtractorError};
use crate::processing::keywords::KeywordRanker;
use aho_corasick::AhoCorasick;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_SUMMARY_SENTENCES: usize = 10;
pub const DEFAULT_SUMMARY_KEYWORDS: usize = 30;

/// Sentences must be longer than this to be considered
const MIN_SENTENCE_CHARS: usize = 20;
/// Cleaned summary bullets must be longer than this
const MIN_BULLET_CHARS: usize = 10;

const KEYWORD_WEIGHT: u32 = 2;
const DEFINITION_CUE_WEIGHT: u32 = 3;
const NUMBER_WEIGHT: u32 = 1;
const LEGAL_TERM_WEIGHT: u32 = 1;

const LEGAL_TERMS: &[&str] = &[
    "act", "section", "subsection", "regulation", "provision",
    "entitlement", "payment", "penalty", "obligation", "responsibility",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSentence {
    /// Position among the candidate sentences
    pub index: usize,
    pub text: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(rename = "summary_bullets")]
    pub bullets: Vec<String>,
}

pub struct ExtractiveSummarizer {
    ranker: KeywordRanker,
    legal_terms: AhoCorasick,
    sentence_split_regex: Regex,
    definition_cue_regex: Regex,
    digit_regex: Regex,
    whitespace_regex: Regex,
}

impl ExtractiveSummarizer {
    pub fn new() -> Result<Self> {
        let legal_terms = Self::case_insensitive_matcher(LEGAL_TERMS)?;

        Ok(Self {
            ranker: KeywordRanker::new(),
            legal_terms,
            sentence_split_regex: Regex::new(r"[.!?]+\s+")?,
            definition_cue_regex: Regex::new(r"(?i)\b(means?|is|are|refers? to|defined as)\b")?,
            digit_regex: Regex::new(r"\d")?,
            whitespace_regex: Regex::new(r"\s+")?,
        })
    }

    fn case_insensitive_matcher<P: AsRef<[u8]>>(patterns: &[P]) -> Result<AhoCorasick> {
        AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(patterns)
            .map_err(|e| ActExtractorError::Processing(format!("Failed to build term matcher: {}", e)))
    }

    /// Select the `sentence_count` best sentences, scored against the top
    /// `keyword_count` keywords of the text
    pub fn summarize(&self, text: &str, sentence_count: usize, keyword_count: usize) -> Result<Summary> {
        let sentences = self.split_sentences(text);
        let keywords = self.ranker.top_keywords(text, keyword_count);
        let scored = self.score_sentences(&sentences, &keywords)?;

        let bullets = Self::select_in_document_order(scored, sentence_count)
            .into_iter()
            .map(|sentence| self.whitespace_regex.replace_all(&sentence.text, " ").trim().to_string())
            .filter(|bullet| bullet.chars().count() > MIN_BULLET_CHARS)
            .collect();

        Ok(Summary { bullets })
    }

    /// Split on terminal punctuation followed by whitespace, keeping only
    /// candidates long enough to carry content
    pub fn split_sentences(&self, text: &str) -> Vec<String> {
        self.sentence_split_regex
            .split(text)
            .map(str::trim)
            .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
            .map(|s| s.to_string())
            .collect()
    }

    pub fn score_sentences(&self, sentences: &[String], keywords: &[String]) -> Result<Vec<ScoredSentence>> {
        let keyword_matcher = if keywords.is_empty() {
            None
        } else {
            Some(Self::case_insensitive_matcher(keywords)?)
        };

        Ok(sentences
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let mut score = 0;

                if let Some(matcher) = &keyword_matcher {
                    score += KEYWORD_WEIGHT * distinct_matches(matcher, text);
                }
                if self.definition_cue_regex.is_match(text) {
                    score += DEFINITION_CUE_WEIGHT;
                }
                if self.digit_regex.is_match(text) {
                    score += NUMBER_WEIGHT;
                }
                score += LEGAL_TERM_WEIGHT * distinct_matches(&self.legal_terms, text);

                ScoredSentence {
                    index,
                    text: text.clone(),
                    score,
                }
            })
            .collect())
    }

    /// Take the top `count` by score (ties keep document order), then put
    /// them back in document order. Order comes from each sentence's own
    /// index, so a repeated sentence stays at its own position rather than
    /// collapsing onto its first occurrence.
    fn select_in_document_order(mut scored: Vec<ScoredSentence>, count: usize) -> Vec<ScoredSentence> {
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(count);
        scored.sort_by_key(|sentence| sentence.index);
        scored
    }
}

/// Number of distinct patterns occurring anywhere in `text`
fn distinct_matches(matcher: &AhoCorasick, text: &str) -> u32 {
    matcher
        .find_overlapping_iter(text)
        .map(|m| m.pattern().as_usize())
        .collect::<HashSet<_>>()
        .len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACT: &str = "Short one. The standard allowance is a payment under section 3 of this Act. \
                       Weather was pleasant across the northern valley today. \
                       The claimant must keep records of every payment received in 2025.";

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_discards_short_candidates() {
        let summarizer = ExtractiveSummarizer::new().unwrap();
        let sentences = summarizer.split_sentences(ACT);

        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0], "The standard allowance is a payment under section 3 of this Act");
        assert!(sentences[2].ends_with("2025."));
    }

    #[test]
    fn test_scoring_components() {
        let summarizer = ExtractiveSummarizer::new().unwrap();
        let sentences = strings(&[
            "The payment means the amount set by regulation 4 of this Act",
            "Nothing relevant happens within these particular words",
        ]);
        let keywords = strings(&["payment", "amount", "missing"]);

        let scored = summarizer.score_sentences(&sentences, &keywords).unwrap();

        // 2 keywords, definition cue, digit, and act/regulation/payment
        assert_eq!(scored[0].score, 2 * 2 + 3 + 1 + 3);
        assert_eq!(scored[1].score, 0);
    }

    #[test]
    fn test_repeated_terms_score_once() {
        let summarizer = ExtractiveSummarizer::new().unwrap();
        let sentences = strings(&["penalty penalty penalty penalty penalty"]);
        let scored = summarizer.score_sentences(&sentences, &strings(&["penalty"])).unwrap();

        assert_eq!(scored[0].score, 2 + 1);
    }

    #[test]
    fn test_summary_keeps_document_order() {
        let summarizer = ExtractiveSummarizer::new().unwrap();

        let top_two = summarizer.summarize(ACT, 2, DEFAULT_SUMMARY_KEYWORDS).unwrap();
        assert_eq!(top_two.bullets.len(), 2);
        assert!(top_two.bullets[0].starts_with("The standard allowance"));
        assert!(top_two.bullets[1].starts_with("The claimant must keep records"));

        // The weather sentence ranks last but sits in the middle of the text
        let all = summarizer.summarize(ACT, 3, DEFAULT_SUMMARY_KEYWORDS).unwrap();
        let positions: Vec<usize> = all
            .bullets
            .iter()
            .map(|bullet| ACT.find(bullet.as_str()).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(all.bullets[1].starts_with("Weather"));
    }

    #[test]
    fn test_repeated_sentence_keeps_its_own_position() {
        let scored = vec![
            ScoredSentence { index: 0, text: "The payment is due under section 1".to_string(), score: 5 },
            ScoredSentence { index: 1, text: "Weather was pleasant in the valley".to_string(), score: 1 },
            ScoredSentence { index: 2, text: "The payment is due under section 1".to_string(), score: 5 },
            ScoredSentence { index: 3, text: "Nothing else of note happens here".to_string(), score: 2 },
        ];

        let selected = ExtractiveSummarizer::select_in_document_order(scored, 3);
        let indexes: Vec<usize> = selected.iter().map(|sentence| sentence.index).collect();

        assert_eq!(indexes, vec![0, 2, 3]);
    }

    #[test]
    fn test_summary_of_empty_text() {
        let summarizer = ExtractiveSummarizer::new().unwrap();
        let summary = summarizer
            .summarize("", DEFAULT_SUMMARY_SENTENCES, DEFAULT_SUMMARY_KEYWORDS)
            .unwrap();
        assert!(summary.bullets.is_empty());
    }

    #[test]
    fn test_summary_serializes_as_bullets() {
        let summary = Summary { bullets: strings(&["One point of law."]) };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["summary_bullets"][0], "One point of law.");
    }
}
