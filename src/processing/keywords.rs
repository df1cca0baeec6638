//! Frequency-based keyword ranking

use regex::Regex;
use std::collections::{HashMap, HashSet};

pub const DEFAULT_KEYWORD_COUNT: usize = 20;

/// Articles, conjunctions, auxiliaries and pronouns never reported as keywords
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
    "of", "with", "by", "from", "as", "is", "was", "are", "were", "be",
    "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "should", "could", "may", "might", "must", "can", "this",
    "that", "these", "those", "i", "you", "he", "she", "it", "we", "they",
];

pub struct KeywordRanker {
    stop_words: HashSet<&'static str>,
    word_regex: Regex,
}

impl Default for KeywordRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordRanker {
    pub fn new() -> Self {
        let word_regex = Regex::new(r"\b[a-zA-Z]{3,}\b")
            .expect("Invalid word regex");

        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            word_regex,
        }
    }

    /// Return up to `count` terms ordered by descending frequency; equal
    /// counts keep the order in which the terms first appear
    pub fn top_keywords(&self, text: &str, count: usize) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut order: Vec<&str> = Vec::new();
        let mut frequency: HashMap<&str, usize> = HashMap::new();

        for word in self.word_regex.find_iter(&lowered).map(|m| m.as_str()) {
            if self.stop_words.contains(word) {
                continue;
            }
            let entry = frequency.entry(word).or_insert(0);
            if *entry == 0 {
                order.push(word);
            }
            *entry += 1;
        }

        // Stable sort keeps first-occurrence order among ties
        order.sort_by(|a, b| frequency[b].cmp(&frequency[a]));

        order
            .into_iter()
            .take(count)
            .map(|word| word.to_string())
            .collect()
    }

    #[cfg(test)]
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word.to_lowercase().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_by_frequency_with_first_occurrence_ties() {
        let ranker = KeywordRanker::new();
        let text = "the alpha the beta the gamma alpha the alpha beta gamma \
                    alpha the alpha the the the the";

        assert_eq!(ranker.top_keywords(text, 2), vec!["alpha", "beta"]);
        assert_eq!(ranker.top_keywords(text, 3), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_stop_words_never_ranked() {
        let ranker = KeywordRanker::new();
        let keywords = ranker.top_keywords("They must THE must shall shall The", 10);

        assert_eq!(keywords, vec!["shall"]);
        assert!(ranker.is_stop_word("Must"));
    }

    #[test]
    fn test_short_and_non_alphabetic_tokens_are_ignored() {
        let ranker = KeywordRanker::new();
        let keywords = ranker.top_keywords("s.12 pay 2025 ab x-ray claimant's", 10);

        assert_eq!(keywords, vec!["pay", "ray", "claimant"]);
    }

    #[test]
    fn test_count_limits_output() {
        let ranker = KeywordRanker::new();
        assert!(ranker.top_keywords("one two three four five", 2).len() == 2);
        assert!(ranker.top_keywords("", DEFAULT_KEYWORD_COUNT).is_empty());
    }
}
