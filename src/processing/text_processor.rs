//! Text cleaning and normalization for raw extracted page text

use regex::Regex;

/// Line endings that mark a real line break rather than a soft wrap
const TERMINAL_PUNCTUATION: [char; 4] = ['.', '!', '?', ':'];

pub struct TextProcessor {
    hyphen_break_regex: Regex,
    horizontal_space_regex: Regex,
    blank_run_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let hyphen_break_regex = Regex::new(r"(\w+)-\s*\n\s*(\w+)")
            .expect("Invalid hyphen break regex");

        let horizontal_space_regex = Regex::new(r"[ \t]+")
            .expect("Invalid horizontal whitespace regex");

        let blank_run_regex = Regex::new(r"\n{3,}")
            .expect("Invalid blank line regex");

        Self {
            hyphen_break_regex,
            horizontal_space_regex,
            blank_run_regex,
        }
    }

    /// Clean raw extracted text: repair hyphenation, merge soft-wrapped lines,
    /// and normalize whitespace
    pub fn clean_text(&self, text: &str) -> String {
        let repaired = self.repair_hyphenation(text);
        let merged = self.merge_soft_wraps(&repaired);
        self.normalize_whitespace(&merged)
    }

    /// Rejoin words split by a trailing hyphen across a line break
    pub fn repair_hyphenation(&self, text: &str) -> String {
        self.hyphen_break_regex.replace_all(text, "${1}${2}").into_owned()
    }

    /// Join lines that continue onto the next line; blank lines and
    /// terminated lines stay as breaks
    pub fn merge_soft_wraps(&self, text: &str) -> String {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut merged = String::with_capacity(text.len());

        for (i, line) in lines.iter().enumerate() {
            let line = line.trim();
            let next_has_text = lines
                .get(i + 1)
                .map_or(false, |next| !next.trim().is_empty());

            merged.push_str(line);

            if !line.is_empty() && next_has_text && !line.ends_with(&TERMINAL_PUNCTUATION[..]) {
                merged.push(' ');
            } else if i + 1 < lines.len() {
                merged.push('\n');
            }
        }

        merged
    }

    /// Collapse horizontal whitespace runs and limit blank lines to one
    fn normalize_whitespace(&self, text: &str) -> String {
        let collapsed = self.horizontal_space_regex.replace_all(text, " ");
        let collapsed = self.blank_run_regex.replace_all(&collapsed, "\n\n");
        collapsed.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyphenated_words_are_rejoined() {
        let processor = TextProcessor::new();
        let cleaned = processor.clean_text("The claimant is hyph-\nenated here.");

        assert!(cleaned.contains("hyphenated"));
        assert!(!cleaned.contains('-'));
        assert!(!cleaned.contains('\n'));
    }

    #[test]
    fn test_soft_wrapped_lines_are_joined_with_one_space() {
        let processor = TextProcessor::new();
        let cleaned = processor.clean_text("The Secretary of State\nmust pay the allowance.");

        assert_eq!(cleaned, "The Secretary of State must pay the allowance.");
    }

    #[test]
    fn test_terminated_lines_and_paragraphs_are_kept() {
        let processor = TextProcessor::new();
        let cleaned = processor.clean_text("Section 1:\nInterpretation.\n\n\n\nSection 2.");

        assert_eq!(cleaned, "Section 1:\nInterpretation.\n\nSection 2.");
    }

    #[test]
    fn test_whitespace_is_collapsed_and_trimmed() {
        let processor = TextProcessor::new();
        let cleaned = processor.clean_text("  A\t\tclaimant   must  report.  \n");

        assert_eq!(cleaned, "A claimant must report.");
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let processor = TextProcessor::new();
        let raw = "UNIVERSAL CREDIT ACT 2025\n\n1 Standard allow-\nance\n  (1) In this Act the standard\nallowance means the amount.\n\n\n\n(2) The Secretary of State must\n\n\npay it:\nmonthly.";

        let once = processor.clean_text(raw);
        let twice = processor.clean_text(&once);

        assert_eq!(once, twice);
        assert!(once.contains("allowance"));
    }

    #[test]
    fn test_empty_input() {
        let processor = TextProcessor::new();
        assert_eq!(processor.clean_text(""), "");
        assert_eq!(processor.clean_text("\n\n  \n"), "");
    }
}
