//! Extraction categories and their static lookup tables

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Definitions = 0,
    Obligations = 1,
    Responsibilities = 2,
    Eligibility = 3,
    Payments = 4,
    Penalties = 5,
    RecordKeeping = 6,
}

/// Rule-statement keywords, checked in order; the first hit decides the category
const RULE_KEYWORDS: &[(&str, Category)] = &[
    ("terms", Category::Definitions),
    ("eligibility", Category::Eligibility),
    ("responsibilities", Category::Responsibilities),
    ("enforcement", Category::Penalties),
    ("penalties", Category::Penalties),
    ("payment", Category::Payments),
    ("entitlement", Category::Payments),
    ("record", Category::RecordKeeping),
    ("reporting", Category::RecordKeeping),
];

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Definitions,
        Category::Obligations,
        Category::Responsibilities,
        Category::Eligibility,
        Category::Payments,
        Category::Penalties,
        Category::RecordKeeping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Definitions => "definitions",
            Category::Obligations => "obligations",
            Category::Responsibilities => "responsibilities",
            Category::Eligibility => "eligibility",
            Category::Payments => "payments",
            Category::Penalties => "penalties",
            Category::RecordKeeping => "record_keeping",
        }
    }

    /// Text reported in place of an empty category, where one exists
    pub fn empty_message(&self) -> Option<&'static str> {
        match self {
            Category::Penalties => {
                Some("No explicit penalties or enforcement mechanisms found in the extracted text.")
            }
            Category::RecordKeeping => {
                Some("No explicit record-keeping requirements found in the extracted text.")
            }
            _ => None,
        }
    }

    /// Whole-word terms counted as evidence when checking a rule
    pub fn search_terms(&self) -> &'static [&'static str] {
        match self {
            Category::Definitions => &["means", "is defined", "refers to", "definition", "term"],
            Category::Obligations => &["must", "shall", "required to", "obliged to", "duty"],
            Category::Responsibilities => {
                &["Secretary of State", "authority", "responsibility", "duty", "must", "shall"]
            }
            Category::Eligibility => {
                &["eligible", "entitlement", "qualify", "qualification", "criteria"]
            }
            Category::Payments => {
                &["payment", "amount", "allowance", "entitlement", "benefit", "element"]
            }
            Category::Penalties => &["penalty", "enforcement", "fine", "sanction", "offence"],
            Category::RecordKeeping => &["record", "documentation", "report", "maintain", "keep"],
        }
    }

    /// Map a compliance rule statement to the category holding its evidence
    pub fn classify_rule(statement: &str) -> Option<Category> {
        let lowered = statement.to_lowercase();
        RULE_KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map(|(_, category)| *category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_discriminant_order() {
        for (index, category) in Category::ALL.iter().enumerate() {
            assert_eq!(*category as usize, index);
        }
    }

    #[test]
    fn test_classification_first_match_wins() {
        assert_eq!(Category::classify_rule("Act must define key terms"), Some(Category::Definitions));
        assert_eq!(
            Category::classify_rule("Eligibility terms must be published"),
            Some(Category::Definitions)
        );
        assert_eq!(
            Category::classify_rule("Act must include payment/entitlement structure"),
            Some(Category::Payments)
        );
        assert_eq!(
            Category::classify_rule("Act must include RECORD-KEEPING or reporting requirements"),
            Some(Category::RecordKeeping)
        );
        assert_eq!(Category::classify_rule("Act must be short"), None);
    }

    #[test]
    fn test_only_penalties_and_record_keeping_have_fallbacks() {
        let with_message: Vec<Category> = Category::ALL
            .iter()
            .copied()
            .filter(|c| c.empty_message().is_some())
            .collect();
        assert_eq!(with_message, vec![Category::Penalties, Category::RecordKeeping]);
    }

    #[test]
    fn test_serializes_snake_case() {
        let json = serde_json::to_string(&Category::RecordKeeping).unwrap();
        assert_eq!(json, "\"record_keeping\"");
        assert_eq!(Category::RecordKeeping.to_string(), "record_keeping");
    }
}
