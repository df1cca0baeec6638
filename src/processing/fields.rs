//! Pattern-based extraction of the compliance fields of an Act
//!
//! Each category has an ordered list of primary patterns and an optional,
//! broader secondary pattern whose contribution is capped. All patterns are
//! matched case-insensitively against the whole cleaned text.

use crate::error::Result;
use crate::processing::category::Category;
use log::debug;
use regex::Regex;
use std::collections::HashSet;

/// Snippets per category after merging all patterns
pub const MAX_SNIPPETS: usize = 15;
/// Snippets contributed by the secondary pattern
pub const MAX_SECONDARY_SNIPPETS: usize = 10;
pub const MAX_SNIPPET_CHARS: usize = 500;
/// Length floor for secondary matches; the category minimum binds primary patterns only
pub const SECONDARY_MIN_CHARS: usize = 20;

const SNIPPET_SEPARATOR: &str = "\n\n";

struct PatternSpec {
    pattern: &'static str,
    /// Capture group kept as the snippet; 0 is the whole match
    group: usize,
}

struct CategorySpec {
    category: Category,
    min_chars: usize,
    primary: &'static [PatternSpec],
    secondary: Option<PatternSpec>,
}

const fn whole(pattern: &'static str) -> PatternSpec {
    PatternSpec { pattern, group: 0 }
}

const CATEGORY_SPECS: &[CategorySpec] = &[
    CategorySpec {
        category: Category::Definitions,
        min_chars: 20,
        primary: &[
            whole(r"([A-Z][a-zA-Z\s]+(?:element|allowance|payment|amount|rate|benefit)?)\s+(?:means?|is|are|refers? to|defined as)\s+([^.]+)"),
            whole(r#"["'“‘]([^"'“”‘’]+)["'”’]\s+(?:means?|is|are|refers? to)\s+([^.]+)"#),
            whole(r"(?:the|a|an)\s+([A-Z][a-zA-Z\s]+)\s+(?:means?|is|are)\s+([^.]+)"),
            PatternSpec {
                pattern: r"\((\d+)\)\s+([^()]+(?:means?|is|are|refers? to)[^.]+)",
                group: 2,
            },
        ],
        secondary: None,
    },
    CategorySpec {
        category: Category::Obligations,
        min_chars: 30,
        primary: &[
            whole(r"(?:must|shall|required to|obliged to|duty to)\s+([^.]+(?:\.|$))"),
            whole(r"(?:it is (?:the )?duty|obligation|responsibility)\s+([^.]+(?:\.|$))"),
            whole(r"(?:subject to|in accordance with)\s+([^.]+(?:\.|$))"),
        ],
        secondary: Some(whole(r"(?:obligation|duty|must|shall)[^.]{20,200}")),
    },
    CategorySpec {
        category: Category::Responsibilities,
        min_chars: 30,
        primary: &[
            whole(r"(?:Secretary of State|authority|department|minister)\s+(?:must|shall|will|is required to|has the (?:power|duty|responsibility))\s+([^.]+(?:\.|$))"),
            whole(r"(?:responsibility|duty|power)\s+(?:of|to|for)\s+([^.]+(?:\.|$))"),
            whole(r"(?:exercise|exercise of)\s+(?:a )?(?:power|function|duty)\s+([^.]+(?:\.|$))"),
        ],
        secondary: Some(whole(r"Secretary of State[^.]{20,200}")),
    },
    CategorySpec {
        category: Category::Eligibility,
        min_chars: 30,
        primary: &[
            whole(r"(?:eligible|entitled|qualify|qualification)\s+(?:for|to|if)\s+([^.]+(?:\.|$))"),
            whole(r"(?:eligibility|entitlement|qualification)\s+(?:for|to|is|are)\s+([^.]+(?:\.|$))"),
            whole(r"(?:meets?|satisfies?|fulfil?ls?)\s+(?:the )?(?:criteria|conditions|requirements)\s+([^.]+(?:\.|$))"),
        ],
        secondary: Some(PatternSpec {
            pattern: r"(?:if|where|when|provided that)\s+([^.]{30,200})",
            group: 1,
        }),
    },
    CategorySpec {
        category: Category::Payments,
        min_chars: 20,
        primary: &[
            whole(r"(?:payment|amount|allowance|entitlement|benefit|element)\s+(?:of|is|are|shall be|will be)\s+([^.]+(?:\.|$))"),
            whole(r"£\s*[\d,]+(?:\.\d{2})?\s+([^.]{10,100})"),
            whole(r"(?:standard allowance|LCWRA element|LCW element)[^.]{20,200}"),
            whole(r"(?:tax year|financial year)\s+(\d{4}[-/]\d{2,4})[^.]{20,200}"),
            whole(r"\b(?:must|shall|will|may)\s+pay\s+([^.]+(?:\.|$))"),
        ],
        secondary: Some(whole(r"[\d,]+(?:\.\d{2})?\s+(?:pounds?|£)[^.]{10,150}")),
    },
    CategorySpec {
        category: Category::Penalties,
        min_chars: 30,
        primary: &[
            // Leading \b keeps "fine" from matching inside "define" or "refine"
            whole(r"\b(?:penalty|penalties|fine|fines|sanction|sanctions|enforcement)\s+([^.]+(?:\.|$))"),
            whole(r"(?:liable|subject to)\s+(?:a )?(?:penalty|fine|sanction)\s+([^.]+(?:\.|$))"),
            whole(r"(?:offence|offense|violation)\s+([^.]+(?:\.|$))"),
        ],
        secondary: Some(whole(r"(?:enforce|enforcement|compliance)[^.]{20,200}")),
    },
    CategorySpec {
        category: Category::RecordKeeping,
        min_chars: 30,
        primary: &[
            whole(r"(?:record|records|documentation|report|reporting|maintain|keep)\s+([^.]+(?:\.|$))"),
            whole(r"(?:must|shall|required to)\s+(?:keep|maintain|retain|provide|submit)\s+(?:records?|documents?|information|data)\s+([^.]+(?:\.|$))"),
            whole(r"(?:record-keeping|record keeping|documentation requirements?)[^.]{20,200}"),
        ],
        secondary: None,
    },
];

/// Extracted snippets for one category, in match order
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMatches {
    pub category: Category,
    pub snippets: Vec<String>,
}

impl CategoryMatches {
    pub fn empty(category: Category) -> Self {
        Self {
            category,
            snippets: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    /// Snippets separated by blank lines; empty when nothing matched
    pub fn joined(&self) -> String {
        self.snippets.join(SNIPPET_SEPARATOR)
    }

    /// Text as persisted: the joined snippets, or the category's
    /// "none found" message when it has one
    pub fn rendered(&self) -> String {
        match (self.is_empty(), self.category.empty_message()) {
            (true, Some(message)) => message.to_string(),
            _ => self.joined(),
        }
    }
}

/// Matches for all seven categories
#[derive(Debug, Clone, PartialEq)]
pub struct FieldExtraction {
    categories: Vec<CategoryMatches>,
}

impl FieldExtraction {
    /// Build from any subset of categories; missing ones are empty
    pub fn new(matches: impl IntoIterator<Item = CategoryMatches>) -> Self {
        let mut categories: Vec<CategoryMatches> =
            Category::ALL.iter().map(|c| CategoryMatches::empty(*c)).collect();

        for category_matches in matches {
            let index = category_matches.category as usize;
            categories[index] = category_matches;
        }

        Self { categories }
    }

    pub fn get(&self, category: Category) -> &CategoryMatches {
        &self.categories[category as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryMatches> {
        self.categories.iter()
    }

    pub fn empty_categories(&self) -> Vec<Category> {
        self.iter().filter(|m| m.is_empty()).map(|m| m.category).collect()
    }
}

struct CompiledPattern {
    regex: Regex,
    group: usize,
}

impl CompiledPattern {
    fn compile(spec: &PatternSpec) -> Result<Self> {
        Ok(Self {
            regex: Regex::new(&format!("(?i){}", spec.pattern))?,
            group: spec.group,
        })
    }

    /// Trimmed snippets within the length bounds, in match order
    fn snippets<'t>(&'t self, text: &'t str, min_chars: usize) -> impl Iterator<Item = String> + 't {
        self.regex
            .captures_iter(text)
            .filter_map(move |caps| caps.get(self.group))
            .map(|m| m.as_str().trim())
            .filter(move |snippet| {
                let chars = snippet.chars().count();
                chars >= min_chars && chars <= MAX_SNIPPET_CHARS
            })
            .map(|snippet| snippet.to_string())
    }
}

struct CategoryExtractor {
    category: Category,
    min_chars: usize,
    primary: Vec<CompiledPattern>,
    secondary: Option<CompiledPattern>,
}

impl CategoryExtractor {
    fn compile(spec: &CategorySpec) -> Result<Self> {
        let primary = spec
            .primary
            .iter()
            .map(CompiledPattern::compile)
            .collect::<Result<Vec<_>>>()?;

        let secondary = spec
            .secondary
            .as_ref()
            .map(CompiledPattern::compile)
            .transpose()?;

        Ok(Self {
            category: spec.category,
            min_chars: spec.min_chars,
            primary,
            secondary,
        })
    }

    fn extract(&self, text: &str) -> CategoryMatches {
        let primary = self
            .primary
            .iter()
            .flat_map(|pattern| pattern.snippets(text, self.min_chars));

        let secondary = self
            .secondary
            .iter()
            .flat_map(|pattern| pattern.snippets(text, SECONDARY_MIN_CHARS))
            .take(MAX_SECONDARY_SNIPPETS);

        let mut seen = HashSet::new();
        let snippets: Vec<String> = primary
            .chain(secondary)
            .filter(|snippet| seen.insert(snippet.clone()))
            .take(MAX_SNIPPETS)
            .collect();

        debug!("{}: {} snippets", self.category, snippets.len());

        CategoryMatches {
            category: self.category,
            snippets,
        }
    }
}

pub struct FieldExtractor {
    extractors: Vec<CategoryExtractor>,
}

impl FieldExtractor {
    pub fn new() -> Result<Self> {
        let extractors = CATEGORY_SPECS
            .iter()
            .map(CategoryExtractor::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { extractors })
    }

    pub fn extract(&self, text: &str) -> FieldExtraction {
        FieldExtraction::new(self.extractors.iter().map(|extractor| extractor.extract(text)))
    }

    #[cfg(test)]
    pub fn extract_category(&self, category: Category, text: &str) -> CategoryMatches {
        self.extractors
            .iter()
            .find(|extractor| extractor.category == category)
            .map(|extractor| extractor.extract(text))
            .unwrap_or_else(|| CategoryMatches::empty(category))
    }
}
