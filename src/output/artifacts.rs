//! Artifact files written at the end of a run

use crate::config::{ArtifactNames, OutputConfig};
use crate::error::Result;
use crate::processing::category::Category;
use crate::processing::fields::FieldExtraction;
use crate::processing::ActAnalysis;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Shape of `fields.json`: one text block per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldsArtifact {
    pub definitions: String,
    pub obligations: String,
    pub responsibilities: String,
    pub eligibility: String,
    pub payments: String,
    pub penalties: String,
    pub record_keeping: String,
}

impl From<&FieldExtraction> for FieldsArtifact {
    fn from(fields: &FieldExtraction) -> Self {
        let text = |category: Category| fields.get(category).rendered();

        Self {
            definitions: text(Category::Definitions),
            obligations: text(Category::Obligations),
            responsibilities: text(Category::Responsibilities),
            eligibility: text(Category::Eligibility),
            payments: text(Category::Payments),
            penalties: text(Category::Penalties),
            record_keeping: text(Category::RecordKeeping),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub name: String,
    pub path: PathBuf,
    pub exists: bool,
    pub size_bytes: u64,
}

pub struct ArtifactWriter {
    dir: PathBuf,
    names: ArtifactNames,
}

impl ArtifactWriter {
    pub fn new(dir: impl Into<PathBuf>, names: ArtifactNames) -> Self {
        Self {
            dir: dir.into(),
            names,
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.dir.clone(), config.files.clone())
    }

    /// Write every artifact of a run, creating the output directory if needed
    pub fn write_all(&self, analysis: &ActAnalysis) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.dir)?;
        info!("Writing artifacts to {}", self.dir.display());

        Ok(vec![
            self.write_text(&self.names.raw_text, &analysis.document.raw)?,
            self.write_text(&self.names.cleaned_text, &analysis.document.cleaned)?,
            self.write_json(&self.names.summary, &analysis.summary)?,
            self.write_json(&self.names.fields, &FieldsArtifact::from(&analysis.fields))?,
            self.write_json(&self.names.rule_checks, &analysis.rule_checks)?,
        ])
    }

    pub fn write_text(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.dir.join(name);
        fs::write(&path, content)?;
        debug!("Wrote {}", path.display());
        Ok(path)
    }

    pub fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<PathBuf> {
        let content = serde_json::to_string_pretty(value)?;
        self.write_text(name, &content)
    }

    /// Existence and size of each expected artifact, in write order
    pub fn inventory(&self) -> Vec<ArtifactInfo> {
        [
            &self.names.raw_text,
            &self.names.cleaned_text,
            &self.names.summary,
            &self.names.fields,
            &self.names.rule_checks,
        ]
        .into_iter()
        .map(|name| {
            let path = self.dir.join(name);
            let metadata = fs::metadata(&path).ok();
            ArtifactInfo {
                name: name.clone(),
                exists: metadata.is_some(),
                size_bytes: metadata.map_or(0, |m| m.len()),
                path,
            }
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::fields::CategoryMatches;
    use tempfile::TempDir;

    #[test]
    fn test_fields_artifact_uses_fallback_messages() {
        let fields = FieldExtraction::new([CategoryMatches {
            category: Category::Definitions,
            snippets: vec!["A means B in this Part".to_string(), "C means D in this Part".to_string()],
        }]);

        let artifact = FieldsArtifact::from(&fields);

        assert_eq!(artifact.definitions, "A means B in this Part\n\nC means D in this Part");
        assert_eq!(artifact.obligations, "");
        assert!(artifact.penalties.starts_with("No explicit penalties"));
        assert!(artifact.record_keeping.starts_with("No explicit record-keeping"));

        let json = serde_json::to_value(&artifact).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 7);
        assert!(json.get("record_keeping").is_some());
    }

    #[test]
    fn test_inventory_reports_missing_and_written_files() {
        let dir = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(dir.path(), ArtifactNames::default());

        assert!(writer.inventory().iter().all(|info| !info.exists && info.size_bytes == 0));

        writer.write_text("extracted_text.txt", "cleaned").unwrap();
        let inventory = writer.inventory();

        assert_eq!(inventory.len(), 5);
        let cleaned = inventory.iter().find(|info| info.name == "extracted_text.txt").unwrap();
        assert!(cleaned.exists);
        assert_eq!(cleaned.size_bytes, 7);
    }

    #[test]
    fn test_json_is_pretty_printed() {
        let dir = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(dir.path(), ArtifactNames::default());

        let path = writer.write_json("summary.json", &serde_json::json!({"summary_bullets": ["one"]})).unwrap();
        let content = fs::read_to_string(path).unwrap();

        assert!(content.contains("\n  \"summary_bullets\""));
    }
}
