//! Output formatters for the run report

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::RunReport;
use crate::processing::rules::RuleStatus;
use colored::{Color, Colorize};

/// Trait for formatting run reports
pub trait OutputFormatter {
    fn format_report(&self, report: &RunReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for scripting and CI
pub struct JsonFormatter {
    pretty: bool,
}

/// Report generator that dispatches on the configured format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_status(&self, status: RuleStatus) -> String {
        let (label, color) = match status {
            RuleStatus::Pass => ("PASS", Color::Green),
            RuleStatus::Fail => ("FAIL", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", label.color(color).bold())
        } else {
            format!("[{}]", label)
        }
    }

    fn format_size(bytes: u64) -> String {
        if bytes >= 1024 * 1024 {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        } else if bytes >= 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{} B", bytes)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RunReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("ACT EXTRACTION REPORT", 1));
        output.push_str(&format!(
            "Source: {} | Generated: {} | Processing time: {}ms\n",
            report.source.display(),
            chrono::DateTime::<chrono::Utc>::from(report.metadata.generated_at)
                .format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        // Extraction
        output.push_str(&self.format_header("Extraction", 2));
        output.push_str(&format!(
            "Pages: {} ({} with text, {} via OCR",
            report.stats.total_pages, report.stats.pages_with_text, report.stats.pages_with_ocr
        ));
        if report.stats.ocr_failures > 0 {
            output.push_str(&format!(
                ", {}",
                self.colorize(&format!("{} OCR failures", report.stats.ocr_failures), Color::Yellow)
            ));
        }
        output.push_str(")\n");
        output.push_str(&format!(
            "Characters: {} raw, {} cleaned ({} words)\n",
            report.text.raw_chars, report.text.cleaned_chars, report.text.word_count
        ));

        // Artifacts
        output.push_str(&self.format_header("Artifacts", 2));
        for artifact in &report.artifacts {
            if artifact.exists {
                output.push_str(&format!(
                    "  ✓ {} ({})\n",
                    self.colorize(&artifact.path.display().to_string(), Color::Cyan),
                    Self::format_size(artifact.size_bytes)
                ));
            } else {
                output.push_str(&format!(
                    "  ✗ {}\n",
                    self.colorize(&format!("{} (missing)", artifact.path.display()), Color::Red)
                ));
            }
        }

        // Keywords
        if !report.top_keywords.is_empty() {
            output.push_str(&self.format_header("Top Keywords", 2));
            output.push_str(&format!("  {}\n", report.top_keywords.join(", ")));
        }
        output.push_str(&format!("Summary bullets: {}\n", report.summary_bullets));

        // Fields
        output.push_str(&self.format_header("Extracted Fields", 2));
        for category in &report.categories {
            if category.empty {
                output.push_str(&format!(
                    "  {:<18} {}\n",
                    category.category.as_str(),
                    self.colorize("EMPTY", Color::Yellow)
                ));
            } else {
                output.push_str(&format!(
                    "  {:<18} {} snippets, {} chars\n",
                    category.category.as_str(),
                    category.snippets,
                    category.chars
                ));
            }
        }

        // Rules
        output.push_str(&self.format_header(
            &format!("Rule Checks ({}/{} passed)", report.passed(), report.rule_checks.len()),
            2,
        ));
        for check in &report.rule_checks {
            output.push_str(&format!(
                "  {} {} (confidence: {}%)\n",
                self.format_status(check.status),
                check.rule,
                check.confidence
            ));
        }

        if !report.low_confidence.is_empty() {
            output.push_str(&self.format_header(
                &format!("Low Confidence (below {}%)", report.confidence_floor),
                3,
            ));
            for rule in &report.low_confidence {
                output.push_str(&format!("  ⚠ {}\n", self.colorize(rule, Color::Yellow)));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &RunReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
        }
    }

    pub fn generate_report(&self, report: &RunReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}
