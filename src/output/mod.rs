//! Output module
//! Persists run artifacts and renders the run report

pub mod artifacts;
pub mod report;
pub mod formatter;

pub use artifacts::{ArtifactInfo, ArtifactWriter, FieldsArtifact};
pub use formatter::{ConsoleFormatter, JsonFormatter, OutputFormatter, ReportGenerator};
pub use report::RunReport;
