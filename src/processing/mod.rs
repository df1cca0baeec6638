//! Extractive text analysis stages

pub mod category;
pub mod text_processor;
pub mod keywords;
pub mod summarizer;
pub mod fields;
pub mod rules;
pub mod document;
pub mod analyzer;

pub use analyzer::{ActAnalysis, AnalysisEngine};
pub use category::Category;
