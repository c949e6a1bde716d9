//! Input manager for handling different file types

use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{info, warn};
use serde::Serialize;
use std::path::Path;

/// Outcome of reading a source document.
///
/// Extraction problems stay on this side of the boundary: the analysis core
/// only ever receives `Ok` text or, via [`ExtractResult::into_text`], an empty
/// string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExtractResult {
    Ok(String),
    Failed(String),
}

impl ExtractResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, ExtractResult::Ok(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            ExtractResult::Ok(text) => Some(text),
            ExtractResult::Failed(_) => None,
        }
    }

    /// Text for the analysis core; failures become an empty document
    pub fn into_text(self) -> String {
        match self {
            ExtractResult::Ok(text) => text,
            ExtractResult::Failed(reason) => {
                warn!("Using empty document after extraction failure: {}", reason);
                String::new()
            }
        }
    }

    /// Treat a failure as a hard error
    pub fn into_result(self) -> Result<String> {
        match self {
            ExtractResult::Ok(text) => Ok(text),
            ExtractResult::Failed(reason) => Err(ResumeAnalyzerError::InvalidInput(reason)),
        }
    }
}

impl From<Result<String>> for ExtractResult {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(text) => ExtractResult::Ok(text),
            Err(e) => ExtractResult::Failed(e.to_string()),
        }
    }
}

#[derive(Debug, Default)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Read a document, reporting any problem as [`ExtractResult::Failed`]
    pub async fn extract(&self, path: &Path) -> ExtractResult {
        self.extract_text(path).await.into()
    }

    pub async fn extract_text(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(ResumeAnalyzerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        match FileType::from_path(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await
            }
            FileType::Unknown => Err(ResumeAnalyzerError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            ))),
        }
    }
}
