//! Error types for Harbormaster core.

use std::{error::Error, fmt};

/// Error type for export rendering operations.
#[derive(Debug)]
pub enum ExportError {
    /// Document rendering failed with a message.
    Document(String),
    /// Spreadsheet rendering failed with a message.
    Spreadsheet(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document(message) => write!(f, "document rendering failed: {message}"),
            Self::Spreadsheet(message) => write!(f, "spreadsheet rendering failed: {message}"),
        }
    }
}

impl Error for ExportError {}

/// Convenience result type for Harbormaster core.
pub type Result<T> = std::result::Result<T, ExportError>;
