//! Error handling for mdfix filters
//!
//! This module provides a unified error type and result type for all
//! filter operations.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Conversion error type
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Parse error - embedded markup could not be tokenized
    #[error("{}", display_parse(.message, .offset))]
    ParseError {
        message: String,
        offset: Option<usize>,
    },
    /// Table shape the selected strategy does not handle
    #[error("Unsupported table shape: {message}")]
    UnsupportedShape { message: String },
    /// Target file does not exist
    #[error("File {} does not exist", .path.display())]
    NotFound { path: PathBuf },
    /// IO error while reading or writing the target file
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Invalid input
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

fn display_parse(message: &str, offset: &Option<usize>) -> String {
    match offset {
        Some(o) => format!("Parse error at byte {}: {}", o, message),
        None => format!("Parse error: {}", message),
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Conversion warnings (non-fatal issues)
#[derive(Debug, Clone)]
pub struct ConversionWarning {
    pub message: String,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(l) = self.line {
            write!(f, "Warning at line {}: {}", l, self.message)?;
        } else {
            write!(f, "Warning: {}", self.message)?;
        }
        if let Some(ref sug) = self.suggestion {
            write!(f, " ({})", sug)?;
        }
        Ok(())
    }
}

/// Conversion output with optional warnings
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// The converted content
    pub content: String,
    /// Any warnings generated during conversion
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionOutput {
    pub fn new(content: String) -> Self {
        Self {
            content,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(content: String, warnings: Vec<ConversionWarning>) -> Self {
        Self { content, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

// Convenience constructors for errors
impl ConversionError {
    pub fn parse(message: impl Into<String>) -> Self {
        ConversionError::ParseError {
            message: message.into(),
            offset: None,
        }
    }

    pub fn parse_at(message: impl Into<String>, offset: usize) -> Self {
        ConversionError::ParseError {
            message: message.into(),
            offset: Some(offset),
        }
    }

    pub fn unsupported_shape(message: impl Into<String>) -> Self {
        ConversionError::UnsupportedShape {
            message: message.into(),
        }
    }

    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ConversionError::NotFound { path: path.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConversionError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ConversionError::InvalidInput {
            message: message.into(),
        }
    }
}
