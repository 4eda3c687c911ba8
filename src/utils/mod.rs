//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error, warning and result types
//! - The file driver shared by every filter

pub mod driver;
pub mod error;

// Re-export commonly used items
pub use driver::{process_file, FileOutcome, Filter, FilterOptions, WritePolicy};
pub use error::{ConversionError, ConversionOutput, ConversionResult, ConversionWarning};
