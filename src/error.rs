// src/error.rs

use thiserror::Error;

/// Raised while turning a layout description into a `Layout`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// `line` is 1-based and points at the offending entry.
    #[error("malformed layout entry at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Raised while converting a single fixed-width line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("line length is {actual} characters, expected {expected}")]
    LineLength { expected: usize, actual: usize },

    #[error("column `{column}`: `{value}` is not a YYYY-MM-DD date")]
    DateFormat { column: String, value: String },

    #[error("column `{column}`: `{value}` is not a number")]
    NumericFormat { column: String, value: String },

    #[error("column `{column}`: `{value}` contains whitespace inside the field")]
    FieldFormat { column: String, value: String },
}
