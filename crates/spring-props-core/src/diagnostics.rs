//! Diagnostic types and error reporting

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub type CoreResult<T> = Result<T, SpringPropsError>;

/// A diagnostic produced while validating a configuration document.
///
/// Lines and columns are 1-based, matching what parsers report.
/// `end_column` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
    pub end_column: usize,
    pub rule: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
}

impl Diagnostic {
    pub fn error(file: PathBuf, line: usize, column: usize, rule: &str, message: String) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            message,
            file,
            line,
            column,
            end_column: column,
            rule: rule.to_string(),
        }
    }

    /// Extend the highlighted span up to `end_column` (exclusive, 1-based).
    pub fn with_end_column(mut self, end_column: usize) -> Self {
        self.end_column = end_column.max(self.column);
        self
    }
}

/// Structural YAML parse failure.
///
/// Carries the parser's 1-based location when one is available.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct YamlError {
    pub message: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl From<serde_yaml::Error> for YamlError {
    fn from(err: serde_yaml::Error) -> Self {
        let location = err.location();
        Self {
            message: err.to_string(),
            line: location.as_ref().map(|l| l.line()),
            column: location.as_ref().map(|l| l.column()),
        }
    }
}

/// Problems found while loading property metadata.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read metadata file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid metadata JSON in {origin}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid property name '{name}' in {origin}")]
    InvalidName { name: String, origin: String },

    #[error("Property '{name}' is declared more than once in {origin}")]
    DuplicateName { name: String, origin: String },

    #[error("Hint for '{name}' in {origin} has no matching property")]
    OrphanHint { name: String, origin: String },
}

#[derive(Error, Debug)]
pub enum SpringPropsError {
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
