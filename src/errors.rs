//! Errors raised while building a puzzle from its text inputs.
//!
//! Failing to find a fill is not an error; see [`crate::solver::FillFailure`].

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CrosswordError {
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("structure has no rows")]
    EmptyStructure,

    #[error("structure row {row} has {found} cells, expected {expected}")]
    RaggedStructure {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid character '{found}' at row {row}, column {column} (expected '_', '.' or '#')")]
    InvalidCell { row: usize, column: usize, found: char },
}

impl CrosswordError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            CrosswordError::Io { .. } => "E001",
            CrosswordError::Write { .. } => "E002",
            CrosswordError::EmptyStructure => "E003",
            CrosswordError::RaggedStructure { .. } => "E004",
            CrosswordError::InvalidCell { .. } => "E005",
        }
    }
}

pub type Result<T> = std::result::Result<T, CrosswordError>;
