// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadError>;

/// Everything that can stop a load. No partial `Table` is ever handed back
/// alongside one of these.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not allocate a {rows}x{columns} frame")]
    Allocation { rows: usize, columns: usize },

    /// `line` is the 1-based source line (the header is line 1), `column` is 0-based.
    #[error("line {line}, column {column}: {token:?} is not a number")]
    Parse {
        line: usize,
        column: usize,
        token: String,
    },

    #[error("line {line}: expected {expected} fields, found {found}")]
    DimensionMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid config: {0}")]
    Config(String),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }

    /// The source line an error points at, if it points at one.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::Parse { line, .. } | LoadError::DimensionMismatch { line, .. } => {
                Some(*line)
            }
            _ => None,
        }
    }
}
