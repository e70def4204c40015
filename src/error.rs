use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FirError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {reason} (line: {content:?})", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        content: String,
        reason: String,
    },

    #[error("Coefficient table is missing tap index(es) {0:?}")]
    MissingTap(Vec<usize>),

    #[error("FIR accumulator overflow at sample {index}")]
    Overflow { index: usize },

    #[error("Device exchange failed: {0}")]
    Device(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl FirError {
    /// Shorthand for a parse failure on a single line of `path`.
    pub fn parse(
        path: impl Into<PathBuf>,
        line: usize,
        content: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            content: content.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FirError>;
