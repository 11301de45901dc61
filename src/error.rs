use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::MetricKind;

/// Failure to open or structurally parse a metric source file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open metric CSV {path:?}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("metric CSV preamble truncated: expected {expected} lines, found {found}")]
    Preamble { expected: usize, found: usize },
    #[error("malformed metric CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("metric CSV is missing required column '{0}'")]
    MissingColumn(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failure to fetch or decode the county boundary collection.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("geometry request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },
    #[error("geometry request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("failed to read geometry file {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("malformed geometry collection: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl RenderError {
    /// The single message shown in place of the map.
    pub fn user_message(&self, kind: MetricKind) -> String {
        match self {
            RenderError::Load(e) => format!("Failed to load {} data: {}", kind.display_name(), e),
            RenderError::Fetch(e) => format!("Failed to load county boundaries: {}", e),
        }
    }
}
