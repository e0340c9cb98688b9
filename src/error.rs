use std::path::{Path, PathBuf};

/// Failures surfaced by the analysis pipeline.
///
/// Irregularities inside a file (blank lines, stray non-numeric lines) never
/// reach this type. Only structural problems that would corrupt a comparison do.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}: malformed table at line {line}: {reason}", path.display())]
    MalformedTable {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("index out of range: {0}")]
    IndexOutOfRange(String),
    #[error("sensor count mismatch: expected {expected} sensors, found {found}")]
    SensorCountMismatch { expected: usize, found: usize },
    #[error("{}: no polygons found for material filter {filter:?}", path.display())]
    MissingGeometry { path: PathBuf, filter: Vec<String> },
    #[error("year {0} is a leap year; only 365-day years (8760 hours) are modeled")]
    LeapYear(i32),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: invalid CSV", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{}: invalid JSON", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
