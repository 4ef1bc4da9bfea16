use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListError {
    #[error("Certificate decoder error: {0}")]
    ExternalTool(String),

    #[error("Failed to parse entity file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("The entity file {} is not in the correct format: `{field}` must be a {expected}", path.display())]
    Validation {
        path: PathBuf,
        field: &'static str,
        expected: &'static str,
    },

    #[error("Unsupported public key algorithm in {}: {algorithm}", path.display())]
    UnsupportedAlgorithm { path: PathBuf, algorithm: String },

    #[error("Invalid certificate {}: {reason}", path.display())]
    InvalidCertificate { path: PathBuf, reason: String },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ListError>;

/// Read a text file, naming it in the error
pub fn read_file(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ListError::Read {
        path: path.to_path_buf(),
        source,
    })
}
