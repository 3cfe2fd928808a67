//! Error types for form-group building

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Failures while loading or interpreting a StructureDefinition
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid resource type: {0:?}")]
    InvalidResourceType(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed with status: {status}")]
    Status { url: String, status: u16 },

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed StructureDefinition: {0}")]
    Malformed(String),

    #[error("StructureDefinition error: {0}")]
    Model(#[from] chartform_models::Error),
}

/// Coarse classification of a load failure, used to pick log severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The document could not be retrieved at all
    Unreachable,
    /// The document was retrieved but is not a usable StructureDefinition
    Malformed,
    /// The caller passed an unusable resource type
    InvalidInput,
}

impl Error {
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Error::Http(_) | Error::Status { .. } | Error::Io { .. } => FailureKind::Unreachable,
            Error::Malformed(_) | Error::Model(_) => FailureKind::Malformed,
            Error::InvalidResourceType(_) => FailureKind::InvalidInput,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureKind::Unreachable => "unreachable",
            FailureKind::Malformed => "malformed",
            FailureKind::InvalidInput => "invalid_input",
        })
    }
}
