use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Diff buffer exceeded {limit} characters ({size}); failure volume is too large for a useful artifact.")]
    DiffBufferExceeded { size: usize, limit: usize },
    #[error("Failed to write diff artifact '{path}': {source}")]
    WriteArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
