use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Request path '{path}' must start with '/'.")]
    InvalidRequestPath { path: String },
    #[error("Invalid percent-encoding in '{value}'.")]
    InvalidPercentEncoding { value: String },
    #[error("Body similarity threshold {value} is outside [0, 1].")]
    ThresholdOutOfRange { value: f64 },
    #[error("Unknown scenario '{name}'.")]
    UnknownScenario { name: String },
    #[error("No scenarios selected.")]
    NoScenariosSelected,
    #[error("Failed to read expected-body fixture '{path}': {source}")]
    ReadFixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read request template '{path}': {source}")]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{failed} non-advisory scenario(s) failed.")]
    ScenariosFailed { failed: usize },
}
