use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Connection refused by {endpoint}; no differential judgment is possible without a live server.")]
    ConnectionRefused { endpoint: String },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid request URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
