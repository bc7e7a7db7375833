//! Request transport: well-formed exchanges through a shared HTTP client
//! and verbatim byte replay over a raw TCP connection.
//!
//! A timeout is a first-class comparable outcome (sentinel status plus the
//! `TIMEOUT` body marker), never a propagated failure. A refused connection
//! is fatal to the run: with no server listening there is nothing to compare.

mod raw;
mod structured;

use std::time::Duration;

use crate::endpoint::Endpoint;
use crate::error::{AppError, AppResult, TransportError, ValidationError};
use crate::response::Response;

/// One request to replay against an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Opaque bytes written verbatim; the caller is responsible for a
    /// syntactically complete (or deliberately broken) request.
    Raw(Vec<u8>),
    /// Well-formed request built from a path and optional entity body.
    Structured {
        path: String,
        body: Option<Vec<u8>>,
    },
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self::Structured {
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::Structured {
            path: path.into(),
            body: Some(body.into()),
        }
    }

    pub fn raw(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Raw(bytes.into())
    }

    /// Rejects malformed structured paths before any network call.
    ///
    /// # Errors
    ///
    /// Returns an error when a structured path does not start with `/`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Structured { path, .. } if !path.starts_with('/') => {
                Err(ValidationError::InvalidRequestPath { path: path.clone() })
            }
            Self::Structured { .. } | Self::Raw(_) => Ok(()),
        }
    }

    /// Path shown in console lines and diff labels.
    pub fn display_path(&self) -> String {
        match self {
            Self::Structured { path, .. } => path.clone(),
            Self::Raw(bytes) => {
                let text = String::from_utf8_lossy(bytes);
                text.lines().next().unwrap_or("<empty>").to_owned()
            }
        }
    }
}

#[derive(Debug)]
pub struct Transport {
    client: reqwest::Client,
    timeout: Duration,
}

impl Transport {
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|source| AppError::transport(TransportError::BuildClientFailed { source }))?;
        Ok(Self { client, timeout })
    }

    /// Performs one exchange and captures the reply as a comparable value.
    ///
    /// # Errors
    ///
    /// Returns an error for caller-contract violations (bad path), and for
    /// the run-fatal refused-connection case. Timeouts and other observed
    /// network failures come back as `Ok` sentinel responses.
    pub async fn send(&self, endpoint: &Endpoint, request: &Request) -> AppResult<Response> {
        request.validate().map_err(AppError::validation)?;
        match request {
            Request::Structured { path, body } => {
                structured::send(&self.client, endpoint, path, body.as_deref()).await
            }
            Request::Raw(bytes) => raw::send(endpoint, bytes, self.timeout).await,
        }
    }
}

/// Walks an error chain looking for a refused-connection I/O error.
pub(crate) fn chain_has_refused(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut source = Some(err);
    while let Some(inner) = source {
        if let Some(io_err) = inner.downcast_ref::<std::io::Error>() {
            if io_err.kind() == std::io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        source = inner.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_path_must_start_with_slash() {
        assert!(Request::get("/sample.html").validate().is_ok());
        let bad = Request::get("sample.html");
        assert!(matches!(
            bad.validate(),
            Err(ValidationError::InvalidRequestPath { .. })
        ));
    }

    #[test]
    fn raw_requests_are_never_path_checked() {
        let raw = Request::raw(b"BROKEN bytes\r\n".to_vec());
        assert!(raw.validate().is_ok());
    }

    #[test]
    fn display_path_truncates_raw_to_request_line() {
        let raw = Request::raw(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n".to_vec());
        assert_eq!(raw.display_path(), "GET / HTTP/1.1");
        assert_eq!(Request::raw(Vec::new()).display_path(), "<empty>");
        assert_eq!(Request::get("/a").display_path(), "/a");
    }

    #[test]
    fn refused_detection_walks_the_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(chain_has_refused(&io_err));
        let other = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow");
        assert!(!chain_has_refused(&other));
    }
}
