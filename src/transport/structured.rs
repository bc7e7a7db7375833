//! Well-formed exchanges: GET when the request carries no body, POST with
//! the body as the entity otherwise. Error statuses are captured, not raised.

use std::fmt::Write as _;

use crate::endpoint::Endpoint;
use crate::error::{AppError, AppResult, TransportError};
use crate::response::Response;

pub(super) async fn send(
    client: &reqwest::Client,
    endpoint: &Endpoint,
    path: &str,
    body: Option<&[u8]>,
) -> AppResult<Response> {
    let raw_url = format!("http://{}{}", endpoint.authority(), path);
    let url = reqwest::Url::parse(&raw_url).map_err(|source| {
        AppError::transport(TransportError::InvalidUrl {
            url: raw_url,
            source,
        })
    })?;

    let builder = match body {
        Some(bytes) => client.post(url).body(bytes.to_vec()),
        None => client.get(url),
    };

    match builder.send().await {
        Ok(reply) => {
            let status = i32::from(reply.status().as_u16());
            let raw_head = format_head(&reply);
            let body = match reply.text().await {
                Ok(text) => text,
                Err(err) if err.is_timeout() => return Ok(Response::timeout()),
                Err(err) => return Ok(Response::failed(err.to_string())),
            };
            Ok(Response {
                status,
                body,
                raw_head,
            })
        }
        Err(err) if super::chain_has_refused(&err) => Err(AppError::transport(
            TransportError::ConnectionRefused {
                endpoint: endpoint.to_string(),
            },
        )),
        Err(err) if err.is_timeout() => Ok(Response::timeout()),
        Err(err) => Ok(Response::failed(err.to_string())),
    }
}

/// Rebuilds a status line and header block so structured replies can take
/// part in status-line comparisons like raw ones do.
fn format_head(reply: &reqwest::Response) -> String {
    let status = reply.status();
    let mut head = format!(
        "{:?} {} {}",
        reply.version(),
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    );
    for (name, value) in reply.headers() {
        let _ = write!(head, "\r\n{}: {}", name, value.to_str().unwrap_or("<binary>"));
    }
    head
}
