//! Raw byte replay: write the request verbatim, wait a short settle
//! interval for subjects that flush asynchronously, then drain whatever
//! arrives up to a generous cap.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::endpoint::Endpoint;
use crate::error::{AppError, AppResult, TransportError};
use crate::response::Response;

/// Delay between writing the request and the first read.
const SETTLE_INTERVAL: Duration = Duration::from_millis(100);
/// Total bytes read before the reply is considered complete.
const READ_CAP: usize = 10_000;

pub(super) async fn send(
    endpoint: &Endpoint,
    bytes: &[u8],
    timeout: Duration,
) -> AppResult<Response> {
    let connect = tokio::time::timeout(timeout, TcpStream::connect(endpoint.authority())).await;
    let mut stream = match connect {
        Err(_elapsed) => return Ok(Response::timeout()),
        Ok(Err(err)) if err.kind() == std::io::ErrorKind::ConnectionRefused => {
            return Err(AppError::transport(TransportError::ConnectionRefused {
                endpoint: endpoint.to_string(),
            }));
        }
        Ok(Err(err)) => return Ok(Response::failed(err.to_string())),
        Ok(Ok(stream)) => stream,
    };

    if let Err(err) = stream.write_all(bytes).await {
        return Ok(Response::failed(err.to_string()));
    }
    tokio::time::sleep(SETTLE_INTERVAL).await;

    match drain(&mut stream, timeout).await {
        Drained::Bytes(raw) => Ok(Response::parse(&String::from_utf8_lossy(&raw))),
        Drained::TimedOut => Ok(Response::timeout()),
        Drained::Failed(detail) => Ok(Response::failed(detail)),
    }
}

enum Drained {
    Bytes(Vec<u8>),
    TimedOut,
    Failed(String),
}

/// Reads until EOF, the cap, or a quiet connection. The first read waits up
/// to the full timeout; later reads only wait one settle interval so a
/// keep-alive server does not stall the exchange.
async fn drain(stream: &mut TcpStream, timeout: Duration) -> Drained {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let wait = if buffer.is_empty() {
            timeout
        } else {
            SETTLE_INTERVAL
        };
        match tokio::time::timeout(wait, stream.read(&mut chunk)).await {
            Err(_elapsed) => {
                if buffer.is_empty() {
                    return Drained::TimedOut;
                }
                return Drained::Bytes(buffer);
            }
            Ok(Ok(0)) => return Drained::Bytes(buffer),
            Ok(Ok(n)) => {
                buffer.extend_from_slice(chunk.get(..n).unwrap_or_default());
                if buffer.len() >= READ_CAP {
                    buffer.truncate(READ_CAP);
                    return Drained::Bytes(buffer);
                }
            }
            Ok(Err(err)) => {
                if buffer.is_empty() {
                    return Drained::Failed(err.to_string());
                }
                return Drained::Bytes(buffer);
            }
        }
    }
}
