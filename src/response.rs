//! Normalized view of whatever came back from an endpoint.
//!
//! Raw replies are split into a head and a body on the first empty line;
//! the status code is the token following the HTTP version on the status
//! line. Malformed or absent framing never errors, it degrades to the
//! sentinel status so a broken reply stays comparable.

/// Status recorded when the transport failed or no status line was found.
pub const STATUS_UNAVAILABLE: i32 = -1;

/// Body marker recorded when an exchange timed out.
pub const TIMEOUT_BODY: &str = "TIMEOUT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: i32,
    pub body: String,
    pub raw_head: String,
}

impl Response {
    pub fn new(status: i32, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            raw_head: String::new(),
        }
    }

    /// Comparable outcome for a timed-out exchange.
    pub fn timeout() -> Self {
        Self::new(STATUS_UNAVAILABLE, TIMEOUT_BODY)
    }

    /// Comparable outcome for a non-fatal transport failure.
    pub fn failed(detail: impl Into<String>) -> Self {
        Self::new(STATUS_UNAVAILABLE, detail)
    }

    /// Splits raw response text into head and body and extracts the status.
    pub fn parse(raw: &str) -> Self {
        let (head, body) = split_head_body(raw);
        Self {
            status: parse_status_code(head),
            body: body.to_owned(),
            raw_head: head.to_owned(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.status == STATUS_UNAVAILABLE && self.body == TIMEOUT_BODY
    }

    /// The head lines carrying the HTTP version token, newline-joined.
    ///
    /// Used for status-line-only comparison of raw replays; other headers
    /// are deliberately ignored since their ordering is not a compatibility
    /// requirement for this harness.
    pub fn status_lines(&self) -> String {
        status_lines(&self.raw_head)
    }
}

/// Splits on the first `\r\n\r\n`. When the separator is absent the whole
/// input is head and the body is empty; this is never an error.
pub fn split_head_body(raw: &str) -> (&str, &str) {
    raw.split_once("\r\n\r\n").unwrap_or((raw, ""))
}

/// First token after `HTTP/x.x` on the first line mentioning it, or the
/// sentinel when no such line exists.
pub fn parse_status_code(head: &str) -> i32 {
    head.lines()
        .find(|line| line.contains("HTTP/"))
        .and_then(|line| {
            let mut tokens = line.split_whitespace();
            tokens.find(|token| token.starts_with("HTTP/"))?;
            tokens.next()?.parse::<i32>().ok()
        })
        .unwrap_or(STATUS_UNAVAILABLE)
}

pub fn status_lines(head: &str) -> String {
    let mut out = String::new();
    for line in head.lines() {
        if line.contains("HTTP") {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_round_trips_head_and_body() {
        let head = "HTTP/1.1 200 OK\r\nContent-Length: 2";
        let body = "ok";
        let raw = format!("{}\r\n\r\n{}", head, body);
        assert_eq!(split_head_body(&raw), (head, body));
    }

    #[test]
    fn split_without_separator_is_all_head() {
        assert_eq!(split_head_body("HTTP/1.1 200 OK"), ("HTTP/1.1 200 OK", ""));
        assert_eq!(split_head_body(""), ("", ""));
    }

    #[test]
    fn parse_extracts_status_code() {
        let res = Response::parse("HTTP/1.1 404 Not Found\r\nServer: x\r\n\r\nmissing");
        assert_eq!(res.status, 404);
        assert_eq!(res.body, "missing");
        assert_eq!(res.raw_head, "HTTP/1.1 404 Not Found\r\nServer: x");
    }

    #[test]
    fn parse_without_status_line_is_sentinel() {
        assert_eq!(Response::parse("garbage").status, STATUS_UNAVAILABLE);
        assert_eq!(Response::parse("").status, STATUS_UNAVAILABLE);
        assert_eq!(
            Response::parse("HTTP/1.1 abc OK\r\n\r\n").status,
            STATUS_UNAVAILABLE
        );
    }

    #[test]
    fn status_lines_keeps_only_version_lines() {
        let res = Response::parse("HTTP/1.1 200 OK\r\nServer: nginx\r\nDate: now\r\n\r\nbody");
        assert_eq!(res.status_lines(), "HTTP/1.1 200 OK\n");
    }

    #[test]
    fn timeout_sentinel_shape() {
        let res = Response::timeout();
        assert_eq!(res.status, STATUS_UNAVAILABLE);
        assert_eq!(res.body, TIMEOUT_BODY);
        assert!(res.is_timeout());
    }
}
