use std::fmt;

/// Address of one of the servers taking part in a run.
///
/// Built once at startup from CLI flags or the config file and shared by
/// every scenario; the harness never inspects what is behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authority_matches_display() {
        let endpoint = Endpoint::new("127.0.0.1", 49200);
        assert_eq!(endpoint.authority(), "127.0.0.1:49200");
        assert_eq!(endpoint.to_string(), "127.0.0.1:49200");
    }
}
