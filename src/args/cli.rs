use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use super::parsers::parse_duration_arg;
use crate::endpoint::Endpoint;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Differential conformance tester for HTTP servers - replays identical requests against a subject and reference oracles and diffs the responses."
)]
pub struct HarnessArgs {
    /// Host the subject and oracle servers listen on
    #[arg(long, env = "HTDIFF_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port of the server under test
    #[arg(long = "subject-port", env = "HTDIFF_SUBJECT_PORT", default_value_t = 49200)]
    pub subject_port: u16,

    /// Port of the nginx-style reference server
    #[arg(long = "nginx-port", env = "HTDIFF_NGINX_PORT", default_value_t = 49201)]
    pub nginx_port: u16,

    /// Port of the Apache-style reference server with CGI support
    #[arg(long = "apache-port", env = "HTDIFF_APACHE_PORT", default_value_t = 49202)]
    pub apache_port: u16,

    /// Per-request timeout (supports ms/s/m/h suffixes)
    #[arg(long, env = "HTDIFF_TIMEOUT", value_parser = parse_duration_arg, default_value = "10s")]
    pub timeout: Duration,

    /// Document root the expected-body fixtures are read from
    #[arg(long = "doc-root", env = "HTDIFF_DOC_ROOT", default_value = "public")]
    pub doc_root: PathBuf,

    /// Path the HTML diff artifact is written to (overwritten each run)
    #[arg(long = "diff-output", default_value = "diff.html")]
    pub diff_output: PathBuf,

    /// Literal-request file used for raw replays; {PATH} is substituted per case
    #[arg(long = "request-template")]
    pub request_template: Option<PathBuf>,

    /// Run only the named scenarios (repeatable)
    #[arg(long = "scenario")]
    pub scenarios: Vec<String>,

    /// List available scenarios and exit
    #[arg(long = "list-scenarios")]
    pub list_scenarios: bool,

    /// Skip scenarios that compare against a live reference server
    #[arg(long = "skip-cmp")]
    pub skip_cmp: bool,

    /// Config file path (htdiff.toml is picked up by default when present)
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Disable colored OK/KO markers
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl HarnessArgs {
    pub fn subject(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.subject_port)
    }

    pub fn nginx(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.nginx_port)
    }

    pub fn apache(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.apache_port)
    }
}
