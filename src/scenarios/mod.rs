//! Table-driven scenario library.
//!
//! Every scenario is data: a name, an advisory flag, and a list of cases
//! pairing a request with an expectation. One generic runner consumes the
//! table; there is no per-scenario comparison code.

pub mod cgi;
pub mod template;

use std::path::PathBuf;

use crate::compare::ComparisonPolicy;

/// Which reference server a comparison case targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleKind {
    /// Mainstream HTTP server (static files, no CGI).
    Nginx,
    /// Mainstream HTTP server with CGI support.
    Apache,
}

impl OracleKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Nginx => "nginx",
            Self::Apache => "apache",
        }
    }
}

#[derive(Debug, Clone)]
pub enum CaseRequest {
    /// Well-formed request for `path` built by the HTTP client.
    Structured { path: String },
    /// Raw replay of the request template with `{PATH}` substituted.
    Template { path: String },
}

impl CaseRequest {
    pub fn path(&self) -> &str {
        match self {
            Self::Structured { path } | Self::Template { path } => path,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Expectation {
    /// Expect this status code; the body is whatever the policy says.
    Status(i32),
    /// Expect this status code and the literal content of a document-root
    /// file as the body.
    StatusAndFile { status: i32, file: PathBuf },
    /// Expect whatever the named reference server answers.
    Oracle(OracleKind),
}

#[derive(Debug, Clone)]
pub struct Case {
    pub request: CaseRequest,
    pub expect: Expectation,
    pub policy: ComparisonPolicy,
    /// Keep a diff fragment even when the comparison passes.
    pub save_diff: bool,
    /// Extra context shown in the diff label (derived CGI argv and the like).
    pub note: Option<String>,
}

impl Case {
    fn new(request: CaseRequest, expect: Expectation, policy: ComparisonPolicy) -> Self {
        Self {
            request,
            expect,
            policy,
            save_diff: false,
            note: None,
        }
    }

    fn with_save_diff(mut self) -> Self {
        self.save_diff = true;
        self
    }

    fn with_note(mut self, note: String) -> Self {
        self.note = Some(note);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    /// Failures of an advisory scenario are reported but do not flip the
    /// overall run result.
    pub advisory: bool,
    /// Needs a live reference server; skipped under `--skip-cmp`.
    pub requires_oracle: bool,
    pub cases: Vec<Case>,
}

fn get(path: &str) -> CaseRequest {
    CaseRequest::Structured {
        path: path.to_owned(),
    }
}

fn replay(path: &str) -> CaseRequest {
    CaseRequest::Template {
        path: path.to_owned(),
    }
}

fn expect_file(path: &str) -> Expectation {
    Expectation::StatusAndFile {
        status: 200,
        file: PathBuf::from(path.trim_start_matches('/')),
    }
}

/// The full scenario table.
pub fn library() -> Vec<Scenario> {
    vec![
        simple(),
        not_found(),
        autoindex(),
        path_normalization(),
        traversal(),
        long_path(),
        percent_decoding(),
        percent_decoding_strict(),
        percent_decoding_passthrough(),
        cgi_args(),
        content_negotiation(),
        cmp(),
    ]
}

pub fn scenario_names() -> Vec<&'static str> {
    library().into_iter().map(|scenario| scenario.name).collect()
}

fn simple() -> Scenario {
    let full = ComparisonPolicy::default();
    Scenario {
        name: "simple",
        advisory: false,
        requires_oracle: false,
        cases: vec![
            Case::new(get("/sample.html"), expect_file("/sample.html"), full),
            Case::new(get("/hoge/hoge.html"), expect_file("/hoge/hoge.html"), full),
            Case::new(get("/fuga/fuga.html"), expect_file("/fuga/fuga.html"), full),
        ],
    }
}

fn not_found() -> Scenario {
    let code_only = ComparisonPolicy::status_only();
    Scenario {
        name: "not_found",
        advisory: false,
        requires_oracle: false,
        cases: vec![
            Case::new(get("/NotExist"), Expectation::Status(404), code_only),
            Case::new(get("/NotExist/NotExist"), Expectation::Status(404), code_only),
            Case::new(get("/hoge/NotExist"), Expectation::Status(404), code_only),
        ],
    }
}

fn autoindex() -> Scenario {
    Scenario {
        name: "autoindex",
        advisory: false,
        requires_oracle: false,
        cases: vec![Case::new(
            get("/"),
            Expectation::Status(200),
            ComparisonPolicy::status_only(),
        )],
    }
}

fn path_normalization() -> Scenario {
    let full = ComparisonPolicy::default();
    let code_only = ComparisonPolicy::status_only();
    let ok_root = [
        "/", "/.", "/./", "/sample.html/..", "/sample.html/../",
    ];
    let ok_sample = [
        "///sample.html",
        "/./././sample.html",
        "/NotExist/../sample.html",
    ];
    let missing = [
        "/sample.html/.",
        "/sample.html/NotExist/.",
        "/sample.html/NotExist/..",
        "/sample.html/NotExist/../",
    ];
    let mut cases = Vec::new();
    for path in ok_root {
        cases.push(Case::new(replay(path), Expectation::Status(200), code_only));
    }
    for path in ok_sample {
        cases.push(Case::new(replay(path), expect_file("/sample.html"), full));
    }
    for path in missing {
        cases.push(Case::new(replay(path), Expectation::Status(404), code_only));
    }
    Scenario {
        name: "path_normalization",
        advisory: false,
        requires_oracle: false,
        cases,
    }
}

fn traversal() -> Scenario {
    let code_only = ComparisonPolicy::status_only();
    Scenario {
        name: "traversal",
        advisory: false,
        requires_oracle: false,
        cases: vec![
            Case::new(replay("/.."), Expectation::Status(400), code_only),
            Case::new(replay("/../"), Expectation::Status(400), code_only),
            Case::new(replay("/NotExist/../.."), Expectation::Status(400), code_only),
        ],
    }
}

/// A request path of 10_001 slashes must be answered with 414.
fn long_path() -> Scenario {
    Scenario {
        name: "long_path",
        advisory: false,
        requires_oracle: false,
        cases: vec![Case::new(
            replay(&"/".repeat(10_001)),
            Expectation::Status(414),
            ComparisonPolicy::status_only(),
        )],
    }
}

fn percent_decoding() -> Scenario {
    let full = ComparisonPolicy::default();
    Scenario {
        name: "percent_decoding",
        advisory: false,
        requires_oracle: false,
        cases: vec![
            Case::new(get("/%73ample.html"), expect_file("/sample.html"), full),
            Case::new(get("/%73%61mple.html"), expect_file("/sample.html"), full),
        ],
    }
}

/// One of the two source policies for malformed escapes: reject with 400.
fn percent_decoding_strict() -> Scenario {
    let code_only = ComparisonPolicy::status_only();
    Scenario {
        name: "percent_decoding_strict",
        advisory: false,
        requires_oracle: false,
        cases: vec![
            Case::new(replay("/sample%zz.html"), Expectation::Status(400), code_only),
            Case::new(replay("/sample%.html"), Expectation::Status(400), code_only),
        ],
    }
}

/// The other source policy: pass the raw string through untouched and let
/// the reference server pick the status.
fn percent_decoding_passthrough() -> Scenario {
    Scenario {
        name: "percent_decoding_passthrough",
        advisory: true,
        requires_oracle: true,
        cases: vec![Case::new(
            replay("/sample%zz.html"),
            Expectation::Oracle(OracleKind::Nginx),
            ComparisonPolicy::status_only(),
        )],
    }
}

fn cgi_args() -> Scenario {
    let full = ComparisonPolicy::default();
    let argv_case = |path: &str, query: &str| {
        // The raw query stays in the request verbatim; the derived argv is
        // only advisory context for the diff label.
        let case = Case::new(
            get(&format!("{}?{}", path, query)),
            Expectation::Oracle(OracleKind::Apache),
            full,
        );
        match cgi::derive_cgi_args(query) {
            Ok(Some(args)) => case.with_note(format!("derived argv: {:?}", args)),
            Ok(None) => case.with_note("derived argv: (suppressed)".to_owned()),
            Err(_) => case.with_note("derived argv: (malformed query)".to_owned()),
        }
    };
    Scenario {
        name: "cgi_args",
        advisory: true,
        requires_oracle: true,
        cases: vec![
            argv_case("/cgi-bin/echo", "arg1+arg2+arg3"),
            argv_case("/cgi-bin/echo", "%61rg1+arg2"),
            argv_case("/cgi-bin/echo", "key=value"),
        ],
    }
}

fn content_negotiation() -> Scenario {
    Scenario {
        name: "content_negotiation",
        advisory: true,
        requires_oracle: true,
        cases: vec![Case::new(
            replay("/sample.unknownext"),
            Expectation::Oracle(OracleKind::Nginx),
            ComparisonPolicy::status_only(),
        )],
    }
}

fn cmp() -> Scenario {
    Scenario {
        name: "cmp",
        advisory: true,
        requires_oracle: true,
        cases: vec![
            Case::new(
                get("/sample.html"),
                Expectation::Oracle(OracleKind::Nginx),
                ComparisonPolicy::default(),
            )
            .with_save_diff(),
        ],
    }
}
