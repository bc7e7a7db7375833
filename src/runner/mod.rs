//! Scenario execution against the subject and the oracles.
//!
//! All run state (ledger, diff buffer, transport) lives in an explicit
//! [`RunContext`] constructed once per run and torn down after the summary.

mod ledger;
mod summary;

pub use ledger::{ResultLedger, TestOutcome};
pub use summary::Markers;

use std::path::PathBuf;

use crate::args::HarnessArgs;
use crate::compare::{bodies_equal, responses_equal};
use crate::endpoint::Endpoint;
use crate::error::{AppError, AppResult, ValidationError};
use crate::report::DiffBuffer;
use crate::response::Response;
use crate::scenarios::template::RequestTemplate;
use crate::scenarios::{Case, CaseRequest, Expectation, OracleKind, Scenario};
use crate::transport::{Request, Transport};

/// Request paths longer than this are truncated in console lines.
const LOG_PATH_LIMIT: usize = 50;

pub struct RunContext {
    transport: Transport,
    subject: Endpoint,
    nginx: Endpoint,
    apache: Endpoint,
    doc_root: PathBuf,
    template: RequestTemplate,
    ledger: ResultLedger,
    diff: DiffBuffer,
    markers: Markers,
}

impl RunContext {
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built or the request
    /// template file cannot be read.
    pub fn new(args: &HarnessArgs) -> AppResult<Self> {
        let template = match &args.request_template {
            Some(path) => RequestTemplate::load(path).map_err(AppError::validation)?,
            None => RequestTemplate::builtin(),
        };
        Ok(Self {
            transport: Transport::new(args.timeout)?,
            subject: args.subject(),
            nginx: args.nginx(),
            apache: args.apache(),
            doc_root: args.doc_root.clone(),
            template,
            ledger: ResultLedger::default(),
            diff: DiffBuffer::new(),
            markers: Markers::new(args.no_color),
        })
    }

    /// Runs every case of one scenario and reports scenario-level success.
    /// Advisory scenarios always report `true`; their failures stay visible
    /// in the ledger and the summary only.
    ///
    /// # Errors
    ///
    /// Propagates run-fatal conditions (refused connection, diff buffer
    /// overflow, unreadable fixture).
    pub async fn run_scenario(&mut self, scenario: &Scenario) -> AppResult<bool> {
        println!("--- {} ---", scenario.name.to_uppercase());
        for case in &scenario.cases {
            self.run_case(scenario.name, case).await?;
        }
        println!();
        let passed = self.ledger.scenario_passed(scenario.name);
        if scenario.advisory {
            return Ok(true);
        }
        Ok(passed)
    }

    /// Performs one comparison and records exactly one outcome under the
    /// given scenario name.
    ///
    /// # Errors
    ///
    /// Propagates run-fatal conditions; comparable failures are captured in
    /// the returned flag and the ledger instead.
    pub async fn run_case(&mut self, scenario: &str, case: &Case) -> AppResult<bool> {
        let request = self.build_request(&case.request);
        let path = case.request.path().to_owned();

        let subject_endpoint = self.subject.clone();
        let actual = self
            .send_with_context(scenario, &path, &subject_endpoint, &request)
            .await?;
        let (expected, expected_from) = self.resolve_expectation(scenario, case, &request).await?;

        let success = judge(case, &actual, &expected);

        let log_msg = format_log_line(&path);
        println!("{} {}", self.markers.pick(success), log_msg);

        if case.save_diff || !success {
            let mut label = format!(
                "scenario {}\n{}\nsubject {} expected {}",
                scenario, log_msg, subject_endpoint, expected_from
            );
            if let Some(note) = &case.note {
                label.push('\n');
                label.push_str(note);
            }
            self.diff
                .record(&label, &expected.body, &actual.body)
                .map_err(AppError::report)?;
        }

        self.ledger.record(TestOutcome {
            scenario: scenario.to_owned(),
            success,
            message: log_msg,
        });
        Ok(success)
    }

    pub fn print_summary(&self) {
        summary::print_summary(&self.ledger, &self.markers);
    }

    /// # Errors
    ///
    /// Returns an error when the artifact cannot be written.
    pub fn write_artifact(&self, path: &std::path::Path) -> AppResult<()> {
        self.diff.write_artifact(path).map_err(AppError::report)?;
        tracing::debug!(artifact = %path.display(), size = self.diff.len(), "diff artifact written");
        Ok(())
    }

    fn build_request(&self, request: &CaseRequest) -> Request {
        match request {
            CaseRequest::Structured { path } => Request::get(path.clone()),
            CaseRequest::Template { path } => {
                Request::raw(self.template.render_path(path).into_bytes())
            }
        }
    }

    async fn resolve_expectation(
        &self,
        scenario: &str,
        case: &Case,
        request: &Request,
    ) -> AppResult<(Response, String)> {
        match &case.expect {
            Expectation::Status(status) => Ok((Response::new(*status, ""), format!("status {}", status))),
            Expectation::StatusAndFile { status, file } => {
                let full_path = self.doc_root.join(file);
                let body = std::fs::read_to_string(&full_path).map_err(|source| {
                    AppError::validation(ValidationError::ReadFixture {
                        path: full_path.clone(),
                        source,
                    })
                })?;
                Ok((
                    Response::new(*status, body),
                    format!("status {} body {}", status, full_path.display()),
                ))
            }
            Expectation::Oracle(kind) => {
                let endpoint = self.oracle(*kind).clone();
                let reply = self
                    .send_with_context(scenario, case.request.path(), &endpoint, request)
                    .await?;
                Ok((reply, format!("{} {}", kind.label(), endpoint)))
            }
        }
    }

    fn oracle(&self, kind: OracleKind) -> &Endpoint {
        match kind {
            OracleKind::Nginx => &self.nginx,
            OracleKind::Apache => &self.apache,
        }
    }

    async fn send_with_context(
        &self,
        scenario: &str,
        path: &str,
        endpoint: &Endpoint,
        request: &Request,
    ) -> AppResult<Response> {
        match self.transport.send(endpoint, request).await {
            Ok(response) => Ok(response),
            Err(err) => {
                tracing::error!(
                    scenario,
                    path,
                    endpoint = %endpoint,
                    "aborting run: {}",
                    err
                );
                Err(err)
            }
        }
    }
}

/// Raw replays compared against an oracle match on status lines rather than
/// the parsed code, since both sides came off the wire unframed.
fn judge(case: &Case, actual: &Response, expected: &Response) -> bool {
    if let (CaseRequest::Template { .. }, Expectation::Oracle(_)) = (&case.request, &case.expect) {
        let head_ok = !case.policy.check_code || actual.status_lines() == expected.status_lines();
        let body_ok = !case.policy.check_body
            || bodies_equal(
                &actual.body,
                &expected.body,
                case.policy.body_similarity_threshold,
            );
        return head_ok && body_ok;
    }
    responses_equal(actual, expected, &case.policy)
}

fn format_log_line(path: &str) -> String {
    if path.chars().count() >= LOG_PATH_LIMIT {
        let truncated: String = path.chars().take(LOG_PATH_LIMIT).collect();
        format!("req_path : {} ...", truncated)
    } else {
        format!("req_path : {}", path)
    }
}
