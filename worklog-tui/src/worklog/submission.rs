use serde::{Deserialize, Serialize};
use std::fmt;

use super::outcome::{Notice, RemoteOutcome, Tone};
use super::rules::{validate_work_log, ValidationResult};
use super::values::WorkLogValues;
use super::IssueContext;

const SUCCESS_TITLE: &str = "Work Log Submitted!";
const SUCCESS_DETAIL: &str =
    "Your work log has been submitted and a retest request has been sent to the tester.";
const REJECTED_FALLBACK: &str = "An error occurred. Please try again.";
const NETWORK_ERROR: &str =
    "Unable to submit work log. Please check your connection and try again.";

/// Form body of the submit-work-log request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkLogPayload {
    pub csrf_token: String,
    pub issue_id: u64,
    pub work_description: String,
    pub files_changed: String,
    pub solution_approach: String,
    pub testing_done: String,
    pub testing_instructions: String,
    pub blockers_encountered: String,
    pub time_spent: String,
}

impl WorkLogPayload {
    /// Text fields are trimmed; blockers and time spent are sent as typed.
    pub fn build(issue: &IssueContext, values: &WorkLogValues) -> Self {
        Self {
            csrf_token: issue.csrf_token.clone(),
            issue_id: issue.issue_id,
            work_description: values.work_description.trim().to_string(),
            files_changed: values.files_changed.trim().to_string(),
            solution_approach: values.solution_approach.trim().to_string(),
            testing_done: values.testing_done.trim().to_string(),
            testing_instructions: values.testing_instructions.trim().to_string(),
            blockers_encountered: values.blockers_encountered.clone(),
            time_spent: values.time_spent.clone(),
        }
    }
}

/// Extra response fields of a successful submission.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SubmitPayload {
    #[serde(default)]
    pub points: Option<Points>,
}

/// Points as the server sent them; some deployments quote the number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Points {
    Number(serde_json::Number),
    Text(String),
}

impl From<u64> for Points {
    fn from(points: u64) -> Self {
        Points::Number(points.into())
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Points::Number(n) => write!(f, "{n}"),
            Points::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionFailure {
    /// Blocked before any request was made.
    Invalid(Vec<String>),
    Rejected(String),
    Network,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded {
        points: String,
    },
    Failed(SubmissionFailure),
}

/// Why `begin` did not produce a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// A submission is already in flight; the control is disabled.
    InFlight,
    Invalid(ValidationResult),
}

impl SubmitBlocked {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            SubmitBlocked::InFlight => None,
            SubmitBlocked::Invalid(result) => Some(Notice {
                tone: Tone::Error,
                title: "Validation Error".to_string(),
                lines: result.errors.clone(),
            }),
        }
    }
}

/// Drives one work-log form through validate → submit → report.
#[derive(Debug, Clone, Default)]
pub struct SubmissionController {
    state: SubmissionState,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_in_flight(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Validate the current values and, when they pass, enter `Submitting` and
    /// hand back the one request to send.
    pub fn begin(
        &mut self,
        issue: &IssueContext,
        values: &WorkLogValues,
    ) -> Result<WorkLogPayload, SubmitBlocked> {
        if self.is_in_flight() {
            return Err(SubmitBlocked::InFlight);
        }

        self.state = SubmissionState::Validating;
        let result = validate_work_log(values);
        if !result.is_valid {
            self.state = SubmissionState::Failed(SubmissionFailure::Invalid(result.errors.clone()));
            return Err(SubmitBlocked::Invalid(result));
        }

        self.state = SubmissionState::Submitting;
        Ok(WorkLogPayload::build(issue, values))
    }

    /// Record the terminal response and return the dialog to show.
    pub fn finish(&mut self, outcome: RemoteOutcome<SubmitPayload>) -> Notice {
        match outcome {
            RemoteOutcome::Succeeded(payload) => {
                let points = payload
                    .points
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "0".to_string());
                let notice = Notice {
                    tone: Tone::Success,
                    title: SUCCESS_TITLE.to_string(),
                    lines: vec![
                        format!("Points Earned: {points} points"),
                        SUCCESS_DETAIL.to_string(),
                    ],
                };
                self.state = SubmissionState::Succeeded { points };
                notice
            }
            RemoteOutcome::Rejected(message) => {
                let message = message.unwrap_or_else(|| REJECTED_FALLBACK.to_string());
                self.state = SubmissionState::Failed(SubmissionFailure::Rejected(message.clone()));
                Notice::error("Submission Failed", message)
            }
            RemoteOutcome::Unreachable(reason) => {
                tracing::error!(%reason, "work log submission failed");
                self.state = SubmissionState::Failed(SubmissionFailure::Network);
                Notice::error("Network Error", NETWORK_ERROR)
            }
        }
    }
}
