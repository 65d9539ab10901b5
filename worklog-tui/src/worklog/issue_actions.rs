//! Abandon, comment and poll flows. Each one is confirm → call → report:
//! the `*_request` functions decide whether a call is made, the `conclude_*`
//! functions turn the response into what the page should do next.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::escape::escape_html;
use super::outcome::{Notice, RemoteOutcome, RemoteResult, Toast, Tone};
use super::IssueContext;

pub const MIN_ABANDON_REASON: usize = 10;
pub const MIN_COMMENT: usize = 5;

pub const ABANDON_REASON_HINT: &str = "Please provide a reason (at least 10 characters)";
const COMMENT_AUTHOR_FALLBACK: &str = "You";

/// What a flow asks the page to do once its call has completed.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowReport<E> {
    Done(E),
    Dialog(Notice),
}

/// Response payload of endpoints that return nothing besides `success`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NoPayload {}

// Abandon

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbandonRequest {
    pub issue_id: u64,
    pub reason: String,
    pub csrf_token: String,
}

/// Validate the reason typed into the confirmation. The reason is sent as
/// typed; only the length check looks at the trimmed text.
pub fn abandon_request(issue: &IssueContext, reason: &str) -> Result<AbandonRequest, &'static str> {
    if reason.trim().chars().count() < MIN_ABANDON_REASON {
        return Err(ABANDON_REASON_HINT);
    }
    Ok(AbandonRequest {
        issue_id: issue.issue_id,
        reason: reason.to_string(),
        csrf_token: issue.csrf_token.clone(),
    })
}

/// `Done` carries the acknowledgement shown before leaving the issue.
pub fn conclude_abandon(outcome: RemoteOutcome<NoPayload>) -> FlowReport<Notice> {
    match outcome {
        RemoteOutcome::Succeeded(_) => FlowReport::Done(Notice::new(
            Tone::Success,
            "Issue Abandoned",
            "The issue has been returned to the available pool.",
        )),
        RemoteOutcome::Rejected(message) => FlowReport::Dialog(Notice::error(
            "Error",
            message.unwrap_or_else(|| "Unable to abandon issue.".to_string()),
        )),
        RemoteOutcome::Unreachable(reason) => {
            tracing::warn!(%reason, "abandon request failed");
            FlowReport::Dialog(Notice::error(
                "Network Error",
                "Unable to process request. Please try again.",
            ))
        }
    }
}

// Comment

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentRequest {
    pub issue_id: u64,
    pub comment_text: String,
    pub csrf_token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CommentPayload {
    #[serde(default)]
    pub author_name: Option<String>,
}

/// A comment shown in the activity list.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentItem {
    pub author_name: String,
    pub text: String,
    pub posted_at: OffsetDateTime,
}

impl CommentItem {
    /// Markup fragment of the comment with all user text escaped.
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"comment-item\"><h6>{}</h6><p>{}</p></div>",
            escape_html(&self.author_name),
            escape_html(&self.text)
        )
    }

    /// Avatar initials: first letter of up to two words.
    pub fn initials(&self) -> String {
        self.author_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentBlocked {
    InFlight,
    TooShort(Notice),
}

/// Tracks the one comment that may be in flight.
#[derive(Debug, Clone, Default)]
pub struct CommentController {
    posting: bool,
}

impl CommentController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_posting(&self) -> bool {
        self.posting
    }

    pub fn begin(&mut self, issue: &IssueContext, raw: &str) -> Result<CommentRequest, CommentBlocked> {
        if self.posting {
            return Err(CommentBlocked::InFlight);
        }
        let text = raw.trim();
        if text.chars().count() < MIN_COMMENT {
            return Err(CommentBlocked::TooShort(Notice::new(
                Tone::Warning,
                "Comment Too Short",
                "Please write a meaningful comment (at least 5 characters).",
            )));
        }
        self.posting = true;
        Ok(CommentRequest {
            issue_id: issue.issue_id,
            comment_text: text.to_string(),
            csrf_token: issue.csrf_token.clone(),
        })
    }

    /// `text` is the trimmed comment that was sent.
    pub fn finish(
        &mut self,
        text: String,
        outcome: RemoteOutcome<CommentPayload>,
        now: OffsetDateTime,
    ) -> FlowReport<CommentItem> {
        self.posting = false;
        match outcome {
            RemoteOutcome::Succeeded(payload) => FlowReport::Done(CommentItem {
                author_name: payload
                    .author_name
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| COMMENT_AUTHOR_FALLBACK.to_string()),
                text,
                posted_at: now,
            }),
            RemoteOutcome::Rejected(message) => FlowReport::Dialog(Notice::error(
                "Error",
                message.unwrap_or_else(|| "Unable to add comment.".to_string()),
            )),
            RemoteOutcome::Unreachable(reason) => {
                tracing::warn!(%reason, "comment request failed");
                FlowReport::Dialog(Notice::error(
                    "Network Error",
                    "Unable to add comment. Please try again.",
                ))
            }
        }
    }
}

// Poll

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollRequest {
    pub issue_id: u64,
}

pub fn poll_request(issue: &IssueContext) -> PollRequest {
    PollRequest {
        issue_id: issue.issue_id,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdatesPayload {
    #[serde(default)]
    pub has_updates: bool,
}

/// Only `has_updates` matters; failures are logged and otherwise ignored.
pub fn conclude_poll(response: anyhow::Result<RemoteResult<UpdatesPayload>>) -> Option<Toast> {
    match response {
        Ok(result) if result.payload.has_updates => {
            Some(Toast::new(Tone::Info, "New activity on this issue"))
        }
        Ok(_) => None,
        Err(e) => {
            tracing::info!(error = %format!("{e:#}"), "Failed to check for updates");
            None
        }
    }
}
