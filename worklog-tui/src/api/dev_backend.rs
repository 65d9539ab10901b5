use anyhow::Result;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::worklog::issue_actions::{
    AbandonRequest, CommentPayload, CommentRequest, NoPayload, PollRequest, UpdatesPayload,
};
use crate::worklog::rules::parse_float_prefix;
use crate::worklog::submission::{SubmitPayload, WorkLogPayload};
use crate::worklog::RemoteResult;

const POINTS_PER_HOUR: f64 = 10.0;
/// Every n-th poll reports new activity.
const POLL_UPDATE_EVERY: usize = 3;

/// A request received by the dev backend.
#[derive(Debug, Clone, PartialEq)]
pub enum DevCall {
    SubmitWorkLog(WorkLogPayload),
    AbandonIssue(AbandonRequest),
    AddComment(CommentRequest),
    PollUpdates(PollRequest),
}

/// Scripted answer for the next request.
#[derive(Debug, Clone, PartialEq)]
pub enum DevReply {
    Accept,
    Reject(Option<String>),
    /// Behave like a dropped connection.
    Fail(String),
}

#[derive(Debug, Default)]
struct DevState {
    calls: Vec<DevCall>,
    replies: VecDeque<DevReply>,
    polls: usize,
}

/// In-memory stand-in for the tracker, shared by every clone of the client.
#[derive(Debug, Clone, Default)]
pub struct DevBackend {
    state: Arc<Mutex<DevState>>,
}

impl DevBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, DevState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue the answer for the next request; unscripted requests are accepted.
    #[cfg(test)]
    pub fn script(&self, reply: DevReply) {
        self.lock().replies.push_back(reply);
    }

    /// Every request received so far, oldest first.
    #[cfg(test)]
    pub fn calls(&self) -> Vec<DevCall> {
        self.lock().calls.clone()
    }

    fn reply<T>(&self, call: DevCall, payload: T) -> Result<RemoteResult<T>> {
        let mut state = self.lock();
        state.calls.push(call);
        match state.replies.pop_front().unwrap_or(DevReply::Accept) {
            DevReply::Accept => Ok(RemoteResult {
                success: true,
                message: None,
                payload,
            }),
            DevReply::Reject(message) => Ok(RemoteResult {
                success: false,
                message,
                payload,
            }),
            DevReply::Fail(reason) => Err(anyhow::anyhow!(reason)),
        }
    }

    pub fn submit_work_log(&self, payload: &WorkLogPayload) -> Result<RemoteResult<SubmitPayload>> {
        let hours = parse_float_prefix(&payload.time_spent).unwrap_or(0.0);
        let points = (hours * POINTS_PER_HOUR).round().max(0.0) as u64;
        tracing::debug!(issue_id = payload.issue_id, points, "dev backend: work log");
        self.reply(
            DevCall::SubmitWorkLog(payload.clone()),
            SubmitPayload {
                points: Some(points.into()),
            },
        )
    }

    pub fn abandon_issue(&self, request: &AbandonRequest) -> Result<RemoteResult<NoPayload>> {
        self.reply(DevCall::AbandonIssue(request.clone()), NoPayload {})
    }

    pub fn add_comment(&self, request: &CommentRequest) -> Result<RemoteResult<CommentPayload>> {
        self.reply(
            DevCall::AddComment(request.clone()),
            CommentPayload {
                author_name: Some("Dev User".to_string()),
            },
        )
    }

    pub fn poll_updates(&self, request: &PollRequest) -> Result<RemoteResult<UpdatesPayload>> {
        let has_updates = {
            let mut state = self.lock();
            state.polls += 1;
            state.polls % POLL_UPDATE_EVERY == 0
        };
        self.reply(
            DevCall::PollUpdates(request.clone()),
            UpdatesPayload { has_updates },
        )
    }
}
