use anyhow::Result;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::worklog::issue_actions::{CommentPayload, NoPayload, UpdatesPayload};
use crate::worklog::submission::SubmitPayload;
use crate::worklog::RemoteResult;

/// Work requested by a key handler, run on the event loop.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Action {
    OpenWorkLog,
    SaveDraft,
    SubmitWorkLog,
    ConfirmAbandon,
    SubmitComment,
    PollUpdates,
    AcknowledgeDialog,
}

/// Response of a spawned request, applied when the loop drains it.
#[derive(Debug)]
pub(super) enum Completion {
    WorkLogSubmitted(Result<RemoteResult<SubmitPayload>>),
    IssueAbandoned(Result<RemoteResult<NoPayload>>),
    CommentPosted {
        text: String,
        result: Result<RemoteResult<CommentPayload>>,
    },
    UpdatesPolled(Result<RemoteResult<UpdatesPayload>>),
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;
pub(super) type CompletionTx = UnboundedSender<Completion>;
pub(super) type CompletionRx = UnboundedReceiver<Completion>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}

pub(super) fn completion_channel() -> (CompletionTx, CompletionRx) {
    mpsc::unbounded_channel()
}
