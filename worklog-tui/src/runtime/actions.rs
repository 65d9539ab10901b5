use std::time::Duration;

use time::OffsetDateTime;

use crate::api::ApiClient;
use crate::app::{AfterDialog, App};
use crate::config::WorklogConfig;
use crate::worklog::issue_actions::{
    abandon_request, conclude_abandon, conclude_poll, poll_request, CommentBlocked, FlowReport,
};
use crate::worklog::submission::SubmitBlocked;
use crate::worklog::{DraftStore, RemoteOutcome, Toast, Tone};

use super::action_queue::{Action, Completion, CompletionTx};

/// Everything the page talks to besides the terminal.
pub struct Services {
    pub client: ApiClient,
    pub drafts: Box<dyn DraftStore>,
    pub autosave_every: Duration,
    pub poll_every: Duration,
}

impl Services {
    pub fn new(client: ApiClient, drafts: Box<dyn DraftStore>, config: &WorklogConfig) -> Self {
        Self {
            client,
            drafts,
            autosave_every: Duration::from_secs(config.draft_autosave_secs),
            poll_every: Duration::from_secs(config.poll_interval_secs),
        }
    }
}

pub(super) fn run_action(
    action: Action,
    app: &mut App,
    services: &Services,
    completion_tx: &CompletionTx,
) {
    match action {
        Action::OpenWorkLog => open_work_log(app, services),
        Action::SaveDraft => save_draft(app, services),
        Action::SubmitWorkLog => submit_work_log(app, services, completion_tx),
        Action::ConfirmAbandon => confirm_abandon(app, services, completion_tx),
        Action::SubmitComment => submit_comment(app, services, completion_tx),
        Action::PollUpdates => poll_updates(app, services, completion_tx),
        Action::AcknowledgeDialog => {
            app.dismiss_dialog(&services.client.available_issues_url());
        }
    }
}

fn open_work_log(app: &mut App, services: &Services) {
    if app.is_work_log_open() {
        return;
    }
    let draft = match services.drafts.load(app.issue.issue_id) {
        Ok(draft) => draft,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable draft");
            None
        }
    };
    app.open_work_log(draft);
}

fn save_draft(app: &mut App, services: &Services) {
    if !app.is_work_log_open() {
        return;
    }
    let draft = app.draft_snapshot();
    match services.drafts.save(app.issue.issue_id, &draft) {
        Ok(()) => tracing::debug!(issue_id = app.issue.issue_id, "draft saved"),
        Err(e) => tracing::warn!(error = %e, "failed to save draft"),
    }
}

fn submit_work_log(app: &mut App, services: &Services, completion_tx: &CompletionTx) {
    let values = app.work_log.values();
    let payload = match app.submission.begin(&app.issue, &values) {
        Ok(payload) => payload,
        Err(blocked) => {
            if let SubmitBlocked::Invalid(result) = &blocked {
                app.work_log.mark_invalid(&result.invalid_fields);
            }
            if let Some(notice) = blocked.notice() {
                app.show_dialog(notice, AfterDialog::Nothing);
            }
            return;
        }
    };

    tracing::info!(issue_id = payload.issue_id, "submitting work log");
    let client = services.client.clone();
    let tx = completion_tx.clone();
    tokio::spawn(async move {
        let result = client.submit_work_log(&payload).await;
        let _ = tx.send(Completion::WorkLogSubmitted(result));
    });
}

fn confirm_abandon(app: &mut App, services: &Services, completion_tx: &CompletionTx) {
    let Some(prompt) = app.abandon_prompt.as_mut() else {
        return;
    };
    let request = match abandon_request(&app.issue, &prompt.reason.value) {
        Ok(request) => request,
        Err(hint) => {
            prompt.error = Some(hint);
            return;
        }
    };
    app.close_abandon_prompt();
    app.abandoning = true;

    tracing::info!(issue_id = request.issue_id, "abandoning issue");
    let client = services.client.clone();
    let tx = completion_tx.clone();
    tokio::spawn(async move {
        let result = client.abandon_issue(&request).await;
        let _ = tx.send(Completion::IssueAbandoned(result));
    });
}

fn submit_comment(app: &mut App, services: &Services, completion_tx: &CompletionTx) {
    let request = match app
        .comment_controller
        .begin(&app.issue, &app.comment_input.value)
    {
        Ok(request) => request,
        Err(CommentBlocked::InFlight) => return,
        Err(CommentBlocked::TooShort(notice)) => {
            app.show_dialog(notice, AfterDialog::Nothing);
            return;
        }
    };

    let client = services.client.clone();
    let tx = completion_tx.clone();
    tokio::spawn(async move {
        let result = client.add_comment(&request).await;
        let _ = tx.send(Completion::CommentPosted {
            text: request.comment_text,
            result,
        });
    });
}

fn poll_updates(app: &mut App, services: &Services, completion_tx: &CompletionTx) {
    let request = poll_request(&app.issue);
    let client = services.client.clone();
    let tx = completion_tx.clone();
    tokio::spawn(async move {
        let result = client.poll_updates(&request).await;
        let _ = tx.send(Completion::UpdatesPolled(result));
    });
}

pub(super) fn apply_completion(completion: Completion, app: &mut App) {
    match completion {
        Completion::WorkLogSubmitted(result) => {
            let outcome = RemoteOutcome::from_response(result);
            let succeeded = matches!(outcome, RemoteOutcome::Succeeded(_));
            let notice = app.submission.finish(outcome);
            if succeeded {
                app.close_work_log();
                app.show_dialog(notice, AfterDialog::ReloadPage);
            } else {
                app.show_dialog(notice, AfterDialog::Nothing);
            }
        }
        Completion::IssueAbandoned(result) => {
            app.abandoning = false;
            match conclude_abandon(RemoteOutcome::from_response(result)) {
                FlowReport::Done(notice) => app.show_dialog(notice, AfterDialog::LeaveIssue),
                FlowReport::Dialog(notice) => app.show_dialog(notice, AfterDialog::Nothing),
            }
        }
        Completion::CommentPosted { text, result } => {
            let now = OffsetDateTime::now_utc().to_offset(app.utc_offset);
            match app
                .comment_controller
                .finish(text, RemoteOutcome::from_response(result), now)
            {
                FlowReport::Done(comment) => {
                    tracing::debug!(html = %comment.to_html(), "comment appended");
                    app.comments.push(comment);
                    app.comment_input.clear();
                    app.show_toast(Toast::new(Tone::Success, "Comment added successfully"));
                }
                FlowReport::Dialog(notice) => app.show_dialog(notice, AfterDialog::Nothing),
            }
        }
        Completion::UpdatesPolled(result) => {
            if let Some(toast) = conclude_poll(result) {
                app.show_toast(toast);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DevBackend, DevCall, DevReply};
    use crate::app::{TextInput, View};
    use crate::runtime::action_queue::{completion_channel, CompletionRx};
    use crate::worklog::rules::tests::valid_values;
    use crate::worklog::watcher::Marker;
    use crate::worklog::{FieldId, IssueContext, MemoryDraftStore};

    struct Harness {
        app: App,
        services: Services,
        backend: DevBackend,
        tx: CompletionTx,
        rx: CompletionRx,
    }

    impl Harness {
        fn new() -> Self {
            let backend = DevBackend::new();
            let services = Services::new(
                ApiClient::with_dev_backend(backend.clone()).unwrap(),
                Box::new(MemoryDraftStore::new()),
                &WorklogConfig::default(),
            );
            let (tx, rx) = completion_channel();
            let app = App::new(
                IssueContext {
                    issue_id: 47,
                    csrf_token: "tok".to_string(),
                },
                0,
            );
            Self {
                app,
                services,
                backend,
                tx,
                rx,
            }
        }

        fn run(&mut self, action: Action) {
            run_action(action, &mut self.app, &self.services, &self.tx);
        }

        async fn settle(&mut self) {
            let completion = self.rx.recv().await.unwrap();
            apply_completion(completion, &mut self.app);
        }

        fn dialog_title(&self) -> Option<&str> {
            self.app.dialog.as_ref().map(|d| d.notice.title.as_str())
        }
    }

    #[tokio::test]
    async fn short_description_blocks_submission() {
        let mut h = Harness::new();
        let mut values = valid_values();
        values.work_description = "d".repeat(99);
        h.run(Action::OpenWorkLog);
        h.app.work_log.restore(&values);

        h.run(Action::SubmitWorkLog);

        assert!(h.backend.calls().is_empty());
        assert_eq!(h.dialog_title(), Some("Validation Error"));
        assert_eq!(
            h.app.work_log.watcher.feedback(FieldId::WorkDescription).marker,
            Marker::Invalid
        );
        assert!(h.app.is_work_log_open());
    }

    #[tokio::test]
    async fn successful_submission_closes_modal_and_reloads_on_ack() {
        let mut h = Harness::new();
        h.run(Action::OpenWorkLog);
        h.app.work_log.restore(&valid_values());

        h.run(Action::SubmitWorkLog);
        h.run(Action::SubmitWorkLog);
        assert!(h.app.is_busy());
        h.settle().await;

        assert_eq!(h.backend.calls().len(), 1);
        assert!(!h.app.is_work_log_open());
        let dialog = h.app.dialog.clone().unwrap();
        assert_eq!(dialog.notice.title, "Work Log Submitted!");
        assert_eq!(dialog.notice.lines[0], "Points Earned: 25 points");
        assert_eq!(dialog.then, AfterDialog::ReloadPage);

        h.run(Action::AcknowledgeDialog);
        assert_eq!(h.app.work_log.values(), Default::default());
        assert!(h.app.running);
    }

    #[tokio::test]
    async fn rejected_submission_keeps_modal_open() {
        let mut h = Harness::new();
        h.backend.script(DevReply::Reject(Some("Issue is locked".to_string())));
        h.run(Action::OpenWorkLog);
        h.app.work_log.restore(&valid_values());

        h.run(Action::SubmitWorkLog);
        h.settle().await;

        assert!(h.app.is_work_log_open());
        assert!(!h.app.submission.is_in_flight());
        let notice = &h.app.dialog.as_ref().unwrap().notice;
        assert_eq!(notice.title, "Submission Failed");
        assert_eq!(notice.lines, vec!["Issue is locked".to_string()]);
    }

    #[tokio::test]
    async fn network_failure_reports_connection_problem() {
        let mut h = Harness::new();
        h.backend.script(DevReply::Fail("connection reset".to_string()));
        h.run(Action::OpenWorkLog);
        h.app.work_log.restore(&valid_values());

        h.run(Action::SubmitWorkLog);
        h.settle().await;

        assert_eq!(h.dialog_title(), Some("Network Error"));
        assert!(!h.app.is_busy());
    }

    #[tokio::test]
    async fn short_abandon_reason_shows_hint_without_request() {
        let mut h = Harness::new();
        h.app.open_abandon_prompt();
        h.app.abandon_prompt.as_mut().unwrap().reason = TextInput::with_value("too short");

        h.run(Action::ConfirmAbandon);

        assert!(h.backend.calls().is_empty());
        assert_eq!(
            h.app.abandon_prompt.as_ref().unwrap().error,
            Some("Please provide a reason (at least 10 characters)")
        );
    }

    #[tokio::test]
    async fn abandon_success_leaves_issue_after_ack() {
        let mut h = Harness::new();
        h.app.open_abandon_prompt();
        h.app.abandon_prompt.as_mut().unwrap().reason =
            TextInput::with_value("Blocked on another team");

        h.run(Action::ConfirmAbandon);
        assert!(h.app.abandon_prompt.is_none());
        h.settle().await;

        assert_eq!(h.dialog_title(), Some("Issue Abandoned"));
        h.run(Action::AcknowledgeDialog);
        assert!(!h.app.running);
        assert_eq!(
            h.app.leave_to.as_deref(),
            Some("http://localhost/available-issues.php")
        );
        let DevCall::AbandonIssue(request) = &h.backend.calls()[0] else {
            panic!("expected abandon call");
        };
        assert_eq!(request.reason, "Blocked on another team");
    }

    #[tokio::test]
    async fn abandon_rejection_falls_back_to_default_message() {
        let mut h = Harness::new();
        h.backend.script(DevReply::Reject(None));
        h.app.open_abandon_prompt();
        h.app.abandon_prompt.as_mut().unwrap().reason = TextInput::with_value("no longer relevant");

        h.run(Action::ConfirmAbandon);
        h.settle().await;

        let dialog = h.app.dialog.as_ref().unwrap();
        assert_eq!(dialog.notice.lines, vec!["Unable to abandon issue.".to_string()]);
        assert_eq!(dialog.then, AfterDialog::Nothing);
        assert!(!h.app.abandoning);
    }

    #[tokio::test]
    async fn short_comment_warns_without_request() {
        let mut h = Harness::new();
        h.app.comment_input = TextInput::with_value("  ok  ");

        h.run(Action::SubmitComment);

        assert!(h.backend.calls().is_empty());
        assert_eq!(h.dialog_title(), Some("Comment Too Short"));
        assert!(!h.app.comment_controller.is_posting());
    }

    #[tokio::test]
    async fn posted_comment_is_appended_and_input_cleared() {
        let mut h = Harness::new();
        h.app.comment_input = TextInput::with_value("  <b>Looks good</b>  ");

        h.run(Action::SubmitComment);
        assert!(h.app.comment_controller.is_posting());
        h.settle().await;

        assert!(!h.app.comment_controller.is_posting());
        assert_eq!(h.app.comment_input.value, "");
        let comment = &h.app.comments[0];
        assert_eq!(comment.author_name, "Dev User");
        assert_eq!(comment.text, "<b>Looks good</b>");
        assert!(comment.to_html().contains("&lt;b&gt;Looks good&lt;/b&gt;"));
        assert_eq!(
            h.app.toast.as_ref().unwrap().toast.message,
            "Comment added successfully"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn posted_comment_is_stamped_with_startup_offset() {
        let mut h = Harness::new();
        h.app.utc_offset = time::UtcOffset::from_hms(2, 0, 0).unwrap();
        h.app.comment_input = TextInput::with_value("Stamped locally");

        h.run(Action::SubmitComment);
        h.settle().await;

        let comment = &h.app.comments[0];
        assert_eq!(comment.posted_at.offset(), h.app.utc_offset);
    }

    #[tokio::test]
    async fn failed_comment_keeps_input() {
        let mut h = Harness::new();
        h.backend.script(DevReply::Fail("timed out".to_string()));
        h.app.comment_input = TextInput::with_value("Please review");

        h.run(Action::SubmitComment);
        h.settle().await;

        assert_eq!(h.dialog_title(), Some("Network Error"));
        assert_eq!(h.app.comment_input.value, "Please review");
        assert!(h.app.comments.is_empty());
        assert!(!h.app.comment_controller.is_posting());
    }

    #[tokio::test]
    async fn poll_toasts_only_on_updates() {
        let mut h = Harness::new();
        for _ in 0..2 {
            h.run(Action::PollUpdates);
            h.settle().await;
        }
        assert!(h.app.toast.is_none());

        h.run(Action::PollUpdates);
        h.settle().await;
        assert_eq!(
            h.app.toast.as_ref().unwrap().toast.message,
            "New activity on this issue"
        );
    }

    #[tokio::test]
    async fn draft_round_trips_through_modal() {
        let mut h = Harness::new();
        h.run(Action::SaveDraft);
        assert!(h.services.drafts.load(47).unwrap().is_none());

        h.run(Action::OpenWorkLog);
        assert!(h.app.draft_prompt.is_none());
        h.app.work_log.type_char('x');
        h.run(Action::SaveDraft);
        h.app.close_work_log();

        h.run(Action::OpenWorkLog);
        assert_eq!(h.app.current_view, View::WorkLog);
        let offered = h.app.draft_prompt.clone().unwrap();
        assert_eq!(offered.work_description, "x");
    }

    #[tokio::test]
    async fn draft_survives_successful_submission() {
        let mut h = Harness::new();
        h.run(Action::OpenWorkLog);
        h.app.work_log.restore(&valid_values());
        h.run(Action::SaveDraft);

        h.run(Action::SubmitWorkLog);
        h.settle().await;

        assert!(h.services.drafts.load(47).unwrap().is_some());
    }

    #[tokio::test]
    async fn corrupt_draft_is_treated_as_absent() {
        let backend = DevBackend::new();
        let drafts = MemoryDraftStore::new();
        drafts.insert_raw(47, "{not json");
        let services = Services::new(
            ApiClient::with_dev_backend(backend).unwrap(),
            Box::new(drafts),
            &WorklogConfig::default(),
        );
        let mut app = App::new(
            IssueContext {
                issue_id: 47,
                csrf_token: "tok".to_string(),
            },
            0,
        );
        let (tx, _rx) = completion_channel();

        run_action(Action::OpenWorkLog, &mut app, &services, &tx);

        assert!(app.is_work_log_open());
        assert!(app.draft_prompt.is_none());
    }
}
