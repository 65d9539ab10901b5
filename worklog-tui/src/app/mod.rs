use std::time::{Duration, Instant};

use crate::worklog::issue_actions::{CommentController, CommentItem};
use crate::worklog::submission::SubmissionController;
use crate::worklog::timer::WorkTimer;
use crate::worklog::{DraftRecord, IssueContext, Notice, Toast};

mod form;
mod state;
pub use form::WorkLogForm;
pub use state::{
    AbandonPrompt, ActiveToast, AfterDialog, Dialog, IssueFocus, TextInput, View, TOAST_SECS,
};

pub struct App {
    pub running: bool,
    pub issue: IssueContext,
    pub current_view: View,
    pub focus: IssueFocus,

    // Timer; `initial_elapsed` is what a page reload goes back to
    pub timer: WorkTimer,
    initial_elapsed: u64,

    // Work-log modal
    pub work_log: WorkLogForm,
    pub submission: SubmissionController,
    pub draft_prompt: Option<DraftRecord>,

    // Comments
    pub comments: Vec<CommentItem>,
    pub comment_input: TextInput,
    pub comment_controller: CommentController,

    pub abandon_prompt: Option<AbandonPrompt>,
    pub abandoning: bool,

    // Feedback
    pub dialog: Option<Dialog>,
    pub toast: Option<ActiveToast>,

    /// Set when the user leaves the issue; printed after the terminal is restored.
    pub leave_to: Option<String>,

    /// Offset for locally stamped times, resolved at startup.
    pub utc_offset: time::UtcOffset,

    // In-flight indicator
    pub throbber_state: throbber_widgets_tui::ThrobberState,
}

impl App {
    pub fn new(issue: IssueContext, initial_elapsed: u64) -> Self {
        Self {
            running: true,
            issue,
            current_view: View::Issue,
            focus: IssueFocus::Controls,
            timer: WorkTimer::with_elapsed(initial_elapsed),
            initial_elapsed,
            work_log: WorkLogForm::new(),
            submission: SubmissionController::new(),
            draft_prompt: None,
            comments: Vec::new(),
            comment_input: TextInput::new(),
            comment_controller: CommentController::new(),
            abandon_prompt: None,
            abandoning: false,
            dialog: None,
            toast: None,
            leave_to: None,
            utc_offset: time::UtcOffset::UTC,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_work_log_open(&self) -> bool {
        self.current_view == View::WorkLog
    }

    /// Whether any request with a disabled control is outstanding.
    pub fn is_busy(&self) -> bool {
        self.submission.is_in_flight() || self.comment_controller.is_posting() || self.abandoning
    }

    // Work-log modal

    /// Show the modal; a stored draft, if any, is offered for restore first.
    pub fn open_work_log(&mut self, stored_draft: Option<DraftRecord>) {
        self.current_view = View::WorkLog;
        self.draft_prompt = stored_draft;
    }

    pub fn close_work_log(&mut self) {
        self.current_view = View::Issue;
        self.draft_prompt = None;
    }

    pub fn restore_draft(&mut self) {
        if let Some(draft) = self.draft_prompt.take() {
            self.work_log.restore(&draft);
            self.show_toast(Toast::new(crate::worklog::Tone::Success, "Draft restored"));
        }
    }

    /// "Start fresh": leave every field as it is.
    pub fn dismiss_draft(&mut self) {
        self.draft_prompt = None;
    }

    pub fn draft_snapshot(&self) -> DraftRecord {
        self.work_log.values()
    }

    // Timer controls; a disabled control ignores presses

    pub fn press_start(&mut self) {
        if self.timer.controls().start {
            if let Some(toast) = self.timer.start() {
                self.show_toast(toast);
            }
        }
    }

    pub fn press_pause(&mut self) {
        if self.timer.controls().pause {
            if let Some(toast) = self.timer.pause() {
                self.show_toast(toast);
            }
        }
    }

    pub fn press_stop(&mut self) {
        if self.timer.controls().stop {
            let toast = self.timer.stop();
            self.show_toast(toast);
        }
    }

    // Abandon confirmation

    pub fn open_abandon_prompt(&mut self) {
        if self.abandoning {
            return;
        }
        self.abandon_prompt = Some(AbandonPrompt::default());
    }

    pub fn close_abandon_prompt(&mut self) {
        self.abandon_prompt = None;
    }

    // Feedback

    pub fn show_toast(&mut self, toast: Toast) {
        self.toast = Some(ActiveToast {
            toast,
            shown_at: Instant::now(),
        });
    }

    pub fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|active| {
            now.duration_since(active.shown_at) >= Duration::from_secs(TOAST_SECS)
        }) {
            self.toast = None;
        }
    }

    pub fn show_dialog(&mut self, notice: Notice, then: AfterDialog) {
        self.dialog = Some(Dialog { notice, then });
    }

    /// Acknowledge the open dialog and run its follow-up.
    pub fn dismiss_dialog(&mut self, available_issues_url: &str) {
        let Some(dialog) = self.dialog.take() else {
            return;
        };
        match dialog.then {
            AfterDialog::Nothing => {}
            AfterDialog::ReloadPage => self.reload(),
            AfterDialog::LeaveIssue => {
                self.leave_to = Some(available_issues_url.to_string());
                self.quit();
            }
        }
    }

    /// Start the page over: page-local state returns to its launch values.
    /// Posted comments live on the server and stay listed; stored drafts are
    /// left untouched.
    pub fn reload(&mut self) {
        tracing::info!(issue_id = self.issue.issue_id, "reloading issue page");
        self.current_view = View::Issue;
        self.focus = IssueFocus::Controls;
        self.timer = WorkTimer::with_elapsed(self.initial_elapsed);
        self.work_log = WorkLogForm::new();
        self.submission = SubmissionController::new();
        self.draft_prompt = None;
        self.comment_input.clear();
        self.abandon_prompt = None;
        self.toast = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worklog::{FieldId, Tone};

    fn test_app() -> App {
        App::new(
            IssueContext {
                issue_id: 47,
                csrf_token: "tok".to_string(),
            },
            9000,
        )
    }

    #[test]
    fn disabled_stop_is_ignored() {
        let mut app = test_app();
        app.press_stop();
        assert!(app.toast.is_none());

        app.press_start();
        app.press_stop();
        assert_eq!(app.toast.as_ref().unwrap().toast.message, "Timer stopped");
    }

    #[test]
    fn start_fresh_leaves_fields_alone() {
        let mut app = test_app();
        app.work_log.type_char('x');
        app.open_work_log(Some(DraftRecord {
            work_description: "from draft".to_string(),
            ..DraftRecord::default()
        }));

        app.dismiss_draft();

        assert_eq!(app.work_log.values().work_description, "x");
        assert!(app.draft_prompt.is_none());
    }

    #[test]
    fn restore_fills_form_and_toasts() {
        let mut app = test_app();
        app.open_work_log(Some(DraftRecord {
            testing_done: "t".repeat(50),
            ..DraftRecord::default()
        }));

        app.restore_draft();

        assert_eq!(app.work_log.values().testing_done, "t".repeat(50));
        assert_eq!(app.work_log.watcher.feedback(FieldId::TestingDone).count, 50);
        let toast = &app.toast.as_ref().unwrap().toast;
        assert_eq!((toast.tone, toast.message.as_str()), (Tone::Success, "Draft restored"));
    }

    #[test]
    fn reload_resets_page_state() {
        let mut app = test_app();
        app.press_start();
        app.timer.tick();
        app.work_log.type_char('a');
        app.open_work_log(None);

        app.show_dialog(Notice::new(Tone::Success, "Done", "ok"), AfterDialog::ReloadPage);
        app.dismiss_dialog("http://localhost/available-issues.php");

        assert_eq!(app.current_view, View::Issue);
        assert_eq!(app.timer.elapsed_seconds(), 9000);
        assert!(!app.timer.is_running());
        assert_eq!(app.work_log.values().work_description, "");
        assert!(app.running);
    }

    #[test]
    fn leaving_issue_quits_with_target() {
        let mut app = test_app();
        app.show_dialog(Notice::new(Tone::Success, "Issue Abandoned", "bye"), AfterDialog::LeaveIssue);
        app.dismiss_dialog("http://localhost/available-issues.php");
        assert!(!app.running);
        assert_eq!(app.leave_to.as_deref(), Some("http://localhost/available-issues.php"));
    }

    #[test]
    fn toast_expires_after_three_seconds() {
        let mut app = test_app();
        app.show_toast(Toast::new(Tone::Info, "hello"));
        let shown = app.toast.as_ref().unwrap().shown_at;

        app.expire_toast(shown + Duration::from_secs(2));
        assert!(app.toast.is_some());
        app.expire_toast(shown + Duration::from_secs(3));
        assert!(app.toast.is_none());
    }
}
