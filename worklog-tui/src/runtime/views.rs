use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod abandon;
mod dialog;
mod draft_prompt;
mod issue;
mod work_log;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

fn is_plain_char(key: &KeyEvent) -> bool {
    !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
}

/// Route a key press to the topmost overlay, or to the current view.
pub(super) fn handle_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    if app.dialog.is_some() {
        dialog::handle_dialog_key(key, action_tx);
    } else if app.draft_prompt.is_some() {
        draft_prompt::handle_draft_prompt_key(key, app);
    } else if app.abandon_prompt.is_some() {
        abandon::handle_abandon_key(key, app, action_tx);
    } else {
        match app.current_view {
            View::WorkLog => work_log::handle_work_log_key(key, app, action_tx),
            View::Issue => issue::handle_issue_key(key, app, action_tx),
        }
    }
}
