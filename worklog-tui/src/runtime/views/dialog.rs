use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_dialog_key(key: KeyEvent, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
            enqueue_action(action_tx, Action::AcknowledgeDialog);
        }
        _ => {}
    }
}
