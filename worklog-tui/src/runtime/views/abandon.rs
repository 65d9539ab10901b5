use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::{enqueue_action, is_plain_char};

pub(super) fn handle_abandon_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.code == KeyCode::Esc {
        app.close_abandon_prompt();
        return;
    }
    if key.code == KeyCode::Enter {
        enqueue_action(action_tx, Action::ConfirmAbandon);
        return;
    }

    let Some(prompt) = app.abandon_prompt.as_mut() else {
        return;
    };
    let reason = &mut prompt.reason;
    match key.code {
        KeyCode::Char(c) if is_plain_char(&key) => reason.insert(c),
        KeyCode::Backspace => {
            reason.backspace();
        }
        KeyCode::Left => reason.move_left(),
        KeyCode::Right => reason.move_right(),
        KeyCode::Home => reason.home(),
        KeyCode::End => reason.end(),
        _ => return,
    }
    prompt.error = None;
}
