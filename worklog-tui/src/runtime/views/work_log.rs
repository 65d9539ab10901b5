use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::{enqueue_action, is_plain_char};

pub(super) fn handle_work_log_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Esc => {
            app.close_work_log();
            return;
        }
        // Ctrl+S: submit
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            enqueue_action(action_tx, Action::SubmitWorkLog);
            return;
        }
        _ => {}
    }

    let form = &mut app.work_log;
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
        KeyCode::Enter => form.newline(),
        KeyCode::Char(c) if is_plain_char(&key) => form.type_char(c),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Left => form.move_left(),
        KeyCode::Right => form.move_right(),
        KeyCode::Home => form.home(),
        KeyCode::End => form.end(),
        _ => {}
    }
}
