use crate::app::{App, IssueFocus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::{enqueue_action, is_plain_char};

pub(super) fn handle_issue_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match app.focus {
        IssueFocus::Controls => handle_controls_key(key, app, action_tx),
        IssueFocus::CommentBox => handle_comment_key(key, app, action_tx),
    }
}

fn handle_controls_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        // Timer
        KeyCode::Char('s') | KeyCode::Char('S') => app.press_start(),
        KeyCode::Char('p') | KeyCode::Char('P') => app.press_pause(),
        KeyCode::Char('x') | KeyCode::Char('X') => app.press_stop(),
        KeyCode::Char('w') | KeyCode::Char('W') => {
            enqueue_action(action_tx, Action::OpenWorkLog);
        }
        KeyCode::Char('a') | KeyCode::Char('A') => app.open_abandon_prompt(),
        KeyCode::Tab | KeyCode::Char('c') | KeyCode::Char('C') => {
            app.focus = IssueFocus::CommentBox;
        }
        _ => {}
    }
}

fn handle_comment_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let input = &mut app.comment_input;
    match key.code {
        // Ctrl+Enter, or Cmd+Enter where the terminal reports it
        KeyCode::Enter
            if key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER) =>
        {
            enqueue_action(action_tx, Action::SubmitComment);
        }
        // Legacy terminals send Ctrl+Enter as a bare line feed, read as Ctrl+J.
        KeyCode::Char('j') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            enqueue_action(action_tx, Action::SubmitComment);
        }
        KeyCode::Enter => input.insert('\n'),
        KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab => app.focus = IssueFocus::Controls,
        KeyCode::Char(c) if is_plain_char(&key) => input.insert(c),
        KeyCode::Backspace => {
            input.backspace();
        }
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        _ => {}
    }
}
