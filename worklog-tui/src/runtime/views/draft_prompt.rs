use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

pub(super) fn handle_draft_prompt_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => app.restore_draft(),
        KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('F') => app.dismiss_draft(),
        _ => {}
    }
}
