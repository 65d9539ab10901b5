use crate::app::{App, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

mod dialogs;
mod issue_view;
pub(super) mod utils;
mod work_log_modal;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(frame.area());

    issue_view::render_header(frame, root[0], app);
    issue_view::render_issue_view(frame, app, root[1]);

    if app.current_view == View::WorkLog {
        work_log_modal::render_work_log_modal(frame, app);
    }

    // Overlays, topmost last
    if app.current_view == View::WorkLog && app.draft_prompt.is_some() {
        dialogs::render_draft_prompt(frame);
    }
    if let Some(prompt) = &app.abandon_prompt {
        dialogs::render_abandon_prompt(frame, prompt);
    }
    if let Some(dialog) = &app.dialog {
        dialogs::render_dialog(frame, dialog);
    }
}
