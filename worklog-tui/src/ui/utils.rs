use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::app::TextInput;
use crate::worklog::escape::escape_terminal;
use crate::worklog::Tone;

/// Helper function to create a centered rectangle
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((r.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((r.width.saturating_sub(width)) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Success => Color::Green,
        Tone::Info => Color::Cyan,
        Tone::Warning => Color::Yellow,
        Tone::Error => Color::Red,
    }
}

/// "Key: label" pairs for a controls footer.
pub fn key_hints(hints: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (i, (key, label)) in hints.iter().enumerate() {
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        if i + 1 < hints.len() {
            spans.push(Span::raw(format!(": {label}  ")));
        } else {
            spans.push(Span::raw(format!(": {label}")));
        }
    }
    spans
}

/// Input value with a block cursor, safe to print.
pub fn input_with_cursor(input: &TextInput, focused: bool) -> String {
    if !focused {
        return escape_terminal(&input.value);
    }
    let (before, after) = input.split_at_cursor();
    format!("{}█{}", escape_terminal(before), escape_terminal(after))
}
