use super::utils::{centered_rect, input_with_cursor, key_hints, tone_color};
use super::*;
use crate::app::{AbandonPrompt, Dialog};
use crate::worklog::escape::escape_terminal;

const DIALOG_WIDTH: u16 = 64;

fn overlay_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(format!(" {title} "), Style::default().fg(color)))
        .padding(Padding::horizontal(2))
}

pub fn render_dialog(frame: &mut Frame, dialog: &Dialog) {
    let color = tone_color(dialog.notice.tone);

    let mut lines = vec![Line::from("")];
    lines.extend(
        dialog
            .notice
            .lines
            .iter()
            .map(|line| Line::from(escape_terminal(line))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(key_hints(&[("Enter", "OK")])));

    let height = lines.len() as u16 + 4;
    let area = centered_rect(DIALOG_WIDTH, height, frame.area());
    frame.render_widget(Clear, area);

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(overlay_block(&dialog.notice.title, color));
    frame.render_widget(paragraph, area);
}

pub fn render_abandon_prompt(frame: &mut Frame, prompt: &AbandonPrompt) {
    let area = centered_rect(DIALOG_WIDTH, 14, frame.area());
    frame.render_widget(Clear, area);

    let block = overlay_block("Abandon Issue?", Color::Yellow);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Question
            Constraint::Length(4), // Reason
            Constraint::Length(1), // Validation message
            Constraint::Min(1),    // Keys
        ])
        .split(inner);

    let question = Paragraph::new(
        "Are you sure you want to abandon this issue? It will return to the available pool.",
    )
    .wrap(Wrap { trim: true })
    .style(Style::default().fg(Color::White));
    frame.render_widget(question, chunks[0]);

    let reason = if prompt.reason.value.is_empty() {
        Paragraph::new("█ Please provide a reason for abandoning this issue...")
            .style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(input_with_cursor(&prompt.reason, true))
            .style(Style::default().fg(Color::White))
    };
    let reason = reason.wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)),
    );
    frame.render_widget(reason, chunks[1]);

    if let Some(error) = prompt.error {
        frame.render_widget(
            Paragraph::new(error).style(Style::default().fg(Color::Red)),
            chunks[2],
        );
    }

    let keys = Paragraph::new(Line::from(key_hints(&[
        ("Enter", "Yes, abandon it"),
        ("Esc", "Cancel"),
    ])))
    .alignment(Alignment::Center);
    frame.render_widget(keys, chunks[3]);
}

pub fn render_draft_prompt(frame: &mut Frame) {
    let area = centered_rect(DIALOG_WIDTH, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from("Would you like to restore your previous draft?"),
        Line::from(""),
        Line::from(key_hints(&[
            ("Enter / R", "Restore Draft"),
            ("F / Esc", "Start Fresh"),
        ])),
    ];
    let paragraph = Paragraph::new(lines).block(overlay_block("Draft Found", Color::Cyan));
    frame.render_widget(paragraph, area);
}
