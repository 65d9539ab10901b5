use super::utils::{input_with_cursor, key_hints, tone_color};
use super::*;
use crate::app::IssueFocus;
use crate::worklog::escape::escape_terminal;
use crate::worklog::issue_actions::CommentItem;
use time::macros::format_description;

const LABEL: &str = " worklog-tui";

pub fn render_header(frame: &mut Frame, area: Rect, app: &mut App) {
    let throbber_area = Rect {
        x: area.x + 1,
        y: area.y,
        width: 1,
        height: 1,
    };
    let label_area = Rect {
        x: throbber_area.x + 1,
        y: area.y,
        width: area.width.saturating_sub(2),
        height: 1,
    };
    let throbber = throbber_widgets_tui::Throbber::default()
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_busy() {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);

    let line = Line::from(vec![
        Span::styled(LABEL, Style::default().fg(Color::Yellow)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Issue #{}", app.issue.issue_id),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), label_area);
}

pub fn render_issue_view(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Timer
            Constraint::Min(4),    // Comments
            Constraint::Length(5), // Comment box
            Constraint::Length(3), // Status
            Constraint::Length(4), // Controls
        ])
        .split(body);

    render_timer(frame, chunks[0], app);
    render_comments(frame, chunks[1], app);
    render_comment_box(frame, chunks[2], app);
    render_status(frame, chunks[3], app);
    render_controls(frame, chunks[4]);
}

fn render_timer(frame: &mut Frame, area: Rect, app: &App) {
    let running = app.timer.is_running();
    let border_style = if running {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let state = if running { "⏵ running" } else { "paused" };

    let controls = app.timer.controls();
    let button = |key: &'static str, label: &'static str, enabled: bool| {
        let style = if enabled {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        vec![
            Span::styled(format!("[{key}]"), style),
            Span::styled(format!(" {label}  "), style),
        ]
    };

    let mut spans = vec![
        Span::styled(
            app.timer.display(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {state}  ")),
        Span::styled(
            format!("({})", app.timer.display_hours()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("    "),
    ];
    spans.extend(button("S", "Start", controls.start));
    spans.extend(button("P", "Pause", controls.pause));
    spans.extend(button("X", "Stop", controls.stop));

    let timer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Timer ")
            .border_style(border_style)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(timer, area);
}

fn comment_lines(comment: &CommentItem) -> Vec<Line<'static>> {
    let posted = comment
        .posted_at
        .format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_default();
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("[{}] ", comment.initials()),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            escape_terminal(&comment.author_name),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {posted}"), Style::default().fg(Color::DarkGray)),
    ])];
    lines.extend(
        escape_terminal(&comment.text)
            .lines()
            .map(|line| Line::from(format!("  {line}"))),
    );
    lines.push(Line::from(""));
    lines
}

fn render_comments(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = if app.comments.is_empty() {
        vec![Line::from(Span::styled(
            "No comments yet",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.comments.iter().flat_map(comment_lines).collect()
    };

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    // Keep the newest comments in view
    let scroll = scroll_to_bottom(&paragraph, area);

    let widget = paragraph
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Activity ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

/// Rows to skip so the last wrapped row sits on the bottom border of `area`.
fn scroll_to_bottom(paragraph: &Paragraph, area: Rect) -> u16 {
    // Borders and one column of padding on each side.
    let rows = paragraph.line_count(area.width.saturating_sub(4));
    let visible = area.height.saturating_sub(2);
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_sub(visible)
}

fn render_comment_box(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == IssueFocus::CommentBox;
    let posting = app.comment_controller.is_posting();

    let border_style = if focused {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default()
    };
    let title = if posting {
        " Comment (posting...) "
    } else {
        " Comment "
    };
    let text_color = if posting { Color::DarkGray } else { Color::White };

    let widget = Paragraph::new(input_with_cursor(&app.comment_input, focused && !posting))
        .style(Style::default().fg(text_color))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn contextual_status(app: &App) -> &'static str {
    if app.abandoning {
        "Abandoning issue..."
    } else if app.submission.is_in_flight() {
        "Submitting work log..."
    } else if app.focus == IssueFocus::CommentBox {
        "Ctrl+Enter or Ctrl+J to post the comment"
    } else {
        "Ready"
    }
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let (text, color) = match &app.toast {
        Some(active) => (
            escape_terminal(&active.toast.message),
            tone_color(active.toast.tone),
        ),
        None => (contextual_status(app).to_string(), Color::White),
    };

    let status = Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Status ")
                .border_style(Style::default().fg(color))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(status, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line1 = key_hints(&[
        ("S", "Start"),
        ("P", "Pause"),
        ("X", "Stop"),
        ("W", "Work log"),
        ("A", "Abandon"),
    ]);
    let line2 = key_hints(&[
        ("Tab / C", "Comment"),
        ("Ctrl+Enter/Ctrl+J", "Post comment"),
        ("Esc", "Leave comment box"),
        ("Q", "Quit"),
    ]);

    let controls = Paragraph::new(vec![Line::from(line1), Line::from(line2)])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(vec![Span::styled(
                    " Controls ",
                    Style::default().fg(Color::DarkGray),
                )]))
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn comment_lines_show_initials_and_every_line() {
        let comment = CommentItem {
            author_name: "Ada Lovelace".to_string(),
            text: "first\nsecond".to_string(),
            posted_at: datetime!(2024-03-01 09:30 UTC),
        };

        let lines = comment_lines(&comment);

        let header: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(header, "[AL] Ada Lovelace  2024-03-01 09:30");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn scroll_counts_wrapped_rows() {
        let comment = CommentItem {
            author_name: "Ada Lovelace".to_string(),
            text: "x".repeat(100),
            posted_at: datetime!(2024-03-01 09:30 UTC),
        };
        let lines = comment_lines(&comment);
        assert_eq!(lines.len(), 3);

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        // Three logical lines fit the 3 visible rows, but the body alone wraps to 6.
        let scroll = scroll_to_bottom(&paragraph, Rect::new(0, 0, 24, 5));
        assert!(scroll >= 5, "scroll was {scroll}");
    }

    #[test]
    fn short_activity_is_not_scrolled() {
        let paragraph = Paragraph::new(vec![Line::from("No comments yet")]);
        assert_eq!(scroll_to_bottom(&paragraph, Rect::new(0, 0, 40, 10)), 0);
    }
}
