use super::utils::{centered_rect, input_with_cursor, key_hints};
use super::*;
use crate::worklog::rules::form_field;
use crate::worklog::submission::{SubmissionFailure, SubmissionState};
use crate::worklog::watcher::{CounterTone, FieldFeedback, Marker};
use crate::worklog::FieldId;

fn field_title(field: FieldId, feedback: FieldFeedback) -> Line<'static> {
    let mut spans = vec![Span::raw(format!(" {} ", field.title()))];

    if let Some(rule) = form_field(field) {
        let color = match feedback.tone {
            CounterTone::Success => Color::Green,
            CounterTone::Primary => Color::Blue,
        };
        spans.push(Span::styled(
            format!("{}/{} ", feedback.count, rule.min_length),
            Style::default().fg(color),
        ));
    }
    match feedback.marker {
        Marker::Valid => spans.push(Span::styled("✓ ", Style::default().fg(Color::Green))),
        Marker::Invalid => spans.push(Span::styled("✗ ", Style::default().fg(Color::Red))),
        Marker::Unmarked => {}
    }
    Line::from(spans)
}

fn field_constraint(field: FieldId) -> Constraint {
    if field.is_multiline() {
        Constraint::Min(4)
    } else {
        Constraint::Length(3)
    }
}

pub fn render_work_log_modal(frame: &mut Frame, app: &App) {
    let outer = frame.area();
    let width = (outer.width as f32 * 0.85) as u16;
    let height = outer.height.saturating_sub(2);
    let area = centered_rect(width, height, outer);
    frame.render_widget(Clear, area);

    let submitting = app.submission.is_in_flight();
    let title = if submitting {
        " Submit Work Log (submitting...) "
    } else {
        " Submit Work Log "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(title, Style::default().fg(Color::Yellow)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> =
        FieldId::ALL.iter().map(|f| field_constraint(*f)).collect();
    constraints.push(Constraint::Length(3));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(1)
        .constraints(constraints)
        .split(inner);

    let form = &app.work_log;
    for (i, field) in FieldId::ALL.into_iter().enumerate() {
        let focused = form.focused == field;
        let feedback = form.watcher.feedback(field);
        let border_style = match (focused, feedback.marker) {
            (true, _) => Style::default().fg(Color::Magenta),
            (false, Marker::Invalid) => Style::default().fg(Color::Red),
            (false, Marker::Valid) => Style::default().fg(Color::Green),
            (false, Marker::Unmarked) => Style::default().fg(Color::DarkGray),
        };

        let widget = Paragraph::new(input_with_cursor(form.input(field), focused))
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(field_title(field, feedback))
                    .border_style(border_style)
                    .padding(Padding::horizontal(1)),
            );
        frame.render_widget(widget, chunks[i]);
    }

    let mut hints = key_hints(&[
        ("Tab / ↑↓", "Next field"),
        ("Enter", "New line"),
        ("Ctrl+S", "Submit"),
        ("Esc", "Close"),
    ]);
    if let SubmissionState::Failed(SubmissionFailure::Invalid(_)) = app.submission.state() {
        hints.insert(0, Span::styled("Fix the marked fields  ", Style::default().fg(Color::Red)));
    }
    let controls = Paragraph::new(Line::from(hints))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(controls, chunks[FieldId::COUNT]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn counted_fields_show_count_over_minimum() {
        let feedback = FieldFeedback {
            count: 42,
            marker: Marker::Unmarked,
            tone: CounterTone::Primary,
        };
        let title = field_title(FieldId::WorkDescription, feedback);
        assert!(title_text(&title).ends_with("42/100 "));
    }

    #[test]
    fn blockers_have_no_counter() {
        let title = field_title(FieldId::BlockersEncountered, FieldFeedback::default());
        assert!(!title_text(&title).contains('/'));
    }

    #[test]
    fn invalid_marker_is_shown() {
        let feedback = FieldFeedback {
            count: 0,
            marker: Marker::Invalid,
            tone: CounterTone::Primary,
        };
        let title = field_title(FieldId::TimeSpent, feedback);
        assert!(title_text(&title).contains('✗'));
    }
}
