use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::chat::QUICK_QUESTIONS;
use crate::ui::app::{App, ChatMessage, InputMode, Speaker};
use crate::ui::theme;
use crate::ui::util::wrapped_height;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // History
            Constraint::Length(7), // Quick questions
            Constraint::Length(3), // Input
        ])
        .split(area);

    render_history(f, chunks[0], app);
    render_quick_questions(f, chunks[1]);
    render_input(f, chunks[2], app);
}

fn speaker_label(message: &ChatMessage) -> (&'static str, Style) {
    match message.speaker {
        Speaker::User => ("You", theme::user_message_style()),
        Speaker::Assistant => ("Assistant", theme::bot_message_style()),
    }
}

fn render_history(f: &mut Frame, area: Rect, app: &App) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = Vec::new();
    let mut total_height = 0;
    for message in &app.chat_history {
        let (label, label_style) = speaker_label(message);
        let body_style = if message.failed {
            theme::warning_style()
        } else {
            theme::normal_style()
        };
        lines.push(Line::from(Span::styled(format!("{label}:"), label_style)));
        for text_line in message.text.split('\n') {
            lines.push(Line::from(Span::styled(format!("  {text_line}"), body_style)));
        }
        lines.push(Line::from(""));
        total_height += 2 + wrapped_height(&indent(&message.text), inner_width);
    }

    // Pinned to the newest message unless the user scrolled up
    let bottom = total_height.saturating_sub(inner_height);
    let offset = bottom.saturating_sub(app.chat_scroll);

    let history = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    format!(" Chat ({}) ", app.engine.mode()),
                    theme::title_style(),
                )),
        );
    f.render_widget(history, area);
}

fn indent(text: &str) -> String {
    text.split('\n')
        .map(|l| format!("  {l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_quick_questions(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = QUICK_QUESTIONS
        .iter()
        .enumerate()
        .map(|(i, q)| {
            Line::from(vec![
                Span::styled(format!(" {} ", i + 1), Style::default().fg(theme::ACCENT)),
                Span::styled(*q, theme::normal_style()),
            ])
        })
        .collect();

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Quick Questions ", theme::title_style())),
    );
    f.render_widget(panel, area);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let typing = app.input_mode == InputMode::Editing;
    let content = if app.chat_input.is_empty() && !typing {
        Line::from(Span::styled(
            "Press i to ask about your spending...",
            theme::dim_style(),
        ))
    } else {
        Line::from(Span::styled(app.chat_input.as_str(), theme::normal_style()))
    };

    let border = if typing { theme::ACCENT } else { theme::OVERLAY };
    let input = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(" Ask ", theme::title_style())),
    );
    f.render_widget(input, area);

    if typing {
        let offset = app.chat_input.chars().count() as u16;
        f.set_cursor_position((area.x + 1 + offset, area.y + 1));
    }
}
