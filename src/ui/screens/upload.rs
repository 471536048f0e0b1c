use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::import::UploadDecision;
use crate::models::Bank;
use crate::ui::app::App;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Selection + detection
            Constraint::Min(5),    // File browser
        ])
        .split(area);

    render_selection(f, chunks[0], app);
    render_file_browser(f, chunks[1], app);
}

fn render_selection(f: &mut Frame, area: Rect, app: &App) {
    let state = &app.upload;

    let bank_spans: Vec<Span> = Bank::all()
        .iter()
        .flat_map(|b| {
            let style = if state.bank == Some(*b) {
                theme::selected_style().add_modifier(Modifier::BOLD)
            } else {
                theme::dim_style()
            };
            [Span::styled(format!(" {} ", b.display_name()), style), Span::raw(" ")]
        })
        .collect();
    let mut bank_line = vec![Span::styled(" Bank:      ", theme::dim_style())];
    bank_line.extend(bank_spans);

    let file_name = state
        .file
        .as_ref()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "none selected".into());

    let detection = match (&state.detection, state.detected_bank()) {
        (None, _) => Span::styled("-", theme::dim_style()),
        (Some(_), Some(bank)) => Span::styled(
            format!("{} format detected", bank.display_name()),
            theme::income_style(),
        ),
        (Some(_), None) => Span::styled("Unknown format", theme::warning_style()),
    };

    let decision = state.decision();
    let decision_style = match decision {
        UploadDecision::Proceed { .. } => theme::income_style(),
        UploadDecision::Mismatch { .. } => theme::expense_style(),
        UploadDecision::ConfirmUnknown { .. } => theme::warning_style(),
        UploadDecision::Incomplete => theme::dim_style(),
    };

    let current = match &app.statement {
        Some(s) => format!(
            "{} ({}, {} transactions)",
            s.file_name,
            s.bank.display_name(),
            s.transaction_count
        ),
        None => "none".into(),
    };

    let lines = vec![
        Line::from(bank_line),
        Line::from(vec![
            Span::styled(" File:      ", theme::dim_style()),
            Span::styled(file_name, theme::normal_style()),
        ]),
        Line::from(vec![Span::styled(" Detection: ", theme::dim_style()), detection]),
        Line::from(vec![
            Span::styled(" Status:    ", theme::dim_style()),
            Span::styled(decision.message(), decision_style),
        ]),
        Line::from(vec![
            Span::styled(" Loaded:    ", theme::dim_style()),
            Span::styled(current, theme::dim_style()),
        ]),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Upload Bank Statement ", theme::title_style())),
    );
    f.render_widget(panel, area);
}

fn render_file_browser(f: &mut Frame, area: Rect, app: &App) {
    let state = &app.upload;
    let page = area.height.saturating_sub(2) as usize;

    let items: Vec<ListItem> = state
        .entries
        .iter()
        .enumerate()
        .skip(state.scroll)
        .take(page.max(1))
        .map(|(i, path)| {
            let name = if state.is_parent_entry(path) {
                "📁 ..".to_string()
            } else if path.is_dir() {
                format!("📁 {}", path.file_name().and_then(|n| n.to_str()).unwrap_or("?"))
            } else {
                format!("📄 {}", path.file_name().and_then(|n| n.to_str()).unwrap_or("?"))
            };

            let style = if i == state.index {
                theme::selected_style()
            } else if state.file.as_deref() == Some(path.as_path()) {
                theme::income_style()
            } else {
                theme::normal_style()
            };

            ListItem::new(Line::from(Span::styled(name, style)))
        })
        .collect();

    let title = format!(" {} ", state.browser_path.display());
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(title, Style::default().fg(theme::ACCENT)))
            .title_bottom(Span::styled(
                " Enter pick file | b bank | u upload | :demo sample data ",
                theme::dim_style(),
            )),
    );
    f.render_widget(list, area);
}
