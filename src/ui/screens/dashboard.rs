use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::analytics::DashboardSummary;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(summary) = &app.dashboard else {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No statement loaded. Upload a CSV from the Upload tab, or run :demo",
            theme::dim_style(),
        )))
        .centered()
        .block(panel(" Dashboard "));
        f.render_widget(msg, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),      // Summary cards
            Constraint::Percentage(50), // Charts
            Constraint::Min(6),         // Merchants + insights
        ])
        .split(area);

    render_summary_cards(f, chunks[0], summary);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_category_chart(f, charts[0], summary);
    render_monthly_chart(f, charts[1], summary);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[2]);
    render_top_merchants(f, bottom[0], summary);
    render_insights(f, bottom[1], app);
}

fn panel(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(title.into(), theme::title_style()))
}

fn render_summary_cards(f: &mut Frame, area: Rect, summary: &DashboardSummary) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    render_card(
        f,
        cards[0],
        "Total Spending",
        format_amount(summary.total_spending),
        theme::RED,
    );
    render_card(
        f,
        cards[1],
        "Transactions",
        summary.total_transactions.to_string(),
        theme::ACCENT,
    );
    render_card(
        f,
        cards[2],
        "Categories",
        summary.total_categories.to_string(),
        theme::MAUVE,
    );
    render_card(
        f,
        cards[3],
        "Avg Transaction",
        format_amount(summary.avg_transaction),
        theme::YELLOW,
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, value: String, color: ratatui::style::Color) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(panel(format!(" {title} ")));

    f.render_widget(text, area);
}

fn render_category_chart(f: &mut Frame, area: Rect, summary: &DashboardSummary) {
    let bars: Vec<Bar> = summary
        .categories
        .iter()
        .map(|c| {
            Bar::default()
                .value(c.total.abs().round() as u64)
                .text_value(format_amount(c.total))
                .label(Line::from(truncate(&c.category, 14)))
                .style(theme::amount_style(c.total))
        })
        .collect();

    let chart = BarChart::default()
        .block(panel(" Spending by Category "))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(0)
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

fn render_monthly_chart(f: &mut Frame, area: Rect, summary: &DashboardSummary) {
    let bars: Vec<Bar> = summary
        .monthly
        .iter()
        .map(|m| {
            Bar::default()
                .value(m.total.abs().round() as u64)
                .text_value(format!("{:.0}k", m.total / 1000.0))
                .label(Line::from(m.month.clone()))
                .style(theme::amount_style(m.total))
        })
        .collect();

    let chart = BarChart::default()
        .block(panel(" Monthly Net Flow "))
        .data(BarGroup::default().bars(&bars))
        .bar_width(8)
        .bar_gap(2)
        .value_style(Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD));

    f.render_widget(chart, area);
}

fn render_top_merchants(f: &mut Frame, area: Rect, summary: &DashboardSummary) {
    let header = Row::new(vec![
        Cell::from("Merchant"),
        Cell::from("Total"),
    ])
    .style(theme::header_style());

    let rows: Vec<Row> = summary
        .top_merchants
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let style = if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(truncate(&m.merchant, 30)),
                Cell::from(Span::styled(format_amount(m.total), theme::amount_style(m.total))),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Min(20), Constraint::Length(16)])
        .header(header)
        .block(panel(" Top Merchants "));
    f.render_widget(table, area);
}

fn render_insights(f: &mut Frame, area: Rect, app: &App) {
    let text = match &app.insights {
        Some(text) => Paragraph::new(text.as_str()).style(theme::normal_style()),
        None => Paragraph::new(Line::from(Span::styled(
            "Run :insights to ask the assistant for quick insights",
            theme::dim_style(),
        ))),
    };
    f.render_widget(text.wrap(Wrap { trim: false }).block(panel(" AI Insights ")), area);
}
