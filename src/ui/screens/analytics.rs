use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Sparkline, Table, Wrap},
    Frame,
};

use crate::analytics::{AdvancedAnalytics, WEEKDAYS};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(analytics) = &app.analytics else {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No statement loaded. Upload a CSV from the Upload tab first",
            theme::dim_style(),
        )))
        .centered()
        .block(panel(" Analytics "));
        f.render_widget(msg, area);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Statistics + quality
            Constraint::Length(9), // Weekday + hourly charts
            Constraint::Min(6),    // Tables
            Constraint::Length(8), // Insights
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[0]);
    render_statistics(f, top[0], analytics);
    render_data_quality(f, top[1], analytics);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    render_weekday_chart(f, charts[0], analytics);
    render_hourly_sparkline(f, charts[1], analytics);

    let tables = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(rows[2]);
    render_category_trends(f, tables[0], analytics);
    render_frequent_merchants(f, tables[1], analytics);
    render_outliers(f, tables[2], analytics);

    render_insights(f, rows[3], analytics);
}

fn panel(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(title, theme::title_style()))
}

fn stat_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label:<10}"), theme::dim_style()),
        Span::styled(value, theme::normal_style()),
    ])
}

fn render_statistics(f: &mut Frame, area: Rect, analytics: &AdvancedAnalytics) {
    let s = &analytics.statistics;
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(panel(" Statistics ").inner(area));
    f.render_widget(panel(" Statistics "), area);

    let left = Paragraph::new(vec![
        stat_line("Count", s.count.to_string()),
        stat_line("Mean", format_amount(s.mean)),
        stat_line("Median", format_amount(s.median)),
        stat_line("Std dev", format_amount(s.std)),
    ]);
    let right = Paragraph::new(vec![
        stat_line("Min", format_amount(s.min)),
        stat_line("Max", format_amount(s.max)),
        stat_line("Q25", format_amount(s.q25)),
        stat_line("Q75", format_amount(s.q75)),
    ]);
    f.render_widget(left, halves[0]);
    f.render_widget(right, halves[1]);
}

fn render_data_quality(f: &mut Frame, area: Rect, analytics: &AdvancedAnalytics) {
    let q = &analytics.data_quality;
    let completeness_style = if q.completeness >= 95.0 {
        theme::income_style()
    } else {
        theme::warning_style()
    };
    let text = Paragraph::new(vec![
        stat_line("Rows", q.total.to_string()),
        stat_line("Missing", q.missing.to_string()),
        stat_line("Duplicates", q.duplicates.to_string()),
        Line::from(vec![
            Span::styled(format!(" {:<10}", "Complete"), theme::dim_style()),
            Span::styled(
                format!("{:.2}%", q.completeness),
                completeness_style.add_modifier(Modifier::BOLD),
            ),
        ]),
    ])
    .block(panel(" Data Quality "));
    f.render_widget(text, area);
}

fn render_weekday_chart(f: &mut Frame, area: Rect, analytics: &AdvancedAnalytics) {
    let bars: Vec<Bar> = WEEKDAYS
        .iter()
        .zip(analytics.weekday_spending.iter())
        .map(|(day, total)| {
            Bar::default()
                .value(total.round() as u64)
                .text_value(format!("{:.0}k", total / 1000.0))
                .label(Line::from(day.chars().take(3).collect::<String>()))
                .style(Style::default().fg(theme::ACCENT))
        })
        .collect();

    let chart = BarChart::default()
        .block(panel(" Spending by Weekday "))
        .data(BarGroup::default().bars(&bars))
        .bar_width(5)
        .bar_gap(1)
        .value_style(Style::default().fg(theme::HEADER_BG).bg(theme::ACCENT));
    f.render_widget(chart, area);
}

fn render_hourly_sparkline(f: &mut Frame, area: Rect, analytics: &AdvancedAnalytics) {
    let data: Vec<u64> = analytics
        .hourly_spending
        .iter()
        .map(|v| v.round() as u64)
        .collect();

    let sparkline = Sparkline::default()
        .block(panel(" Spending by Hour (00-23) "))
        .data(&data)
        .style(Style::default().fg(theme::YELLOW));
    f.render_widget(sparkline, area);
}

fn table_rows<'a>(rows: impl Iterator<Item = Vec<Cell<'a>>>) -> Vec<Row<'a>> {
    rows.enumerate()
        .map(|(i, cells)| {
            let style = if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(cells).style(style)
        })
        .collect()
}

fn render_category_trends(f: &mut Frame, area: Rect, analytics: &AdvancedAnalytics) {
    let rows = table_rows(analytics.category_trends.iter().map(|t| {
        vec![
            Cell::from(truncate(&t.category, 16)),
            Cell::from(format_amount(t.total)),
            Cell::from(t.count.to_string()),
        ]
    }));
    let table = Table::new(
        rows,
        [Constraint::Min(10), Constraint::Length(14), Constraint::Length(4)],
    )
    .header(Row::new(vec!["Category", "Total", "#"]).style(theme::header_style()))
    .block(panel(" Category Trends "));
    f.render_widget(table, area);
}

fn render_frequent_merchants(f: &mut Frame, area: Rect, analytics: &AdvancedAnalytics) {
    let rows = table_rows(analytics.frequent_merchants.iter().map(|m| {
        vec![
            Cell::from(truncate(&m.merchant, 18)),
            Cell::from(m.count.to_string()),
            Cell::from(format_amount(m.avg)),
        ]
    }));
    let table = Table::new(
        rows,
        [Constraint::Min(10), Constraint::Length(4), Constraint::Length(13)],
    )
    .header(Row::new(vec!["Merchant", "#", "Avg"]).style(theme::header_style()))
    .block(panel(" Frequent Merchants "));
    f.render_widget(table, area);
}

fn render_outliers(f: &mut Frame, area: Rect, analytics: &AdvancedAnalytics) {
    let rows = table_rows(analytics.outliers.iter().map(|o| {
        vec![
            Cell::from(o.date.clone()),
            Cell::from(truncate(&o.description, 16)),
            Cell::from(Span::styled(format_amount(o.amount), theme::amount_style(o.amount))),
        ]
    }));
    let table = Table::new(
        rows,
        [Constraint::Length(10), Constraint::Min(8), Constraint::Length(14)],
    )
    .header(Row::new(vec!["Date", "Description", "Amount"]).style(theme::header_style()))
    .block(panel(" Unusual Transactions "));
    f.render_widget(table, area);
}

fn render_insights(f: &mut Frame, area: Rect, analytics: &AdvancedAnalytics) {
    let lines: Vec<Line> = analytics
        .insights
        .iter()
        .map(|i| {
            Line::from(vec![
                Span::raw(format!(" {} ", i.icon)),
                Span::styled(format!("{}: ", i.title), theme::title_style()),
                Span::styled(i.text.as_str(), theme::normal_style()),
            ])
        })
        .collect();
    let text = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(panel(" Insights "));
    f.render_widget(text, area);
}
