use crate::app::App;
use crate::ui::widgets::badges::{rating_line, sector_line};
use crate::ui::widgets::charts::render_employment_chart;
use crate::ui::widgets::map::render_map_preview;
use crate::ui::widgets::status::render_loading;
use job_growth_tui::display::{EntitySummary, Metric};
use job_growth_tui::query::QueryState;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

fn heading(text: &str) -> TextLine<'static> {
    TextLine::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn metric_lines(metrics: &[Metric]) -> impl Iterator<Item = TextLine<'static>> + '_ {
    metrics.iter().map(|metric| {
        TextLine::from(vec![
            Span::styled(
                format!("{:<28}", metric.label),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                metric.value.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ])
    })
}

fn summary_lines(summary: &EntitySummary) -> Vec<TextLine<'static>> {
    let mut lines = Vec::new();

    let level = summary
        .level
        .map_or("No data", |level| level.label());
    let source = summary.source.as_deref().unwrap_or("unknown source");
    lines.push(TextLine::from(Span::styled(
        format!("{level} data from {source}"),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(TextLine::from(""));

    lines.extend(metric_lines(&summary.metrics));

    if !summary.growth.is_empty() {
        lines.push(TextLine::from(""));
        lines.push(heading("Job Growth"));
        lines.extend(metric_lines(&summary.growth));
    }

    lines.push(TextLine::from(""));
    lines.push(heading("Top Growing Sectors"));
    lines.push(sector_line(&summary.sectors));

    if !summary.details.is_empty() {
        lines.push(TextLine::from(""));
        lines.push(heading("Workforce"));
        lines.extend(metric_lines(&summary.details));
    }

    if !summary.national.is_empty() {
        lines.push(TextLine::from(""));
        lines.push(heading("vs. National"));
        lines.extend(metric_lines(&summary.national));
    }

    if !summary.ratings.is_empty() {
        lines.push(TextLine::from(""));
        lines.push(heading("Ratings"));
        lines.push(rating_line(&summary.ratings));
    }

    if !summary.notes.is_empty() {
        lines.push(TextLine::from(""));
        lines.push(heading("Notes"));
        lines.extend(summary.notes.iter().map(|note| {
            TextLine::from(Span::styled(
                format!("• {note}"),
                Style::default().fg(Color::Yellow),
            ))
        }));
    }

    lines
}

pub fn render_explore(app: &App, f: &mut Frame<'_>, area: Rect) {
    let addresses = app.session.addresses.addresses();
    if addresses.is_empty() {
        let empty = Paragraph::new("No address selected. Press 's' to search.")
            .block(Block::default().borders(Borders::ALL).title("Explore"));
        f.render_widget(empty, area);
        return;
    }

    let index = app.selected_address_index.min(addresses.len() - 1);
    let title = if addresses.len() > 1 {
        format!(
            "{} ({}/{}, ←/→ to switch)",
            addresses[index],
            index + 1,
            addresses.len()
        )
    } else {
        addresses[index].clone()
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    match app.session.state(index) {
        Some(QueryState::Error(error)) => {
            let message = Paragraph::new(error.to_string())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true });
            f.render_widget(message, inner);
        }
        Some(QueryState::Success(_)) => {
            if let Some(summary) = app.session.summary(index) {
                render_summary(f, inner, &summary);
            }
        }
        _ => render_loading(app, f, inner, "Fetching job growth data..."),
    }
}

fn render_summary(f: &mut Frame<'_>, area: Rect, summary: &EntitySummary) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let details = Paragraph::new(summary_lines(summary))
        .block(
            Block::default()
                .borders(Borders::RIGHT)
                .title(summary.geo_type.label()),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(details, columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(columns[1]);

    render_employment_chart(f, right[0], &summary.series);
    render_map_preview(f, right[1], &summary.map);
}
