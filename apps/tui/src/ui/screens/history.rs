use crate::app::App;
use crate::ui::widgets::tables::scroll_offset;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

pub fn render_history(app: &App, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let filter_text = if app.history_search_active {
        format!("{}_", app.history_filter)
    } else if app.history_filter.is_empty() {
        "Press '/' to filter".to_string()
    } else {
        app.history_filter.clone()
    };
    let filter_color = if app.history_search_active {
        Color::Yellow
    } else {
        Color::Gray
    };
    let filter = Paragraph::new(filter_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Filter")
            .border_style(Style::default().fg(filter_color)),
    );
    f.render_widget(filter, chunks[0]);

    let items = app.visible_history();
    let block = Block::default().borders(Borders::ALL).title(format!(
        "Recent searches ({}/{})",
        items.len(),
        app.session.history.len()
    ));

    if items.is_empty() {
        let empty = Paragraph::new("No searches yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, chunks[1]);
        return;
    }

    let visible_rows = chunks[1].height.saturating_sub(3) as usize;
    let offset = scroll_offset(items.len(), visible_rows, app.history_index);

    let header = Row::new(vec!["Address", "Granularity", "Duration", "Searched"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let rows = items
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows.max(1))
        .map(|(index, item)| {
            let style = if index == app.history_index {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(item.address.clone()),
                Cell::from(item.geo_type.label()),
                Cell::from(format!("{:.1}s", item.duration_seconds)),
                Cell::from(
                    item.timestamp
                        .with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M")
                        .to_string(),
                ),
            ])
            .style(style)
        })
        .collect::<Vec<_>>();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(50),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(17),
        ],
    )
    .header(header)
    .block(block);
    f.render_widget(table, chunks[1]);
}
