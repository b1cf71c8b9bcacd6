use crate::app::{App, SearchField};
use job_growth_tui::domain::GeoType;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { Color::Yellow } else { Color::Gray };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

pub fn render_search(app: &App, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    let typing = app.search_field == SearchField::Addresses;
    let mut address_text = app.address_input.clone();
    if typing {
        address_text.push('_');
    }
    let addresses = Paragraph::new(address_text)
        .block(field_block("Address(es), separated by ';'", typing));
    f.render_widget(addresses, chunks[0]);

    let selected_geo = app.selected_geo();
    let geo_spans = GeoType::ALL
        .iter()
        .flat_map(|geo| {
            let style = if *geo == selected_geo {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            [Span::styled(format!(" {} ", geo.label()), style), Span::raw("  ")]
        })
        .collect::<Vec<_>>();
    let granularity = Paragraph::new(TextLine::from(geo_spans)).block(field_block(
        "Granularity (←/→)",
        app.search_field == SearchField::Granularity,
    ));
    f.render_widget(granularity, chunks[1]);

    let flush = Paragraph::new(if app.flush_input {
        "[x] Refresh from source (bypass backend cache)"
    } else {
        "[ ] Refresh from source (bypass backend cache)"
    })
    .block(field_block("Cache (Space)", app.search_field == SearchField::Flush));
    f.render_widget(flush, chunks[2]);

    let hint = vec![
        TextLine::from(vec![
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(": Search   "),
            Span::styled(
                "Tab",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(": Next field   "),
            Span::styled(
                "Esc",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(": Back to results"),
        ]),
        TextLine::from(""),
        TextLine::from("One address opens the detail view; several open the comparison grid."),
        TextLine::from(format!(
            "{} lookups in history.",
            app.session.history.len()
        )),
    ];
    let help = Paragraph::new(hint)
        .block(Block::default().borders(Borders::ALL).title("How to search"))
        .wrap(Wrap { trim: true });
    f.render_widget(help, chunks[3]);
}
