use crate::app::{App, AppScreen};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

pub fn render_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = AppScreen::ALL
        .iter()
        .map(|screen| TextLine::from(screen.title()))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title("Job Growth Explorer")
                .borders(Borders::ALL),
        )
        .select(app.screen.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

/// Renders a spinner for in-flight fetches.
pub fn render_loading(app: &App, f: &mut Frame<'_>, area: Rect, label: &str) {
    let throbber = Throbber::default()
        .label(label.to_string())
        .style(Style::default().fg(Color::Cyan))
        .throbber_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(throbber, area, &mut app.throbber_state.clone());
}

pub fn render_status_bar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let key = |text: &'static str| {
        Span::styled(
            text,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    };

    let mut spans = vec![
        key("s/e/c/h"),
        Span::raw(": Screens   "),
        key("r"),
        Span::raw(": Refresh   "),
        key("F1"),
        Span::raw(": Help   "),
        key("q"),
        Span::raw(": Quit"),
    ];
    if !app.status_message.is_empty() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            app.status_message.clone(),
            Style::default().fg(Color::Cyan),
        ));
    }

    let paragraph = Paragraph::new(TextLine::from(spans))
        .block(Block::default().borders(Borders::TOP))
        .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(paragraph, area);
}
