use crate::ui::widgets::popup::centered_rect;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const SHORTCUTS: &[(&str, &str)] = &[
    ("F1 / ?", "Toggle this help screen"),
    ("s", "Search form"),
    ("e", "Explore the selected address"),
    ("c", "Compare all addresses"),
    ("h", "Search history"),
    ("r", "Refresh from source (bypass backend cache)"),
    ("Tab / ↑↓", "Move between search fields"),
    ("←/→", "Change granularity, switch address in Explore"),
    ("Enter", "Submit search / load history entry"),
    ("/", "Filter history"),
    ("x", "Clear history"),
    ("Esc", "Go back"),
    ("q", "Quit application"),
];

fn key_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn render_help(f: &mut Frame<'_>, area: Rect) {
    let popup = centered_rect(64, 70, area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(key_style())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let mut lines = vec![
        TextLine::from(Span::styled(
            "Job Growth Explorer",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from("Look up employment, wages and sector growth for one or more addresses."),
        TextLine::from("Separate several addresses with ';' to compare them side by side."),
        TextLine::from(""),
    ];
    lines.extend(SHORTCUTS.iter().map(|(key, description)| {
        TextLine::from(vec![
            Span::styled(format!("  {key:<10}"), key_style()),
            Span::raw(format!(" - {description}")),
        ])
    }));
    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled(
        "Press Esc to close this help screen",
        Style::default().fg(Color::Yellow),
    )));

    let help_paragraph = Paragraph::new(Text::from(lines))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, popup);
    f.render_widget(help_paragraph, popup);
}
