use job_growth_tui::compare::SectorBadge;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};

pub fn badge_style(positive: bool) -> Style {
    let color = if positive { Color::Green } else { Color::Red };
    Style::default()
        .fg(Color::Black)
        .bg(color)
        .add_modifier(Modifier::BOLD)
}

pub fn sector_badge(badge: &SectorBadge) -> Span<'static> {
    Span::styled(format!(" {} ", badge.text), badge_style(badge.positive))
}

/// Sector badges on one line, separated by a space.
pub fn sector_line(badges: &[SectorBadge]) -> TextLine<'static> {
    if badges.is_empty() {
        return TextLine::from(Span::styled(
            "No sector data",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut spans = Vec::with_capacity(badges.len() * 2);
    for badge in badges {
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
        }
        spans.push(sector_badge(badge));
    }
    TextLine::from(spans)
}

/// Qualitative ratings as `Label: rating` chips.
pub fn rating_line(ratings: &[(String, String)]) -> TextLine<'static> {
    let spans = ratings
        .iter()
        .flat_map(|(label, rating)| {
            [
                Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{rating}  "),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            ]
        })
        .collect::<Vec<_>>();
    TextLine::from(spans)
}
