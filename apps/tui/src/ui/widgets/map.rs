use job_growth_tui::display::MapView;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Map, MapResolution, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

const CIRCLE_SEGMENTS: usize = 48;

/// Geocoded point with the granularity radius drawn around it.
pub fn render_map_preview(f: &mut Frame<'_>, area: Rect, view: &MapView) {
    if area.width < 8 || area.height < 6 {
        return;
    }

    let (x_bounds, y_bounds) = view.bounds();
    let outline = view.circle(CIRCLE_SEGMENTS);
    let title = format!(
        "Map ({:.4}, {:.4}) ~{} mi radius",
        view.lat, view.lon, view.radius_miles
    );

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::DarkGray,
            });

            for segment in outline.windows(2) {
                ctx.draw(&CanvasLine {
                    x1: segment[0].0,
                    y1: segment[0].1,
                    x2: segment[1].0,
                    y2: segment[1].1,
                    color: Color::Cyan,
                });
            }

            ctx.draw(&Points {
                coords: &[(view.lon, view.lat)],
                color: Color::Yellow,
            });
            ctx.print(
                view.lon,
                view.lat,
                Span::styled(" X", Style::default().fg(Color::Yellow)),
            );
        });

    f.render_widget(canvas, area);
}
