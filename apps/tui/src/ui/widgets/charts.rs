use job_growth_tui::compare::group_thousands;
use job_growth_tui::display::EmploymentSeries;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

/// Plot-ready points for an employment series.
#[derive(Debug, Default, PartialEq)]
pub struct ChartData {
    pub actual: Vec<(f64, f64)>,
    pub projected: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_labels: Vec<String>,
}

#[allow(clippy::cast_precision_loss)]
pub fn chart_data(series: &EmploymentSeries) -> Option<ChartData> {
    let (low, high) = series.value_bounds()?;
    // Flat series still need a visible band
    let pad = ((high - low) * 0.1).max(high.abs() * 0.01).max(1.0);
    let y_bounds = [low - pad, high + pad];

    let data = match series {
        EmploymentSeries::Monthly(points) => {
            let actual: Vec<(f64, f64)> = points
                .iter()
                .enumerate()
                .map(|(index, point)| (index as f64, point.value))
                .collect();
            let last = points.len().saturating_sub(1);
            let label = |index: usize| {
                points
                    .get(index)
                    .map(|point| {
                        if point.label.is_empty() {
                            format!("{} {}", point.month, point.year)
                        } else {
                            point.label.clone()
                        }
                    })
                    .unwrap_or_default()
            };
            ChartData {
                actual,
                projected: Vec::new(),
                x_bounds: [0.0, (last as f64).max(1.0)],
                y_bounds,
                x_labels: vec![label(0), label(last / 2), label(last)],
            }
        }
        EmploymentSeries::Yearly(window) => {
            let to_points = |points: &[job_growth_tui::models::TrendPoint]| {
                points
                    .iter()
                    .map(|point| (f64::from(point.year), point.value))
                    .collect::<Vec<_>>()
            };
            let actual = to_points(&window.actual);
            let projected = to_points(&window.projected);
            let first = actual.iter().chain(&projected).map(|(x, _)| *x).reduce(f64::min)?;
            let last = actual.iter().chain(&projected).map(|(x, _)| *x).reduce(f64::max)?;
            ChartData {
                actual,
                projected,
                x_bounds: [first, last.max(first + 1.0)],
                y_bounds,
                x_labels: vec![format!("{first:.0}"), format!("{last:.0}")],
            }
        }
        EmploymentSeries::Empty => return None,
    };
    Some(data)
}

pub fn render_employment_chart(f: &mut Frame<'_>, area: Rect, series: &EmploymentSeries) {
    let block = Block::default()
        .title(series.title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(data) = chart_data(series) else {
        let paragraph = Paragraph::new("No employment trend available")
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    };

    let mut datasets = vec![Dataset::default()
        .name("Actual")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data.actual)];
    if !data.projected.is_empty() {
        datasets.push(
            Dataset::default()
                .name("Projected")
                .marker(Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Yellow))
                .data(&data.projected),
        );
    }

    let y_labels = vec![
        Span::raw(group_thousands(data.y_bounds[0])),
        Span::raw(group_thousands((data.y_bounds[0] + data.y_bounds[1]) / 2.0)),
        Span::raw(group_thousands(data.y_bounds[1])),
    ];
    let x_labels = data
        .x_labels
        .iter()
        .map(|label| Span::raw(label.clone()))
        .collect::<Vec<_>>();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds(data.x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(
                    "Employment",
                    Style::default().add_modifier(Modifier::ITALIC),
                ))
                .style(Style::default().fg(Color::Gray))
                .bounds(data.y_bounds)
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use job_growth_tui::display::yearly_window;
    use job_growth_tui::models::TrendPoint;

    #[test]
    fn yearly_chart_spans_window_years() {
        let trends: Vec<_> = (2019..=2023)
            .map(|year| TrendPoint {
                year,
                value: f64::from(year - 2000) * 1000.0,
                projected: year == 2023,
            })
            .collect();

        let Some(data) = chart_data(&EmploymentSeries::Yearly(yearly_window(&trends))) else {
            panic!("expected chart data");
        };

        assert_eq!(data.x_bounds, [2019.0, 2023.0]);
        assert_eq!(data.actual.len(), 4);
        assert_eq!(data.projected.first(), Some(&(2022.0, 22_000.0)));
        assert!(data.y_bounds[0] < 19_000.0 && data.y_bounds[1] > 23_000.0);
    }

    #[test]
    fn empty_series_has_no_chart() {
        assert!(chart_data(&EmploymentSeries::Empty).is_none());
    }
}
