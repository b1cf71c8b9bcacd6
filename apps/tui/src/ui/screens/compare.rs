use crate::app::App;
use crate::ui::widgets::badges::badge_style;
use crate::ui::widgets::status::render_loading;
use crate::ui::widgets::tables::scroll_offset;
use job_growth_tui::compare::{ColumnStatus, GridCell};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

const LABEL_WIDTH: u16 = 26;

fn grid_cell(cell: &GridCell) -> Cell<'static> {
    match cell {
        GridCell::Badge(badge) => Cell::from(TextLine::from(Span::styled(
            format!(" {} ", badge.text),
            badge_style(badge.positive),
        ))),
        GridCell::NotAvailable => {
            Cell::from(cell.text().to_string()).style(Style::default().fg(Color::DarkGray))
        }
        GridCell::Loading => {
            Cell::from(cell.text().to_string()).style(Style::default().fg(Color::Yellow))
        }
        GridCell::Error(_) => {
            Cell::from(cell.text().to_string()).style(Style::default().fg(Color::Red))
        }
        GridCell::Value(_) => Cell::from(cell.text().to_string()),
    }
}

fn header_cell(address: &str, status: &ColumnStatus) -> Cell<'static> {
    let style = match status {
        ColumnStatus::Loading => Style::default().fg(Color::Yellow),
        ColumnStatus::Ready => Style::default().fg(Color::Cyan),
        ColumnStatus::Failed(_) => Style::default().fg(Color::Red),
    };
    Cell::from(address.to_string()).style(style.add_modifier(Modifier::BOLD))
}

pub fn render_compare(app: &App, f: &mut Frame<'_>, area: Rect) {
    let grid = app.session.grid();
    if grid.columns.is_empty() {
        let empty = Paragraph::new("Search for two or more addresses to compare them.")
            .block(Block::default().borders(Borders::ALL).title("Compare"));
        f.render_widget(empty, area);
        return;
    }

    let settled = grid.is_settled();
    let (table_area, status_area) = if settled {
        (area, None)
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(1)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    };

    // Borders plus header row
    let visible_rows = table_area.height.saturating_sub(4) as usize;
    let offset = scroll_offset(grid.rows.len(), visible_rows, app.compare_row_index);

    let header = Row::new(
        std::iter::once(Cell::from("Attribute"))
            .chain(
                grid.columns
                    .iter()
                    .map(|column| header_cell(&column.address, &column.status)),
            )
            .collect::<Vec<_>>(),
    )
    .style(Style::default().add_modifier(Modifier::BOLD))
    .bottom_margin(1);

    let rows = grid
        .rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_rows.max(1))
        .map(|(index, row)| {
            let style = if index == app.compare_row_index {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            let cells = std::iter::once(
                Cell::from(row.label).style(Style::default().fg(Color::Gray)),
            )
            .chain(row.cells.iter().map(grid_cell));
            Row::new(cells.collect::<Vec<_>>()).style(style)
        })
        .collect::<Vec<_>>();

    #[allow(clippy::cast_possible_truncation)]
    let column_count = grid.columns.len() as u32;
    let widths = std::iter::once(Constraint::Length(LABEL_WIDTH))
        .chain(grid.columns.iter().map(|_| Constraint::Ratio(1, column_count)))
        .collect::<Vec<_>>();

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Comparing {} addresses", grid.columns.len())),
        )
        .column_spacing(2);
    f.render_widget(table, table_area);

    if let Some(status_area) = status_area {
        let pending = grid
            .columns
            .iter()
            .filter(|column| column.status == ColumnStatus::Loading)
            .count();
        render_loading(
            app,
            f,
            status_area,
            &format!("Waiting on {pending} of {} addresses", grid.columns.len()),
        );
    }
}
