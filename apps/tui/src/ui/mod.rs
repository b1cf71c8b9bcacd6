// Rendering for every screen plus the shared chrome

pub mod screens;
pub mod widgets;

use crate::app::{App, AppScreen};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(2),
        ])
        .split(f.area());

    widgets::status::render_tabs(app, f, chunks[0]);

    match app.screen {
        AppScreen::Search => screens::search::render_search(app, f, chunks[1]),
        AppScreen::Explore => screens::explore::render_explore(app, f, chunks[1]),
        AppScreen::Compare => screens::compare::render_compare(app, f, chunks[1]),
        AppScreen::History => screens::history::render_history(app, f, chunks[1]),
    }

    widgets::status::render_status_bar(app, f, chunks[2]);

    if app.show_help {
        widgets::help::render_help(f, f.area());
    }
}
