use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen, SearchField};
use crossterm::event::KeyCode;
use job_growth_tui::domain::GeoType;

pub fn is_typing(app: &App) -> bool {
    app.search_field == SearchField::Addresses
}

pub fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Tab | KeyCode::Down => app.search_field = app.search_field.next(),
        KeyCode::BackTab | KeyCode::Up => app.search_field = app.search_field.previous(),
        KeyCode::Enter => app.submit_search(),
        KeyCode::Esc => {
            if !app.session.addresses.is_empty() {
                app.screen = AppScreen::Explore;
            }
        }
        _ => match app.search_field {
            SearchField::Addresses => handle_address_text(app, key),
            SearchField::Granularity => handle_granularity(app, key),
            SearchField::Flush => {
                if matches!(key, KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right) {
                    app.flush_input = !app.flush_input;
                }
            }
        },
    }
}

fn handle_address_text(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char(ch) => app.address_input.push(ch),
        KeyCode::Backspace => {
            app.address_input.pop();
        }
        KeyCode::Delete => app.address_input.clear(),
        _ => {}
    }
}

fn handle_granularity(app: &mut App, key: KeyCode) {
    let len = GeoType::ALL.len();
    match key {
        KeyCode::Left => app.geo_index = wrap_decrement(app.geo_index, len),
        KeyCode::Right | KeyCode::Char(' ') => app.geo_index = wrap_increment(app.geo_index, len),
        _ => {}
    }
}
