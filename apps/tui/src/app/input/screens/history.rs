use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub async fn handle_history_input(app: &mut App, key: KeyCode) {
    if app.history_search_active {
        handle_filter_input(app, key);
        return;
    }

    let total_rows = app.visible_history().len();

    match key {
        KeyCode::Esc => {
            if app.history_filter.is_empty() {
                app.screen = AppScreen::Search;
            } else {
                app.history_filter.clear();
                app.history_index = 0;
            }
        }
        KeyCode::Char('/') => app.history_search_active = true,
        KeyCode::Char('x') => app.clear_history().await,
        KeyCode::Enter => app.select_history(),
        KeyCode::Up => {
            app.history_index = app.history_index.saturating_sub(1);
        }
        KeyCode::Down => {
            if app.history_index + 1 < total_rows {
                app.history_index += 1;
            }
        }
        KeyCode::Home => app.history_index = 0,
        KeyCode::End => app.history_index = total_rows.saturating_sub(1),
        _ => {}
    }
}

fn handle_filter_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            app.history_search_active = false;
            app.history_filter.clear();
        }
        KeyCode::Enter => app.history_search_active = false,
        KeyCode::Backspace => {
            app.history_filter.pop();
        }
        KeyCode::Char(ch) => app.history_filter.push(ch),
        _ => {}
    }
    app.history_index = 0;
}
