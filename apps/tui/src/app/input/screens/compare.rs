use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;
use job_growth_tui::compare::COMPARISON_ATTRIBUTES;

#[allow(clippy::missing_const_for_fn)]
pub fn handle_compare_input(app: &mut App, key: KeyCode) {
    let total_rows = COMPARISON_ATTRIBUTES.len();

    match key {
        KeyCode::Up => {
            app.compare_row_index = app.compare_row_index.saturating_sub(1);
        }
        KeyCode::Down => {
            if app.compare_row_index + 1 < total_rows {
                app.compare_row_index += 1;
            }
        }
        KeyCode::PageUp => {
            app.compare_row_index = app.compare_row_index.saturating_sub(5);
        }
        KeyCode::PageDown => {
            app.compare_row_index = (app.compare_row_index + 5).min(total_rows - 1);
        }
        KeyCode::Home => app.compare_row_index = 0,
        KeyCode::End => app.compare_row_index = total_rows - 1,
        KeyCode::Esc => app.screen = AppScreen::Search,
        _ => {}
    }
}
