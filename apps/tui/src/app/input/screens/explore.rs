use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

#[allow(clippy::missing_const_for_fn)]
pub fn handle_explore_input(app: &mut App, key: KeyCode) {
    let total = app.session.addresses.addresses().len();

    match key {
        KeyCode::Left | KeyCode::BackTab => {
            app.selected_address_index = wrap_decrement(app.selected_address_index, total);
        }
        KeyCode::Right | KeyCode::Tab => {
            app.selected_address_index = wrap_increment(app.selected_address_index, total);
        }
        KeyCode::Enter => {
            if total > 1 {
                app.screen = AppScreen::Compare;
            }
        }
        KeyCode::Esc => app.screen = AppScreen::Search,
        _ => {}
    }
}
