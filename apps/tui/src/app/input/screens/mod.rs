use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

mod compare;
mod explore;
mod help;
mod history;
mod search;

pub async fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    // Text entry swallows the global shortcuts.
    let typing = match app.screen {
        AppScreen::Search => search::is_typing(app),
        AppScreen::History => app.history_search_active,
        AppScreen::Explore | AppScreen::Compare => false,
    };
    if !typing && handle_global_input(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Search => search::handle_search_input(app, key),
        AppScreen::Explore => explore::handle_explore_input(app, key),
        AppScreen::Compare => compare::handle_compare_input(app, key),
        AppScreen::History => history::handle_history_input(app, key).await,
    }
}

fn handle_global_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('s') => app.screen = AppScreen::Search,
        KeyCode::Char('e') => app.screen = AppScreen::Explore,
        KeyCode::Char('c') => app.screen = AppScreen::Compare,
        KeyCode::Char('h') => {
            app.history_index = 0;
            app.screen = AppScreen::History;
        }
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('?') => app.show_help = true,
        _ => return false,
    }
    true
}
