use job_growth_tui::api::JobGrowthClient;
use job_growth_tui::db::{clear_history, upsert_history};
use job_growth_tui::domain::GeoType;
use job_growth_tui::query::{FetchEvent, QueryDispatcher};
use job_growth_tui::session::Session;
use job_growth_tui::store::{parse_addresses, HistoryItem};
use sqlx::SqlitePool;
use throbber_widgets_tui::ThrobberState;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Search,
    Explore,
    Compare,
    History,
}

impl AppScreen {
    pub const ALL: [Self; 4] = [Self::Search, Self::Explore, Self::Compare, Self::History];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::Explore => "Explore",
            Self::Compare => "Compare",
            Self::History => "History",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Search => 0,
            Self::Explore => 1,
            Self::Compare => 2,
            Self::History => 3,
        }
    }
}

/// Focused field of the search form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Addresses,
    Granularity,
    Flush,
}

impl SearchField {
    pub const fn next(self) -> Self {
        match self {
            Self::Addresses => Self::Granularity,
            Self::Granularity => Self::Flush,
            Self::Flush => Self::Addresses,
        }
    }

    pub const fn previous(self) -> Self {
        match self {
            Self::Addresses => Self::Flush,
            Self::Granularity => Self::Addresses,
            Self::Flush => Self::Granularity,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub show_help: bool,
    pub status_message: String,
    pub session: Session,
    pub dispatcher: QueryDispatcher<JobGrowthClient>,
    pub db_pool: Option<SqlitePool>,
    pub search_field: SearchField,
    pub address_input: String,
    pub geo_index: usize,
    pub flush_input: bool,
    pub selected_address_index: usize,
    pub compare_row_index: usize,
    pub history_index: usize,
    pub history_filter: String,
    pub history_search_active: bool,
    pub throbber_state: ThrobberState,
}

impl App {
    pub fn new(
        dispatcher: QueryDispatcher<JobGrowthClient>,
        session: Session,
        db_pool: Option<SqlitePool>,
    ) -> Self {
        Self {
            running: true,
            screen: AppScreen::Search,
            show_help: false,
            status_message: String::new(),
            session,
            dispatcher,
            db_pool,
            search_field: SearchField::Addresses,
            address_input: String::new(),
            geo_index: GeoType::default().index(),
            flush_input: false,
            selected_address_index: 0,
            compare_row_index: 0,
            history_index: 0,
            history_filter: String::new(),
            history_search_active: false,
            throbber_state: ThrobberState::default(),
        }
    }

    /// Advances spinners; called once per frame.
    pub fn update(&mut self) {
        if !self.session.is_settled() {
            self.throbber_state.calc_next();
        }
    }

    pub fn selected_geo(&self) -> GeoType {
        GeoType::from_index(self.geo_index).unwrap_or_default()
    }

    /// Submits the search form. One address opens the explore view, several the comparison.
    pub fn submit_search(&mut self) {
        let addresses = parse_addresses(&self.address_input);
        if addresses.is_empty() {
            self.status_message = "Enter at least one address".to_string();
            return;
        }

        let count = addresses.len();
        let issued = self.session.submit(
            &self.dispatcher,
            addresses,
            self.selected_geo(),
            self.flush_input,
        );
        self.selected_address_index = 0;
        self.compare_row_index = 0;
        self.screen = if count > 1 {
            AppScreen::Compare
        } else {
            AppScreen::Explore
        };
        self.status_message = format!("Fetching {issued} of {count} address(es)");
    }

    pub fn refresh(&mut self) {
        if self.session.addresses.is_empty() {
            self.status_message = "Nothing to refresh".to_string();
            return;
        }
        let issued = self.session.refresh(&self.dispatcher);
        self.status_message = format!("Refreshing {issued} address(es) from source");
    }

    /// History entries visible under the current filter, newest first.
    pub fn visible_history(&self) -> Vec<&HistoryItem> {
        self.session.history.search(&self.history_filter)
    }

    pub fn select_history(&mut self) {
        let Some(id) = self
            .visible_history()
            .get(self.history_index)
            .map(|item| item.id.clone())
        else {
            return;
        };

        if let Some(item) = self.session.select_history(&self.dispatcher, &id) {
            self.address_input.clone_from(&item.address);
            self.geo_index = item.geo_type.index();
            self.flush_input = false;
            self.selected_address_index = 0;
            self.screen = AppScreen::Explore;
            self.status_message = format!("Loaded {}", item.address);
        }
    }

    /// Applies a settled fetch and persists any history it produced.
    pub async fn handle_fetch_event(&mut self, event: FetchEvent) {
        if let Err(error) = &event.outcome {
            self.status_message = format!("{}: {error}", event.key.address);
        }

        let Some(item) = self.session.apply(event) else {
            return;
        };
        self.status_message = format!(
            "Loaded {} in {:.1}s",
            item.address, item.duration_seconds
        );

        if let Some(pool) = &self.db_pool {
            if let Err(error) = upsert_history(pool, &item).await {
                warn!(%error, id = %item.id, "failed to persist history entry");
            }
        }
    }

    pub async fn clear_history(&mut self) {
        self.session.history.clear();
        self.history_index = 0;
        self.status_message = "History cleared".to_string();

        if let Some(pool) = &self.db_pool {
            match clear_history(pool).await {
                Ok(rows) => info!(rows, "cleared persisted history"),
                Err(error) => {
                    warn!(%error, "failed to clear persisted history");
                    self.status_message = format!("History cleared in memory only: {error}");
                }
            }
        }
    }
}
