mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use event::HeadlessOptions;
use job_growth_tui::api::JobGrowthClient;
use job_growth_tui::config::AppConfig;
use job_growth_tui::db::{create_history_pool, load_history};
use job_growth_tui::logging::{init_logging, LogTarget};
use job_growth_tui::query::QueryDispatcher;
use job_growth_tui::session::Session;
use job_growth_tui::store::HistoryStore;
use sqlx::SqlitePool;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = AppConfig::from_env()?;

    let headless = args.headless || !is_terminal();
    init_logging(
        &LogTarget::for_mode(headless, config.log_file.clone()),
        config.debug,
    )?;
    info!(endpoint = %config.api.endpoint(), headless, "starting job growth explorer");

    let (pool, history) = open_history(&config).await;

    let client = JobGrowthClient::new(&config)?;
    let (dispatcher, mut fetches) = QueryDispatcher::new(client);
    let mut session = Session::new(history);

    if headless {
        let options = HeadlessOptions {
            addresses: args.addresses,
            geo_type: args.geo,
            flush_cache: args.flush,
            json: args.json,
        };
        return event::run_headless(
            &mut session,
            &dispatcher,
            &mut fetches,
            pool.as_ref(),
            &options,
        )
        .await;
    }

    let mut app = App::new(dispatcher, session, pool);
    if !args.addresses.is_empty() {
        app.address_input = args.addresses.join("; ");
        app.geo_index = args.geo.index();
        app.flush_input = args.flush;
        app.submit_search();
    }

    // Setup terminal
    let mut terminal = terminal::setup_terminal()?;

    let result = event::run(&mut terminal, &mut app, &mut fetches).await;

    // Restore terminal
    terminal::cleanup_terminal_state(true, true);

    result
}

/// Opens the history database when one is configured. Failures degrade to
/// in-memory history.
async fn open_history(config: &AppConfig) -> (Option<SqlitePool>, HistoryStore) {
    let Some(url) = config.history_db_url() else {
        return (None, HistoryStore::new());
    };

    let pool = match create_history_pool(&url).await {
        Ok(pool) => pool,
        Err(error) => {
            warn!(%error, %url, "history database unavailable, keeping history in memory");
            return (None, HistoryStore::new());
        }
    };

    match load_history(&pool).await {
        Ok(items) => {
            info!(count = items.len(), "loaded search history");
            (Some(pool), HistoryStore::from_items(items))
        }
        Err(error) => {
            warn!(%error, "failed to load search history");
            (Some(pool), HistoryStore::new())
        }
    }
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
