use color_eyre::Result;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use job_growth_tui::api::JobGrowthSource;
use job_growth_tui::compare::{ComparisonGrid, ColumnStatus, GridCell};
use job_growth_tui::db::upsert_history;
use job_growth_tui::display::{EntitySummary, Metric};
use job_growth_tui::domain::GeoType;
use job_growth_tui::query::{FetchEvent, QueryDispatcher};
use job_growth_tui::session::Session;
use serde::Serialize;
use sqlx::SqlitePool;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    pub addresses: Vec<String>,
    pub geo_type: GeoType,
    pub flush_cache: bool,
    pub json: bool,
}

/// Fetch every address, wait for all of them to settle and print the result
pub async fn run_headless<S: JobGrowthSource>(
    session: &mut Session,
    dispatcher: &QueryDispatcher<S>,
    fetches: &mut UnboundedReceiver<FetchEvent>,
    pool: Option<&SqlitePool>,
    options: &HeadlessOptions,
) -> Result<()> {
    if options.addresses.is_empty() {
        return Err(color_eyre::eyre::eyre!(
            "No addresses given; pass one or more --address flags\n\n{}",
            crate::cli::CliArgs::help_text()
        ));
    }

    let issued = session.submit(
        dispatcher,
        options.addresses.clone(),
        options.geo_type,
        options.flush_cache,
    );
    info!(issued, geo_type = %options.geo_type, "fetching job growth");

    while !session.is_settled() {
        let Some(fetch) = fetches.recv().await else {
            return Err(color_eyre::eyre::eyre!("Fetch channel closed before all addresses settled"));
        };
        if let Some(item) = session.apply(fetch) {
            if let Some(pool) = pool {
                if let Err(error) = upsert_history(pool, &item).await {
                    warn!(%error, id = %item.id, "failed to persist history entry");
                }
            }
        }
    }

    let report = HeadlessReport::from_session(session);
    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", grid_table(&report.grid));
        for summary in &report.summaries {
            println!("{}", summary_line(summary));
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct HeadlessReport {
    grid: ComparisonGrid,
    summaries: Vec<HeadlessSummary>,
}

#[derive(Serialize)]
struct HeadlessSummary {
    address: String,
    geo_type: GeoType,
    level: Option<&'static str>,
    source: Option<String>,
    metrics: Vec<(String, String)>,
    sectors: Vec<String>,
    notes: Vec<String>,
}

impl HeadlessReport {
    fn from_session(session: &Session) -> Self {
        let summaries = (0..session.addresses.addresses().len())
            .filter_map(|index| session.summary(index))
            .map(HeadlessSummary::from)
            .collect();
        Self {
            grid: session.grid(),
            summaries,
        }
    }
}

impl From<EntitySummary> for HeadlessSummary {
    fn from(summary: EntitySummary) -> Self {
        let pairs = |metrics: Vec<Metric>| {
            metrics
                .into_iter()
                .map(|metric| (metric.label, metric.value))
                .collect::<Vec<_>>()
        };
        let mut metrics = pairs(summary.metrics);
        metrics.extend(pairs(summary.growth));
        Self {
            address: summary.address,
            geo_type: summary.geo_type,
            level: summary.level.map(|level| level.label()),
            source: summary.source,
            metrics,
            sectors: summary.sectors.into_iter().map(|badge| badge.text).collect(),
            notes: summary.notes,
        }
    }
}

fn grid_table(grid: &ComparisonGrid) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Attribute").add_attribute(Attribute::Bold)];
    header.extend(grid.columns.iter().map(|column| {
        let cell = Cell::new(&column.address).add_attribute(Attribute::Bold);
        match column.status {
            ColumnStatus::Failed(_) => cell.fg(Color::Red),
            ColumnStatus::Ready | ColumnStatus::Loading => cell,
        }
    }));
    table.set_header(header);

    for row in &grid.rows {
        let mut cells = vec![Cell::new(row.label)];
        cells.extend(row.cells.iter().map(|cell| {
            let text = Cell::new(cell.text());
            match cell {
                GridCell::Badge(badge) if badge.positive => text.fg(Color::Green),
                GridCell::Badge(_) | GridCell::Error(_) => text.fg(Color::Red),
                GridCell::NotAvailable | GridCell::Loading => text.fg(Color::DarkGrey),
                GridCell::Value(_) => text,
            }
        }));
        table.add_row(cells);
    }

    table
}

fn summary_line(summary: &HeadlessSummary) -> String {
    let metrics = summary
        .metrics
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join(" | ");
    format!(
        "{} [{}, {}] {}",
        summary.address,
        summary.geo_type,
        summary.level.unwrap_or("no data"),
        metrics
    )
}
