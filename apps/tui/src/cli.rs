use clap::{CommandFactory, Parser};
use job_growth_tui::GeoType;

#[derive(Debug, Parser)]
#[command(name = "job-growth", version, about = "Job growth explorer and comparison TUI")]
pub struct CliArgs {
    /// Address to look up; repeat to compare several
    #[arg(long = "address", short = 'a', value_name = "ADDRESS")]
    pub addresses: Vec<String>,

    /// Granularity: tract, zip or county
    #[arg(long, value_name = "GEO", default_value = "tract", value_parser = parse_geo)]
    pub geo: GeoType,

    /// Ask the backend to bypass its cache
    #[arg(long)]
    pub flush: bool,

    /// Fetch, print the comparison and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Backend base URL (direct access, skips the proxy path)
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Persist search history to this SQLite file
    #[arg(long = "history-db", value_name = "PATH")]
    pub history_db: Option<String>,

    /// Write logs to this file
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

fn parse_geo(value: &str) -> Result<GeoType, String> {
    GeoType::parse(value).ok_or_else(|| format!("unknown granularity '{value}' (tract, zip, county)"))
}

impl CliArgs {
    /// Flags win over `.env` and the process environment.
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("JOB_GROWTH_API_URL", url);
        }
        if let Some(path) = &self.history_db {
            std::env::set_var("HISTORY_DB", path);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_address_flags_keep_order() -> Result<(), clap::Error> {
        let args = CliArgs::try_parse_from([
            "job-growth",
            "--address",
            "1 Market St",
            "-a",
            "2 Main St",
            "--geo",
            "County",
            "--headless",
        ])?;
        assert_eq!(args.addresses, vec!["1 Market St", "2 Main St"]);
        assert_eq!(args.geo, GeoType::County);
        assert!(args.headless && !args.flush);
        Ok(())
    }

    #[test]
    fn unknown_granularity_is_rejected() {
        assert!(CliArgs::try_parse_from(["job-growth", "--geo", "block"]).is_err());
    }

    #[test]
    fn help_mentions_headless() {
        assert!(CliArgs::help_text().contains("--headless"));
    }
}
