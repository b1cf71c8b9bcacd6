use crate::error::ConfigError;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PROXY_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// How the backend is reached: directly, or through the frontend's reverse proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiTarget {
    Direct(String),
    Proxy(String),
}

impl ApiTarget {
    /// Full URL of the job-growth endpoint.
    pub fn endpoint(&self) -> String {
        match self {
            Self::Direct(base) => format!("{}/job-growth", base.trim_end_matches('/')),
            Self::Proxy(origin) => format!("{}/api/job-growth", origin.trim_end_matches('/')),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiTarget,
    pub request_timeout: Duration,
    pub history_db: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub debug: bool,
}

impl AppConfig {
    /// Loads `.env` and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        // No base URL means the same-origin proxy path is used.
        let api = non_empty("JOB_GROWTH_API_URL").map_or_else(
            || {
                ApiTarget::Proxy(
                    non_empty("JOB_GROWTH_PROXY_ORIGIN")
                        .unwrap_or_else(|| DEFAULT_PROXY_ORIGIN.to_string()),
                )
            },
            ApiTarget::Direct,
        );

        let request_timeout = match non_empty("REQUEST_TIMEOUT_SECS") {
            Some(value) => {
                let secs = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::Invalid {
                        name: "REQUEST_TIMEOUT_SECS",
                        value: value.clone(),
                    })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api,
            request_timeout,
            history_db: non_empty("HISTORY_DB").map(PathBuf::from),
            log_file: non_empty("LOG_FILE").map(PathBuf::from),
            debug: non_empty("DEBUG").is_some_and(|value| value != "0"),
        })
    }

    /// SQLite URL for the history database, when persistence is enabled.
    pub fn history_db_url(&self) -> Option<String> {
        self.history_db
            .as_ref()
            .map(|path| format!("sqlite://{}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn missing_base_url_uses_proxy_path() -> Result<(), ConfigError> {
        let config = AppConfig::from_lookup(lookup(&[]))?;
        assert_eq!(config.api.endpoint(), "http://localhost:3000/api/job-growth");
        assert!(config.history_db.is_none());
        assert!(!config.debug);
        Ok(())
    }

    #[test]
    fn base_url_selects_direct_endpoint() -> Result<(), ConfigError> {
        let config =
            AppConfig::from_lookup(lookup(&[("JOB_GROWTH_API_URL", "http://api.local:8000/")]))?;
        assert_eq!(
            config.api,
            ApiTarget::Direct("http://api.local:8000/".to_string())
        );
        assert_eq!(config.api.endpoint(), "http://api.local:8000/job-growth");
        Ok(())
    }

    #[test]
    fn blank_base_url_counts_as_absent() -> Result<(), ConfigError> {
        let config = AppConfig::from_lookup(lookup(&[
            ("JOB_GROWTH_API_URL", "  "),
            ("JOB_GROWTH_PROXY_ORIGIN", "http://web:3000"),
        ]))?;
        assert_eq!(config.api.endpoint(), "http://web:3000/api/job-growth");
        Ok(())
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let result = AppConfig::from_lookup(lookup(&[("REQUEST_TIMEOUT_SECS", "soon")]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                name: "REQUEST_TIMEOUT_SECS",
                ..
            })
        ));
    }

    #[test]
    fn history_db_url_uses_sqlite_scheme() -> Result<(), ConfigError> {
        let config = AppConfig::from_lookup(lookup(&[("HISTORY_DB", "history.db"), ("DEBUG", "1")]))?;
        assert_eq!(config.history_db_url().as_deref(), Some("sqlite://history.db"));
        assert!(config.debug);
        Ok(())
    }
}
