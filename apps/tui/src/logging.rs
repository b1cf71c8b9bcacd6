use crate::error::ConfigError;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

/// Where log lines go. The interactive UI owns the terminal, so it never logs to stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Discard,
}

impl LogTarget {
    pub fn for_mode(headless: bool, log_file: Option<PathBuf>) -> Self {
        match (log_file, headless) {
            (Some(path), _) => Self::File(path),
            (None, true) => Self::Stderr,
            (None, false) => Self::Discard,
        }
    }
}

/// `--debug` wins over `RUST_LOG`, which wins over the `info` default.
pub fn filter_directive(debug: bool, rust_log: Option<&str>) -> String {
    if debug {
        return "debug".to_string();
    }
    rust_log
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .unwrap_or("info")
        .to_string()
}

pub fn init_logging(target: &LogTarget, debug: bool) -> Result<(), ConfigError> {
    let directive = filter_directive(debug, std::env::var("RUST_LOG").ok().as_deref());
    let filter = EnvFilter::try_new(&directive).map_err(|_| ConfigError::Invalid {
        name: "RUST_LOG",
        value: directive.clone(),
    })?;

    let (writer, ansi) = match target {
        LogTarget::Stderr => (BoxMakeWriter::new(std::io::stderr), true),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        LogTarget::Discard => (BoxMakeWriter::new(std::io::sink), false),
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .try_init()
        .map_err(|error| ConfigError::Logging(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_overrides_environment() {
        assert_eq!(filter_directive(true, Some("warn")), "debug");
        assert_eq!(filter_directive(false, Some("job_growth_tui=trace")), "job_growth_tui=trace");
        assert_eq!(filter_directive(false, Some("  ")), "info");
        assert_eq!(filter_directive(false, None), "info");
    }

    #[test]
    fn ui_mode_never_targets_stderr() {
        assert_eq!(LogTarget::for_mode(false, None), LogTarget::Discard);
        assert_eq!(LogTarget::for_mode(true, None), LogTarget::Stderr);
        assert_eq!(
            LogTarget::for_mode(false, Some(PathBuf::from("app.log"))),
            LogTarget::File(PathBuf::from("app.log"))
        );
    }
}
