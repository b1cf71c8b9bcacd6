use thiserror::Error;

/// Failure of a single job-growth fetch. Cloneable so it can live in the query cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{}", http_message(.status, .detail.as_deref()))]
    Http { status: u16, detail: Option<String> },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Invalid response from server: {0}")]
    Decode(String),
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn http_message(status: &u16, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("Error {status}: {detail}"),
        None => format!("Error {status}: request failed"),
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return Self::Decode(error.to_string());
        }
        if let Some(status) = error.status() {
            return Self::Http {
                status: status.as_u16(),
                detail: None,
            };
        }
        Self::Transport(error.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}
