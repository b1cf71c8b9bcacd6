use crate::config::AppConfig;
use crate::domain::AddressQuery;
use crate::error::ApiError;
use crate::models::JobGrowthResult;
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use tracing::{debug, warn};

/// Anything that can answer a job-growth query.
pub trait JobGrowthSource: Send + Sync + 'static {
    fn fetch(
        &self,
        query: &AddressQuery,
    ) -> impl Future<Output = Result<JobGrowthResult, ApiError>> + Send;
}

/// HTTP client for `GET /job-growth`.
#[derive(Debug, Clone)]
pub struct JobGrowthClient {
    http: Client,
    endpoint: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl JobGrowthClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|error| ApiError::Transport(error.to_string()))?;

        Ok(Self::with_client(http, config.api.endpoint()))
    }

    pub fn with_client(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Query parameters; `flush_cache` is only sent when set.
    pub fn query_params(query: &AddressQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("address", query.address.clone()),
            ("geo_type", query.geo_type.as_str().to_string()),
        ];
        if query.flush_cache {
            params.push(("flush_cache", "true".to_string()));
        }
        params
    }
}

impl JobGrowthSource for JobGrowthClient {
    async fn fetch(&self, query: &AddressQuery) -> Result<JobGrowthResult, ApiError> {
        debug!(address = %query.address, geo_type = %query.geo_type, flush = query.flush_cache, "requesting job growth");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&Self::query_params(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = error_detail(&body);
            warn!(status = status.as_u16(), detail = ?detail, address = %query.address, "job growth request failed");
            return Err(ApiError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        response.json::<JobGrowthResult>().await.map_err(Into::into)
    }
}

/// Extracts the `detail` field from an error body. Non-string details are rendered as JSON.
fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(text) if !text.trim().is_empty() => Some(text),
        serde_json::Value::String(_) | serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}
