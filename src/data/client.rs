//! Bookstore backend integration for dashboard statistics.

use reqwest::blocking::Client;
use serde_json::Value;

use crate::error::{AppError, EXIT_CONFIG, EXIT_FETCH};

pub const ENV_API_URL: &str = "BOOKSTORE_API_URL";
pub const ENV_API_TOKEN: &str = "BOOKSTORE_API_TOKEN";

const STATISTICS_PATH: &str = "/api/admin/statistics";

/// Where raw statistics payloads come from.
///
/// The pipeline receives a source instead of reaching for a global client, so
/// tests can hand it a canned payload.
pub trait StatisticsSource {
    /// Fetch the raw payload once. Implementations do not retry.
    fn fetch_statistics(&self) -> Result<Value, AppError>;
}

impl<S: StatisticsSource + ?Sized> StatisticsSource for &S {
    fn fetch_statistics(&self) -> Result<Value, AppError> {
        (**self).fetch_statistics()
    }
}

/// A payload already in memory (e.g. loaded from a file).
#[derive(Debug, Clone)]
pub struct StaticSource {
    payload: Value,
}

impl StaticSource {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }
}

impl StatisticsSource for StaticSource {
    fn fetch_statistics(&self) -> Result<Value, AppError> {
        Ok(self.payload.clone())
    }
}

/// Fetches statistics from the bookstore admin API over HTTP.
pub struct HttpStatisticsSource {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpStatisticsSource {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var(ENV_API_URL)
            .map_err(|_| AppError::new(EXIT_CONFIG, format!("Missing {ENV_API_URL} in environment (.env).")))?;
        let token = std::env::var(ENV_API_TOKEN).ok().filter(|t| !t.trim().is_empty());
        Ok(Self::new(base_url, token))
    }

    pub fn endpoint(&self) -> String {
        format!("{}{STATISTICS_PATH}", self.base_url.trim_end_matches('/'))
    }
}

impl StatisticsSource for HttpStatisticsSource {
    fn fetch_statistics(&self) -> Result<Value, AppError> {
        let url = self.endpoint();
        tracing::info!(%url, "fetching dashboard statistics");

        let mut req = self.client.get(&url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .map_err(|e| AppError::new(EXIT_FETCH, format!("Statistics request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                EXIT_FETCH,
                format!("Statistics request failed with status {}.", resp.status()),
            ));
        }

        resp.json()
            .map_err(|e| AppError::new(EXIT_FETCH, format!("Failed to parse statistics response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let source = HttpStatisticsSource::new("http://localhost:8080/", None);
        assert_eq!(source.endpoint(), "http://localhost:8080/api/admin/statistics");

        let source = HttpStatisticsSource::new("https://shop.example", Some("t".to_string()));
        assert_eq!(source.endpoint(), "https://shop.example/api/admin/statistics");
    }

    #[test]
    fn static_source_returns_its_payload() {
        let payload = json!({ "orderTrend": [] });
        let source = StaticSource::new(payload.clone());
        assert_eq!(source.fetch_statistics().unwrap(), payload);
        assert_eq!((&source).fetch_statistics().unwrap(), payload);
    }
}
