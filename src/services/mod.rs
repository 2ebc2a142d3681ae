// src/services/mod.rs

pub mod activity;
pub mod exam;

pub use activity::{ActivityService, HttpActivityService};
pub use exam::{ExamService, HttpExamService};

use crate::config::Config;
use crate::error::ClientError;

/// Builds the shared HTTP client the concrete services run on.
pub(crate) fn build_client(config: &Config) -> Result<reqwest::Client, ClientError> {
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()?;
    Ok(client)
}

/// Normalized base URL with no trailing slash, ready for route formatting.
pub(crate) fn base_url(config: &Config) -> String {
    config.api_base_url.as_str().trim_end_matches('/').to_string()
}

/// Turns a non-success response into a `ClientError::Api`, preferring the
/// backend's own `{"error": "..."}` message when one is parseable.
pub(crate) async fn api_error(resp: reqwest::Response) -> ClientError {
    let status = resp.status();
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    };
    let message = match resp.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("error")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(fallback),
        Err(_) => fallback(),
    };
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}
