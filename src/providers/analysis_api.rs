//! Analysis Service Client
//!
//! The scoring backend is opaque: we POST `{chain, token_address}` and get
//! back a complete analysis document.
//!
//! API: POST {RUGCHECK_API_URL}/api/analyze
//! - 200: `AnalysisResult` JSON
//! - non-2xx: `{"detail": "<message>"}` (detail optional)
//!
//! No retries here. A failed request is retried by the user.

use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::models::config::ClientConfig;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{AnalysisRequest, AnalysisResult};
use crate::utils::constants::USER_AGENT;

/// Analysis service client
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    client: reqwest::Client,
    endpoint: String,
}

impl AnalysisClient {
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::invalid_config(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.analyze_url(),
        })
    }

    /// Full URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issue exactly one analysis call
    pub async fn analyze(&self, request: &AnalysisRequest) -> AppResult<AnalysisResult> {
        let started = Instant::now();
        info!("📡 POST {} ({} on {})", self.endpoint, request.address, request.chain);

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!("⚠️ analysis request failed: {}", e);
                AppError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.bytes().await {
                Ok(body) => failure_message(status.as_u16(), &body),
                Err(e) => {
                    debug!("error body unreadable: {}", e);
                    UNREADABLE_ERROR_MESSAGE.to_string()
                }
            };
            warn!("⚠️ analysis service returned {}: {}", status, message);
            return Err(AppError::request_rejected(status.as_u16(), message));
        }

        let body = response.bytes().await?;
        let result: AnalysisResult = serde_json::from_slice(&body).map_err(|e| {
            warn!("⚠️ failed to parse analysis response: {}", e);
            AppError::from(e)
        })?;

        debug!(
            "analysis response for {} in {}ms",
            result.token.symbol,
            started.elapsed().as_millis()
        );
        Ok(result)
    }
}

/// Message for a non-2xx response whose body is not JSON
pub const UNREADABLE_ERROR_MESSAGE: &str = "Unknown error";

/// User-facing message for a non-2xx response.
///
/// Prefers a string `detail`, then the joined `msg` fields of a list-style
/// `detail`. A JSON body without a usable `detail` gives `HTTP <status>`;
/// a body that is not JSON at all gives `Unknown error`.
pub fn failure_message(status: u16, body: &[u8]) -> String {
    let Ok(parsed) = serde_json::from_slice::<Value>(body) else {
        return UNREADABLE_ERROR_MESSAGE.to_string();
    };
    let detail = parsed.get("detail").cloned();

    let message = match detail {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Array(items)) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Object(obj) => obj.get("msg").and_then(Value::as_str).map(String::from),
                    _ => None,
                })
                .filter(|s| !s.trim().is_empty())
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    };

    message.unwrap_or_else(|| format!("HTTP {}", status))
}
