//! Configuration module for the rugcheck client
//!
//! Chain catalogue and client settings. Settings are read from the
//! environment with local defaults, the CLI may override them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

use super::errors::AppError;
use crate::utils::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_FRAME_INTERVAL_MS, DEFAULT_REQUEST_TIMEOUT_SECS,
    GAUGE_DURATION_MS, LOADING_MESSAGE_INTERVAL_MS,
};

/// Supported blockchain networks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    #[default]
    Ethereum,
    Base,
    Arbitrum,
    Polygon,
    Bsc,
}

impl Chain {
    /// All chains in selector order
    pub const ALL: [Chain; 5] = [
        Chain::Ethereum,
        Chain::Base,
        Chain::Arbitrum,
        Chain::Polygon,
        Chain::Bsc,
    ];

    /// Wire identifier
    pub fn id(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ethereum",
            Chain::Base => "base",
            Chain::Arbitrum => "arbitrum",
            Chain::Polygon => "polygon",
            Chain::Bsc => "bsc",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Chain::Ethereum => "Ethereum",
            Chain::Base => "Base",
            Chain::Arbitrum => "Arbitrum",
            Chain::Polygon => "Polygon",
            Chain::Bsc => "BSC",
        }
    }

    /// Native asset ticker
    pub fn short(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ETH",
            Chain::Base => "BASE",
            Chain::Arbitrum => "ARB",
            Chain::Polygon => "MATIC",
            Chain::Bsc => "BNB",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Chain {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Chain::ALL
            .into_iter()
            .find(|c| c.id() == wanted)
            .ok_or_else(|| AppError::unsupported_chain(s))
    }
}

/// Client settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the analysis service (no trailing slash)
    pub api_base_url: String,
    /// Whole-request timeout
    pub request_timeout: Duration,
    /// Gauge interpolation length
    pub gauge_duration: Duration,
    /// Delay between gauge frames
    pub frame_interval: Duration,
    /// Delay between loading messages
    pub loading_message_interval: Duration,
}

impl ClientConfig {
    /// Replace the service base URL
    pub fn with_api_base_url(mut self, url: impl AsRef<str>) -> Self {
        self.api_base_url = normalize_base_url(url.as_ref());
        self
    }

    /// Full URL of the analyze endpoint
    pub fn analyze_url(&self) -> String {
        format!("{}/api/analyze", self.api_base_url)
    }

    fn timeout_from_env() -> Duration {
        let secs = match std::env::var("RUGCHECK_TIMEOUT_SECS") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    warn!(
                        "⚠️ RUGCHECK_TIMEOUT_SECS={:?} is not a positive integer, using {}s",
                        raw, DEFAULT_REQUEST_TIMEOUT_SECS
                    );
                    DEFAULT_REQUEST_TIMEOUT_SECS
                }
            },
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        Duration::from_secs(secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        let base = std::env::var("RUGCHECK_API_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Self {
            api_base_url: normalize_base_url(&base),
            request_timeout: Self::timeout_from_env(),
            gauge_duration: Duration::from_millis(GAUGE_DURATION_MS),
            frame_interval: Duration::from_millis(DEFAULT_FRAME_INTERVAL_MS),
            loading_message_interval: Duration::from_millis(LOADING_MESSAGE_INTERVAL_MS),
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
