//! Type definitions for the analysis service wire contract
//!
//! `AnalysisResult` mirrors the JSON document returned by
//! `POST /api/analyze`. Percentages are floats in [0, 100] when present,
//! `score.risk_score` is an integer in [0, 100].

use serde::{Deserialize, Deserializer, Serialize};

use super::config::Chain;

/// Body of `POST /api/analyze`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub chain: Chain,
    /// Validated contract address (0x + 40 hex)
    #[serde(rename = "token_address")]
    pub address: String,
}

/// Risk label supplied by the scoring service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScoreLabel {
    Low,
    Medium,
    High,
}

impl ScoreLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreLabel::Low => "LOW",
            ScoreLabel::Medium => "MEDIUM",
            ScoreLabel::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub address: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub decimals: u32,
    #[serde(default)]
    pub total_supply: Option<String>,
    #[serde(default)]
    pub age_days: Option<i64>,
    #[serde(default)]
    pub verified: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketInfo {
    pub dex: String,
    #[serde(default)]
    pub pair_address: Option<String>,
    pub base_symbol: String,
    pub quote_symbol: String,
    #[serde(default)]
    pub liquidity_usd: Option<f64>,
    #[serde(default)]
    pub volume_24h_usd: Option<f64>,
    /// Decimal string, kept as sent to avoid precision loss
    #[serde(default)]
    pub price_usd: Option<String>,
    #[serde(default)]
    pub price_change_24h_pct: Option<f64>,
    #[serde(default)]
    pub fdv: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    /// Epoch milliseconds
    #[serde(default)]
    pub pair_created_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldersInfo {
    #[serde(default)]
    pub top1_pct: Option<f64>,
    #[serde(default)]
    pub top5_pct: Option<f64>,
    #[serde(default)]
    pub top10_pct: Option<f64>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub holder_count: Option<String>,
    #[serde(default)]
    pub data_source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminInfo {
    #[serde(default)]
    pub has_owner: Option<bool>,
    #[serde(default)]
    pub owner_renounced: Option<bool>,
    #[serde(default)]
    pub owner_address: Option<String>,
    #[serde(default)]
    pub upgradeable_proxy_suspected: Option<bool>,
    #[serde(default)]
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRiskInfo {
    #[serde(default)]
    pub honeypot: bool,
    #[serde(default)]
    pub buy_tax_pct: Option<f64>,
    #[serde(default)]
    pub sell_tax_pct: Option<f64>,
    #[serde(default)]
    pub cannot_sell: bool,
    #[serde(default)]
    pub cannot_buy: bool,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreInfo {
    pub risk_score: u8,
    pub label: ScoreLabel,
    #[serde(default)]
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinksInfo {
    #[serde(default)]
    pub dexscreener: String,
    #[serde(default)]
    pub explorer: String,
}

/// Full analysis document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub token: TokenInfo,
    #[serde(default)]
    pub market: Option<MarketInfo>,
    #[serde(default)]
    pub holders: Option<HoldersInfo>,
    #[serde(default)]
    pub admin: AdminInfo,
    #[serde(default)]
    pub trade_risk: Option<TradeRiskInfo>,
    pub score: ScoreInfo,
    #[serde(default)]
    pub links: LinksInfo,
}

/// Some upstream sources send the holder count as a JSON number.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
