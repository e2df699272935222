//! Constants Module - Single Source of Truth
//!
//! Thresholds, palette, admin-flag vocabulary and timings shared by the
//! derivation rules, the presenter and the renderer. No other module
//! hardcodes these values.

use std::collections::HashMap;

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "RugCheck";

/// User-Agent for HTTP requests
pub const USER_AGENT: &str = concat!("rugcheck/", env!("CARGO_PKG_VERSION"));

// ============================================
// SERVICE & TIMING
// ============================================

/// Analysis service used when `RUGCHECK_API_URL` is unset
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Default whole-request timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Gauge interpolation length (milliseconds)
pub const GAUGE_DURATION_MS: u64 = 1200;

/// One frame at ~60 fps (milliseconds)
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Loading message rotation period (milliseconds)
pub const LOADING_MESSAGE_INTERVAL_MS: u64 = 2000;

/// Rotating status lines shown while a request is in flight
pub const LOADING_MESSAGES: [&str; 5] = [
    "Fetching DEX data...",
    "Querying contract verification...",
    "Analyzing security signals...",
    "Scanning holder distribution...",
    "Computing risk score...",
];

// ============================================
// RISK THRESHOLDS
// ============================================

/// Top holder share above which the bar warns (%)
pub const TOP1_WARN_PCT: f64 = 20.0;
/// Top 5 holders share above which the bar warns (%)
pub const TOP5_WARN_PCT: f64 = 50.0;
/// Top 10 holders share above which the bar warns (%)
pub const TOP10_WARN_PCT: f64 = 70.0;
/// Non-warning bars above this share are painted medium (%)
pub const HOLDER_BAR_MEDIUM_PCT: f64 = 30.0;

/// Tax above this is high risk (%)
pub const TAX_HIGH_PCT: f64 = 10.0;
/// Tax above this is medium risk (%)
pub const TAX_MEDIUM_PCT: f64 = 5.0;

/// More admin flags than this marks the ownership panel as danger
pub const ADMIN_FLAG_DANGER_COUNT: usize = 3;

/// Any of these flags marks the ownership panel as danger
pub const CRITICAL_ADMIN_FLAGS: [&str; 3] = [
    "hidden_owner_detected",
    "self_destruct_function",
    "mint_function_detected",
];

/// Reasons shown before "Show N more"
pub const REASONS_PREVIEW_LIMIT: usize = 5;

/// Prices below this render in exponential notation (USD)
pub const PRICE_EXPONENTIAL_BELOW: f64 = 0.01;

/// Maximum fraction digits for regular prices
pub const PRICE_MAX_FRACTION_DIGITS: usize = 6;

// ============================================
// PALETTE
// ============================================

/// Low risk / positive
pub const COLOR_RISK_LOW: &str = "#22c55e";
/// Medium risk / caution
pub const COLOR_RISK_MEDIUM: &str = "#eab308";
/// High risk / negative
pub const COLOR_RISK_HIGH: &str = "#ef4444";
/// Accent (default bar fill)
pub const COLOR_ACCENT: &str = "#6366f1";
/// Secondary text
pub const COLOR_NEUTRAL: &str = "#8888a0";

// ============================================
// ADMIN FLAG VOCABULARY
// ============================================

lazy_static::lazy_static! {
    /// Short labels for known admin flag tags
    pub static ref ADMIN_FLAG_LABELS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("mint_function_detected", "Mint Function");
        m.insert("blacklist_function_detected", "Blacklist");
        m.insert("blacklist_terms_detected", "Blacklist (source)");
        m.insert("proxy_contract_detected", "Proxy/Upgradeable");
        m.insert("transfer_pausable", "Pausable");
        m.insert("slippage_modifiable", "Tax Modifiable");
        m.insert("personal_tax_modifiable", "Per-Addr Tax");
        m.insert("hidden_owner_detected", "Hidden Owner");
        m.insert("can_reclaim_ownership", "Reclaimable");
        m.insert("self_destruct_function", "Self-Destruct");
        m.insert("external_call_risk", "External Call");
        m.insert("trading_cooldown_enabled", "Trade Cooldown");
        m.insert("fee_modification_detected", "Fee Modify");
        m.insert("tax_modification_detected", "Tax Modify");
        m.insert("pause_function_detected", "Pause Function");
        m.insert("trading_toggle_detected", "Trade Toggle");
        m.insert("owner_restricted_functions", "Owner-Only Fns");
        m
    };
}

/// Label for an admin flag; unknown tags are humanized (`_` → space)
pub fn admin_flag_label(tag: &str) -> String {
    ADMIN_FLAG_LABELS
        .get(tag)
        .map(|l| l.to_string())
        .unwrap_or_else(|| tag.replace('_', " "))
}
