//! Risk Derivation Rules
//!
//! Turns raw per-category signals into color tones, warn flags and panel
//! emphasis. Every function here is pure and total; the score itself is
//! never recomputed, only presented.

use serde::Serialize;

use crate::models::types::{AdminInfo, HoldersInfo, ScoreLabel, TradeRiskInfo};
use crate::utils::constants::{
    ADMIN_FLAG_DANGER_COUNT, COLOR_ACCENT, COLOR_NEUTRAL, COLOR_RISK_HIGH, COLOR_RISK_LOW,
    COLOR_RISK_MEDIUM, CRITICAL_ADMIN_FLAGS, HOLDER_BAR_MEDIUM_PCT, TAX_HIGH_PCT, TAX_MEDIUM_PCT,
    TOP10_WARN_PCT, TOP1_WARN_PCT, TOP5_WARN_PCT,
};
use crate::utils::format::{format_pct, UNKNOWN};

/// Semantic color of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    /// Low risk / good outcome
    Positive,
    /// Medium risk
    Caution,
    /// High risk / bad outcome
    Negative,
    /// No judgement (unknown or unremarkable)
    Neutral,
    /// Default highlight
    Accent,
}

impl Tone {
    /// Palette entry for this tone
    pub fn hex(&self) -> &'static str {
        match self {
            Tone::Positive => COLOR_RISK_LOW,
            Tone::Caution => COLOR_RISK_MEDIUM,
            Tone::Negative => COLOR_RISK_HIGH,
            Tone::Neutral => COLOR_NEUTRAL,
            Tone::Accent => COLOR_ACCENT,
        }
    }
}

/// Border/emphasis style of a detail panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PanelVariant {
    Default,
    Danger,
}

/// How a panel first appears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelEmphasis {
    pub variant: PanelVariant,
    pub default_open: bool,
}

impl PanelEmphasis {
    pub const CALM: PanelEmphasis = PanelEmphasis {
        variant: PanelVariant::Default,
        default_open: false,
    };

    pub fn is_danger(&self) -> bool {
        self.variant == PanelVariant::Danger
    }
}

/// A label/value cell with its tone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCell {
    pub text: String,
    pub tone: Tone,
}

impl StatusCell {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    fn unknown() -> Self {
        Self::new(UNKNOWN, Tone::Neutral)
    }
}

// ============================================
// Holder concentration
// ============================================

/// One concentration bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HolderBar {
    pub label: &'static str,
    /// `25.0%` or `N/A`
    pub text: String,
    /// Fill width in [0, 100]
    pub fill_pct: f64,
    pub warn: bool,
    pub tone: Tone,
}

/// `pct` strictly above the threshold; missing never warns
pub fn holder_warn(pct: Option<f64>, warn_above: f64) -> bool {
    matches!(pct, Some(p) if p > warn_above)
}

/// Bar fill tone: warn → high, above 30% → medium, else accent
pub fn holder_bar_tone(pct: Option<f64>, warn: bool) -> Tone {
    if warn {
        Tone::Negative
    } else if matches!(pct, Some(p) if p > HOLDER_BAR_MEDIUM_PCT) {
        Tone::Caution
    } else {
        Tone::Accent
    }
}

pub fn holder_bar(label: &'static str, pct: Option<f64>, warn_above: f64) -> HolderBar {
    let warn = holder_warn(pct, warn_above);
    HolderBar {
        label,
        text: format_pct(pct),
        fill_pct: pct.filter(|p| p.is_finite()).map_or(0.0, |p| p.clamp(0.0, 100.0)),
        warn,
        tone: holder_bar_tone(pct, warn),
    }
}

/// Top 1 / Top 5 / Top 10 bars
pub fn holder_bars(holders: &HoldersInfo) -> [HolderBar; 3] {
    [
        holder_bar("Top 1 Holder", holders.top1_pct, TOP1_WARN_PCT),
        holder_bar("Top 5 Holders", holders.top5_pct, TOP5_WARN_PCT),
        holder_bar("Top 10 Holders", holders.top10_pct, TOP10_WARN_PCT),
    ]
}

// ============================================
// Ownership & admin
// ============================================

/// More than 3 flags, or any critical flag
pub fn admin_is_danger(flags: &[String]) -> bool {
    flags.len() > ADMIN_FLAG_DANGER_COUNT
        || flags
            .iter()
            .any(|f| CRITICAL_ADMIN_FLAGS.contains(&f.as_str()))
}

pub fn admin_emphasis(admin: &AdminInfo) -> PanelEmphasis {
    if admin_is_danger(&admin.flags) {
        PanelEmphasis {
            variant: PanelVariant::Danger,
            default_open: false,
        }
    } else {
        PanelEmphasis::CALM
    }
}

/// Having an owner is the bad outcome
pub fn has_owner_status(has_owner: Option<bool>) -> StatusCell {
    match has_owner {
        None => StatusCell::unknown(),
        Some(true) => StatusCell::new("Yes", Tone::Negative),
        Some(false) => StatusCell::new("No", Tone::Positive),
    }
}

/// A renounced owner is the good outcome
pub fn owner_renounced_status(renounced: Option<bool>) -> StatusCell {
    match renounced {
        None => StatusCell::unknown(),
        Some(true) => StatusCell::new("Yes", Tone::Positive),
        Some(false) => StatusCell::new("No", Tone::Negative),
    }
}

pub fn proxy_status(suspected: Option<bool>) -> StatusCell {
    match suspected {
        None => StatusCell::unknown(),
        Some(true) => StatusCell::new("Detected", Tone::Negative),
        Some(false) => StatusCell::new("No", Tone::Positive),
    }
}

// ============================================
// Trade risk
// ============================================

/// Honeypot or sell restriction forces the panel open as danger
pub fn trade_risk_emphasis(trade: &TradeRiskInfo) -> PanelEmphasis {
    if trade.honeypot || trade.cannot_sell {
        PanelEmphasis {
            variant: PanelVariant::Danger,
            default_open: true,
        }
    } else {
        PanelEmphasis::CALM
    }
}

/// `cannot == true` → "No" (bad), else "Yes" (good)
pub fn can_trade_status(cannot: bool) -> StatusCell {
    if cannot {
        StatusCell::new("No", Tone::Negative)
    } else {
        StatusCell::new("Yes", Tone::Positive)
    }
}

pub fn tax_tone(tax_pct: Option<f64>) -> Tone {
    match tax_pct {
        Some(t) if t > TAX_HIGH_PCT => Tone::Negative,
        Some(t) if t > TAX_MEDIUM_PCT => Tone::Caution,
        _ => Tone::Neutral,
    }
}

// ============================================
// Market, token & score
// ============================================

/// Non-negative change is good, negative is bad, absent is uncolored
pub fn price_change_tone(change_pct: Option<f64>) -> Option<Tone> {
    change_pct.map(|c| if c >= 0.0 { Tone::Positive } else { Tone::Negative })
}

/// Verification badge; no badge when unknown
pub fn verified_badge(verified: Option<bool>) -> Option<StatusCell> {
    verified.map(|v| {
        if v {
            StatusCell::new("Verified", Tone::Positive)
        } else {
            StatusCell::new("Unverified", Tone::Negative)
        }
    })
}

pub fn label_tone(label: ScoreLabel) -> Tone {
    match label {
        ScoreLabel::Low => Tone::Positive,
        ScoreLabel::Medium => Tone::Caution,
        ScoreLabel::High => Tone::Negative,
    }
}

/// Icon weight of a scoring reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReasonSeverity {
    High,
    Medium,
    Info,
}

impl ReasonSeverity {
    pub fn tone(&self) -> Tone {
        match self {
            ReasonSeverity::High => Tone::Negative,
            ReasonSeverity::Medium => Tone::Caution,
            ReasonSeverity::Info => Tone::Neutral,
        }
    }
}

/// Keyword match on the reason text, first match wins
pub fn reason_severity(reason: &str) -> ReasonSeverity {
    if reason.contains("HONEYPOT") || reason.contains("cannot") {
        ReasonSeverity::High
    } else if ["tax", "Tax", "mint", "Mint"]
        .iter()
        .any(|k| reason.contains(k))
    {
        ReasonSeverity::Medium
    } else {
        ReasonSeverity::Info
    }
}
