//! View model and the pure render function
//!
//! `build_view` maps `(LifecycleState, GaugeState)` plus a little context
//! to a `ViewModel`. All business rules (thresholds, tones, open/closed
//! defaults) are applied here, so any renderer only has to lay out text.

use serde::Serialize;

use super::gauge::GaugeState;
use super::lifecycle::LifecycleState;
use super::risk_rules::{
    admin_emphasis, can_trade_status, has_owner_status, holder_bars, label_tone,
    owner_renounced_status, price_change_tone, proxy_status, reason_severity, tax_tone,
    trade_risk_emphasis, verified_badge, HolderBar, PanelEmphasis, PanelVariant,
    ReasonSeverity, StatusCell, Tone,
};
use crate::models::config::Chain;
use crate::models::types::{
    AdminInfo, AnalysisResult, HoldersInfo, LinksInfo, MarketInfo, ScoreLabel, TokenInfo,
    TradeRiskInfo,
};
use crate::utils::constants::{admin_flag_label, LOADING_MESSAGES, REASONS_PREVIEW_LIMIT};
use crate::utils::format::{
    format_age, format_change_pct, format_date_ms, format_holder_count, format_price,
    format_tax, format_usd, truncate_address,
};

pub const EMPTY_PROMPT: &str = "Enter a token contract address to check its rug pull risk";
pub const ERROR_TITLE: &str = "Analysis Failed";
pub const RETRY_LABEL: &str = "Try Again";

/// Renderer-independent toggles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Open every panel regardless of its default
    pub expand_all: bool,
    /// Show every reason instead of the first five
    pub show_all_reasons: bool,
}

/// Inputs besides the lifecycle and gauge states
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewContext {
    /// Chain of the last submitted request
    pub chain: Chain,
    /// Index into the loading message rotation
    pub loading_step: usize,
    /// Inline validation message under the input
    pub input_error: Option<&'static str>,
    pub options: ViewOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub input_error: Option<String>,
    pub body: ViewBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ViewBody {
    Empty { prompt: &'static str },
    Loading(LoadingView),
    Failed(ErrorView),
    Report(Box<ReportView>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadingView {
    pub message: &'static str,
    /// 0-based position in the rotation
    pub step: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorView {
    pub title: &'static str,
    pub message: String,
    pub retry_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub gauge: GaugeView,
    pub header: HeaderView,
    pub reasons: ReasonsView,
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeView {
    pub displayed: u8,
    pub target: u8,
    pub label: ScoreLabel,
    /// `HIGH RISK`
    pub badge: String,
    pub tone: Tone,
    /// Arc fill in [0, 1]
    pub fill: f64,
    pub animating: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkView {
    pub label: &'static str,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub name: String,
    pub symbol: String,
    pub verified: Option<StatusCell>,
    pub short_address: String,
    pub address: String,
    pub chain: &'static str,
    pub age: Option<String>,
    pub links: Vec<LinkView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasonItem {
    pub text: String,
    pub severity: ReasonSeverity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasonsView {
    pub visible: Vec<ReasonItem>,
    /// Reasons left out of `visible`
    pub hidden: usize,
}

impl ReasonsView {
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty() && self.hidden == 0
    }

    /// `Show 3 more`
    pub fn more_hint(&self) -> Option<String> {
        (self.hidden > 0).then(|| format!("Show {} more", self.hidden))
    }
}

/// Label/value line; `tone == None` is plain text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub label: String,
    pub value: String,
    pub tone: Option<Tone>,
    /// Trailing annotation, e.g. the signed 24h change after a price
    pub note: Option<StatusCell>,
}

impl Row {
    fn plain(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
            tone: None,
            note: None,
        }
    }

    fn status(label: &str, cell: StatusCell) -> Self {
        Self {
            label: label.to_string(),
            value: cell.text,
            tone: Some(cell.tone),
            note: None,
        }
    }

    fn toned(label: &str, value: String, tone: Tone) -> Self {
        Self {
            label: label.to_string(),
            value,
            tone: Some(tone),
            note: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertView {
    pub title: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PanelBody {
    /// Section data missing upstream
    Unavailable(&'static str),
    Content {
        alert: Option<AlertView>,
        bars: Vec<HolderBar>,
        rows: Vec<Row>,
        /// Caption above `chips`
        chips_title: Option<&'static str>,
        chips: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub title: &'static str,
    pub variant: PanelVariant,
    pub default_open: bool,
    /// Effective state after view options
    pub open: bool,
    pub body: PanelBody,
}

impl Panel {
    fn new(title: &'static str, emphasis: PanelEmphasis, body: PanelBody, opts: ViewOptions) -> Self {
        Self {
            title,
            variant: emphasis.variant,
            default_open: emphasis.default_open,
            open: emphasis.default_open || opts.expand_all,
            body,
        }
    }

    fn unavailable(title: &'static str, text: &'static str, opts: ViewOptions) -> Self {
        Self::new(title, PanelEmphasis::CALM, PanelBody::Unavailable(text), opts)
    }
}

// ============================================
// Render function
// ============================================

pub fn build_view(state: &LifecycleState, gauge: Option<&GaugeState>, ctx: &ViewContext) -> ViewModel {
    let body = match state {
        LifecycleState::Idle => ViewBody::Empty {
            prompt: EMPTY_PROMPT,
        },
        LifecycleState::Loading => ViewBody::Loading(loading_view(ctx.loading_step)),
        LifecycleState::Error(message) => ViewBody::Failed(ErrorView {
            title: ERROR_TITLE,
            message: message.clone(),
            retry_label: RETRY_LABEL,
        }),
        LifecycleState::Success(result) => ViewBody::Report(Box::new(report_view(result, gauge, ctx))),
    };

    ViewModel {
        input_error: ctx.input_error.map(String::from),
        body,
    }
}

pub fn loading_view(step: usize) -> LoadingView {
    let total = LOADING_MESSAGES.len();
    let step = step % total;
    LoadingView {
        message: LOADING_MESSAGES[step],
        step,
        total,
    }
}

fn report_view(result: &AnalysisResult, gauge: Option<&GaugeState>, ctx: &ViewContext) -> ReportView {
    let opts = ctx.options;
    ReportView {
        gauge: gauge_view(result, gauge),
        header: header_view(&result.token, &result.links, ctx.chain),
        reasons: reasons_view(&result.score.reasons, opts.show_all_reasons),
        panels: vec![
            liquidity_panel(result.market.as_ref(), opts),
            holders_panel(result.holders.as_ref(), opts),
            ownership_panel(&result.admin, opts),
            trade_risk_panel(result.trade_risk.as_ref(), opts),
        ],
    }
}

/// Gauge for the result. Without an animation the target is shown as-is;
/// an animation belonging to another score is ignored.
pub fn gauge_view(result: &AnalysisResult, gauge: Option<&GaugeState>) -> GaugeView {
    let target = result.score.risk_score.min(100);
    let (displayed, animating) = match gauge {
        Some(g) if g.target_score == target => (g.displayed_score, g.in_progress),
        _ => (target, false),
    };
    let label = result.score.label;

    GaugeView {
        displayed,
        target,
        label,
        badge: format!("{} RISK", label.as_str()),
        tone: label_tone(label),
        fill: f64::from(displayed) / 100.0,
        animating,
    }
}

pub fn header_view(token: &TokenInfo, links: &LinksInfo, chain: Chain) -> HeaderView {
    let mut link_views = Vec::new();
    if !links.explorer.is_empty() {
        link_views.push(LinkView {
            label: "Explorer",
            url: links.explorer.clone(),
        });
    }
    if !links.dexscreener.is_empty() {
        link_views.push(LinkView {
            label: "DexScreener",
            url: links.dexscreener.clone(),
        });
    }

    HeaderView {
        name: token.name.clone(),
        symbol: token.symbol.clone(),
        verified: verified_badge(token.verified),
        short_address: truncate_address(&token.address),
        address: token.address.clone(),
        chain: chain.name(),
        age: token.age_days.map(format_age),
        links: link_views,
    }
}

pub fn reasons_view(reasons: &[String], show_all: bool) -> ReasonsView {
    let limit = if show_all {
        reasons.len()
    } else {
        REASONS_PREVIEW_LIMIT.min(reasons.len())
    };
    ReasonsView {
        visible: reasons[..limit]
            .iter()
            .map(|r| ReasonItem {
                text: r.clone(),
                severity: reason_severity(r),
            })
            .collect(),
        hidden: reasons.len() - limit,
    }
}

pub fn liquidity_panel(market: Option<&MarketInfo>, opts: ViewOptions) -> Panel {
    const TITLE: &str = "Liquidity & Market";
    let Some(m) = market else {
        return Panel::unavailable(TITLE, "No DEX data found for this token.", opts);
    };

    let mut rows = vec![
        Row::plain("DEX", m.dex.clone()),
        Row::plain("Pair", format!("{} / {}", m.base_symbol, m.quote_symbol)),
        Row::plain("Liquidity", format_usd(m.liquidity_usd)),
        Row::plain("24h Volume", format_usd(m.volume_24h_usd)),
    ];

    if let Some(price) = m.price_usd.as_deref().filter(|p| !p.is_empty()) {
        let mut row = Row::plain("Price", format_price(price));
        row.note = m
            .price_change_24h_pct
            .zip(price_change_tone(m.price_change_24h_pct))
            .map(|(change, tone)| StatusCell {
                text: format_change_pct(change),
                tone,
            });
        rows.push(row);
    }
    if m.fdv.is_some() {
        rows.push(Row::plain("FDV", format_usd(m.fdv)));
    }
    if m.market_cap.is_some() {
        rows.push(Row::plain("Market Cap", format_usd(m.market_cap)));
    }
    if let Some(created) = m.pair_created_at.and_then(format_date_ms) {
        rows.push(Row::plain("Pair Created", created));
    }

    Panel::new(
        TITLE,
        PanelEmphasis::CALM,
        PanelBody::Content {
            alert: None,
            bars: vec![],
            rows,
            chips_title: None,
            chips: vec![],
        },
        opts,
    )
}

pub fn holders_panel(holders: Option<&HoldersInfo>, opts: ViewOptions) -> Panel {
    const TITLE: &str = "Holder Concentration";
    let Some(h) = holders else {
        return Panel::unavailable(TITLE, "Security data unavailable for holder analysis.", opts);
    };

    Panel::new(
        TITLE,
        PanelEmphasis::CALM,
        PanelBody::Content {
            alert: None,
            bars: holder_bars(h).to_vec(),
            rows: vec![Row::plain(
                "Total Holders",
                format_holder_count(h.holder_count.as_deref()),
            )],
            chips_title: None,
            chips: vec![],
        },
        opts,
    )
}

pub fn ownership_panel(admin: &AdminInfo, opts: ViewOptions) -> Panel {
    let mut rows = vec![
        Row::status("Has Owner", has_owner_status(admin.has_owner)),
        Row::status("Owner Renounced", owner_renounced_status(admin.owner_renounced)),
    ];
    if let Some(owner) = admin.owner_address.as_deref().filter(|a| !a.is_empty()) {
        rows.push(Row::toned("Owner Address", truncate_address(owner), Tone::Neutral));
    }
    rows.push(Row::status(
        "Proxy Contract",
        proxy_status(admin.upgradeable_proxy_suspected),
    ));

    let chips: Vec<String> = admin.flags.iter().map(|f| admin_flag_label(f)).collect();

    Panel::new(
        "Ownership & Admin",
        admin_emphasis(admin),
        PanelBody::Content {
            alert: None,
            bars: vec![],
            rows,
            chips_title: (!chips.is_empty()).then_some("Admin Flags"),
            chips,
        },
        opts,
    )
}

pub fn trade_risk_panel(trade: Option<&TradeRiskInfo>, opts: ViewOptions) -> Panel {
    const TITLE: &str = "Trade Risk";
    let Some(t) = trade else {
        return Panel::unavailable(TITLE, "Security data unavailable for trade risk analysis.", opts);
    };

    let alert = t.honeypot.then_some(AlertView {
        title: "Honeypot Detected",
        text: "You will likely be unable to sell this token after buying.",
    });

    let rows = vec![
        Row::status("Can Sell", can_trade_status(t.cannot_sell)),
        Row::status("Can Buy", can_trade_status(t.cannot_buy)),
        Row::toned("Buy Tax", format_tax(t.buy_tax_pct), tax_tone(t.buy_tax_pct)),
        Row::toned("Sell Tax", format_tax(t.sell_tax_pct), tax_tone(t.sell_tax_pct)),
    ];

    Panel::new(
        TITLE,
        trade_risk_emphasis(t),
        PanelBody::Content {
            alert,
            bars: vec![],
            rows,
            chips_title: None,
            chips: vec![],
        },
        opts,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::{ScoreInfo, ScoreLabel};
    use tokio::time::Instant;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            token: TokenInfo {
                address: "0x6982508145454Ce325dDbE47a25d4ec3d2311933".to_string(),
                name: "Pepe".to_string(),
                symbol: "PEPE".to_string(),
                decimals: 18,
                total_supply: Some("420690000000000".to_string()),
                age_days: Some(600),
                verified: Some(true),
            },
            market: Some(MarketInfo {
                dex: "uniswap".to_string(),
                pair_address: None,
                base_symbol: "PEPE".to_string(),
                quote_symbol: "WETH".to_string(),
                liquidity_usd: Some(25_400_000.0),
                volume_24h_usd: Some(812_000.0),
                price_usd: Some("0.00000812".to_string()),
                price_change_24h_pct: Some(-4.26),
                fdv: None,
                market_cap: Some(3_400_000_000.0),
                pair_created_at: None,
            }),
            holders: Some(HoldersInfo {
                top1_pct: Some(25.0),
                top5_pct: Some(40.0),
                top10_pct: None,
                holder_count: Some("254301".to_string()),
                data_source: "goplus".to_string(),
            }),
            admin: AdminInfo {
                has_owner: Some(false),
                owner_renounced: Some(true),
                owner_address: None,
                upgradeable_proxy_suspected: None,
                flags: vec!["slippage_modifiable".to_string()],
            },
            trade_risk: Some(TradeRiskInfo {
                honeypot: true,
                buy_tax_pct: Some(0.0),
                sell_tax_pct: Some(12.0),
                cannot_sell: false,
                cannot_buy: false,
                source: "goplus".to_string(),
            }),
            score: ScoreInfo {
                risk_score: 82,
                label: ScoreLabel::High,
                reasons: (1..=7).map(|i| format!("reason {}", i)).collect(),
            },
            links: LinksInfo {
                dexscreener: "https://dexscreener.com/ethereum/0x6982".to_string(),
                explorer: String::new(),
            },
        }
    }

    fn report(view: ViewModel) -> ReportView {
        match view.body {
            ViewBody::Report(r) => *r,
            other => panic!("expected report, got {:?}", other),
        }
    }

    #[test]
    fn test_idle_loading_error_views() {
        let ctx = ViewContext::default();
        assert!(matches!(
            build_view(&LifecycleState::Idle, None, &ctx).body,
            ViewBody::Empty { .. }
        ));

        let ctx = ViewContext {
            loading_step: 6,
            ..Default::default()
        };
        match build_view(&LifecycleState::Loading, None, &ctx).body {
            ViewBody::Loading(l) => {
                assert_eq!(l.step, 1);
                assert_eq!(l.message, "Querying contract verification...");
            }
            other => panic!("unexpected {:?}", other),
        }

        let state = LifecycleState::Error("rate limited".to_string());
        match build_view(&state, None, &ViewContext::default()).body {
            ViewBody::Failed(e) => {
                assert_eq!(e.message, "rate limited");
                assert_eq!(e.retry_label, "Try Again");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_input_error_does_not_replace_body() {
        let ctx = ViewContext {
            input_error: Some("Enter a token contract address"),
            ..Default::default()
        };
        let view = build_view(&LifecycleState::Idle, None, &ctx);
        assert_eq!(view.input_error.as_deref(), Some("Enter a token contract address"));
        assert!(matches!(view.body, ViewBody::Empty { .. }));
    }

    #[test]
    fn test_report_panels() {
        let state = LifecycleState::Success(Box::new(sample_result()));
        let r = report(build_view(&state, None, &ViewContext::default()));

        assert_eq!(r.panels.len(), 4);
        let titles: Vec<_> = r.panels.iter().map(|p| p.title).collect();
        assert_eq!(
            titles,
            ["Liquidity & Market", "Holder Concentration", "Ownership & Admin", "Trade Risk"]
        );

        // honeypot forces trade risk open + danger, others closed
        let trade = &r.panels[3];
        assert!(trade.open && trade.default_open);
        assert_eq!(trade.variant, PanelVariant::Danger);
        assert!(r.panels[..3].iter().all(|p| !p.open));
        assert_eq!(r.panels[2].variant, PanelVariant::Default);

        match &trade.body {
            PanelBody::Content { alert, rows, .. } => {
                assert!(alert.is_some());
                let sell_tax = rows.iter().find(|r| r.label == "Sell Tax").unwrap();
                assert_eq!(sell_tax.value, "12%");
                assert_eq!(sell_tax.tone, Some(Tone::Negative));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_expand_all_opens_every_panel() {
        let state = LifecycleState::Success(Box::new(sample_result()));
        let ctx = ViewContext {
            options: ViewOptions {
                expand_all: true,
                show_all_reasons: false,
            },
            ..Default::default()
        };
        let r = report(build_view(&state, None, &ctx));
        assert!(r.panels.iter().all(|p| p.open));
        assert!(!r.panels[0].default_open);
    }

    #[test]
    fn test_reasons_truncated() {
        let state = LifecycleState::Success(Box::new(sample_result()));
        let r = report(build_view(&state, None, &ViewContext::default()));
        assert_eq!(r.reasons.visible.len(), 5);
        assert_eq!(r.reasons.more_hint().as_deref(), Some("Show 2 more"));

        let all = reasons_view(&sample_result().score.reasons, true);
        assert_eq!(all.visible.len(), 7);
        assert!(all.more_hint().is_none());
        assert!(reasons_view(&[], false).is_empty());
    }

    #[test]
    fn test_market_rows() {
        let panel = liquidity_panel(sample_result().market.as_ref(), ViewOptions::default());
        let PanelBody::Content { rows, .. } = panel.body else {
            panic!("expected content");
        };
        let value = |label: &str| rows.iter().find(|r| r.label == label).map(|r| r.value.clone());
        assert_eq!(value("Liquidity").as_deref(), Some("$25.40M"));
        assert_eq!(value("24h Volume").as_deref(), Some("$812.0K"));
        assert_eq!(value("Pair").as_deref(), Some("PEPE / WETH"));
        assert_eq!(value("Market Cap").as_deref(), Some("$3400.00M"));
        assert!(value("FDV").is_none());

        let price = rows.iter().find(|r| r.label == "Price").unwrap();
        assert_eq!(price.value, "$8.12e-6");
        let note = price.note.as_ref().unwrap();
        assert_eq!(note.text, "-4.3%");
        assert_eq!(note.tone, Tone::Negative);
    }

    #[test]
    fn test_missing_sections_unavailable() {
        let opts = ViewOptions::default();
        assert!(matches!(liquidity_panel(None, opts).body, PanelBody::Unavailable(_)));
        assert!(matches!(holders_panel(None, opts).body, PanelBody::Unavailable(_)));
        assert!(matches!(trade_risk_panel(None, opts).body, PanelBody::Unavailable(_)));
        assert_eq!(trade_risk_panel(None, opts).variant, PanelVariant::Default);
    }

    #[test]
    fn test_ownership_chips_and_danger() {
        let admin = AdminInfo {
            flags: vec!["mint_function_detected".to_string(), "brand_new_flag".to_string()],
            owner_address: Some("0x1111111254EEB25477B68fb85Ed929f73A960582".to_string()),
            ..Default::default()
        };
        let panel = ownership_panel(&admin, ViewOptions::default());
        assert_eq!(panel.variant, PanelVariant::Danger);
        assert!(!panel.default_open);
        let PanelBody::Content { rows, chips, chips_title, .. } = panel.body else {
            panic!("expected content");
        };
        assert_eq!(chips, ["Mint Function", "brand new flag"]);
        assert_eq!(chips_title, Some("Admin Flags"));
        assert!(rows.iter().any(|r| r.value == "0x1111...0582"));
        assert_eq!(rows[0].value, "Unknown");
    }

    #[test]
    fn test_header() {
        let result = sample_result();
        let h = header_view(&result.token, &result.links, Chain::Base);
        assert_eq!(h.short_address, "0x6982...1933");
        assert_eq!(h.chain, "Base");
        assert_eq!(h.age.as_deref(), Some("1y 235d old"));
        assert_eq!(h.links.len(), 1);
        assert_eq!(h.links[0].label, "DexScreener");
        assert_eq!(h.verified.unwrap().text, "Verified");
    }

    #[test]
    fn test_gauge_view_follows_animation() {
        let result = sample_result();
        let mid = GaugeState {
            target_score: 82,
            displayed_score: 40,
            started_at: Instant::now(),
            in_progress: true,
        };
        let g = gauge_view(&result, Some(&mid));
        assert_eq!(g.displayed, 40);
        assert!(g.animating);
        assert_eq!(g.badge, "HIGH RISK");
        assert!((g.fill - 0.40).abs() < 1e-9);

        // no animation: target shown directly
        let g = gauge_view(&result, None);
        assert_eq!(g.displayed, 82);
        assert!(!g.animating);
    }
}
