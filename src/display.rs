//! Terminal rendering of the view model
//!
//! Everything returns `String`s so the output can be tested with colors
//! turned off (`colored::control::set_override(false)`).

use colored::*;

use crate::core::risk_rules::{HolderBar, PanelVariant, Tone};
use crate::core::view::{
    ErrorView, GaugeView, HeaderView, LoadingView, Panel, PanelBody, ReasonsView, ReportView,
    Row, ViewBody, ViewModel,
};
use crate::utils::constants::APP_NAME;

const RULE_WIDTH: usize = 60;
const GAUGE_WIDTH: usize = 30;
const BAR_WIDTH: usize = 20;

/// `#22c55e` → (34, 197, 94); unparsable entries fall back to white
pub fn tone_rgb(tone: Tone) -> (u8, u8, u8) {
    match hex::decode(tone.hex().trim_start_matches('#')).as_deref() {
        Ok([r, g, b]) => (*r, *g, *b),
        _ => (255, 255, 255),
    }
}

pub fn paint(text: &str, tone: Tone) -> ColoredString {
    let (r, g, b) = tone_rgb(tone);
    text.truecolor(r, g, b)
}

fn meter(fill: f64, width: usize) -> (String, String) {
    let filled = ((fill.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    ("█".repeat(filled), "░".repeat(width - filled))
}

fn rule() -> String {
    "━".repeat(RULE_WIDTH).bright_black().to_string()
}

// ============================================
// Top level
// ============================================

pub fn render_view(view: &ViewModel) -> String {
    let mut lines = Vec::new();
    if let Some(err) = &view.input_error {
        lines.push(render_input_error(err));
    }
    lines.push(match &view.body {
        ViewBody::Empty { prompt } => format!("  {}", prompt.bright_black()),
        ViewBody::Loading(loading) => render_loading(loading),
        ViewBody::Failed(err) => render_error(err),
        ViewBody::Report(report) => render_report(report),
    });
    lines.join("\n")
}

/// Inline validation message under the input
pub fn render_input_error(message: &str) -> String {
    format!("  {} {}", "✗".bright_red(), message.bright_red())
}

pub fn render_loading(loading: &LoadingView) -> String {
    let dots: String = (0..loading.total)
        .map(|i| if i <= loading.step { "●" } else { "○" })
        .collect();
    format!(
        "  {} {}  {}",
        "⠿".bright_blue(),
        loading.message,
        dots.bright_black()
    )
}

pub fn render_error(err: &ErrorView) -> String {
    [
        format!("  {} {}", "✗".bright_red(), err.title.bright_red().bold()),
        format!("    {}", err.message),
        format!("    {}", format!("[{}]", err.retry_label).bright_blue()),
    ]
    .join("\n")
}

// ============================================
// Report
// ============================================

pub fn render_report(report: &ReportView) -> String {
    let mut lines = vec![
        rule(),
        format!(" {}", APP_NAME.bright_white().bold()),
        rule(),
        render_header(&report.header),
        String::new(),
        render_gauge(&report.gauge),
    ];

    if !report.reasons.is_empty() {
        lines.push(String::new());
        lines.push(render_reasons(&report.reasons));
    }

    for panel in &report.panels {
        lines.push(String::new());
        lines.push(render_panel(panel));
    }
    lines.join("\n")
}

pub fn render_header(header: &HeaderView) -> String {
    let mut title = format!(
        "  {} {}",
        header.name.bright_white().bold(),
        format!("({})", header.symbol).bright_black()
    );
    if let Some(badge) = &header.verified {
        title.push_str(&format!("  {}", paint(&badge.text, badge.tone)));
    }

    let mut meta = vec![header.short_address.clone(), header.chain.to_string()];
    if let Some(age) = &header.age {
        meta.push(age.clone());
    }

    let mut lines = vec![
        title,
        format!("  {}", meta.join(" · ").bright_black()),
    ];
    for link in &header.links {
        lines.push(format!("  {} {}: {}", "→".bright_blue(), link.label, link.url.bright_cyan()));
    }
    lines.join("\n")
}

/// Single gauge line; redrawn in place while the animation runs
pub fn render_gauge(gauge: &GaugeView) -> String {
    let (filled, empty) = meter(gauge.fill, GAUGE_WIDTH);
    format!(
        "  {}{}  {} / 100  {}",
        paint(&filled, gauge.tone),
        empty.bright_black(),
        paint(&format!("{:>3}", gauge.displayed), gauge.tone).bold(),
        paint(&gauge.badge, gauge.tone).bold()
    )
}

pub fn render_reasons(reasons: &ReasonsView) -> String {
    let mut lines = vec![format!("  {}", "Risk Factors".bright_white().bold())];
    for item in &reasons.visible {
        lines.push(format!("    {} {}", paint("•", item.severity.tone()), item.text));
    }
    if let Some(hint) = reasons.more_hint() {
        lines.push(format!(
            "    {}",
            format!("{} (--all-reasons)", hint).bright_black()
        ));
    }
    lines.join("\n")
}

pub fn render_panel(panel: &Panel) -> String {
    let marker = if panel.open { "▾" } else { "▸" };
    let title = match panel.variant {
        PanelVariant::Danger => format!("{} {}", marker, panel.title).bright_red().bold(),
        PanelVariant::Default => format!("{} {}", marker, panel.title).bright_white().bold(),
    };

    if !panel.open {
        return format!("  {} {}", title, "(--expand)".bright_black());
    }

    let mut lines = vec![format!("  {}", title)];
    match &panel.body {
        PanelBody::Unavailable(text) => lines.push(format!("    {}", text.bright_black())),
        PanelBody::Content {
            alert,
            bars,
            rows,
            chips_title,
            chips,
        } => {
            if let Some(alert) = alert {
                lines.push(format!("    {} {}", "⚠".bright_red(), alert.title.bright_red().bold()));
                lines.push(format!("      {}", alert.text.red()));
            }
            lines.extend(bars.iter().map(render_bar));
            lines.extend(rows.iter().map(render_row));
            if let Some(caption) = chips_title {
                lines.push(format!("    {}", caption.bright_black()));
                let joined = chips
                    .iter()
                    .map(|c| format!("[{}]", c))
                    .collect::<Vec<_>>()
                    .join(" ");
                lines.push(format!("      {}", joined.yellow()));
            }
        }
    }
    lines.join("\n")
}

pub fn render_bar(bar: &HolderBar) -> String {
    let (filled, empty) = meter(bar.fill_pct / 100.0, BAR_WIDTH);
    let text = if bar.warn {
        paint(&bar.text, Tone::Negative).bold()
    } else {
        bar.text.normal()
    };
    format!(
        "    {:<16}{}{} {}",
        bar.label,
        paint(&filled, bar.tone),
        empty.bright_black(),
        text
    )
}

pub fn render_row(row: &Row) -> String {
    let value = match row.tone {
        Some(tone) => paint(&row.value, tone),
        None => row.value.bright_cyan(),
    };
    let mut line = format!("    {:<16}{}", format!("{}:", row.label), value);
    if let Some(note) = &row.note {
        line.push_str(&format!(" {}", paint(&note.text, note.tone)));
    }
    line
}
