//! Colorful console output for reconciliation events.
//!
//! Provides a custom `tracing` layer that formats taxrecon events with
//! colors on stderr, leaving stdout free for results.

use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes console output at `info`.
///
/// Safe to call multiple times - only the first call has effect.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initializes console output for taxrecon targets at `level`.
///
/// `RUST_LOG`, when set, takes precedence.
pub fn init_with_level(level: Level) {
    INIT.get_or_init(|| {
        let directive = format!("taxrecon={}", level.as_str().to_ascii_lowercase());
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

        // Another subscriber may already be installed by the host program.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ReconConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats taxrecon events with colors.
pub struct ReconConsoleLayer;

impl<S: Subscriber> Layer<S> for ReconConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("taxrecon") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(*metadata.level(), &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    text: Vec<(&'static str, String)>,
    amounts: Vec<(&'static str, f64)>,
    counts: Vec<(&'static str, u64)>,
}

impl EventVisitor {
    fn text(&self, name: &str) -> &str {
        self.text
            .iter()
            .find(|(n, _)| *n == name)
            .map_or("?", |(_, v)| v.as_str())
    }

    fn amount(&self, name: &str) -> f64 {
        self.amounts
            .iter()
            .find(|(n, _)| *n == name)
            .map_or(0.0, |(_, v)| *v)
    }

    fn count(&self, name: &str) -> u64 {
        self.counts
            .iter()
            .find(|(n, _)| *n == name)
            .map_or(0, |(_, v)| *v)
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            name => self.text.push((name, value.to_string())),
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.amounts.push((field.name(), value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.counts.push((field.name(), value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }
}

fn format_event(level: Level, v: &EventVisitor) -> String {
    let body = match v.event.as_deref().unwrap_or("") {
        "reconcile" => format!(
            "{} {}: AGI ({}), taxable ({}), total tax ({}), {}",
            "[Reconcile]".bright_cyan(),
            v.text("filing_status").white().bold(),
            money(v.amount("agi")).yellow(),
            money(v.amount("taxable_income")).yellow(),
            money(v.amount("total_tax")).yellow(),
            format_balance(v.amount("balance")),
        ),
        "waterfall_step" => format!(
            "    {} {:<24} {}",
            "->".bright_blue(),
            v.text("field").white(),
            format_impact(v.amount("impact")),
        ),
        "waterfall_residual" => format!(
            "    {} {:<24} {}",
            "->".bright_blue(),
            "interaction".white(),
            format_impact(v.amount("residual")),
        ),
        "explain_end" => format!(
            "{} Attribution ended: total change ({}), drivers ({}), residual ({})",
            "[Explain]".bright_cyan(),
            format_impact(v.amount("total_change")),
            v.count("drivers").to_formatted_string(&Locale::en).white(),
            money(v.amount("residual")).white(),
        ),
        "strategy" => format!(
            "    {} {:<32} saves {}",
            "->".bright_blue(),
            v.text("strategy").white(),
            money(v.amount("tax_savings")).bright_green(),
        ),
        "analyze_end" => format!(
            "{} Analysis ended: recommendations ({}), potential savings ({})",
            "[Optimize]".bright_cyan(),
            v.count("recommendations").to_formatted_string(&Locale::en).white(),
            money(v.amount("total_potential_savings")).bright_green().bold(),
        ),
        "life_event" => format!(
            "{} {}: balance change ({})",
            "[LifeEvent]".bright_cyan(),
            v.text("key").white().bold(),
            format_impact(v.amount("balance_change")),
        ),
        "insights" => format!(
            "{} {} insights, {}",
            "[Insights]".bright_cyan(),
            v.count("insights").to_formatted_string(&Locale::en).white(),
            format_balance(v.amount("balance")),
        ),
        "narrative_failed" => format!(
            "{} summary unavailable: {}",
            "[Narrative]".bright_cyan(),
            v.text("error"),
        ),
        _ => return String::new(),
    };

    format!("{} {}", format_level(level), body)
}

fn format_level(level: Level) -> String {
    match level {
        Level::ERROR => "ERROR".bright_red().to_string(),
        Level::WARN => " WARN".yellow().to_string(),
        Level::INFO => " INFO".bright_green().to_string(),
        Level::DEBUG => "DEBUG".bright_blue().to_string(),
        Level::TRACE => "TRACE".bright_black().to_string(),
    }
}

fn money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}${}.{:02}",
        sign,
        (cents / 100).to_formatted_string(&Locale::en),
        cents % 100
    )
}

fn format_balance(balance: f64) -> String {
    if balance >= 0.0 {
        format!("refund {}", money(balance)).bright_green().to_string()
    } else {
        format!("owe {}", money(-balance)).bright_red().to_string()
    }
}

fn format_impact(impact: f64) -> String {
    if impact > 0.0 {
        format!("+{}", money(impact)).bright_green().to_string()
    } else if impact < 0.0 {
        money(impact).bright_red().to_string()
    } else {
        money(impact).white().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money() {
        assert_eq!(money(3_986.0), "$3,986.00");
        assert_eq!(money(-300.5), "-$300.50");
        assert_eq!(money(-0.001), "$0.00");
    }

    #[test]
    fn test_unknown_event_is_silent() {
        let visitor = EventVisitor {
            event: Some("something_else".into()),
            ..EventVisitor::default()
        };
        assert!(format_event(Level::INFO, &visitor).is_empty());
    }

    #[test]
    fn test_explain_end_mentions_driver_count() {
        let visitor = EventVisitor {
            event: Some("explain_end".into()),
            amounts: vec![("total_change", -300.0), ("residual", 0.0)],
            counts: vec![("drivers", 2)],
            ..EventVisitor::default()
        };
        let line = format_event(Level::INFO, &visitor);
        assert!(line.contains("Attribution ended"));
        assert!(line.contains("$300.00"));
    }

    #[test]
    fn test_insights_event_shows_balance() {
        let visitor = EventVisitor {
            event: Some("insights".into()),
            amounts: vec![("balance", -7_014.0)],
            counts: vec![("insights", 2)],
            ..EventVisitor::default()
        };
        let line = format_event(Level::DEBUG, &visitor);
        assert!(line.contains("[Insights]"));
        assert!(line.contains("owe $7,014.00"));
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init_with_level(Level::DEBUG);
    }
}
