//! Human-readable output.

use owo_colors::OwoColorize;
use taxrecon::{
    format_cents, AttributionResult, BalanceType, InsightKind, LifeEventOutcome, LifeEventPreset,
    OptimizationReport, Priority, ReconciliationOutcome, ScenarioComparison, YearReview,
};

fn money(amount: f64) -> String {
    let magnitude = format_cents(amount);
    if amount <= -0.005 {
        format!("-{magnitude}")
    } else {
        magnitude
    }
}

fn signed(amount: f64) -> String {
    if amount > 0.0 {
        format!("+{}", money(amount)).bright_green().to_string()
    } else if amount < 0.0 {
        money(amount).bright_red().to_string()
    } else {
        money(amount).white().to_string()
    }
}

fn balance(outcome: &ReconciliationOutcome) -> String {
    match outcome.balance_type {
        BalanceType::Refund => format!("Refund {}", money(outcome.balance))
            .bright_green()
            .bold()
            .to_string(),
        BalanceType::Owe => format!("Owe {}", money(-outcome.balance))
            .bright_red()
            .bold()
            .to_string(),
    }
}

fn row(label: &str, value: String) -> String {
    format!("  {:<30}{:>16}", label, value)
}

fn delta_row(name: &str, delta: f64) -> String {
    if name == "effective_rate" {
        row(name, format!("{delta:+.2} pts"))
    } else {
        row(name, signed(delta))
    }
}

pub fn outcome(outcome: &ReconciliationOutcome) -> String {
    let mut lines = vec![format!(
        "{} {}",
        "Filing status:".bright_cyan(),
        outcome.filing_status.white().bold()
    )];
    lines.push(row("Adjusted gross income", money(outcome.agi)));
    lines.push(row(
        &format!("Deduction ({:?})", outcome.deduction_kind).to_lowercase(),
        money(outcome.deduction_used),
    ));
    lines.push(row("Taxable income", money(outcome.taxable_income)));
    lines.push(row("Income tax", money(outcome.income_tax)));
    if outcome.self_employment_tax > 0.0 {
        lines.push(row("Self-employment tax", money(outcome.self_employment_tax)));
    }
    if outcome.additional_medicare_tax > 0.0 {
        lines.push(row(
            "Additional Medicare tax",
            money(outcome.additional_medicare_tax),
        ));
    }
    if outcome.child_tax_credit_total > 0.0 {
        lines.push(row(
            "Child tax credit",
            money(outcome.child_tax_credit_total),
        ));
    }
    lines.push(row("Total tax", money(outcome.total_tax)));
    lines.push(row("Total payments", money(outcome.total_payments)));
    lines.push(row(
        "Effective rate",
        format!("{:.2}%", outcome.effective_rate()),
    ));
    lines.push(format!("  {}", balance(outcome)));
    lines.join("\n")
}

pub fn attribution(result: &AttributionResult, top: usize) -> String {
    let mut lines = vec![format!(
        "{} {} -> {} ({})",
        "Balance:".bright_cyan(),
        balance(&result.prior_outcome),
        balance(&result.current_outcome),
        signed(result.total_change)
    )];
    if result.drivers.is_empty() {
        lines.push("  No material changes.".to_string());
    }
    for driver in result.top(top) {
        lines.push(format!(
            "  {:>14}  {}",
            signed(driver.impact_on_balance),
            driver.explanation
        ));
    }
    let hidden = result.drivers.len().saturating_sub(top);
    if hidden > 0 {
        lines.push(format!("  ... {} smaller drivers", hidden).bright_black().to_string());
    }
    lines.join("\n")
}

pub fn report(report: &OptimizationReport) -> String {
    let current = match report.current_type {
        BalanceType::Refund => format!("refund {}", money(report.current_balance)),
        BalanceType::Owe => format!("owe {}", money(-report.current_balance)),
    };
    let mut lines = vec![format!(
        "{} total tax {}, {}",
        "Current:".bright_cyan(),
        money(report.current_tax),
        current
    )];
    if report.recommendations.is_empty() {
        lines.push("  No recommendations.".to_string());
    }
    for rec in &report.recommendations {
        let priority = match rec.priority {
            Priority::High => "high".bright_red().to_string(),
            Priority::Medium => "medium".yellow().to_string(),
            Priority::Low => "low".white().to_string(),
        };
        lines.push(format!(
            "  {} [{}] saves {}",
            rec.strategy.white().bold(),
            priority,
            money(rec.tax_savings).bright_green()
        ));
        lines.push(format!("      {}", rec.description));
    }
    lines.push(format!(
        "{} {}",
        "Potential savings:".bright_cyan(),
        money(report.total_potential_savings).bright_green().bold()
    ));
    lines.join("\n")
}

pub fn presets(presets: &[LifeEventPreset]) -> String {
    presets
        .iter()
        .map(|p| format!("{}\t{}\t{}", p.key, p.name, p.description))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn life_event(outcome: &LifeEventOutcome) -> String {
    let mut lines = vec![format!(
        "{} {}",
        "Life event:".bright_cyan(),
        outcome.name.white().bold()
    )];
    lines.push(format!(
        "  {} -> {}",
        balance(&outcome.before),
        balance(&outcome.after)
    ));
    for (name, delta) in outcome.diff.changed() {
        lines.push(delta_row(name, delta));
    }
    lines.join("\n")
}

pub fn comparison(comparison: &ScenarioComparison) -> String {
    let mut lines = vec![format!(
        "{} {} vs {}",
        "Compare:".bright_cyan(),
        balance(&comparison.a),
        balance(&comparison.b)
    )];
    let mut changed = comparison.diff.changed().peekable();
    if changed.peek().is_none() {
        lines.push("  Identical outcomes.".to_string());
    }
    for (name, delta) in changed {
        lines.push(delta_row(name, delta));
    }
    lines.join("\n")
}

pub fn review(review: &YearReview) -> String {
    let mut lines = vec![format!(
        "{} {}",
        "This year:".bright_cyan(),
        balance(&review.calculation)
    )];
    for insight in &review.insights {
        let title = match insight.kind {
            InsightKind::Warning => insight.title.bright_red().bold().to_string(),
            InsightKind::Action => insight.title.yellow().bold().to_string(),
            InsightKind::Info => insight.title.bright_blue().bold().to_string(),
            InsightKind::Success => insight.title.bright_green().bold().to_string(),
        };
        lines.push(format!("  {title}"));
        lines.push(format!("      {}", insight.text));
    }
    lines.join("\n")
}
