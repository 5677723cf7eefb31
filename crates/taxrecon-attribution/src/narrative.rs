//! Narrative summaries of an attribution.
//!
//! The numeric decomposition is always complete on its own. A
//! [`Summarizer`] may turn the top drivers into prose; when none is
//! configured, or it fails, the summary is simply absent.

use serde::Serialize;
use taxrecon_core::{format_cents, BalanceType, ReconciliationOutcome, Result};
use tracing::{debug, warn};

use crate::driver::AttributionResult;

/// Default number of drivers handed to a summarizer.
pub const DEFAULT_TOP_DRIVERS: usize = 5;

/// Text collaborator producing a short summary.
pub trait Summarizer: Send + Sync {
    fn summarize(&self, request: &NarrativeRequest) -> Result<String>;
}

impl<F> Summarizer for F
where
    F: Fn(&NarrativeRequest) -> Result<String> + Send + Sync,
{
    fn summarize(&self, request: &NarrativeRequest) -> Result<String> {
        self(request)
    }
}

/// Everything a summarizer needs about one attribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeRequest {
    /// e.g. "refund of $3,986.00" or "owed $120.00".
    pub prior_label: String,
    pub current_label: String,
    pub total_change: f64,
    /// Explanations of the top drivers, largest first.
    pub driver_lines: Vec<String>,
    pub prompt: String,
}

impl NarrativeRequest {
    pub fn from_result(result: &AttributionResult, top_n: usize) -> Self {
        let prior_label = balance_label(&result.prior_outcome);
        let current_label = balance_label(&result.current_outcome);
        let driver_lines: Vec<String> = result
            .top(top_n)
            .iter()
            .map(|d| d.explanation.clone())
            .collect();

        let sign = if result.total_change < 0.0 { "-" } else { "+" };
        let bullets = driver_lines
            .iter()
            .map(|line| format!("- {line}"))
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = format!(
            "Explain why a taxpayer's outcome changed between two returns.\n\n\
             Before: {prior_label}\n\
             After: {current_label}\n\
             Net change: {sign}{}\n\n\
             Key drivers:\n{bullets}\n\n\
             Write a 3-4 sentence plain-English summary. Be specific about the \
             biggest factors and mention dollar amounts. Keep the tone neutral \
             and factual. Do not give legal or financial advice.",
            format_cents(result.total_change),
        );

        Self {
            prior_label,
            current_label,
            total_change: result.total_change,
            driver_lines,
            prompt,
        }
    }
}

fn balance_label(outcome: &ReconciliationOutcome) -> String {
    describe_balance(outcome.balance_type, outcome.balance)
}

/// "refund of $X" or "owed $X".
pub fn describe_balance(balance_type: BalanceType, balance: f64) -> String {
    match balance_type {
        BalanceType::Refund => format!("refund of {}", format_cents(balance)),
        BalanceType::Owe => format!("owed {}", format_cents(balance)),
    }
}

/// Runs `summarizer` on `request`, degrading any failure to `None`.
pub fn summarize_request(
    summarizer: &dyn Summarizer,
    request: &NarrativeRequest,
) -> Option<String> {
    match summarizer.summarize(request) {
        Ok(text) => {
            debug!(event = "narrative", lines = request.driver_lines.len());
            Some(text.trim().to_string())
        }
        Err(err) => {
            warn!(event = "narrative_failed", error = %err);
            None
        }
    }
}

/// An attribution with its optional prose summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarratedAttribution {
    #[serde(flatten)]
    pub result: AttributionResult,
    pub summary: Option<String>,
}

/// Attaches a summary from `summarizer` to `result`.
///
/// Never fails: a missing summarizer, an empty driver list or a
/// summarizer error all yield `summary: None`.
pub fn narrate(
    result: &AttributionResult,
    summarizer: Option<&dyn Summarizer>,
    top_n: usize,
) -> NarratedAttribution {
    let summary = match summarizer {
        Some(summarizer) if !result.drivers.is_empty() => {
            summarize_request(summarizer, &NarrativeRequest::from_result(result, top_n))
        }
        _ => None,
    };

    NarratedAttribution {
        result: result.clone(),
        summary,
    }
}
