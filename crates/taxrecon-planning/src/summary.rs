//! Prose summaries of an optimization report.
//!
//! Uses the same [`Summarizer`] seam as attribution narratives. The
//! numeric report is complete without it.

use serde::Serialize;
use taxrecon_attribution::{describe_balance, summarize_request, NarrativeRequest, Summarizer};
use taxrecon_core::{format_cents, FilingStatus};

use crate::strategy::OptimizationReport;

impl OptimizationReport {
    /// Builds the summarizer request: one line per recommendation, best first.
    pub fn narrative_request(&self, filing_status: FilingStatus) -> NarrativeRequest {
        let prior_label = describe_balance(self.current_type, self.current_balance);
        let current_label = format!(
            "up to {} in savings",
            format_cents(self.total_potential_savings)
        );
        let driver_lines: Vec<String> = self
            .recommendations
            .iter()
            .map(|r| {
                format!(
                    "{}: saves {} (costs {}/yr)",
                    r.strategy,
                    format_cents(r.tax_savings),
                    format_cents(r.annual_cost)
                )
            })
            .collect();

        let bullets = driver_lines
            .iter()
            .map(|line| format!("- {line}"))
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = format!(
            "A taxpayer's current situation:\n\
             - Filing status: {}\n\
             - Total tax: {}\n\
             - Balance: {prior_label}\n\n\
             Strategies identified:\n{bullets}\n\n\
             Write a 3-4 sentence personalized summary. Be encouraging and specific \
             about the top 2-3 actions and mention dollar amounts. Do not give legal \
             advice.",
            filing_status.label(),
            format_cents(self.current_tax),
        );

        NarrativeRequest {
            prior_label,
            current_label,
            total_change: self.total_potential_savings,
            driver_lines,
            prompt,
        }
    }
}

/// A report with its optional prose summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarizedReport {
    #[serde(flatten)]
    pub report: OptimizationReport,
    pub summary: Option<String>,
}

/// Attaches a summary to `report`.
///
/// A missing summarizer, an empty recommendation list or a summarizer
/// error all yield `summary: None`.
pub fn summarize_report(
    report: &OptimizationReport,
    filing_status: FilingStatus,
    summarizer: Option<&dyn Summarizer>,
) -> SummarizedReport {
    let summary = match summarizer {
        Some(summarizer) if !report.recommendations.is_empty() => {
            summarize_request(summarizer, &report.narrative_request(filing_status))
        }
        _ => None,
    };

    SummarizedReport {
        report: report.clone(),
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StrategyAnalyzer;
    use taxrecon_core::{Result, TaxProfile, TaxReconError};
    use taxrecon_test::profiles;

    fn report() -> OptimizationReport {
        StrategyAnalyzer::default().analyze(&profiles::single_w2(85_000.0, 14_000.0))
    }

    #[test]
    fn test_request_lists_recommendations() {
        let report = report();
        let request = report.narrative_request(FilingStatus::Single);

        assert_eq!(request.prior_label, "refund of $3,686.00");
        assert_eq!(request.driver_lines.len(), report.recommendations.len());
        assert_eq!(
            request.driver_lines[0],
            "Max Out 401(k): saves $4,972.50 (costs $23,500.00/yr)"
        );
        assert_eq!(request.total_change, report.total_potential_savings);
        assert!(request.prompt.contains("Filing status: Single"));
    }

    #[test]
    fn test_summary_attached() {
        let summarizer = |request: &NarrativeRequest| -> Result<String> {
            Ok(format!("{} ideas. ", request.driver_lines.len()))
        };
        let report = report();
        let summarized = summarize_report(&report, FilingStatus::Single, Some(&summarizer));
        assert_eq!(
            summarized.summary,
            Some(format!("{} ideas.", report.recommendations.len()))
        );

        let json = serde_json::to_value(&summarized).unwrap();
        assert!(json["recommendations"].is_array());
        assert!(json["summary"].is_string());
    }

    #[test]
    fn test_summary_degrades_to_none() {
        let failing =
            |_: &NarrativeRequest| -> Result<String> { Err(TaxReconError::Summary("down".into())) };
        let report = report();
        let summarized = summarize_report(&report, FilingStatus::Single, Some(&failing));
        assert_eq!(summarized.summary, None);
        assert_eq!(summarized.report, report);

        assert_eq!(summarize_report(&report, FilingStatus::Single, None).summary, None);

        let empty = StrategyAnalyzer::default().analyze(&TaxProfile::default());
        let never = |_: &NarrativeRequest| -> Result<String> { Ok("never".into()) };
        assert_eq!(summarize_report(&empty, FilingStatus::Single, Some(&never)).summary, None);
    }
}
