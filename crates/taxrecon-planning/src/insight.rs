//! Year-over-year insights.
//!
//! Rule-based observations comparing last year's return with this year's
//! profile. Each [`InsightRule`] looks at a handful of fields and either
//! fires or stays silent; when none fires the profile is reported stable.

use serde::{Deserialize, Serialize};
use taxrecon_core::{
    format_cents, format_dollars, ProfileField, ReconciliationOutcome, TaxProfile,
};
use taxrecon_engine::Reconciler;
use tracing::debug;

/// Share of the QBI deduction reported as its rough tax value.
pub const QBI_SAVINGS_RATE: f64 = 0.20;

/// Schedule 2 totals above this are called out.
pub const ADDITIONAL_TAXES_THRESHOLD: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Warning,
    Info,
    Action,
    Success,
}

/// One observation about the return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub text: String,
}

impl Insight {
    fn new(kind: InsightKind, title: &str, text: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            text: text.into(),
        }
    }
}

/// The year-over-year rules, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsightRule {
    /// SE tax last year, lower estimated payments this year.
    EstimatedPaymentGap,
    /// Last year's QBI deduction and its rough value.
    QbiBenefit,
    /// 1099 withholding that disappeared this year.
    WithholdingMix,
    /// A large Schedule 2 total last year.
    AdditionalTaxes,
}

impl InsightRule {
    pub const ALL: [InsightRule; 4] = [
        InsightRule::EstimatedPaymentGap,
        InsightRule::QbiBenefit,
        InsightRule::WithholdingMix,
        InsightRule::AdditionalTaxes,
    ];

    pub fn evaluate(&self, last_year: &TaxProfile, this_year: &TaxProfile) -> Option<Insight> {
        let last = |field: ProfileField| field.amount(last_year);
        let this = |field: ProfileField| field.amount(this_year);

        match self {
            InsightRule::EstimatedPaymentGap => {
                let dropped = this(ProfileField::EstimatedTaxPayments)
                    < last(ProfileField::EstimatedTaxPayments);
                (last(ProfileField::SelfEmploymentTax) > 0.0 && dropped).then(|| {
                    Insight::new(
                        InsightKind::Warning,
                        "Estimated Payment Gap",
                        "You paid SE tax last year, but your quarterly estimated payments have \
                         dropped. You might face an underpayment penalty.",
                    )
                })
            }
            InsightRule::QbiBenefit => {
                let qbi = last(ProfileField::QbiDeduction);
                (qbi > 0.0).then(|| {
                    Insight::new(
                        InsightKind::Info,
                        "QBI Benefit",
                        format!(
                            "Last year, your Qualified Business Income deduction saved you \
                             roughly {} in taxes. Keep your business structure the same to \
                             keep this.",
                            format_dollars(qbi * QBI_SAVINGS_RATE)
                        ),
                    )
                })
            }
            InsightRule::WithholdingMix => {
                let stopped = last(ProfileField::Withholding1099) > 0.0
                    && this(ProfileField::Withholding1099) == 0.0;
                stopped.then(|| {
                    Insight::new(
                        InsightKind::Action,
                        "1099 Withholding Check",
                        "You had tax withheld from 1099s last year. If your clients aren't \
                         withholding this year, you need to increase your quarterly payments.",
                    )
                })
            }
            InsightRule::AdditionalTaxes => {
                (last(ProfileField::Schedule2Total) > ADDITIONAL_TAXES_THRESHOLD).then(|| {
                    Insight::new(
                        InsightKind::Info,
                        "Additional Taxes",
                        "You have significant 'Additional Taxes' (Schedule 2). This often \
                         includes SE tax or Alternative Minimum Tax.",
                    )
                })
            }
        }
    }
}

/// Runs every [`InsightRule`], falling back to a single "Stable Profile".
///
/// # Examples
///
/// ```
/// use taxrecon_core::{FilingStatus, TaxProfile};
/// use taxrecon_planning::{insights, InsightKind};
///
/// let mut last_year = TaxProfile::new(FilingStatus::Single).with_wages(60_000.0);
/// last_year.qbi_deduction = Some(5_000.0);
/// let this_year = last_year.clone();
///
/// let found = insights(&last_year, &this_year);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].kind, InsightKind::Info);
/// assert!(found[0].text.contains("$1,000"));
/// ```
pub fn insights(last_year: &TaxProfile, this_year: &TaxProfile) -> Vec<Insight> {
    let mut found: Vec<Insight> = InsightRule::ALL
        .iter()
        .filter_map(|rule| rule.evaluate(last_year, this_year))
        .collect();

    if found.is_empty() {
        found.push(Insight::new(
            InsightKind::Success,
            "Stable Profile",
            "Your tax profile appears consistent with last year's simple return.",
        ));
    }
    found
}

/// This year's outcome together with its insights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearReview {
    pub calculation: ReconciliationOutcome,
    pub insights: Vec<Insight>,
}

/// Reconciles `this_year` and adds a shortfall warning when it owes.
pub fn review(
    reconciler: &Reconciler,
    last_year: &TaxProfile,
    this_year: &TaxProfile,
) -> YearReview {
    let calculation = reconciler.reconcile(this_year);
    let mut found = insights(last_year, this_year);

    if calculation.balance < 0.0 {
        found.push(Insight::new(
            InsightKind::Warning,
            "Payment Shortfall",
            format!(
                "Based on your changes, you may owe {}. Consider adjusting your withholding now.",
                format_cents(calculation.balance)
            ),
        ));
    }

    debug!(event = "insights", insights = found.len(), balance = calculation.balance);

    YearReview {
        calculation,
        insights: found,
    }
}
