//! The reconciliation pipeline.

use std::sync::{Arc, OnceLock};

use taxrecon_config::ReconConfig;
use taxrecon_core::{
    round_cents, BalanceType, DeductionKind, NormalizedProfile, ReconciliationOutcome, RuleTable,
    TaxProfile,
};
use tracing::debug;

use crate::child_credit::{child_tax_credit, ChildCreditInput};
use crate::income_tax::progressive_tax;
use crate::medicare::additional_medicare_tax;
use crate::self_employment::self_employment_tax;

static DEFAULT_RULES: OnceLock<Arc<RuleTable>> = OnceLock::new();

/// Reconciles profiles against one injected rule table.
///
/// Cheap to clone and safe to share across threads; the table is
/// immutable behind an `Arc`.
///
/// # Examples
///
/// ```
/// use taxrecon_core::{FilingStatus, RuleTable, TaxProfile};
/// use taxrecon_engine::Reconciler;
///
/// let mut rules = RuleTable::tax_year_2025();
/// rules.standard_deduction.single = 20_000.0;
/// let reconciler = Reconciler::with_rules(rules);
///
/// let outcome = reconciler.reconcile(&TaxProfile::new(FilingStatus::Single).with_wages(30_000.0));
/// assert_eq!(outcome.taxable_income, 10_000.0);
/// ```
#[derive(Debug, Clone)]
pub struct Reconciler {
    rules: Arc<RuleTable>,
}

impl Reconciler {
    pub fn new(rules: Arc<RuleTable>) -> Self {
        Self { rules }
    }

    pub fn with_rules(rules: RuleTable) -> Self {
        Self::new(Arc::new(rules))
    }

    /// Builds a reconciler from the configured (or built-in) rule table.
    pub fn from_config(config: &ReconConfig) -> Self {
        match &config.rules {
            Some(rules) => Self::with_rules(rules.clone()),
            None => Self::default(),
        }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Computes the full outcome for a profile.
    pub fn reconcile(&self, profile: &TaxProfile) -> ReconciliationOutcome {
        self.reconcile_normalized(&profile.normalize())
    }

    /// Computes the full outcome for an already normalized profile.
    pub fn reconcile_normalized(&self, p: &NormalizedProfile) -> ReconciliationOutcome {
        let rules = &*self.rules;
        let status = p.filing_status;

        let se = self_employment_tax(p.schedule_1_income, &rules.self_employment);

        let agi = round_cents(p.wages + p.schedule_1_income - se.deductible_half);

        // The greater of the supplied and the standard deduction always
        // wins; a declared itemization below the standard is overridden.
        let standard = rules.standard_deduction(status);
        let itemized = p.itemized_deductions.unwrap_or(0.0);
        let (deduction_used, deduction_kind) = if itemized > standard {
            (round_cents(itemized), DeductionKind::Itemized)
        } else {
            (standard, DeductionKind::Standard)
        };
        let taxable_income = round_cents((agi - deduction_used).max(0.0));

        let income_tax = progressive_tax(taxable_income, rules.brackets(status));
        let additional_medicare_tax =
            additional_medicare_tax(p.wages, p.schedule_1_income, status, rules);
        let tax_before_credits = round_cents(income_tax + se.tax + additional_medicare_tax);

        let credit = child_tax_credit(
            &ChildCreditInput {
                dependents: p.dependents_count,
                agi,
                earned_income: p.earned_income(),
                liability: tax_before_credits,
                phaseout_threshold: *rules.child_credit.phaseout_thresholds.get(status),
                override_amount: p.child_tax_credit_override,
            },
            &rules.child_credit,
        );

        let total_tax = round_cents((tax_before_credits - credit.nonrefundable).max(0.0));
        let total_payments = round_cents(p.payments() + credit.refundable);
        let balance = round_cents(total_payments - total_tax);

        debug!(
            event = "reconcile",
            filing_status = %status,
            agi,
            taxable_income,
            total_tax,
            balance,
        );

        ReconciliationOutcome {
            filing_status: status,
            agi,
            deduction_used,
            deduction_kind,
            taxable_income,
            income_tax,
            self_employment_tax: se.tax,
            self_employment_deduction: se.deductible_half,
            additional_medicare_tax,
            tax_before_credits,
            nonrefundable_child_credit: credit.nonrefundable,
            additional_child_credit: credit.refundable,
            child_tax_credit_total: credit.total(),
            total_tax,
            total_payments,
            balance,
            balance_type: BalanceType::of(balance),
        }
    }
}

impl Default for Reconciler {
    /// Shares one process-wide copy of the built-in 2025 table.
    fn default() -> Self {
        let rules = DEFAULT_RULES.get_or_init(|| Arc::new(RuleTable::tax_year_2025()));
        Self::new(Arc::clone(rules))
    }
}
