//! Child tax credit.

use taxrecon_core::{round_cents, ChildCreditRules};

/// Inputs the credit depends on, all already cent-rounded upstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildCreditInput {
    pub dependents: u32,
    pub agi: f64,
    pub earned_income: f64,
    /// Tax liability before credits.
    pub liability: f64,
    /// Phase-out threshold for the filing status.
    pub phaseout_threshold: f64,
    /// Directly supplied credit amount; positive values bypass computation.
    pub override_amount: f64,
}

/// Nonrefundable and refundable (additional child tax credit) portions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChildTaxCredit {
    pub nonrefundable: f64,
    pub refundable: f64,
}

impl ChildTaxCredit {
    pub fn total(&self) -> f64 {
        round_cents(self.nonrefundable + self.refundable)
    }
}

/// Computes the child tax credit.
///
/// The phase-out counts every started step of excess AGI: one dollar over
/// the threshold costs a full step.
///
/// # Examples
///
/// ```
/// use taxrecon_core::RuleTable;
/// use taxrecon_engine::{child_tax_credit, ChildCreditInput};
///
/// let rules = RuleTable::tax_year_2025().child_credit;
/// let credit = child_tax_credit(
///     &ChildCreditInput {
///         dependents: 1,
///         agi: 200_001.0,
///         earned_income: 200_001.0,
///         liability: 40_000.0,
///         phaseout_threshold: 200_000.0,
///         override_amount: 0.0,
///     },
///     &rules,
/// );
/// assert_eq!(credit.nonrefundable, 2_150.0);
/// ```
pub fn child_tax_credit(input: &ChildCreditInput, rules: &ChildCreditRules) -> ChildTaxCredit {
    let liability = input.liability.max(0.0);

    if input.override_amount > 0.0 {
        return ChildTaxCredit {
            nonrefundable: round_cents(input.override_amount.min(liability)),
            refundable: 0.0,
        };
    }

    let children = f64::from(input.dependents);
    let base = rules.per_child * children;
    let excess = input.agi - input.phaseout_threshold;
    let reduction = if excess > 0.0 {
        (excess / rules.phaseout_step).ceil() * rules.phaseout_per_step
    } else {
        0.0
    };
    let credit = (base - reduction).max(0.0);

    let nonrefundable = round_cents(credit.min(liability));
    let remaining = credit - nonrefundable;

    let refundable = if remaining <= 0.0 || input.earned_income <= rules.earned_income_floor {
        0.0
    } else {
        let earned_portion = (input.earned_income - rules.earned_income_floor) * rules.refundable_rate;
        let cap = rules.refundable_cap_per_child * children;
        round_cents(remaining.min(earned_portion).min(cap))
    };

    ChildTaxCredit {
        nonrefundable,
        refundable,
    }
}
