//! Reconciliation outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::profile::FilingStatus;

/// Whether the balance is a refund or an amount owed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceType {
    Refund,
    Owe,
}

impl BalanceType {
    /// `Refund` iff the balance is non-negative.
    pub fn of(balance: f64) -> Self {
        if balance >= 0.0 {
            BalanceType::Refund
        } else {
            BalanceType::Owe
        }
    }
}

impl fmt::Display for BalanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceType::Refund => f.write_str("refund"),
            BalanceType::Owe => f.write_str("owe"),
        }
    }
}

/// Which side of the greater-deduction comparison was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    Standard,
    Itemized,
}

/// Fully derived result of reconciling one profile.
///
/// Every dollar field is rounded to the cent. Outcomes are never mutated;
/// a changed profile is reconciled again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationOutcome {
    pub filing_status: FilingStatus,
    pub agi: f64,
    pub deduction_used: f64,
    pub deduction_kind: DeductionKind,
    /// Never negative.
    pub taxable_income: f64,
    pub income_tax: f64,
    pub self_employment_tax: f64,
    /// Deductible half of the self-employment tax.
    pub self_employment_deduction: f64,
    pub additional_medicare_tax: f64,
    pub tax_before_credits: f64,
    pub nonrefundable_child_credit: f64,
    pub additional_child_credit: f64,
    pub child_tax_credit_total: f64,
    /// Tax after nonrefundable credits.
    pub total_tax: f64,
    pub total_payments: f64,
    /// Payments minus tax after credits; positive is a refund.
    pub balance: f64,
    #[serde(rename = "type")]
    pub balance_type: BalanceType,
}

impl ReconciliationOutcome {
    /// Returns true when the balance is a refund.
    pub fn is_refund(&self) -> bool {
        self.balance_type == BalanceType::Refund
    }

    /// Named scalar dollar fields, in a stable order, for diffs.
    pub fn scalar_fields(&self) -> [(&'static str, f64); 15] {
        [
            ("agi", self.agi),
            ("deduction_used", self.deduction_used),
            ("taxable_income", self.taxable_income),
            ("income_tax", self.income_tax),
            ("self_employment_tax", self.self_employment_tax),
            ("self_employment_deduction", self.self_employment_deduction),
            ("additional_medicare_tax", self.additional_medicare_tax),
            ("tax_before_credits", self.tax_before_credits),
            ("nonrefundable_child_credit", self.nonrefundable_child_credit),
            ("additional_child_credit", self.additional_child_credit),
            ("child_tax_credit_total", self.child_tax_credit_total),
            ("total_tax", self.total_tax),
            ("total_payments", self.total_payments),
            ("balance", self.balance),
            ("effective_rate", self.effective_rate()),
        ]
    }

    /// Total tax as a share of AGI, in percent (two decimals).
    pub fn effective_rate(&self) -> f64 {
        if self.agi <= 0.0 {
            0.0
        } else {
            crate::money::round_cents(self.total_tax / self.agi * 100.0)
        }
    }
}
