//! Named taxpayer profiles.

use taxrecon_core::{DeductionType, FilingStatus, TaxProfile};

/// Single W-2 earner with no other items.
pub fn single_w2(wages: f64, withholding: f64) -> TaxProfile {
    TaxProfile::new(FilingStatus::Single)
        .with_wages(wages)
        .with_w2_withholding(withholding)
}

/// A fully populated prior-year record: Single, $70,000 wages, $11,000
/// withheld, every other field explicitly zero.
pub fn prior_year() -> TaxProfile {
    TaxProfile {
        filing_status: Some(FilingStatus::Single),
        dependents_count: Some(0),
        wages: Some(70_000.0),
        schedule_1_income: Some(0.0),
        other_income: Some(0.0),
        taxable_interest: Some(0.0),
        ordinary_dividends: Some(0.0),
        capital_gain_or_loss: Some(0.0),
        total_deductions: None,
        deduction_type: Some(DeductionType::Standard),
        qbi_deduction: Some(0.0),
        self_employment_tax: Some(0.0),
        schedule_2_total: Some(0.0),
        child_tax_credit: Some(0.0),
        schedule_3_total: Some(0.0),
        w2_withholding: Some(11_000.0),
        withholding_1099: Some(0.0),
        estimated_tax_payments: Some(0.0),
    }
}

/// The prior year after a raise: $85,000 wages, $14,000 withheld.
pub fn current_year() -> TaxProfile {
    TaxProfile {
        wages: Some(85_000.0),
        w2_withholding: Some(14_000.0),
        ..prior_year()
    }
}

/// Single filer with a side business and a Schedule 3 credit.
pub fn self_employed() -> TaxProfile {
    TaxProfile::new(FilingStatus::Single)
        .with_wages(50_000.0)
        .with_schedule_1_income(20_000.0)
        .with_w2_withholding(8_000.0)
        .with_schedule_3_total(500.0)
        .with_total_deductions(15_000.0)
}

/// Married couple with children.
pub fn family(wages: f64, withholding: f64, children: u32) -> TaxProfile {
    TaxProfile::new(FilingStatus::MarriedFilingJointly)
        .with_wages(wages)
        .with_w2_withholding(withholding)
        .with_dependents(children)
}
