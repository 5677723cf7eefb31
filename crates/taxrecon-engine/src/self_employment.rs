//! Self-employment tax.

use taxrecon_core::{round_cents, SelfEmploymentRules};

/// SE tax and the half deductible above the line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SelfEmploymentTax {
    pub tax: f64,
    pub deductible_half: f64,
}

/// Computes self-employment tax on net business income.
///
/// Only positive income is taxed. The social security portion is capped
/// at the wage base; the Medicare portion is not.
///
/// # Examples
///
/// ```
/// use taxrecon_core::RuleTable;
/// use taxrecon_engine::self_employment_tax;
///
/// let rules = RuleTable::tax_year_2025();
/// let se = self_employment_tax(20_000.0, &rules.self_employment);
/// assert_eq!(se.tax, 2_825.91);
/// ```
pub fn self_employment_tax(net_income: f64, rules: &SelfEmploymentRules) -> SelfEmploymentTax {
    if net_income <= 0.0 {
        return SelfEmploymentTax::default();
    }

    let base = net_income * rules.net_earnings_factor;
    let social_security = base.min(rules.social_security_wage_base) * rules.social_security_rate;
    let medicare = base * rules.medicare_rate;
    let tax = round_cents(social_security + medicare);

    SelfEmploymentTax {
        tax,
        deductible_half: round_cents(tax * rules.deductible_fraction),
    }
}
