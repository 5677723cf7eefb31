//! Additional Medicare tax.

use taxrecon_core::{round_cents, FilingStatus, RuleTable};

/// Computes the additional Medicare tax on combined wages and net
/// self-employment earnings above the filing-status threshold.
pub fn additional_medicare_tax(
    wages: f64,
    self_employment_income: f64,
    status: FilingStatus,
    rules: &RuleTable,
) -> f64 {
    let se_earnings = self_employment_income.max(0.0) * rules.self_employment.net_earnings_factor;
    let threshold = *rules.medicare.thresholds.get(status);
    let excess = (wages + se_earnings - threshold).max(0.0);
    round_cents(excess * rules.medicare.additional_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_is_zero() {
        let rules = RuleTable::tax_year_2025();
        assert_eq!(
            additional_medicare_tax(150_000.0, 40_000.0, FilingStatus::Single, &rules),
            0.0
        );
    }

    #[test]
    fn test_wages_above_threshold() {
        let rules = RuleTable::tax_year_2025();
        assert_eq!(
            additional_medicare_tax(250_000.0, 0.0, FilingStatus::Single, &rules),
            450.0
        );
        assert_eq!(
            additional_medicare_tax(250_000.0, 0.0, FilingStatus::MarriedFilingJointly, &rules),
            0.0
        );
    }

    #[test]
    fn test_self_employment_earnings_count_at_net_factor() {
        let rules = RuleTable::tax_year_2025();
        // 100,000 + 200,000 x 0.9235 = 284,700 -> 84,700 over
        assert_eq!(
            additional_medicare_tax(100_000.0, 200_000.0, FilingStatus::Single, &rules),
            762.30
        );
    }

    #[test]
    fn test_separate_filers_have_lower_threshold() {
        let rules = RuleTable::tax_year_2025();
        assert_eq!(
            additional_medicare_tax(135_000.0, -10_000.0, FilingStatus::MarriedFilingSeparately, &rules),
            90.0
        );
    }
}
