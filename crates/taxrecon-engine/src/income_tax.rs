//! Progressive income tax.

use taxrecon_core::{round_cents, BracketSchedule};

/// Integrates the marginal rates of a bracket schedule up to `taxable_income`.
///
/// Each bracket taxes only the slice of income between the previous bound
/// and its own; the walk stops once income is exhausted.
///
/// # Examples
///
/// ```
/// use taxrecon_core::{FilingStatus, RuleTable};
/// use taxrecon_engine::progressive_tax;
///
/// let rules = RuleTable::tax_year_2025();
/// let single = rules.brackets(FilingStatus::Single);
/// assert_eq!(progressive_tax(11_925.0, single), 1_192.50);
/// ```
pub fn progressive_tax(taxable_income: f64, schedule: &BracketSchedule) -> f64 {
    let mut tax = 0.0;
    let mut previous_bound = 0.0;

    for bracket in schedule.brackets() {
        if taxable_income <= previous_bound {
            break;
        }
        let upper = bracket.upper.unwrap_or(f64::INFINITY);
        tax += bracket.rate * (taxable_income.min(upper) - previous_bound);
        previous_bound = upper;
    }

    round_cents(tax)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxrecon_core::{Bracket, FilingStatus, RuleTable};

    #[test]
    fn test_zero_and_negative_income() {
        let rules = RuleTable::tax_year_2025();
        let single = rules.brackets(FilingStatus::Single);
        assert_eq!(progressive_tax(0.0, single), 0.0);
        assert_eq!(progressive_tax(-500.0, single), 0.0);
    }

    #[test]
    fn test_fully_filled_lower_brackets() {
        let rules = RuleTable::tax_year_2025();
        let single = rules.brackets(FilingStatus::Single);

        // 1,192.50 + 36,550 x 12%
        assert_eq!(progressive_tax(48_475.0, single), 5_578.50);
        assert_eq!(progressive_tax(55_000.0, single), 7_014.0);
    }

    #[test]
    fn test_married_jointly_schedule() {
        let rules = RuleTable::tax_year_2025();
        let mfj = rules.brackets(FilingStatus::MarriedFilingJointly);
        // 2,385 + 16,150 x 12%
        assert_eq!(progressive_tax(40_000.0, mfj), 4_323.0);
    }

    #[test]
    fn test_top_bracket_unbounded() {
        let schedule = BracketSchedule::new(vec![
            Bracket::bounded(10_000.0, 0.10),
            Bracket::top(0.50),
        ]);
        assert_eq!(progressive_tax(30_000.0, &schedule), 11_000.0);
    }
}
