//! Built-in 2025 federal rule table.

use super::{
    Bracket, BracketSchedule, ByFilingStatus, ChildCreditRules, MedicareRules, RuleTable,
    SelfEmploymentRules,
};

const RATES: [f64; 7] = [0.10, 0.12, 0.22, 0.24, 0.32, 0.35, 0.37];

fn schedule(uppers: [f64; 6]) -> BracketSchedule {
    let mut brackets: Vec<Bracket> = uppers
        .iter()
        .zip(RATES)
        .map(|(&upper, rate)| Bracket::bounded(upper, rate))
        .collect();
    brackets.push(Bracket::top(RATES[6]));
    BracketSchedule::new(brackets)
}

pub(super) fn table() -> RuleTable {
    RuleTable {
        tax_year: 2025,
        standard_deduction: ByFilingStatus {
            single: 15_000.0,
            married_filing_jointly: 30_000.0,
            head_of_household: 22_500.0,
            married_filing_separately: 15_000.0,
        },
        brackets: ByFilingStatus {
            single: schedule([
                11_925.0, 48_475.0, 103_350.0, 197_300.0, 250_525.0, 626_350.0,
            ]),
            married_filing_jointly: schedule([
                23_850.0, 96_950.0, 206_700.0, 394_600.0, 501_050.0, 751_600.0,
            ]),
            head_of_household: schedule([
                17_000.0, 64_850.0, 103_350.0, 197_300.0, 250_500.0, 626_350.0,
            ]),
            married_filing_separately: schedule([
                11_925.0, 48_475.0, 103_350.0, 197_300.0, 250_525.0, 375_800.0,
            ]),
        },
        self_employment: SelfEmploymentRules {
            net_earnings_factor: 0.9235,
            social_security_rate: 0.124,
            social_security_wage_base: 176_100.0,
            medicare_rate: 0.029,
            deductible_fraction: 0.5,
        },
        medicare: MedicareRules {
            additional_rate: 0.009,
            thresholds: ByFilingStatus {
                single: 200_000.0,
                married_filing_jointly: 250_000.0,
                head_of_household: 200_000.0,
                married_filing_separately: 125_000.0,
            },
        },
        child_credit: ChildCreditRules {
            per_child: 2_200.0,
            phaseout_thresholds: ByFilingStatus {
                single: 200_000.0,
                married_filing_jointly: 400_000.0,
                head_of_household: 200_000.0,
                married_filing_separately: 200_000.0,
            },
            phaseout_per_step: 50.0,
            phaseout_step: 1_000.0,
            refundable_cap_per_child: 1_700.0,
            earned_income_floor: 2_500.0,
            refundable_rate: 0.15,
        },
    }
}
