//! Versioned rule tables.
//!
//! A [`RuleTable`] is an immutable value holding every constant the engine
//! needs for one tax year: standard deductions, bracket schedules,
//! self-employment, additional Medicare and child tax credit parameters.
//! Tables are injected into the engine; nothing here is global state.

mod tax_year_2025;


use serde::{Deserialize, Serialize};

use crate::profile::FilingStatus;

/// One value per filing status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ByFilingStatus<T> {
    pub single: T,
    pub married_filing_jointly: T,
    pub head_of_household: T,
    pub married_filing_separately: T,
}

impl<T> ByFilingStatus<T> {
    /// Returns the entry for a status.
    pub fn get(&self, status: FilingStatus) -> &T {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::MarriedFilingJointly => &self.married_filing_jointly,
            FilingStatus::HeadOfHousehold => &self.head_of_household,
            FilingStatus::MarriedFilingSeparately => &self.married_filing_separately,
        }
    }

    /// Iterates over (status, entry) pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (FilingStatus, &T)> {
        FilingStatus::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}

/// One bracket: income up to `upper` is taxed at `rate`.
/// The top bracket has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    pub rate: f64,
}

impl Bracket {
    pub const fn bounded(upper: f64, rate: f64) -> Self {
        Bracket {
            upper: Some(upper),
            rate,
        }
    }

    pub const fn top(rate: f64) -> Self {
        Bracket { upper: None, rate }
    }
}

/// Ordered bracket schedule ending in an unbounded top bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BracketSchedule {
    brackets: Vec<Bracket>,
}

impl BracketSchedule {
    pub fn new(brackets: Vec<Bracket>) -> Self {
        Self { brackets }
    }

    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    /// Upper bounds of every bounded bracket, in order.
    pub fn thresholds(&self) -> impl Iterator<Item = f64> + '_ {
        self.brackets.iter().filter_map(|b| b.upper)
    }

    /// Marginal rate applying to the next dollar above `income`.
    pub fn marginal_rate(&self, income: f64) -> f64 {
        self.brackets
            .iter()
            .find(|b| b.upper.map_or(true, |upper| income < upper))
            .or_else(|| self.brackets.last())
            .map_or(0.0, |b| b.rate)
    }
}

/// Self-employment tax parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelfEmploymentRules {
    /// Share of net profit subject to SE tax (0.9235).
    pub net_earnings_factor: f64,
    pub social_security_rate: f64,
    pub social_security_wage_base: f64,
    pub medicare_rate: f64,
    /// Share of SE tax deductible above the line.
    pub deductible_fraction: f64,
}

/// Additional Medicare tax parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicareRules {
    pub additional_rate: f64,
    pub thresholds: ByFilingStatus<f64>,
}

/// Child tax credit parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildCreditRules {
    pub per_child: f64,
    pub phaseout_thresholds: ByFilingStatus<f64>,
    /// Reduction per started step of excess AGI.
    pub phaseout_per_step: f64,
    pub phaseout_step: f64,
    pub refundable_cap_per_child: f64,
    pub earned_income_floor: f64,
    pub refundable_rate: f64,
}

/// Every constant for one tax year.
///
/// # Examples
///
/// ```
/// use taxrecon_core::{FilingStatus, RuleTable};
///
/// let table = RuleTable::tax_year_2025();
/// assert_eq!(table.tax_year, 2025);
/// assert_eq!(table.standard_deduction(FilingStatus::MarriedFilingJointly), 30_000.0);
/// assert_eq!(table.brackets(FilingStatus::Single).marginal_rate(50_000.0), 0.22);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    pub tax_year: u16,
    pub standard_deduction: ByFilingStatus<f64>,
    pub brackets: ByFilingStatus<BracketSchedule>,
    pub self_employment: SelfEmploymentRules,
    pub medicare: MedicareRules,
    pub child_credit: ChildCreditRules,
}

impl RuleTable {
    pub fn tax_year_2025() -> Self {
        tax_year_2025::table()
    }

    pub fn standard_deduction(&self, status: FilingStatus) -> f64 {
        *self.standard_deduction.get(status)
    }

    pub fn brackets(&self, status: FilingStatus) -> &BracketSchedule {
        self.brackets.get(status)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::tax_year_2025()
    }
}
