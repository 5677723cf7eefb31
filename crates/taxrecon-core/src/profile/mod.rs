//! Taxpayer profiles.
//!
//! [`TaxProfile`] is the transport shape: a flat record of optional values
//! exactly as a caller or an upstream extractor supplies them.
//! [`TaxProfile::normalize`] is the single zero-coalescing step that turns
//! it into a [`NormalizedProfile`] of plain numbers for the engine.

mod field;


use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};

pub use field::{FieldCategory, FieldValue, ProfileField};

/// Filing status selecting the deduction and bracket tables.
///
/// Parsing is lenient: any unrecognized text falls back to
/// [`FilingStatus::Single`] rather than failing.
///
/// # Examples
///
/// ```
/// use taxrecon_core::FilingStatus;
///
/// assert_eq!(FilingStatus::parse("Married filing jointly"), FilingStatus::MarriedFilingJointly);
/// assert_eq!(FilingStatus::parse("head_of_household"), FilingStatus::HeadOfHousehold);
/// assert_eq!(FilingStatus::parse("Widowed"), FilingStatus::Single);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilingStatus {
    #[default]
    Single,
    MarriedFilingJointly,
    HeadOfHousehold,
    MarriedFilingSeparately,
}

impl FilingStatus {
    /// All statuses in table order.
    pub const ALL: [FilingStatus; 4] = [
        FilingStatus::Single,
        FilingStatus::MarriedFilingJointly,
        FilingStatus::HeadOfHousehold,
        FilingStatus::MarriedFilingSeparately,
    ];

    /// Parses a status label or snake_case key, falling back to Single.
    pub fn parse(s: &str) -> Self {
        let normalized = s.trim().to_ascii_lowercase().replace('_', " ");
        match normalized.as_str() {
            "married filing jointly" | "mfj" => FilingStatus::MarriedFilingJointly,
            "head of household" | "hoh" => FilingStatus::HeadOfHousehold,
            "married filing separately" | "mfs" => FilingStatus::MarriedFilingSeparately,
            _ => FilingStatus::Single,
        }
    }

    /// Returns the form label ("Married filing jointly", ...).
    pub fn label(&self) -> &'static str {
        match self {
            FilingStatus::Single => "Single",
            FilingStatus::MarriedFilingJointly => "Married filing jointly",
            FilingStatus::HeadOfHousehold => "Head of household",
            FilingStatus::MarriedFilingSeparately => "Married filing separately",
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for FilingStatus {
    fn from(s: String) -> Self {
        FilingStatus::parse(&s)
    }
}

impl From<FilingStatus> for String {
    fn from(status: FilingStatus) -> Self {
        status.label().to_string()
    }
}

/// Declared deduction election. Recorded for attribution only; the engine
/// always takes the greater of the supplied and the standard deduction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeductionType {
    #[default]
    Standard,
    Itemized,
}

impl DeductionType {
    /// Parses a deduction type, falling back to Standard.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("itemized") {
            DeductionType::Itemized
        } else {
            DeductionType::Standard
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeductionType::Standard => "Standard",
            DeductionType::Itemized => "Itemized",
        }
    }
}

impl fmt::Display for DeductionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for DeductionType {
    fn from(s: String) -> Self {
        DeductionType::parse(&s)
    }
}

impl From<DeductionType> for String {
    fn from(kind: DeductionType) -> Self {
        kind.label().to_string()
    }
}

/// Financial profile of one taxpayer for one scenario.
///
/// Every field is optional; absent numeric fields are treated as zero and
/// an absent filing status as Single. Numeric fields are semantically
/// non-negative but are not validated here.
///
/// # Examples
///
/// ```
/// use taxrecon_core::{FilingStatus, TaxProfile};
///
/// let profile = TaxProfile::new(FilingStatus::Single)
///     .with_wages(70_000.0)
///     .with_w2_withholding(11_000.0);
///
/// let normalized = profile.normalize();
/// assert_eq!(normalized.wages, 70_000.0);
/// assert_eq!(normalized.schedule_1_income, 0.0);
/// assert_eq!(normalized.itemized_deductions, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TaxProfile {
    pub filing_status: Option<FilingStatus>,
    /// Accepts whole-number floats such as `2.0`.
    #[serde(deserialize_with = "whole_count")]
    pub dependents_count: Option<u32>,

    pub wages: Option<f64>,
    /// Net self-employment / business income.
    pub schedule_1_income: Option<f64>,
    pub other_income: Option<f64>,
    pub taxable_interest: Option<f64>,
    pub ordinary_dividends: Option<f64>,
    pub capital_gain_or_loss: Option<f64>,

    /// Itemized deduction amount; absent means "use standard deduction".
    pub total_deductions: Option<f64>,
    pub deduction_type: Option<DeductionType>,
    pub qbi_deduction: Option<f64>,

    /// Self-employment tax as reported on a prior document. The engine
    /// derives its own figure from `schedule_1_income`.
    pub self_employment_tax: Option<f64>,
    pub schedule_2_total: Option<f64>,

    /// Prior-year credit override; a positive value bypasses computation.
    pub child_tax_credit: Option<f64>,
    /// Nonrefundable credits applied as a payment-side offset.
    pub schedule_3_total: Option<f64>,

    pub w2_withholding: Option<f64>,
    pub withholding_1099: Option<f64>,
    pub estimated_tax_payments: Option<f64>,
}

impl TaxProfile {
    /// Creates an empty profile with the given filing status.
    pub fn new(filing_status: FilingStatus) -> Self {
        Self {
            filing_status: Some(filing_status),
            ..Self::default()
        }
    }

    pub fn with_wages(mut self, wages: f64) -> Self {
        self.wages = Some(wages);
        self
    }

    pub fn with_schedule_1_income(mut self, income: f64) -> Self {
        self.schedule_1_income = Some(income);
        self
    }

    pub fn with_w2_withholding(mut self, amount: f64) -> Self {
        self.w2_withholding = Some(amount);
        self
    }

    pub fn with_estimated_tax_payments(mut self, amount: f64) -> Self {
        self.estimated_tax_payments = Some(amount);
        self
    }

    pub fn with_schedule_3_total(mut self, amount: f64) -> Self {
        self.schedule_3_total = Some(amount);
        self
    }

    pub fn with_total_deductions(mut self, amount: f64) -> Self {
        self.total_deductions = Some(amount);
        self
    }

    pub fn with_dependents(mut self, count: u32) -> Self {
        self.dependents_count = Some(count);
        self
    }

    pub fn with_child_tax_credit(mut self, amount: f64) -> Self {
        self.child_tax_credit = Some(amount);
        self
    }

    /// Returns the filing status, defaulting to Single.
    pub fn filing_status(&self) -> FilingStatus {
        self.filing_status.unwrap_or_default()
    }

    /// Zero-coalesces every optional field.
    ///
    /// This is the only place absent values are handled; everything
    /// downstream works on plain numbers.
    pub fn normalize(&self) -> NormalizedProfile {
        let amount = |v: Option<f64>| v.unwrap_or(0.0);
        NormalizedProfile {
            filing_status: self.filing_status(),
            dependents_count: self.dependents_count.unwrap_or(0),
            wages: amount(self.wages),
            schedule_1_income: amount(self.schedule_1_income),
            itemized_deductions: self.total_deductions,
            child_tax_credit_override: amount(self.child_tax_credit),
            schedule_3_total: amount(self.schedule_3_total),
            w2_withholding: amount(self.w2_withholding),
            withholding_1099: amount(self.withholding_1099),
            estimated_tax_payments: amount(self.estimated_tax_payments),
        }
    }
}

fn whole_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Whole(u32),
        Float(f64),
    }

    match Option::<Count>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Count::Whole(n)) => Ok(Some(n)),
        Some(Count::Float(f)) if f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX) => {
            Ok(Some(f as u32))
        }
        Some(Count::Float(f)) => Err(de::Error::custom(format!(
            "expected a non-negative whole number, found {f}"
        ))),
    }
}

/// The subset of a profile the engine reads, with absent values resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedProfile {
    pub filing_status: FilingStatus,
    pub dependents_count: u32,
    pub wages: f64,
    pub schedule_1_income: f64,
    /// Kept optional: absence selects the standard deduction outright.
    pub itemized_deductions: Option<f64>,
    pub child_tax_credit_override: f64,
    pub schedule_3_total: f64,
    pub w2_withholding: f64,
    pub withholding_1099: f64,
    pub estimated_tax_payments: f64,
}

impl NormalizedProfile {
    /// Wages plus non-negative self-employment income.
    pub fn earned_income(&self) -> f64 {
        self.wages + self.schedule_1_income.max(0.0)
    }

    /// Withholding, estimated payments and the Schedule 3 offset.
    pub fn payments(&self) -> f64 {
        self.w2_withholding
            + self.withholding_1099
            + self.estimated_tax_payments
            + self.schedule_3_total
    }
}
