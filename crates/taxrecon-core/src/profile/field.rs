//! Field catalogue for profile attribution and overrides.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{DeductionType, FilingStatus, TaxProfile};
use crate::error::{Result, TaxReconError};

/// 1040 line-item group a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCategory {
    Income,
    Structural,
    Deduction,
    Tax,
    Credit,
    Payment,
    /// Synthetic category for the attribution residual.
    Interaction,
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldCategory::Income => "income",
            FieldCategory::Structural => "structural",
            FieldCategory::Deduction => "deduction",
            FieldCategory::Tax => "tax",
            FieldCategory::Credit => "credit",
            FieldCategory::Payment => "payment",
            FieldCategory::Interaction => "interaction",
        };
        f.write_str(s)
    }
}

/// Raw value of one profile field.
///
/// Serialized untagged, so a flat JSON mapping carries numbers, strings
/// and nulls directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Count(u32),
    Amount(f64),
    Text(String),
    Absent,
}

impl FieldValue {
    /// Numeric view, with absent as zero. `None` for text.
    pub fn as_amount(&self) -> Option<f64> {
        match self {
            FieldValue::Count(n) => Some(f64::from(*n)),
            FieldValue::Amount(a) => Some(*a),
            FieldValue::Absent => Some(0.0),
            FieldValue::Text(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, FieldValue::Text(_))
    }

    /// Equality treating absent as zero for numeric values.
    ///
    /// # Examples
    ///
    /// ```
    /// use taxrecon_core::FieldValue;
    ///
    /// assert!(FieldValue::Absent.same_as(&FieldValue::Amount(0.0)));
    /// assert!(FieldValue::Count(2).same_as(&FieldValue::Amount(2.0)));
    /// assert!(!FieldValue::Text("Single".into()).same_as(&FieldValue::Absent));
    /// ```
    pub fn same_as(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            (FieldValue::Text(_), _) | (_, FieldValue::Text(_)) => false,
            _ => self.as_amount() == other.as_amount(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Count(n) => write!(f, "{}", n),
            FieldValue::Amount(a) => write!(f, "{}", a),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Absent => f.write_str("none"),
        }
    }
}

/// One addressable field of a [`TaxProfile`].
///
/// The declaration order is the canonical waterfall order: income, then
/// structural, deduction, tax, credit and finally payment fields, matching
/// the order the form computes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Wages,
    #[serde(rename = "schedule_1_income")]
    Schedule1Income,
    OtherIncome,
    TaxableInterest,
    OrdinaryDividends,
    CapitalGainOrLoss,
    FilingStatus,
    DependentsCount,
    TotalDeductions,
    DeductionType,
    QbiDeduction,
    SelfEmploymentTax,
    #[serde(rename = "schedule_2_total")]
    Schedule2Total,
    ChildTaxCredit,
    #[serde(rename = "schedule_3_total")]
    Schedule3Total,
    #[serde(rename = "w2_withholding")]
    W2Withholding,
    #[serde(rename = "withholding_1099")]
    Withholding1099,
    EstimatedTaxPayments,
}

enum Slot<'a> {
    Amount(&'a mut Option<f64>),
    Count(&'a mut Option<u32>),
    Status(&'a mut Option<FilingStatus>),
    Deduction(&'a mut Option<DeductionType>),
}

enum SlotRef<'a> {
    Amount(&'a Option<f64>),
    Count(&'a Option<u32>),
    Status(&'a Option<FilingStatus>),
    Deduction(&'a Option<DeductionType>),
}

impl ProfileField {
    /// Every field in canonical waterfall order.
    pub const ALL: [ProfileField; 18] = [
        ProfileField::Wages,
        ProfileField::Schedule1Income,
        ProfileField::OtherIncome,
        ProfileField::TaxableInterest,
        ProfileField::OrdinaryDividends,
        ProfileField::CapitalGainOrLoss,
        ProfileField::FilingStatus,
        ProfileField::DependentsCount,
        ProfileField::TotalDeductions,
        ProfileField::DeductionType,
        ProfileField::QbiDeduction,
        ProfileField::SelfEmploymentTax,
        ProfileField::Schedule2Total,
        ProfileField::ChildTaxCredit,
        ProfileField::Schedule3Total,
        ProfileField::W2Withholding,
        ProfileField::Withholding1099,
        ProfileField::EstimatedTaxPayments,
    ];

    /// Snake_case key used in transport mappings.
    pub fn key(&self) -> &'static str {
        match self {
            ProfileField::Wages => "wages",
            ProfileField::Schedule1Income => "schedule_1_income",
            ProfileField::OtherIncome => "other_income",
            ProfileField::TaxableInterest => "taxable_interest",
            ProfileField::OrdinaryDividends => "ordinary_dividends",
            ProfileField::CapitalGainOrLoss => "capital_gain_or_loss",
            ProfileField::FilingStatus => "filing_status",
            ProfileField::DependentsCount => "dependents_count",
            ProfileField::TotalDeductions => "total_deductions",
            ProfileField::DeductionType => "deduction_type",
            ProfileField::QbiDeduction => "qbi_deduction",
            ProfileField::SelfEmploymentTax => "self_employment_tax",
            ProfileField::Schedule2Total => "schedule_2_total",
            ProfileField::ChildTaxCredit => "child_tax_credit",
            ProfileField::Schedule3Total => "schedule_3_total",
            ProfileField::W2Withholding => "w2_withholding",
            ProfileField::Withholding1099 => "withholding_1099",
            ProfileField::EstimatedTaxPayments => "estimated_tax_payments",
        }
    }

    /// Human label used in explanations.
    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::Wages => "W-2 wages",
            ProfileField::Schedule1Income => "self-employment / Schedule 1 income",
            ProfileField::OtherIncome => "other income",
            ProfileField::TaxableInterest => "taxable interest",
            ProfileField::OrdinaryDividends => "ordinary dividends",
            ProfileField::CapitalGainOrLoss => "capital gains or losses",
            ProfileField::FilingStatus => "filing status",
            ProfileField::DependentsCount => "number of dependents",
            ProfileField::TotalDeductions => "total deductions",
            ProfileField::DeductionType => "deduction type",
            ProfileField::QbiDeduction => "Qualified Business Income deduction",
            ProfileField::SelfEmploymentTax => "self-employment tax",
            ProfileField::Schedule2Total => "Schedule 2 additional taxes",
            ProfileField::ChildTaxCredit => "Child Tax Credit",
            ProfileField::Schedule3Total => "Schedule 3 credits",
            ProfileField::W2Withholding => "W-2 withholding",
            ProfileField::Withholding1099 => "1099 withholding",
            ProfileField::EstimatedTaxPayments => "estimated tax payments",
        }
    }

    pub fn category(&self) -> FieldCategory {
        match self {
            ProfileField::Wages
            | ProfileField::Schedule1Income
            | ProfileField::OtherIncome
            | ProfileField::TaxableInterest
            | ProfileField::OrdinaryDividends
            | ProfileField::CapitalGainOrLoss => FieldCategory::Income,
            ProfileField::FilingStatus
            | ProfileField::DependentsCount
            | ProfileField::DeductionType => FieldCategory::Structural,
            ProfileField::TotalDeductions | ProfileField::QbiDeduction => FieldCategory::Deduction,
            ProfileField::SelfEmploymentTax | ProfileField::Schedule2Total => FieldCategory::Tax,
            ProfileField::ChildTaxCredit | ProfileField::Schedule3Total => FieldCategory::Credit,
            ProfileField::W2Withholding
            | ProfileField::Withholding1099
            | ProfileField::EstimatedTaxPayments => FieldCategory::Payment,
        }
    }

    /// Returns true for fields holding text rather than numbers.
    pub fn is_textual(&self) -> bool {
        matches!(self, ProfileField::FilingStatus | ProfileField::DeductionType)
    }

    fn slot<'a>(&self, profile: &'a mut TaxProfile) -> Slot<'a> {
        match self {
            ProfileField::Wages => Slot::Amount(&mut profile.wages),
            ProfileField::Schedule1Income => Slot::Amount(&mut profile.schedule_1_income),
            ProfileField::OtherIncome => Slot::Amount(&mut profile.other_income),
            ProfileField::TaxableInterest => Slot::Amount(&mut profile.taxable_interest),
            ProfileField::OrdinaryDividends => Slot::Amount(&mut profile.ordinary_dividends),
            ProfileField::CapitalGainOrLoss => Slot::Amount(&mut profile.capital_gain_or_loss),
            ProfileField::FilingStatus => Slot::Status(&mut profile.filing_status),
            ProfileField::DependentsCount => Slot::Count(&mut profile.dependents_count),
            ProfileField::TotalDeductions => Slot::Amount(&mut profile.total_deductions),
            ProfileField::DeductionType => Slot::Deduction(&mut profile.deduction_type),
            ProfileField::QbiDeduction => Slot::Amount(&mut profile.qbi_deduction),
            ProfileField::SelfEmploymentTax => Slot::Amount(&mut profile.self_employment_tax),
            ProfileField::Schedule2Total => Slot::Amount(&mut profile.schedule_2_total),
            ProfileField::ChildTaxCredit => Slot::Amount(&mut profile.child_tax_credit),
            ProfileField::Schedule3Total => Slot::Amount(&mut profile.schedule_3_total),
            ProfileField::W2Withholding => Slot::Amount(&mut profile.w2_withholding),
            ProfileField::Withholding1099 => Slot::Amount(&mut profile.withholding_1099),
            ProfileField::EstimatedTaxPayments => {
                Slot::Amount(&mut profile.estimated_tax_payments)
            }
        }
    }

    fn slot_ref<'a>(&self, profile: &'a TaxProfile) -> SlotRef<'a> {
        match self {
            ProfileField::Wages => SlotRef::Amount(&profile.wages),
            ProfileField::Schedule1Income => SlotRef::Amount(&profile.schedule_1_income),
            ProfileField::OtherIncome => SlotRef::Amount(&profile.other_income),
            ProfileField::TaxableInterest => SlotRef::Amount(&profile.taxable_interest),
            ProfileField::OrdinaryDividends => SlotRef::Amount(&profile.ordinary_dividends),
            ProfileField::CapitalGainOrLoss => SlotRef::Amount(&profile.capital_gain_or_loss),
            ProfileField::FilingStatus => SlotRef::Status(&profile.filing_status),
            ProfileField::DependentsCount => SlotRef::Count(&profile.dependents_count),
            ProfileField::TotalDeductions => SlotRef::Amount(&profile.total_deductions),
            ProfileField::DeductionType => SlotRef::Deduction(&profile.deduction_type),
            ProfileField::QbiDeduction => SlotRef::Amount(&profile.qbi_deduction),
            ProfileField::SelfEmploymentTax => SlotRef::Amount(&profile.self_employment_tax),
            ProfileField::Schedule2Total => SlotRef::Amount(&profile.schedule_2_total),
            ProfileField::ChildTaxCredit => SlotRef::Amount(&profile.child_tax_credit),
            ProfileField::Schedule3Total => SlotRef::Amount(&profile.schedule_3_total),
            ProfileField::W2Withholding => SlotRef::Amount(&profile.w2_withholding),
            ProfileField::Withholding1099 => SlotRef::Amount(&profile.withholding_1099),
            ProfileField::EstimatedTaxPayments => SlotRef::Amount(&profile.estimated_tax_payments),
        }
    }

    /// Reads the raw value of this field.
    ///
    /// The filing status always reads as the effective status, so an
    /// absent one reads as Single.
    pub fn value(&self, profile: &TaxProfile) -> FieldValue {
        match self.slot_ref(profile) {
            SlotRef::Amount(v) => v.map_or(FieldValue::Absent, FieldValue::Amount),
            SlotRef::Count(v) => v.map_or(FieldValue::Absent, FieldValue::Count),
            SlotRef::Status(v) => FieldValue::Text(v.unwrap_or_default().label().to_string()),
            SlotRef::Deduction(v) => v.map_or(FieldValue::Absent, |d| {
                FieldValue::Text(d.label().to_string())
            }),
        }
    }

    /// Numeric value with absent as zero; text fields read as zero.
    pub fn amount(&self, profile: &TaxProfile) -> f64 {
        self.value(profile).as_amount().unwrap_or(0.0)
    }

    /// Copies this one field from `source` into `target`.
    pub fn copy_from(&self, target: &mut TaxProfile, source: &TaxProfile) {
        match (self.slot(target), self.slot_ref(source)) {
            (Slot::Amount(t), SlotRef::Amount(s)) => *t = *s,
            (Slot::Count(t), SlotRef::Count(s)) => *t = *s,
            (Slot::Status(t), SlotRef::Status(s)) => *t = *s,
            (Slot::Deduction(t), SlotRef::Deduction(s)) => *t = *s,
            _ => unreachable!("slot kinds are fixed per field"),
        }
    }

    /// Assigns a raw value, checking its kind against the field.
    ///
    /// Numeric fields accept counts and amounts; the dependents count
    /// accepts whole non-negative amounts. Text fields accept text and
    /// parse it leniently. `Absent` clears any field.
    pub fn assign(&self, profile: &mut TaxProfile, value: FieldValue) -> Result<()> {
        let key = self.key();
        match (self.slot(profile), value) {
            (Slot::Amount(t), FieldValue::Absent) => *t = None,
            (Slot::Count(t), FieldValue::Absent) => *t = None,
            (Slot::Status(t), FieldValue::Absent) => *t = None,
            (Slot::Deduction(t), FieldValue::Absent) => *t = None,
            (Slot::Amount(t), FieldValue::Amount(a)) => *t = Some(a),
            (Slot::Amount(t), FieldValue::Count(n)) => *t = Some(f64::from(n)),
            (Slot::Count(t), FieldValue::Count(n)) => *t = Some(n),
            (Slot::Count(t), FieldValue::Amount(a))
                if a >= 0.0 && a.fract() == 0.0 && a <= f64::from(u32::MAX) =>
            {
                *t = Some(a as u32)
            }
            (Slot::Status(t), FieldValue::Text(s)) => *t = Some(FilingStatus::parse(&s)),
            (Slot::Deduction(t), FieldValue::Text(s)) => *t = Some(DeductionType::parse(&s)),
            (Slot::Amount(_), _) => {
                return Err(TaxReconError::FieldType {
                    field: key,
                    expected: "a dollar amount",
                })
            }
            (Slot::Count(_), _) => {
                return Err(TaxReconError::FieldType {
                    field: key,
                    expected: "a non-negative whole number",
                })
            }
            (Slot::Status(_), _) | (Slot::Deduction(_), _) => {
                return Err(TaxReconError::FieldType {
                    field: key,
                    expected: "text",
                })
            }
        }
        Ok(())
    }

    /// Sets a numeric field. Text fields are left unchanged; the count is
    /// rounded and floored at zero.
    pub fn set_amount(&self, profile: &mut TaxProfile, amount: f64) {
        match self.slot(profile) {
            Slot::Amount(t) => *t = Some(amount),
            Slot::Count(t) => *t = Some(amount.max(0.0).round() as u32),
            Slot::Status(_) | Slot::Deduction(_) => {}
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ProfileField {
    type Err = TaxReconError;

    fn from_str(s: &str) -> Result<Self> {
        ProfileField::ALL
            .iter()
            .copied()
            .find(|f| f.key() == s.trim())
            .ok_or_else(|| TaxReconError::UnknownField(s.to_string()))
    }
}
