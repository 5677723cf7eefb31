//! Life-event presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use taxrecon_config::PlanningLimits;
use taxrecon_core::{
    FieldValue, FilingStatus, ProfileField, ReconciliationOutcome, Result, TaxProfile,
    TaxReconError,
};
use taxrecon_engine::Reconciler;
use tracing::debug;

use crate::scenario::OutcomeDiff;

/// A common change in circumstances, applied as field adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeEvent {
    GotMarried,
    HadBaby,
    StartedSideHustle,
    BoughtHome,
    #[serde(rename = "maxed_401k")]
    Maxed401k,
    ContributedIra,
    ContributedHsa,
    LostJob,
}

/// Display metadata for a [`LifeEvent`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifeEventPreset {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub fields_affected: &'static [ProfileField],
}

/// How an event changes one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Adjustment {
    Set(FieldValue),
    Add(f64),
    /// Subtracts, flooring the result at zero.
    Subtract(f64),
    Multiply(f64),
}

impl Adjustment {
    /// Applies this adjustment to `field` of `profile`; absent reads as zero.
    pub fn apply(&self, field: ProfileField, profile: &mut TaxProfile) -> Result<()> {
        let current = field.amount(profile);
        match self {
            Adjustment::Set(value) => return field.assign(profile, value.clone()),
            Adjustment::Add(x) => field.set_amount(profile, current + x),
            Adjustment::Subtract(x) => field.set_amount(profile, (current - x).max(0.0)),
            Adjustment::Multiply(x) => field.set_amount(profile, current * x),
        }
        Ok(())
    }
}

impl LifeEvent {
    pub const ALL: [LifeEvent; 8] = [
        LifeEvent::GotMarried,
        LifeEvent::HadBaby,
        LifeEvent::StartedSideHustle,
        LifeEvent::BoughtHome,
        LifeEvent::Maxed401k,
        LifeEvent::ContributedIra,
        LifeEvent::ContributedHsa,
        LifeEvent::LostJob,
    ];

    /// Every preset, in catalogue order.
    pub fn all() -> Vec<LifeEventPreset> {
        Self::ALL.iter().map(LifeEvent::preset).collect()
    }

    pub fn key(&self) -> &'static str {
        match self {
            LifeEvent::GotMarried => "got_married",
            LifeEvent::HadBaby => "had_baby",
            LifeEvent::StartedSideHustle => "started_side_hustle",
            LifeEvent::BoughtHome => "bought_home",
            LifeEvent::Maxed401k => "maxed_401k",
            LifeEvent::ContributedIra => "contributed_ira",
            LifeEvent::ContributedHsa => "contributed_hsa",
            LifeEvent::LostJob => "lost_job",
        }
    }

    /// Looks up an event by key.
    ///
    /// # Errors
    ///
    /// [`TaxReconError::UnknownLifeEvent`] for unrecognized keys.
    pub fn from_key(key: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.key() == key.trim())
            .ok_or_else(|| TaxReconError::UnknownLifeEvent(key.to_string()))
    }

    pub fn preset(&self) -> LifeEventPreset {
        let (name, description, fields_affected): (_, _, &'static [ProfileField]) = match self {
            LifeEvent::GotMarried => (
                "Got Married",
                "Switch to Married Filing Jointly for a higher standard deduction and wider brackets",
                &[ProfileField::FilingStatus],
            ),
            LifeEvent::HadBaby => (
                "Had a Baby",
                "Add a $2,200 Child Tax Credit for a new dependent",
                &[ProfileField::DependentsCount],
            ),
            LifeEvent::StartedSideHustle => (
                "Started a Side Hustle",
                "Add self-employment income ($10,000 default, adjust to your actual amount)",
                &[ProfileField::Schedule1Income],
            ),
            LifeEvent::BoughtHome => (
                "Bought a Home",
                "Itemize mortgage interest and property tax (~$25,000)",
                &[ProfileField::TotalDeductions],
            ),
            LifeEvent::Maxed401k => (
                "Maxed Out 401(k)",
                "Reduce wages by the 401(k) contribution limit",
                &[ProfileField::Wages],
            ),
            LifeEvent::ContributedIra => (
                "Traditional IRA Contribution",
                "Deduct a Traditional IRA contribution up to the annual limit",
                &[ProfileField::Wages],
            ),
            LifeEvent::ContributedHsa => (
                "HSA Contribution",
                "Deduct an HSA contribution up to the individual limit",
                &[ProfileField::Wages],
            ),
            LifeEvent::LostJob => (
                "Lost Job / Reduced Income",
                "Halve wages and withholding to simulate a mid-year job loss",
                &[ProfileField::Wages, ProfileField::W2Withholding],
            ),
        };
        LifeEventPreset {
            key: self.key(),
            name,
            description,
            fields_affected,
        }
    }

    /// Field adjustments for this event under `limits`.
    pub fn adjustments(&self, limits: &PlanningLimits) -> Vec<(ProfileField, Adjustment)> {
        match self {
            LifeEvent::GotMarried => vec![(
                ProfileField::FilingStatus,
                Adjustment::Set(FieldValue::Text(
                    FilingStatus::MarriedFilingJointly.label().to_string(),
                )),
            )],
            LifeEvent::HadBaby => vec![(ProfileField::DependentsCount, Adjustment::Add(1.0))],
            LifeEvent::StartedSideHustle => vec![(
                ProfileField::Schedule1Income,
                Adjustment::Set(FieldValue::Amount(10_000.0)),
            )],
            LifeEvent::BoughtHome => vec![(
                ProfileField::TotalDeductions,
                Adjustment::Set(FieldValue::Amount(25_000.0)),
            )],
            LifeEvent::Maxed401k => vec![(ProfileField::Wages, Adjustment::Subtract(limits.max_401k))],
            LifeEvent::ContributedIra => vec![(ProfileField::Wages, Adjustment::Subtract(limits.max_ira))],
            LifeEvent::ContributedHsa => vec![(
                ProfileField::Wages,
                Adjustment::Subtract(limits.max_hsa_individual),
            )],
            LifeEvent::LostJob => vec![
                (ProfileField::Wages, Adjustment::Multiply(0.5)),
                (ProfileField::W2Withholding, Adjustment::Multiply(0.5)),
            ],
        }
    }
}

impl fmt::Display for LifeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for LifeEvent {
    type Err = TaxReconError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_key(s)
    }
}

/// A profile reconciled before and after a life event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifeEventOutcome {
    pub event: LifeEvent,
    /// Display name of the event.
    pub name: &'static str,
    pub before: ReconciliationOutcome,
    pub after: ReconciliationOutcome,
    /// `after - before` per outcome scalar.
    pub diff: OutcomeDiff,
}

/// Applies `event` to a copy of `base`, then `custom` values on top.
pub fn simulate(
    reconciler: &Reconciler,
    base: &TaxProfile,
    event: LifeEvent,
    custom: &[(ProfileField, FieldValue)],
) -> Result<LifeEventOutcome> {
    simulate_with(reconciler, &PlanningLimits::default(), base, event, custom)
}

/// Like [`simulate`], with contribution limits taken from `limits`.
pub fn simulate_with(
    reconciler: &Reconciler,
    limits: &PlanningLimits,
    base: &TaxProfile,
    event: LifeEvent,
    custom: &[(ProfileField, FieldValue)],
) -> Result<LifeEventOutcome> {
    let mut modified = base.clone();
    for (field, adjustment) in event.adjustments(limits) {
        adjustment.apply(field, &mut modified)?;
    }
    for (field, value) in custom {
        field.assign(&mut modified, value.clone())?;
    }

    let before = reconciler.reconcile(base);
    let after = reconciler.reconcile(&modified);
    let diff = OutcomeDiff::between(&before, &after);
    debug!(
        event = "life_event",
        key = event.key(),
        balance_change = diff.get("balance").unwrap_or(0.0),
    );

    Ok(LifeEventOutcome {
        event,
        name: event.preset().name,
        before,
        after,
        diff,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxrecon_test::profiles;

    fn run(base: &TaxProfile, event: LifeEvent) -> LifeEventOutcome {
        simulate(&Reconciler::default(), base, event, &[]).unwrap()
    }

    #[test]
    fn test_catalogue() {
        let presets = LifeEvent::all();
        assert_eq!(presets.len(), 8);
        assert_eq!(presets[0].key, "got_married");
        assert_eq!(presets[7].fields_affected, &[ProfileField::Wages, ProfileField::W2Withholding]);
        for event in LifeEvent::ALL {
            assert_eq!(LifeEvent::from_key(event.key()).unwrap(), event);
        }
    }

    #[test]
    fn test_unknown_key() {
        let err = LifeEvent::from_key("won_lottery").unwrap_err();
        assert!(matches!(err, TaxReconError::UnknownLifeEvent(k) if k == "won_lottery"));
    }

    #[test]
    fn test_got_married_does_not_raise_tax() {
        let outcome = run(&profiles::single_w2(70_000.0, 11_000.0), LifeEvent::GotMarried);
        assert_eq!(outcome.after.filing_status, FilingStatus::MarriedFilingJointly);
        assert!(outcome.after.total_tax <= outcome.before.total_tax);
        assert_eq!(outcome.diff.get("balance"), Some(2_691.0));
    }

    #[test]
    fn test_maxed_401k_lowers_tax() {
        let outcome = run(&profiles::single_w2(90_000.0, 12_000.0), LifeEvent::Maxed401k);
        assert_eq!(outcome.diff.get("agi"), Some(-23_500.0));
        assert!(outcome.after.total_tax < outcome.before.total_tax);
    }

    #[test]
    fn test_contribution_floors_wages_at_zero() {
        let outcome = run(&profiles::single_w2(3_000.0, 0.0), LifeEvent::ContributedIra);
        assert_eq!(outcome.after.agi, 0.0);
    }

    #[test]
    fn test_side_hustle_raises_tax() {
        let outcome = run(&profiles::single_w2(50_000.0, 6_000.0), LifeEvent::StartedSideHustle);
        assert!(outcome.after.self_employment_tax > 0.0);
        assert!(outcome.after.total_tax > outcome.before.total_tax);
    }

    #[test]
    fn test_had_baby_adds_dependent() {
        let base = profiles::family(80_000.0, 5_000.0, 1);
        let outcome = run(&base, LifeEvent::HadBaby);
        assert_eq!(outcome.diff.get("child_tax_credit_total"), Some(2_200.0));
    }

    #[test]
    fn test_lost_job_halves_wages_and_withholding() {
        let outcome = run(&profiles::prior_year(), LifeEvent::LostJob);
        assert_eq!(outcome.after.agi, 35_000.0);
        assert_eq!(outcome.after.total_payments, 5_500.0);
    }

    #[test]
    fn test_custom_values_apply_after_preset() {
        let outcome = simulate(
            &Reconciler::default(),
            &profiles::single_w2(50_000.0, 6_000.0),
            LifeEvent::StartedSideHustle,
            &[(ProfileField::Schedule1Income, FieldValue::Amount(4_000.0))],
        )
        .unwrap();
        assert!(outcome.after.self_employment_tax > 0.0);
        assert!(outcome.after.self_employment_tax < 1_000.0);
    }

    #[test]
    fn test_configured_limits() {
        let limits = PlanningLimits {
            max_401k: 10_000.0,
            ..PlanningLimits::default()
        };
        let outcome = simulate_with(
            &Reconciler::default(),
            &limits,
            &profiles::single_w2(90_000.0, 0.0),
            LifeEvent::Maxed401k,
            &[],
        )
        .unwrap();
        assert_eq!(outcome.diff.get("agi"), Some(-10_000.0));
    }
}
