//! Side-by-side scenario comparison.

use serde::ser::{Serialize, SerializeMap, Serializer};
use taxrecon_core::{round_cents, FieldValue, ProfileField, ReconciliationOutcome, Result, TaxProfile};
use taxrecon_engine::Reconciler;

/// Cent-rounded `after - before` for every outcome scalar, in outcome order.
///
/// Serializes as a flat JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeDiff {
    entries: Vec<(&'static str, f64)>,
}

impl OutcomeDiff {
    pub fn between(before: &ReconciliationOutcome, after: &ReconciliationOutcome) -> Self {
        let entries = before
            .scalar_fields()
            .into_iter()
            .zip(after.scalar_fields())
            .map(|((name, b), (_, a))| (name, round_cents(a - b)))
            .collect();
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Entries that moved by at least a cent.
    pub fn changed(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.iter().filter(|(_, v)| *v != 0.0)
    }
}

impl Serialize for OutcomeDiff {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Two reconciled profiles and their difference.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScenarioComparison {
    pub a: ReconciliationOutcome,
    pub b: ReconciliationOutcome,
    /// `b - a` per scalar.
    pub diff: OutcomeDiff,
}

/// Reconciles both profiles and diffs them.
pub fn compare(reconciler: &Reconciler, a: &TaxProfile, b: &TaxProfile) -> ScenarioComparison {
    let a = reconciler.reconcile(a);
    let b = reconciler.reconcile(b);
    let diff = OutcomeDiff::between(&a, &b);
    ScenarioComparison { a, b, diff }
}

/// Compares `base` against a copy with `overrides` applied.
///
/// # Errors
///
/// Returns [`TaxReconError::FieldType`] when an override has the wrong
/// kind for its field.
///
/// [`TaxReconError::FieldType`]: taxrecon_core::TaxReconError::FieldType
pub fn what_if(
    reconciler: &Reconciler,
    base: &TaxProfile,
    overrides: &[(ProfileField, FieldValue)],
) -> Result<ScenarioComparison> {
    let mut modified = base.clone();
    for (field, value) in overrides {
        field.assign(&mut modified, value.clone())?;
    }
    Ok(compare(reconciler, base, &modified))
}
