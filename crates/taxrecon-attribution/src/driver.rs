//! Attribution result types.

use serde::{Deserialize, Serialize};
use taxrecon_core::{FieldCategory, FieldValue, ProfileField, ReconciliationOutcome};

use crate::text::{field_explanation, interaction_explanation};

/// Field name of the synthetic interaction driver.
pub const INTERACTION_FIELD: &str = "_interaction";

/// Which way a driver moved the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    IncreasedRefund,
    DecreasedRefund,
}

impl Direction {
    /// Positive impacts increase the refund; zero counts as a decrease.
    pub fn of(impact: f64) -> Self {
        if impact > 0.0 {
            Direction::IncreasedRefund
        } else {
            Direction::DecreasedRefund
        }
    }
}

/// One field's marginal contribution to the balance change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    /// Field key, or [`INTERACTION_FIELD`] for the residual.
    pub field: String,
    /// Human-readable label.
    pub label: String,
    pub category: FieldCategory,
    pub prior_value: FieldValue,
    pub current_value: FieldValue,
    /// Signed change in balance, positive meaning a larger refund.
    pub impact_on_balance: f64,
    pub direction: Direction,
    pub explanation: String,
}

impl Driver {
    /// Driver for substituting one field.
    pub fn for_field(
        field: ProfileField,
        prior_value: FieldValue,
        current_value: FieldValue,
        impact: f64,
    ) -> Self {
        let explanation = field_explanation(field.label(), &prior_value, &current_value, impact);
        Self {
            field: field.key().to_string(),
            label: field.label().to_string(),
            category: field.category(),
            prior_value,
            current_value,
            impact_on_balance: impact,
            direction: Direction::of(impact),
            explanation,
        }
    }

    /// Driver for the part of the change no single field explains.
    pub fn interaction(residual: f64) -> Self {
        Self {
            field: INTERACTION_FIELD.to_string(),
            label: "interaction effects".to_string(),
            category: FieldCategory::Interaction,
            prior_value: FieldValue::Absent,
            current_value: FieldValue::Absent,
            impact_on_balance: residual,
            direction: Direction::of(residual),
            explanation: interaction_explanation(residual),
        }
    }

    pub fn is_interaction(&self) -> bool {
        self.field == INTERACTION_FIELD
    }

    /// The profile field this driver substituted, if any.
    pub fn profile_field(&self) -> Option<ProfileField> {
        self.field.parse().ok()
    }
}

/// Full decomposition of a balance change between two profiles.
///
/// Drivers are sorted by absolute impact, largest first. Their impacts,
/// interaction driver included, sum to `total_change` within a cent per
/// driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionResult {
    pub prior_outcome: ReconciliationOutcome,
    pub current_outcome: ReconciliationOutcome,
    /// `current.balance - prior.balance`.
    pub total_change: f64,
    pub drivers: Vec<Driver>,
}

impl AttributionResult {
    /// Sum of every driver's impact.
    pub fn driver_sum(&self) -> f64 {
        self.drivers.iter().map(|d| d.impact_on_balance).sum()
    }

    /// The `n` largest drivers.
    pub fn top(&self, n: usize) -> &[Driver] {
        &self.drivers[..n.min(self.drivers.len())]
    }

    /// The interaction driver, if the residual was material.
    pub fn interaction(&self) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.is_interaction())
    }

    /// Residual impact, zero when no interaction driver was emitted.
    pub fn residual(&self) -> f64 {
        self.interaction().map_or(0.0, |d| d.impact_on_balance)
    }

    pub fn driver_for(&self, field: ProfileField) -> Option<&Driver> {
        self.drivers.iter().find(|d| d.field == field.key())
    }

    /// Drivers in one line-item group, in impact order.
    pub fn drivers_in(&self, category: FieldCategory) -> impl Iterator<Item = &Driver> {
        self.drivers.iter().filter(move |d| d.category == category)
    }

    /// Direction of the overall change.
    pub fn direction(&self) -> Direction {
        Direction::of(self.total_change)
    }

    pub fn is_unchanged(&self) -> bool {
        self.total_change == 0.0 && self.drivers.is_empty()
    }
}
