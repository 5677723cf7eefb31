//! Sequential counterfactual substitution.

use taxrecon_config::ReconConfig;
use taxrecon_core::{round_cents, TaxProfile};
use taxrecon_engine::Reconciler;
use tracing::{debug, info, trace};

use crate::driver::{AttributionResult, Driver};
use crate::policy::WaterfallPolicy;

/// Attributes balance changes between two profiles.
///
/// Starting from the prior profile, each field in policy order is replaced
/// by its current value and the balance recomputed; the difference is that
/// field's marginal impact. Later fields are measured with every earlier
/// substitution already applied.
///
/// # Examples
///
/// ```
/// use taxrecon_attribution::{Explainer, WaterfallPolicy};
/// use taxrecon_core::{FilingStatus, TaxProfile};
/// use taxrecon_engine::Reconciler;
///
/// let explainer = Explainer::new(Reconciler::default(), WaterfallPolicy::canonical());
/// let prior = TaxProfile::new(FilingStatus::Single).with_wages(50_000.0);
///
/// let result = explainer.explain(&prior, &prior);
/// assert!(result.is_unchanged());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Explainer {
    reconciler: Reconciler,
    policy: WaterfallPolicy,
}

impl Explainer {
    pub fn new(reconciler: Reconciler, policy: WaterfallPolicy) -> Self {
        Self { reconciler, policy }
    }

    /// Explainer using the configured rule table and thresholds.
    pub fn from_config(config: &ReconConfig) -> Self {
        Self::new(
            Reconciler::from_config(config),
            WaterfallPolicy::from_config(&config.attribution),
        )
    }

    pub fn policy(&self) -> &WaterfallPolicy {
        &self.policy
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    /// Decomposes `current.balance - prior.balance` into per-field drivers.
    pub fn explain(&self, prior: &TaxProfile, current: &TaxProfile) -> AttributionResult {
        let prior_outcome = self.reconciler.reconcile(prior);
        let current_outcome = self.reconciler.reconcile(current);
        let total_change = round_cents(current_outcome.balance - prior_outcome.balance);

        let mut running = prior.clone();
        let mut running_balance = prior_outcome.balance;
        let mut drivers = Vec::new();

        for &field in self.policy.order() {
            let prior_value = field.value(prior);
            let current_value = field.value(current);
            if prior_value.same_as(&current_value) {
                continue;
            }

            field.copy_from(&mut running, current);
            let balance = self.reconciler.reconcile(&running).balance;
            let impact = round_cents(balance - running_balance);
            running_balance = balance;

            if impact.abs() < self.policy.negligible_impact {
                trace!(event = "waterfall_skip", field = field.key(), impact);
                continue;
            }

            debug!(
                event = "waterfall_step",
                field = field.key(),
                impact,
                running_balance,
            );
            drivers.push(Driver::for_field(field, prior_value, current_value, impact));
        }

        let residual = round_cents(current_outcome.balance - running_balance);
        if residual.abs() >= self.policy.residual_threshold {
            debug!(event = "waterfall_residual", residual);
            drivers.push(Driver::interaction(residual));
        }

        drivers.sort_by(|a, b| {
            b.impact_on_balance
                .abs()
                .total_cmp(&a.impact_on_balance.abs())
        });

        info!(
            event = "explain_end",
            total_change,
            drivers = drivers.len(),
            residual,
        );

        AttributionResult {
            prior_outcome,
            current_outcome,
            total_change,
            drivers,
        }
    }
}
