//! Waterfall attribution for taxrecon.
//!
//! Explains why the refund/owed balance differs between two profiles by
//! substituting one field at a time, in a fixed form order, and measuring
//! each substitution's marginal effect on the balance:
//!
//! - [`Explainer`] - runs the substitution walk against a [`Reconciler`]
//! - [`WaterfallPolicy`] - the named field order and thresholds
//! - [`AttributionResult`] / [`Driver`] - the sorted decomposition
//! - [`narrative`] - top-driver text for an external summarizer
//!
//! Because the tax function is piecewise, attribution is path dependent:
//! a different order changes individual driver magnitudes but not their
//! sum. Whatever no single field explains lands in a synthetic
//! `interaction` driver.
//!
//! # Example
//!
//! ```
//! use taxrecon_core::{FilingStatus, TaxProfile};
//!
//! let prior = TaxProfile::new(FilingStatus::Single)
//!     .with_wages(70_000.0)
//!     .with_w2_withholding(11_000.0);
//! let current = prior.clone().with_wages(85_000.0).with_w2_withholding(14_000.0);
//!
//! let result = taxrecon_attribution::explain(&prior, &current);
//! assert_eq!(result.total_change, -300.0);
//! assert_eq!(result.drivers.len(), 2);
//! assert_eq!(result.drivers[0].field, "wages");
//! ```
//!
//! [`Reconciler`]: taxrecon_engine::Reconciler

mod driver;
mod explainer;
pub mod narrative;
mod policy;
mod text;

#[cfg(test)]
mod tests;

pub use driver::{AttributionResult, Direction, Driver, INTERACTION_FIELD};
pub use explainer::Explainer;
pub use narrative::{
    describe_balance, narrate, summarize_request, NarratedAttribution, NarrativeRequest, Summarizer,
};
pub use policy::WaterfallPolicy;

use taxrecon_core::TaxProfile;

/// Explains the balance change from `prior` to `current` with the built-in
/// 2025 table and the canonical waterfall order.
pub fn explain(prior: &TaxProfile, current: &TaxProfile) -> AttributionResult {
    Explainer::default().explain(prior, current)
}
