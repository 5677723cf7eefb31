//! Reconciliation engine for taxrecon.
//!
//! Maps a [`TaxProfile`] to a [`ReconciliationOutcome`]: AGI, taxable
//! income, tax liability, credits and the refund/owed balance. Built from
//! four sub-calculations composed in form order:
//!
//! - [`self_employment_tax`] - SE tax and its deductible half
//! - [`progressive_tax`] - marginal bracket integral
//! - [`additional_medicare_tax`] - 0.9% surtax above a threshold
//! - [`child_tax_credit`] - nonrefundable and refundable credit portions
//!
//! The engine is pure and total: it never fails, never mutates its input
//! and rounds every stage to the cent.
//!
//! # Example
//!
//! ```
//! use taxrecon_core::{BalanceType, FilingStatus, TaxProfile};
//!
//! let profile = TaxProfile::new(FilingStatus::Single)
//!     .with_wages(70_000.0)
//!     .with_w2_withholding(11_000.0);
//!
//! let outcome = taxrecon_engine::reconcile(&profile);
//! assert_eq!(outcome.taxable_income, 55_000.0);
//! assert_eq!(outcome.total_tax, 7_014.0);
//! assert_eq!(outcome.balance, 3_986.0);
//! assert_eq!(outcome.balance_type, BalanceType::Refund);
//! ```

mod child_credit;
mod income_tax;
mod medicare;
mod reconciler;
mod self_employment;

#[cfg(test)]
mod tests;

pub use child_credit::{child_tax_credit, ChildCreditInput, ChildTaxCredit};
pub use income_tax::progressive_tax;
pub use medicare::additional_medicare_tax;
pub use reconciler::Reconciler;
pub use self_employment::{self_employment_tax, SelfEmploymentTax};

use taxrecon_core::{ReconciliationOutcome, TaxProfile};

/// Reconciles a profile against the built-in 2025 rule table.
pub fn reconcile(profile: &TaxProfile) -> ReconciliationOutcome {
    Reconciler::default().reconcile(profile)
}
