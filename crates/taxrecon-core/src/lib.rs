//! taxrecon Core - Core types for federal tax reconciliation
//!
//! This crate provides the fundamental abstractions for taxrecon:
//! - Taxpayer profiles and the field catalogue used for attribution
//! - Reconciliation outcomes
//! - Versioned rule tables (brackets, deductions, credit parameters)
//! - Cent rounding helpers shared by every computation stage

pub mod error;
pub mod money;
pub mod outcome;
pub mod profile;
pub mod rules;

pub use error::{Result, TaxReconError};
pub use money::{format_cents, format_dollars, round_cents};
pub use outcome::{BalanceType, DeductionKind, ReconciliationOutcome};
pub use profile::{
    DeductionType, FieldCategory, FieldValue, FilingStatus, NormalizedProfile, ProfileField,
    TaxProfile,
};
pub use rules::{
    Bracket, BracketSchedule, ByFilingStatus, ChildCreditRules, MedicareRules, RuleTable,
    SelfEmploymentRules,
};
