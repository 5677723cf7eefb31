//! taxrecon - Tax Reconciliation in Rust
//!
//! Reconcile a return profile into a refund or balance due, then explain
//! why that balance moved between two profiles.
//!
//! # Example
//!
//! ```rust
//! use taxrecon::prelude::*;
//!
//! let prior = TaxProfile::new(FilingStatus::Single)
//!     .with_wages(70_000.0)
//!     .with_w2_withholding(11_000.0);
//! let current = prior.clone().with_wages(85_000.0).with_w2_withholding(14_000.0);
//!
//! let outcome = reconcile(&prior);
//! assert_eq!(outcome.balance, 3_986.0);
//! assert_eq!(outcome.balance_type, BalanceType::Refund);
//!
//! let result = explain(&prior, &current);
//! assert_eq!(result.total_change, -300.0);
//! ```

// Profile, outcome and rule-table types
pub use taxrecon_core::{
    format_cents, format_dollars, round_cents, BalanceType, DeductionKind, DeductionType,
    FieldCategory, FieldValue, FilingStatus, ProfileField, ReconciliationOutcome, Result,
    RuleTable, TaxProfile, TaxReconError,
};

// Configuration
pub use taxrecon_config::{AttributionConfig, ConfigError, PlanningLimits, ReconConfig};

// Reconciliation
pub use taxrecon_engine::{reconcile, Reconciler};

// Attribution
pub use taxrecon_attribution::{
    explain, narrate, AttributionResult, Direction, Driver, Explainer, NarratedAttribution,
    NarrativeRequest, Summarizer, WaterfallPolicy,
};

// Planning
pub use taxrecon_planning::{
    compare, insights, review, simulate, simulate_with, summarize_report, what_if, Insight,
    InsightKind, LifeEvent, LifeEventOutcome, LifeEventPreset, OptimizationReport, Priority,
    Recommendation, ScenarioComparison, StrategyAnalyzer, SummarizedReport, YearReview,
};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{
        BalanceType, FilingStatus, ProfileField, ReconciliationOutcome, TaxProfile,
    };
    pub use super::{explain, reconcile, AttributionResult, Explainer, Reconciler};
    pub use super::{LifeEvent, ReconConfig, StrategyAnalyzer};
}
