//! Planning tools built on the reconciliation engine.
//!
//! Every tool here works by copying a profile, changing some fields and
//! reconciling again; nothing mutates the caller's profile.
//!
//! - [`StrategyAnalyzer`] - enumerates savings strategies in parallel
//! - [`LifeEvent`] - preset adjustments such as marriage or a new child
//! - [`compare`] / [`what_if`] - side-by-side outcome diffs
//! - [`insights`] / [`review`] - year-over-year observations
//! - [`summarize_report`] - optional prose for an optimization report
//!
//! # Example
//!
//! ```
//! use taxrecon_engine::Reconciler;
//! use taxrecon_planning::{simulate, LifeEvent};
//! use taxrecon_core::{FilingStatus, TaxProfile};
//!
//! let profile = TaxProfile::new(FilingStatus::Single)
//!     .with_wages(70_000.0)
//!     .with_w2_withholding(11_000.0);
//!
//! let outcome = simulate(&Reconciler::default(), &profile, LifeEvent::HadBaby, &[]).unwrap();
//! assert_eq!(outcome.diff.get("balance"), Some(2_200.0));
//! ```

pub mod insight;
pub mod life_event;
pub mod scenario;
pub mod strategy;
pub mod summary;

pub use insight::{insights, review, Insight, InsightKind, InsightRule, YearReview};
pub use life_event::{
    simulate, simulate_with, Adjustment, LifeEvent, LifeEventOutcome, LifeEventPreset,
};
pub use scenario::{compare, what_if, OutcomeDiff, ScenarioComparison};
pub use strategy::{OptimizationReport, Priority, Recommendation, Strategy, StrategyAnalyzer};
pub use summary::{summarize_report, SummarizedReport};
