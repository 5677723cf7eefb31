//! Shared test fixtures for taxrecon crates.
//!
//! This crate provides profile fixtures and assertion helpers. It depends
//! only on `taxrecon-core` so every other crate can use it as a
//! dev-dependency without cycles.
//!
//! - [`profiles`] - named taxpayer profiles used across test suites
//! - [`assert_cents`] - dollar comparison tolerant to one cent
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! taxrecon-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use taxrecon_test::profiles::{prior_year, current_year};
//! ```

pub mod profiles;

pub use profiles::{current_year, prior_year, self_employed, single_w2};

/// Asserts two dollar amounts agree to within one cent.
#[track_caller]
pub fn assert_cents(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 0.01 + 1e-9,
        "expected ${expected:.2}, got ${actual:.2}"
    );
}
