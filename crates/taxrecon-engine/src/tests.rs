//! Tests for the full reconciliation pipeline.

use super::*;
use taxrecon_core::{BalanceType, DeductionKind, FilingStatus, RuleTable, TaxProfile};
use taxrecon_test::{assert_cents, profiles};

#[test]
fn test_empty_profile_is_zero_refund() {
    let outcome = reconcile(&TaxProfile::default());
    assert_eq!(outcome.filing_status, FilingStatus::Single);
    assert_eq!(outcome.agi, 0.0);
    assert_eq!(outcome.taxable_income, 0.0);
    assert_eq!(outcome.total_tax, 0.0);
    assert_eq!(outcome.balance, 0.0);
    assert_eq!(outcome.balance_type, BalanceType::Refund);
}

#[test]
fn test_self_employed_scenario() {
    let outcome = reconcile(&profiles::self_employed());

    // 20,000 x 0.9235 at the combined 15.3% rate
    assert_cents(outcome.self_employment_tax, 18_470.0 * 0.153);
    assert_cents(outcome.agi, 70_000.0 - outcome.self_employment_tax / 2.0);
    // 15,000 supplied equals the Single standard deduction
    assert_eq!(outcome.deduction_used, 15_000.0);
    assert_cents(outcome.taxable_income, 53_587.04);
    assert_cents(outcome.income_tax, 6_703.15);
    assert_cents(outcome.tax_before_credits, 9_529.06);
    assert_eq!(outcome.total_payments, 8_500.0);
    assert_cents(outcome.balance, -1_029.06);
    assert_eq!(outcome.balance_type, BalanceType::Owe);
}

#[test]
fn test_bracket_boundary_through_pipeline() {
    // 26,925 wages - 15,000 standard deduction = 11,925 taxable
    let outcome = reconcile(&profiles::single_w2(26_925.0, 0.0));
    assert_eq!(outcome.taxable_income, 11_925.0);
    assert_eq!(outcome.income_tax, 1_192.50);
    assert_eq!(outcome.total_tax, 1_192.50);
    assert_eq!(outcome.balance, -1_192.50);
}

#[test]
fn test_greater_deduction_wins() {
    let below_standard = profiles::single_w2(60_000.0, 0.0).with_total_deductions(9_000.0);
    let outcome = reconcile(&below_standard);
    assert_eq!(outcome.deduction_used, 15_000.0);
    assert_eq!(outcome.deduction_kind, DeductionKind::Standard);

    let above_standard = profiles::single_w2(60_000.0, 0.0).with_total_deductions(21_000.0);
    let outcome = reconcile(&above_standard);
    assert_eq!(outcome.deduction_used, 21_000.0);
    assert_eq!(outcome.deduction_kind, DeductionKind::Itemized);
    assert_eq!(outcome.taxable_income, 39_000.0);
}

#[test]
fn test_taxable_income_floored_at_zero() {
    let cases = [
        profiles::single_w2(0.0, 0.0),
        profiles::single_w2(9_000.0, 100.0),
        TaxProfile::new(FilingStatus::MarriedFilingJointly).with_schedule_1_income(-40_000.0),
        profiles::single_w2(-5_000.0, 0.0).with_total_deductions(80_000.0),
    ];
    for profile in &cases {
        assert!(reconcile(profile).taxable_income >= 0.0);
    }
}

#[test]
fn test_unrecognized_status_uses_single_tables() {
    let mut lenient = TaxProfile::default().with_wages(80_000.0);
    lenient.filing_status = Some(FilingStatus::parse("Surviving spouse"));
    let single = profiles::single_w2(80_000.0, 0.0);
    assert_eq!(reconcile(&lenient).total_tax, reconcile(&single).total_tax);

    let absent = TaxProfile::default().with_wages(80_000.0);
    assert_eq!(reconcile(&absent).total_tax, reconcile(&single).total_tax);
}

#[test]
fn test_wages_monotonically_raise_total_tax() {
    for base in [profiles::single_w2(0.0, 0.0), profiles::family(0.0, 0.0, 2)] {
        let mut previous = f64::MIN;
        for step in 0..=90 {
            let wages = f64::from(step) * 5_000.0;
            let outcome = reconcile(&base.clone().with_wages(wages));
            assert!(
                outcome.total_tax >= previous,
                "total tax fell at wages {wages}"
            );
            previous = outcome.total_tax;
        }
    }
}

#[test]
fn test_payments_strictly_raise_balance() {
    let base = profiles::self_employed();
    let before = reconcile(&base).balance;

    let more_withholding = reconcile(&base.clone().with_w2_withholding(9_000.0)).balance;
    let more_estimates = reconcile(&base.clone().with_estimated_tax_payments(250.0)).balance;

    assert_cents(more_withholding - before, 1_000.0);
    assert_cents(more_estimates - before, 250.0);
}

#[test]
fn test_reconcile_is_deterministic() {
    let profile = profiles::family(180_000.0, 21_000.0, 3).with_schedule_1_income(12_345.67);
    let first = reconcile(&profile);
    let second = reconcile(&profile);
    assert_eq!(first, second);
    assert_eq!(first.balance.to_bits(), second.balance.to_bits());
}

#[test]
fn test_balance_type_matches_sign() {
    for withholding in [0.0, 7_014.0, 20_000.0] {
        let outcome = reconcile(&profiles::single_w2(70_000.0, withholding));
        assert_eq!(outcome.balance_type == BalanceType::Refund, outcome.balance >= 0.0);
    }
    // Exactly even is a refund of zero
    assert_eq!(
        reconcile(&profiles::single_w2(70_000.0, 7_014.0)).balance_type,
        BalanceType::Refund
    );
}

#[test]
fn test_child_credit_reduces_tax_then_refunds() {
    let outcome = reconcile(&profiles::family(60_000.0, 0.0, 2));
    // 30,000 taxable at MFJ rates: 2,385 + 6,150 x 12%
    assert_eq!(outcome.tax_before_credits, 3_123.0);
    assert_eq!(outcome.nonrefundable_child_credit, 3_123.0);
    assert_eq!(outcome.total_tax, 0.0);
    // 4,400 - 3,123 left, under both the earned-income and per-child caps
    assert_eq!(outcome.additional_child_credit, 1_277.0);
    assert_eq!(outcome.child_tax_credit_total, 4_400.0);
    assert_eq!(outcome.balance, 1_277.0);
}

#[test]
fn test_child_credit_phaseout_one_dollar_over() {
    // AGI 200,001 for a Single filer with one child
    let profile = profiles::single_w2(200_001.0, 0.0).with_dependents(1);
    let outcome = reconcile(&profile);
    assert_eq!(outcome.agi, 200_001.0);
    assert_eq!(outcome.child_tax_credit_total, 2_150.0);
}

#[test]
fn test_child_credit_override() {
    let profile = profiles::single_w2(70_000.0, 11_000.0)
        .with_dependents(4)
        .with_child_tax_credit(1_000.0);
    let outcome = reconcile(&profile);
    assert_eq!(outcome.nonrefundable_child_credit, 1_000.0);
    assert_eq!(outcome.additional_child_credit, 0.0);
    assert_eq!(outcome.total_tax, 6_014.0);
}

#[test]
fn test_additional_medicare_in_liability() {
    let outcome = reconcile(&profiles::single_w2(250_000.0, 0.0));
    assert_eq!(outcome.additional_medicare_tax, 450.0);
    assert_cents(
        outcome.tax_before_credits,
        outcome.income_tax + outcome.additional_medicare_tax,
    );
}

#[test]
fn test_schedule_3_counts_as_payment() {
    let base = profiles::single_w2(70_000.0, 11_000.0);
    let with_credit = base.clone().with_schedule_3_total(500.0);
    assert_eq!(
        reconcile(&with_credit).balance - reconcile(&base).balance,
        500.0
    );
}

#[test]
fn test_injected_table_changes_result() {
    let mut rules = RuleTable::tax_year_2025();
    rules.standard_deduction.single = 0.0;
    let reconciler = Reconciler::with_rules(rules);

    let outcome = reconciler.reconcile(&profiles::single_w2(11_925.0, 0.0));
    assert_eq!(outcome.taxable_income, 11_925.0);
    assert_eq!(outcome.total_tax, 1_192.50);
}

#[test]
fn test_reconciler_from_config() {
    let config = taxrecon_config::ReconConfig::default();
    let reconciler = Reconciler::from_config(&config);
    assert_eq!(reconciler.rules().tax_year, 2025);
}
