//! Waterfall attribution tests.

use super::*;
use taxrecon_config::AttributionConfig;
use taxrecon_core::{FieldCategory, FieldValue, FilingStatus, ProfileField, TaxProfile};
use taxrecon_engine::Reconciler;
use taxrecon_test::profiles;

fn assert_conserved_within(result: &AttributionResult, tolerance: f64) {
    let gap = (result.driver_sum() - result.total_change).abs();
    assert!(
        gap <= tolerance,
        "drivers sum to {} but total change is {}",
        result.driver_sum(),
        result.total_change
    );
}

/// Cent-rounded steps telescope, so the drivers must add up to the cent.
fn assert_conserved(result: &AttributionResult) {
    assert_conserved_within(result, 0.01);
}

#[test]
fn test_raise_with_more_withholding() {
    let result = explain(&profiles::prior_year(), &profiles::current_year());

    assert_eq!(result.prior_outcome.balance, 3_986.0);
    assert_eq!(result.current_outcome.balance, 3_686.0);
    assert_eq!(result.total_change, -300.0);
    assert_eq!(result.drivers.len(), 2);

    let wages = &result.drivers[0];
    assert_eq!(wages.field, "wages");
    assert_eq!(wages.category, FieldCategory::Income);
    assert_eq!(wages.prior_value, FieldValue::Amount(70_000.0));
    assert_eq!(wages.current_value, FieldValue::Amount(85_000.0));
    assert_eq!(wages.impact_on_balance, -3_300.0);
    assert_eq!(wages.direction, Direction::DecreasedRefund);

    let withholding = &result.drivers[1];
    assert_eq!(withholding.field, "w2_withholding");
    assert_eq!(withholding.impact_on_balance, 3_000.0);
    assert_eq!(withholding.direction, Direction::IncreasedRefund);

    assert!(result.interaction().is_none());
    assert_eq!(result.residual(), 0.0);
}

#[test]
fn test_identical_profiles_have_no_drivers() {
    for profile in [
        profiles::prior_year(),
        profiles::self_employed(),
        profiles::family(140_000.0, 12_000.0, 3),
    ] {
        let result = explain(&profile, &profile.clone());
        assert_eq!(result.total_change, 0.0);
        assert!(result.drivers.is_empty());
        assert!(result.is_unchanged());
    }
}

#[test]
fn test_filing_status_change() {
    let prior = profiles::prior_year();
    let mut current = prior.clone();
    current.filing_status = Some(FilingStatus::MarriedFilingJointly);

    let result = explain(&prior, &current);
    assert_eq!(result.total_change, 2_691.0);
    assert_eq!(result.drivers.len(), 1);

    let status = &result.drivers[0];
    assert_eq!(status.field, "filing_status");
    assert_eq!(status.category, FieldCategory::Structural);
    assert_eq!(status.current_value, FieldValue::Text("Married filing jointly".into()));
    assert!(status
        .explanation
        .starts_with("Your filing status changed from 'Single' to 'Married filing jointly'"));
}

#[test]
fn test_absent_filing_status_explained_as_single() {
    let mut prior = profiles::prior_year();
    prior.filing_status = Some(FilingStatus::MarriedFilingJointly);
    let mut current = profiles::prior_year();
    current.filing_status = None;

    let result = explain(&prior, &current);
    assert_eq!(result.total_change, -2_691.0);
    assert_eq!(
        result.drivers[0].explanation,
        "Your filing status changed from 'Married filing jointly' to 'Single', \
         which decreased your refund by ~$2,691."
    );

    let mut unset = profiles::prior_year();
    unset.filing_status = None;
    assert!(explain(&profiles::prior_year(), &unset).drivers.is_empty());
}

#[test]
fn test_new_dependent() {
    let prior = profiles::prior_year();
    let current = prior.clone().with_dependents(1);

    let result = explain(&prior, &current);
    assert_eq!(result.total_change, 2_200.0);
    let driver = result
        .driver_for(ProfileField::DependentsCount)
        .expect("dependents driver");
    assert_eq!(driver.impact_on_balance, 2_200.0);
    assert_eq!(driver.current_value, FieldValue::Count(1));
}

#[test]
fn test_unread_fields_are_negligible() {
    let prior = profiles::prior_year();
    let mut current = prior.clone();
    current.taxable_interest = Some(1_500.0);
    current.qbi_deduction = Some(2_000.0);

    let result = explain(&prior, &current);
    assert_eq!(result.total_change, 0.0);
    assert!(result.drivers.is_empty());
}

#[test]
fn test_absent_and_zero_are_unchanged() {
    let prior = profiles::single_w2(70_000.0, 11_000.0);
    let mut current = prior.clone();
    current.estimated_tax_payments = Some(0.0);
    current.dependents_count = Some(0);

    assert!(explain(&prior, &current).drivers.is_empty());
}

#[test]
fn test_drivers_sorted_by_magnitude() {
    let prior = profiles::self_employed();
    let current = profiles::family(120_000.0, 9_000.0, 2)
        .with_schedule_1_income(5_000.0)
        .with_estimated_tax_payments(2_000.0)
        .with_total_deductions(35_000.0);

    let result = explain(&prior, &current);
    assert!(result.drivers.len() > 3);
    for pair in result.drivers.windows(2) {
        assert!(pair[0].impact_on_balance.abs() >= pair[1].impact_on_balance.abs());
    }
    assert_conserved(&result);
}

#[test]
fn test_conservation_across_scenarios() {
    let pairs = [
        (profiles::prior_year(), profiles::current_year()),
        (profiles::single_w2(30_000.0, 2_000.0), profiles::family(260_000.0, 40_000.0, 3)),
        (profiles::family(90_000.0, 8_000.0, 1), profiles::self_employed()),
        (
            profiles::single_w2(210_000.0, 30_000.0).with_dependents(2),
            profiles::single_w2(195_000.0, 30_000.0).with_schedule_1_income(40_000.0),
        ),
    ];
    for (prior, current) in &pairs {
        assert_conserved(&explain(prior, current));
    }
}

#[test]
fn test_conservation_to_the_cent() {
    let statuses = [
        FilingStatus::Single,
        FilingStatus::HeadOfHousehold,
        FilingStatus::MarriedFilingJointly,
    ];
    let incomes = [0.0, 48_475.0, 215_000.0, 430_000.0];
    let side_income = [-8_000.0, 0.0, 62_500.0];

    for prior_status in statuses {
        for current_status in statuses {
            for (i, wages) in incomes.into_iter().enumerate() {
                let prior = TaxProfile::new(prior_status)
                    .with_wages(wages)
                    .with_w2_withholding(wages * 0.14)
                    .with_dependents(i as u32);
                for se in side_income {
                    let current = TaxProfile::new(current_status)
                        .with_wages(incomes[(i + 1) % incomes.len()])
                        .with_schedule_1_income(se)
                        .with_total_deductions(31_000.0)
                        .with_estimated_tax_payments(3_250.55)
                        .with_dependents(3 - i as u32);
                    assert_conserved(&explain(&prior, &current));
                }
            }
        }
    }
}

#[test]
fn test_omitted_field_lands_in_interaction() {
    let order = ProfileField::ALL
        .into_iter()
        .filter(|f| *f != ProfileField::W2Withholding);
    let explainer = Explainer::new(Reconciler::default(), WaterfallPolicy::with_order(order));

    let result = explainer.explain(&profiles::prior_year(), &profiles::current_year());
    assert_eq!(result.total_change, -300.0);
    assert_eq!(result.drivers.len(), 2);
    assert_eq!(result.drivers[0].field, "wages");

    let interaction = result.interaction().expect("interaction driver");
    assert_eq!(interaction.field, INTERACTION_FIELD);
    assert_eq!(interaction.label, "interaction effects");
    assert_eq!(interaction.category, FieldCategory::Interaction);
    assert_eq!(interaction.prior_value, FieldValue::Absent);
    assert_eq!(interaction.impact_on_balance, 3_000.0);
    assert!(interaction.explanation.contains("added ~$3,000"));
    assert!(interaction.profile_field().is_none());
    assert_conserved(&result);
}

#[test]
fn test_residual_threshold_from_config() {
    let config = AttributionConfig {
        negligible_impact: 0.01,
        residual_threshold: 5_000.0,
    };
    let policy = WaterfallPolicy::from_config(&config);
    assert_eq!(policy.negligible_impact, 0.01);
    assert_eq!(policy.residual_threshold, 5_000.0);
    assert_eq!(policy.order(), WaterfallPolicy::canonical().order());

    // Only wages are walked; the 3,000 withholding residual stays under the threshold
    let wages_only = WaterfallPolicy::with_order([ProfileField::Wages])
        .with_thresholds(policy.negligible_impact, policy.residual_threshold);
    let explainer = Explainer::new(Reconciler::default(), wages_only);

    let result = explainer.explain(&profiles::prior_year(), &profiles::current_year());
    assert_eq!(result.drivers.len(), 1);
    assert!(result.interaction().is_none());
    assert_conserved_within(&result, policy.residual_threshold);
}

#[test]
fn test_negligible_impact_from_config() {
    let config = AttributionConfig {
        negligible_impact: 5_000.0,
        residual_threshold: 1.0,
    };
    let explainer = Explainer::new(Reconciler::default(), WaterfallPolicy::from_config(&config));

    // Both steps fall under the bar but still advance the running balance
    let result = explainer.explain(&profiles::prior_year(), &profiles::current_year());
    assert_eq!(result.total_change, -300.0);
    assert!(result.drivers.is_empty());
    assert_eq!(result.residual(), 0.0);
}

#[test]
fn test_explainer_from_default_config() {
    let explainer = Explainer::from_config(&taxrecon_config::ReconConfig::default());
    assert_eq!(explainer.policy(), &WaterfallPolicy::canonical());
    assert_eq!(explainer.reconciler().rules().tax_year, 2025);
}

#[test]
fn test_explanations_are_dollar_formatted() {
    let result = explain(&profiles::prior_year(), &profiles::current_year());
    assert_eq!(
        result.drivers[0].explanation,
        "Your W-2 wages increased by $15,000 (from $70,000 to $85,000), \
         which decreased your refund by ~$3,300."
    );
    assert!(result.drivers.iter().all(|d| d.explanation.contains('$')));
}

#[test]
fn test_category_and_top_helpers() {
    let result = explain(&profiles::prior_year(), &profiles::current_year());
    assert_eq!(result.top(1).len(), 1);
    assert_eq!(result.top(10).len(), 2);
    assert_eq!(result.drivers_in(FieldCategory::Payment).count(), 1);
    assert_eq!(result.direction(), Direction::DecreasedRefund);
}

#[test]
fn test_driver_json_shape() {
    let result = explain(&profiles::prior_year(), &profiles::current_year());
    let json = serde_json::to_value(&result).expect("serialize");

    let first = &json["drivers"][0];
    assert_eq!(first["field"], "wages");
    assert_eq!(first["category"], "income");
    assert_eq!(first["direction"], "decreased_refund");
    assert_eq!(first["prior_value"], 70_000.0);
    assert_eq!(json["prior_outcome"]["type"], "refund");
}
