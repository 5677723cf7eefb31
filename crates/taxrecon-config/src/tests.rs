//! Tests for taxrecon configuration.

use std::io::Write;

use super::*;
use taxrecon_core::{Bracket, FilingStatus};

#[test]
fn test_toml_parsing() {
    let toml = r#"
        tax_year = 2025

        [attribution]
        negligible_impact = 0.05
        residual_threshold = 2.5

        [planning]
        max_ira = 7500
        sep_cap = 70000
    "#;

    let config = ReconConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.attribution.negligible_impact, 0.05);
    assert_eq!(config.attribution.residual_threshold, 2.5);
    assert_eq!(config.planning.max_ira, 7500.0);
    assert_eq!(config.planning.sep_cap, 70000.0);
    // Unset limits keep their defaults
    assert_eq!(config.planning.max_401k, 23_500.0);
    assert!(config.rules.is_none());
    config.validate().unwrap();
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        tax_year: 2025
        attribution:
          residual_threshold: 3.0
        planning:
          bunching_margin: 2500
    "#;

    let config = ReconConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.attribution.residual_threshold, 3.0);
    assert_eq!(config.attribution.negligible_impact, 0.01);
    assert_eq!(config.planning.bunching_margin, 2500.0);
}

#[test]
fn test_empty_config_is_default() {
    let config = ReconConfig::from_toml_str("").unwrap();
    assert_eq!(config.tax_year, 2025);
    assert_eq!(config.rule_table(), RuleTable::tax_year_2025());
    assert_eq!(config.planning, PlanningLimits::default());
}

#[test]
fn test_custom_rule_table_round_trips_through_toml() {
    let mut rules = RuleTable::tax_year_2025();
    rules.standard_deduction.single = 15_750.0;
    let config = ReconConfig::new().with_rules(rules.clone());

    let text = toml::to_string(&config).unwrap();
    let parsed = ReconConfig::from_toml_str(&text).unwrap();

    parsed.validate().unwrap();
    assert_eq!(parsed.rule_table(), rules);
    assert_eq!(
        parsed.rule_table().standard_deduction(FilingStatus::Single),
        15_750.0
    );
}

#[test]
fn test_rejects_descending_brackets() {
    let mut rules = RuleTable::tax_year_2025();
    rules.brackets.head_of_household = BracketSchedule::new(vec![
        Bracket::bounded(50_000.0, 0.10),
        Bracket::bounded(40_000.0, 0.12),
        Bracket::top(0.22),
    ]);
    let config = ReconConfig::new().with_rules(rules);

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("Head of household")));
}

#[test]
fn test_rejects_bounded_top_bracket() {
    let mut rules = RuleTable::tax_year_2025();
    rules.brackets.single = BracketSchedule::new(vec![Bracket::bounded(10_000.0, 0.10)]);
    let config = ReconConfig::new().with_rules(rules);

    assert!(config.validate().is_err());
}

#[test]
fn test_rejects_rate_out_of_range() {
    let mut rules = RuleTable::tax_year_2025();
    rules.medicare.additional_rate = 1.5;
    assert!(ReconConfig::new().with_rules(rules).validate().is_err());
}

#[test]
fn test_rejects_year_mismatch() {
    let mut config = ReconConfig::new().with_rules(RuleTable::tax_year_2025());
    config.tax_year = 2026;
    assert!(config.validate().is_err());
}

#[test]
fn test_rejects_negative_threshold() {
    let config = ReconConfig::new().with_residual_threshold(-1.0);
    assert!(config.validate().is_err());
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[attribution]\nresidual_threshold = 0.5").unwrap();

    let config = ReconConfig::load(file.path()).unwrap();
    assert_eq!(config.attribution.residual_threshold, 0.5);
}

#[test]
fn test_missing_file_falls_back_to_default() {
    let config = ReconConfig::load("/nonexistent/taxrecon.toml").unwrap_or_default();
    assert_eq!(config.tax_year, 2025);
}
