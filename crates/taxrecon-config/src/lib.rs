//! Configuration system for taxrecon.
//!
//! Load rule tables and policy knobs from TOML or YAML files so a new tax
//! year or a different attribution threshold needs no code change.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use taxrecon_config::ReconConfig;
//!
//! let config = ReconConfig::from_toml_str(r#"
//!     [attribution]
//!     residual_threshold = 5.0
//!
//!     [planning]
//!     max_401k = 24000
//! "#).unwrap();
//!
//! assert_eq!(config.attribution.residual_threshold, 5.0);
//! assert_eq!(config.planning.max_401k, 24000.0);
//! assert_eq!(config.rule_table().tax_year, 2025);
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use taxrecon_config::ReconConfig;
//!
//! let config = ReconConfig::load("taxrecon.toml").unwrap_or_default();
//! // Proceeds with the built-in 2025 table if the file doesn't exist
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use taxrecon_core::{BracketSchedule, RuleTable};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main taxrecon configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ReconConfig {
    /// Tax year the configuration is meant for. Must match the rule table.
    #[serde(default = "default_tax_year")]
    pub tax_year: u16,

    /// Attribution thresholds.
    #[serde(default)]
    pub attribution: AttributionConfig,

    /// Contribution limits used by strategy enumeration and life events.
    #[serde(default)]
    pub planning: PlanningLimits,

    /// Custom rule table. Built-in 2025 table when omitted.
    #[serde(default)]
    pub rules: Option<RuleTable>,
}

fn default_tax_year() -> u16 {
    2025
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            tax_year: default_tax_year(),
            attribution: AttributionConfig::default(),
            planning: PlanningLimits::default(),
            rules: None,
        }
    }
}

impl ReconConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or
    /// fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Replaces the rule table.
    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.tax_year = rules.tax_year;
        self.rules = Some(rules);
        self
    }

    /// Sets the residual threshold for the interaction driver.
    pub fn with_residual_threshold(mut self, threshold: f64) -> Self {
        self.attribution.residual_threshold = threshold;
        self
    }

    /// Returns the configured rule table, or the built-in 2025 table.
    pub fn rule_table(&self) -> RuleTable {
        self.rules.clone().unwrap_or_default()
    }

    /// Checks table shape and threshold sanity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.attribution.validate()?;
        self.planning.validate()?;
        if let Some(rules) = &self.rules {
            if rules.tax_year != self.tax_year {
                return Err(ConfigError::Invalid(format!(
                    "tax_year {} does not match rule table year {}",
                    self.tax_year, rules.tax_year
                )));
            }
            validate_rules(rules)?;
        }
        Ok(())
    }
}

/// Attribution thresholds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AttributionConfig {
    /// Marginal impacts below this are consumed without emitting a driver.
    #[serde(default = "default_negligible_impact")]
    pub negligible_impact: f64,

    /// Residuals at or above this become an interaction driver.
    #[serde(default = "default_residual_threshold")]
    pub residual_threshold: f64,
}

fn default_negligible_impact() -> f64 {
    0.01
}

fn default_residual_threshold() -> f64 {
    1.0
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            negligible_impact: default_negligible_impact(),
            residual_threshold: default_residual_threshold(),
        }
    }
}

impl AttributionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.negligible_impact >= 0.0) || !(self.residual_threshold >= 0.0) {
            return Err(ConfigError::Invalid(
                "attribution thresholds must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// 2025 contribution limits and planning constants.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PlanningLimits {
    pub max_401k: f64,
    pub max_ira: f64,
    pub max_hsa_individual: f64,
    pub max_hsa_family: f64,
    /// SEP-IRA contribution as a share of net self-employment income.
    pub sep_rate: f64,
    pub sep_cap: f64,
    /// How far above the standard deduction bunched donations should land.
    pub bunching_margin: f64,
}

impl Default for PlanningLimits {
    fn default() -> Self {
        Self {
            max_401k: 23_500.0,
            max_ira: 7_000.0,
            max_hsa_individual: 4_300.0,
            max_hsa_family: 8_550.0,
            sep_rate: 0.25,
            sep_cap: 69_000.0,
            bunching_margin: 5_000.0,
        }
    }
}

impl PlanningLimits {
    fn validate(&self) -> Result<(), ConfigError> {
        let amounts = [
            ("max_401k", self.max_401k),
            ("max_ira", self.max_ira),
            ("max_hsa_individual", self.max_hsa_individual),
            ("max_hsa_family", self.max_hsa_family),
            ("sep_cap", self.sep_cap),
            ("bunching_margin", self.bunching_margin),
        ];
        if let Some((name, _)) = amounts.iter().find(|(_, v)| !(*v >= 0.0)) {
            return Err(ConfigError::Invalid(format!(
                "planning.{name} must be non-negative"
            )));
        }
        check_rate("planning.sep_rate", self.sep_rate)
    }
}

fn check_rate(name: &str, rate: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be within [0, 1], got {rate}"
        )))
    }
}

fn check_amount(name: &str, amount: f64) -> Result<(), ConfigError> {
    if amount >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be non-negative, got {amount}"
        )))
    }
}

fn validate_schedule(name: &str, schedule: &BracketSchedule) -> Result<(), ConfigError> {
    let brackets = schedule.brackets();
    let Some((top, lower)) = brackets.split_last() else {
        return Err(ConfigError::Invalid(format!("{name} has no brackets")));
    };
    if top.upper.is_some() {
        return Err(ConfigError::Invalid(format!(
            "{name} must end with an unbounded top bracket"
        )));
    }

    let mut previous = 0.0;
    for bracket in lower {
        let Some(upper) = bracket.upper else {
            return Err(ConfigError::Invalid(format!(
                "{name} has an unbounded bracket before the top"
            )));
        };
        if upper <= previous {
            return Err(ConfigError::Invalid(format!(
                "{name} bounds must be strictly ascending ({upper} after {previous})"
            )));
        }
        check_rate(name, bracket.rate)?;
        previous = upper;
    }
    check_rate(name, top.rate)
}

fn validate_rules(rules: &RuleTable) -> Result<(), ConfigError> {
    for (status, schedule) in rules.brackets.iter() {
        validate_schedule(&format!("brackets[{status}]"), schedule)?;
    }
    for (status, amount) in rules.standard_deduction.iter() {
        check_amount(&format!("standard_deduction[{status}]"), *amount)?;
    }

    let se = &rules.self_employment;
    check_rate("self_employment.net_earnings_factor", se.net_earnings_factor)?;
    check_rate("self_employment.social_security_rate", se.social_security_rate)?;
    check_rate("self_employment.medicare_rate", se.medicare_rate)?;
    check_rate("self_employment.deductible_fraction", se.deductible_fraction)?;
    check_amount("self_employment.social_security_wage_base", se.social_security_wage_base)?;

    check_rate("medicare.additional_rate", rules.medicare.additional_rate)?;
    for (status, amount) in rules.medicare.thresholds.iter() {
        check_amount(&format!("medicare.thresholds[{status}]"), *amount)?;
    }

    let ctc = &rules.child_credit;
    check_amount("child_credit.per_child", ctc.per_child)?;
    check_amount("child_credit.phaseout_per_step", ctc.phaseout_per_step)?;
    check_amount("child_credit.refundable_cap_per_child", ctc.refundable_cap_per_child)?;
    check_amount("child_credit.earned_income_floor", ctc.earned_income_floor)?;
    check_rate("child_credit.refundable_rate", ctc.refundable_rate)?;
    if !(ctc.phaseout_step > 0.0) {
        return Err(ConfigError::Invalid(
            "child_credit.phaseout_step must be positive".to_string(),
        ));
    }
    for (status, amount) in ctc.phaseout_thresholds.iter() {
        check_amount(&format!("child_credit.phaseout_thresholds[{status}]"), *amount)?;
    }
    Ok(())
}
