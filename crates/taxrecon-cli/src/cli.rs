use std::path::PathBuf;

use clap::{Parser, Subcommand};
use taxrecon::{FieldValue, ProfileField};

pub const DEFAULT_TOP_DRIVERS: usize = 5;

#[derive(Parser, Debug)]
#[command(
    name = "taxrecon",
    version,
    about = "Reconcile tax profiles and explain refund changes"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Configuration file (TOML, or YAML by extension)"
    )]
    pub config: Option<PathBuf>,
    #[arg(short, long, global = true, help = "Log each computation step")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile one profile into a refund or balance due
    Reconcile { profile: PathBuf },
    /// Explain why the balance changed between two profiles
    Explain {
        prior: PathBuf,
        current: PathBuf,
        #[arg(long, default_value_t = DEFAULT_TOP_DRIVERS)]
        top: usize,
    },
    /// List savings strategies for a profile
    Optimize { profile: PathBuf },
    /// List the life-event presets
    LifeEvents,
    /// Simulate a life event against a profile
    LifeEvent {
        key: String,
        profile: PathBuf,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_override)]
        custom: Vec<(ProfileField, FieldValue)>,
    },
    /// Compare two profiles side by side
    Compare { a: PathBuf, b: PathBuf },
    /// Reconcile this year and list year-over-year insights
    Insights { last_year: PathBuf, this_year: PathBuf },
    /// Compare a profile against a copy with field overrides
    WhatIf {
        profile: PathBuf,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_override, required = true)]
        overrides: Vec<(ProfileField, FieldValue)>,
    },
}

/// Parses `field=value`; numbers become amounts, anything else text.
pub fn parse_override(s: &str) -> Result<(ProfileField, FieldValue), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
    let field: ProfileField = field.parse().map_err(|e| format!("{e}"))?;
    let value = value.trim();
    let value = if value.is_empty() {
        FieldValue::Absent
    } else if let Ok(amount) = value.replace(',', "").parse::<f64>() {
        FieldValue::Amount(amount)
    } else {
        FieldValue::Text(value.to_string())
    };
    Ok((field, value))
}
