use std::fs;
use std::path::Path;

use serde::Serialize;
use taxrecon::{
    compare, review, simulate_with, what_if, Explainer, LifeEvent, ReconConfig, Reconciler,
    StrategyAnalyzer, TaxProfile,
};

use crate::cli::{Cli, Commands};
use crate::error::{CliError, CliResult};
use crate::render;

/// Runs one command and returns what should be printed.
pub fn execute(cli: &Cli) -> CliResult<String> {
    let config = load_config(cli.config.as_deref())?;
    let reconciler = Reconciler::from_config(&config);

    match &cli.command {
        Commands::Reconcile { profile } => {
            let outcome = reconciler.reconcile(&load_profile(profile)?);
            emit(cli.json, &outcome, render::outcome)
        }
        Commands::Explain {
            prior,
            current,
            top,
        } => {
            let explainer = Explainer::from_config(&config);
            let result = explainer.explain(&load_profile(prior)?, &load_profile(current)?);
            emit(cli.json, &result, |r| render::attribution(r, *top))
        }
        Commands::Optimize { profile } => {
            let report = StrategyAnalyzer::from_config(&config).analyze(&load_profile(profile)?);
            emit(cli.json, &report, render::report)
        }
        Commands::LifeEvents => emit(cli.json, &LifeEvent::all(), |presets| {
            render::presets(presets)
        }),
        Commands::LifeEvent {
            key,
            profile,
            custom,
        } => {
            let event = LifeEvent::from_key(key)?;
            let outcome = simulate_with(
                &reconciler,
                &config.planning,
                &load_profile(profile)?,
                event,
                custom,
            )?;
            emit(cli.json, &outcome, render::life_event)
        }
        Commands::Compare { a, b } => {
            let comparison = compare(&reconciler, &load_profile(a)?, &load_profile(b)?);
            emit(cli.json, &comparison, render::comparison)
        }
        Commands::Insights {
            last_year,
            this_year,
        } => {
            let reviewed = review(
                &reconciler,
                &load_profile(last_year)?,
                &load_profile(this_year)?,
            );
            emit(cli.json, &reviewed, render::review)
        }
        Commands::WhatIf { profile, overrides } => {
            let comparison = what_if(&reconciler, &load_profile(profile)?, overrides)?;
            emit(cli.json, &comparison, render::comparison)
        }
    }
}

fn emit<T: Serialize + ?Sized>(
    json: bool,
    value: &T,
    human: impl FnOnce(&T) -> String,
) -> CliResult<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(human(value))
    }
}

fn load_config(path: Option<&Path>) -> CliResult<ReconConfig> {
    let Some(path) = path else {
        return Ok(ReconConfig::default());
    };
    let yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    if yaml {
        let config = ReconConfig::from_yaml_file(path)?;
        config.validate()?;
        Ok(config)
    } else {
        Ok(ReconConfig::load(path)?)
    }
}

fn load_profile(path: &Path) -> CliResult<TaxProfile> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliError::Profile {
        path: path.to_path_buf(),
        source,
    })
}
