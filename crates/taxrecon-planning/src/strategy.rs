//! Savings strategy enumeration.
//!
//! Each [`Strategy`] builds a modified copy of the profile, the copy is
//! reconciled, and the drop in total tax is the strategy's savings.
//! Strategies are independent, so they are evaluated in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use taxrecon_config::{PlanningLimits, ReconConfig};
use taxrecon_core::{
    format_cents, format_dollars, round_cents, BalanceType, FilingStatus, ReconciliationOutcome,
    TaxProfile,
};
use taxrecon_engine::Reconciler;
use tracing::{debug, info};

/// How strongly a recommendation should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One actionable suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub strategy: String,
    pub description: String,
    /// Reduction in total tax, never negative.
    pub tax_savings: f64,
    pub annual_cost: f64,
    pub priority: Priority,
}

/// Baseline outcome plus every applicable recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub current_tax: f64,
    pub current_balance: f64,
    pub current_type: BalanceType,
    /// Sorted by savings, largest first.
    pub recommendations: Vec<Recommendation>,
    pub total_potential_savings: f64,
}

/// The candidate strategies, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Max401k,
    TraditionalIra,
    Hsa,
    HeadOfHousehold,
    IncreaseWithholding,
    SepIra,
    CharitableBunching,
}

impl Strategy {
    pub const ALL: [Strategy; 7] = [
        Strategy::Max401k,
        Strategy::TraditionalIra,
        Strategy::Hsa,
        Strategy::HeadOfHousehold,
        Strategy::IncreaseWithholding,
        Strategy::SepIra,
        Strategy::CharitableBunching,
    ];
}

/// Evaluates [`Strategy::ALL`] against a profile.
///
/// # Examples
///
/// ```
/// use taxrecon_core::{FilingStatus, TaxProfile};
/// use taxrecon_planning::StrategyAnalyzer;
///
/// let profile = TaxProfile::new(FilingStatus::Single)
///     .with_wages(85_000.0)
///     .with_w2_withholding(10_000.0);
///
/// let report = StrategyAnalyzer::default().analyze(&profile);
/// assert!(report.recommendations.iter().any(|r| r.strategy == "Max Out 401(k)"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StrategyAnalyzer {
    reconciler: Reconciler,
    limits: PlanningLimits,
}

struct Context<'a> {
    profile: &'a TaxProfile,
    baseline: &'a ReconciliationOutcome,
    wages: f64,
    schedule_1_income: f64,
    status: FilingStatus,
    dependents: u32,
}

impl Context<'_> {
    /// Joint filers with dependents get family HSA coverage.
    fn hsa_limit(&self, limits: &PlanningLimits) -> f64 {
        if self.status == FilingStatus::MarriedFilingJointly && self.dependents > 0 {
            limits.max_hsa_family
        } else {
            limits.max_hsa_individual
        }
    }
}

impl StrategyAnalyzer {
    pub fn new(reconciler: Reconciler, limits: PlanningLimits) -> Self {
        Self { reconciler, limits }
    }

    pub fn from_config(config: &ReconConfig) -> Self {
        Self::new(Reconciler::from_config(config), config.planning.clone())
    }

    pub fn limits(&self) -> &PlanningLimits {
        &self.limits
    }

    pub fn analyze(&self, profile: &TaxProfile) -> OptimizationReport {
        let baseline = self.reconciler.reconcile(profile);
        let normalized = profile.normalize();
        let context = Context {
            profile,
            baseline: &baseline,
            wages: normalized.wages,
            schedule_1_income: normalized.schedule_1_income,
            status: normalized.filing_status,
            dependents: normalized.dependents_count,
        };

        let mut recommendations: Vec<Recommendation> = Strategy::ALL
            .par_iter()
            .filter_map(|strategy| self.evaluate(*strategy, &context))
            .collect();
        recommendations.sort_by(|a, b| b.tax_savings.total_cmp(&a.tax_savings));

        let total_potential_savings =
            round_cents(recommendations.iter().map(|r| r.tax_savings).sum());

        info!(
            event = "analyze_end",
            recommendations = recommendations.len(),
            total_potential_savings,
        );

        OptimizationReport {
            current_tax: baseline.total_tax,
            current_balance: baseline.balance,
            current_type: baseline.balance_type,
            recommendations,
            total_potential_savings,
        }
    }

    /// Savings from reconciling `modified` instead of the baseline.
    fn savings(&self, context: &Context<'_>, modified: &TaxProfile) -> f64 {
        let outcome = self.reconciler.reconcile(modified);
        round_cents(context.baseline.total_tax - outcome.total_tax)
    }

    fn evaluate(&self, strategy: Strategy, context: &Context<'_>) -> Option<Recommendation> {
        let limits = &self.limits;
        let recommendation = match strategy {
            Strategy::Max401k => {
                if context.wages <= limits.max_401k {
                    return None;
                }
                let modified = context
                    .profile
                    .clone()
                    .with_wages(context.wages - limits.max_401k);
                Recommendation {
                    strategy: "Max Out 401(k)".to_string(),
                    description: format!(
                        "Contribute the full {} to your employer 401(k). This reduces your \
                         taxable wages dollar-for-dollar and grows tax-deferred.",
                        format_dollars(limits.max_401k)
                    ),
                    tax_savings: self.savings(context, &modified),
                    annual_cost: limits.max_401k,
                    priority: Priority::High,
                }
            }
            Strategy::TraditionalIra => {
                if context.wages <= 0.0 {
                    return None;
                }
                let modified = context
                    .profile
                    .clone()
                    .with_wages((context.wages - limits.max_ira).max(0.0));
                Recommendation {
                    strategy: "Traditional IRA Contribution".to_string(),
                    description: format!(
                        "Contribute up to {} to a Traditional IRA for an above-the-line \
                         deduction. Check income limits for deductibility if you have an \
                         employer plan.",
                        format_dollars(limits.max_ira)
                    ),
                    tax_savings: self.savings(context, &modified),
                    annual_cost: limits.max_ira,
                    priority: Priority::High,
                }
            }
            Strategy::Hsa => {
                if context.wages <= 0.0 {
                    return None;
                }
                let hsa_limit = context.hsa_limit(limits);
                let modified = context
                    .profile
                    .clone()
                    .with_wages((context.wages - hsa_limit).max(0.0));
                Recommendation {
                    strategy: "HSA Contribution".to_string(),
                    description: format!(
                        "If you have a high-deductible health plan, contribute up to {} to an \
                         HSA. Contributions are deductible and qualified withdrawals are \
                         tax-free.",
                        format_dollars(hsa_limit)
                    ),
                    tax_savings: self.savings(context, &modified),
                    annual_cost: hsa_limit,
                    priority: Priority::High,
                }
            }
            Strategy::HeadOfHousehold => {
                if context.status != FilingStatus::Single {
                    return None;
                }
                let mut modified = context.profile.clone();
                modified.filing_status = Some(FilingStatus::HeadOfHousehold);
                Recommendation {
                    strategy: "File as Head of household".to_string(),
                    description: "If you qualify (unmarried with a dependent), filing as Head \
                                  of household gives you a higher standard deduction and wider \
                                  tax brackets."
                        .to_string(),
                    tax_savings: self.savings(context, &modified),
                    annual_cost: 0.0,
                    priority: Priority::High,
                }
            }
            Strategy::IncreaseWithholding => {
                if context.baseline.balance_type != BalanceType::Owe {
                    return None;
                }
                let owed = context.baseline.balance.abs();
                let monthly = round_cents(owed / 12.0);
                let priority = if owed > 1_000.0 {
                    Priority::High
                } else {
                    Priority::Medium
                };
                // Advice only: kept with zero savings.
                return Some(Recommendation {
                    strategy: "Increase W-4 Withholding".to_string(),
                    description: format!(
                        "You're projected to owe {}. Increase your W-4 withholding by ~{}/month \
                         to avoid a lump-sum payment and potential underpayment penalty.",
                        format_cents(owed),
                        format_cents(monthly)
                    ),
                    tax_savings: 0.0,
                    annual_cost: 0.0,
                    priority,
                });
            }
            Strategy::SepIra => {
                if context.schedule_1_income <= 0.0 {
                    return None;
                }
                let contribution =
                    (context.schedule_1_income * limits.sep_rate).min(limits.sep_cap);
                let modified = context
                    .profile
                    .clone()
                    .with_schedule_1_income(context.schedule_1_income - contribution);
                Recommendation {
                    strategy: "SEP-IRA Contribution".to_string(),
                    description: format!(
                        "As self-employed, you can contribute up to {} to a SEP-IRA. This \
                         directly reduces your self-employment income.",
                        format_dollars(contribution)
                    ),
                    tax_savings: self.savings(context, &modified),
                    annual_cost: round_cents(contribution),
                    priority: Priority::High,
                }
            }
            Strategy::CharitableBunching => {
                let standard = self.reconciler.rules().standard_deduction(context.status);
                let current = context.profile.total_deductions.unwrap_or(0.0);
                if current > standard {
                    return None;
                }
                let bunched = standard + limits.bunching_margin;
                let modified = context.profile.clone().with_total_deductions(bunched);
                let tax_savings = self.savings(context, &modified);
                Recommendation {
                    strategy: "Charitable Giving Bunching".to_string(),
                    description: format!(
                        "You're using the standard deduction ({}). Consider bunching two years \
                         of charitable donations into one year to exceed it and itemize, saving \
                         {} in that year.",
                        format_dollars(standard),
                        format_cents(tax_savings)
                    ),
                    tax_savings,
                    annual_cost: round_cents(limits.bunching_margin),
                    priority: Priority::Low,
                }
            }
        };

        debug!(
            event = "strategy",
            strategy = %recommendation.strategy,
            tax_savings = recommendation.tax_savings,
        );
        (recommendation.tax_savings > 0.0).then_some(recommendation)
    }
}
