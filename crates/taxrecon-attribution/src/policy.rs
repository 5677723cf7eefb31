//! Waterfall ordering policy.

use taxrecon_config::AttributionConfig;
use taxrecon_core::ProfileField;

/// The field order and thresholds of one attribution walk.
///
/// The canonical order follows the form: income, structural, deduction,
/// tax, credit, then payment fields. Tests and narrative text depend on it
/// staying stable. A custom order may leave fields out; their effect then
/// surfaces in the interaction residual.
///
/// # Examples
///
/// ```
/// use taxrecon_attribution::WaterfallPolicy;
/// use taxrecon_core::ProfileField;
///
/// let policy = WaterfallPolicy::canonical();
/// assert_eq!(policy.order()[0], ProfileField::Wages);
/// assert_eq!(policy.order().last(), Some(&ProfileField::EstimatedTaxPayments));
///
/// let payments_first = WaterfallPolicy::with_order([ProfileField::W2Withholding, ProfileField::Wages]);
/// assert_eq!(payments_first.omitted_fields().len(), 16);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WaterfallPolicy {
    order: Vec<ProfileField>,
    /// Marginal impacts strictly below this are consumed silently.
    pub negligible_impact: f64,
    /// Residuals at or above this become an interaction driver.
    pub residual_threshold: f64,
}

impl WaterfallPolicy {
    pub const DEFAULT_NEGLIGIBLE_IMPACT: f64 = 0.01;
    pub const DEFAULT_RESIDUAL_THRESHOLD: f64 = 1.0;

    /// Every profile field in form order.
    pub fn canonical() -> Self {
        Self::with_order(ProfileField::ALL)
    }

    /// A custom order; repeated fields keep their first position.
    pub fn with_order(order: impl IntoIterator<Item = ProfileField>) -> Self {
        let mut deduped: Vec<ProfileField> = Vec::new();
        for field in order {
            if !deduped.contains(&field) {
                deduped.push(field);
            }
        }
        Self {
            order: deduped,
            negligible_impact: Self::DEFAULT_NEGLIGIBLE_IMPACT,
            residual_threshold: Self::DEFAULT_RESIDUAL_THRESHOLD,
        }
    }

    /// Canonical order with configured thresholds.
    pub fn from_config(config: &AttributionConfig) -> Self {
        Self::canonical().with_thresholds(config.negligible_impact, config.residual_threshold)
    }

    pub fn with_thresholds(mut self, negligible_impact: f64, residual_threshold: f64) -> Self {
        self.negligible_impact = negligible_impact;
        self.residual_threshold = residual_threshold;
        self
    }

    pub fn order(&self) -> &[ProfileField] {
        &self.order
    }

    /// Fields the walk never substitutes.
    pub fn omitted_fields(&self) -> Vec<ProfileField> {
        ProfileField::ALL
            .into_iter()
            .filter(|f| !self.order.contains(f))
            .collect()
    }
}

impl Default for WaterfallPolicy {
    fn default() -> Self {
        Self::canonical()
    }
}
