//! Explanation templates.

use num_format::{Locale, ToFormattedString};
use taxrecon_core::{format_dollars, FieldValue};

fn format_count(amount: f64) -> String {
    (amount.round() as i64).to_formatted_string(&Locale::en)
}

fn verb(amount: f64) -> &'static str {
    if amount > 0.0 {
        "increased"
    } else {
        "decreased"
    }
}

/// Explanation for one field substitution.
pub(crate) fn field_explanation(
    label: &str,
    prior: &FieldValue,
    current: &FieldValue,
    impact: f64,
) -> String {
    let impact_text = format!(
        "which {} your refund by ~{}",
        verb(impact),
        format_dollars(impact.abs())
    );

    if prior.is_text() || current.is_text() {
        return format!("Your {label} changed from '{prior}' to '{current}', {impact_text}.");
    }

    let before = prior.as_amount().unwrap_or(0.0);
    let after = current.as_amount().unwrap_or(0.0);
    let delta = after - before;
    let counted = matches!(prior, FieldValue::Count(_)) || matches!(current, FieldValue::Count(_));

    if counted {
        format!(
            "Your {label} {} by {} (from {} to {}), {impact_text}.",
            verb(delta),
            format_count(delta.abs()),
            format_count(before),
            format_count(after),
        )
    } else {
        format!(
            "Your {label} {} by {} (from {} to {}), {impact_text}.",
            verb(delta),
            format_dollars(delta.abs()),
            format_dollars(before),
            format_dollars(after),
        )
    }
}

/// Explanation for the interaction residual.
pub(crate) fn interaction_explanation(residual: f64) -> String {
    let verb = if residual > 0.0 { "added" } else { "subtracted" };
    format!(
        "Combined interaction of multiple changes {verb} ~{} to your refund.",
        format_dollars(residual.abs())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_explanation() {
        let text = field_explanation(
            "W-2 wages",
            &FieldValue::Amount(70_000.0),
            &FieldValue::Amount(85_000.0),
            -3_300.0,
        );
        assert_eq!(
            text,
            "Your W-2 wages increased by $15,000 (from $70,000 to $85,000), \
             which decreased your refund by ~$3,300."
        );
    }

    #[test]
    fn test_absent_reads_as_zero() {
        let text = field_explanation(
            "estimated tax payments",
            &FieldValue::Absent,
            &FieldValue::Amount(1_200.0),
            1_200.0,
        );
        assert!(text.contains("increased by $1,200 (from $0 to $1,200)"));
    }

    #[test]
    fn test_count_explanation_has_no_dollar_values() {
        let text = field_explanation(
            "number of dependents",
            &FieldValue::Count(0),
            &FieldValue::Count(2),
            4_400.0,
        );
        assert_eq!(
            text,
            "Your number of dependents increased by 2 (from 0 to 2), \
             which increased your refund by ~$4,400."
        );
    }

    #[test]
    fn test_textual_explanation() {
        let text = field_explanation(
            "filing status",
            &FieldValue::Text("Single".into()),
            &FieldValue::Text("Married filing jointly".into()),
            2_691.0,
        );
        assert_eq!(
            text,
            "Your filing status changed from 'Single' to 'Married filing jointly', \
             which increased your refund by ~$2,691."
        );
    }

    #[test]
    fn test_interaction_explanation() {
        assert_eq!(
            interaction_explanation(-42.4),
            "Combined interaction of multiple changes subtracted ~$42 to your refund."
        );
    }
}
